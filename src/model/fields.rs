//! Record field names of the text encoding

pub const NAME: &str = "name";
pub const TYPE: &str = "type";
pub const POSITION: &str = "position";
pub const SIZE: &str = "size";
pub const ANCHOR: &str = "anchor";
pub const VISIBLE: &str = "visible";
pub const PADDING: &str = "padding";
pub const BACKGROUND_COLOR: &str = "backgroundColor";
pub const BACKGROUND_ALPHA: &str = "backgroundAlpha";
pub const FILL_STYLE: &str = "fillStyle";
pub const LOCKED: &str = "locked";

// Text
pub const LABEL: &str = "label";
pub const TEXT_COLOR: &str = "textColor";
pub const TEXT_ALPHA: &str = "textAlpha";
pub const TEXT_SIZE: &str = "textSize";
pub const TEXT_ANCHOR: &str = "textAnchor";

// Image
pub const IMAGE_KIND: &str = "imageKind";
pub const IMAGE_COLOR: &str = "imageColor";
pub const IMAGE_ALPHA: &str = "imageAlpha";

// Button
pub const BUTTON_COLOR: &str = "buttonColor";
pub const BUTTON_ALPHA: &str = "buttonAlpha";
pub const DISABLED_COLOR: &str = "disabledColor";
pub const DISABLED_ALPHA: &str = "disabledAlpha";
pub const PRESSED_COLOR: &str = "pressedColor";
pub const PRESSED_ALPHA: &str = "pressedAlpha";
pub const HOVER_COLOR: &str = "hoverColor";
pub const HOVER_ALPHA: &str = "hoverAlpha";
pub const FOCUSED_COLOR: &str = "focusedColor";
pub const FOCUSED_ALPHA: &str = "focusedAlpha";
pub const ENABLED: &str = "enabled";

pub const CHILDREN: &str = "children";

/// Color/alpha field pairs of a button, in emission order
pub const BUTTON_STATES: [(&str, &str); 5] = [
    (BUTTON_COLOR, BUTTON_ALPHA),
    (DISABLED_COLOR, DISABLED_ALPHA),
    (PRESSED_COLOR, PRESSED_ALPHA),
    (HOVER_COLOR, HOVER_ALPHA),
    (FOCUSED_COLOR, FOCUSED_ALPHA),
];
