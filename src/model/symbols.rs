//! Symbolic enum tables shared by the serializer and the parser
//!
//! Every enum that crosses the text boundary owns exactly one ordinal <-> name
//! table. The serializer renders members as `Blueprint.<Enum>.<Member>` and the
//! resolver maps the same dotted names back to ordinals.

use serde::{Deserialize, Serialize};

/// Root namespace of every qualified identifier in the exported text
pub const NAMESPACE: &str = "Blueprint";

/// The call expression the parser extracts from arbitrary text
pub const CALL_MARKER: &str = "Blueprint.Build";

/// Second path segment of a localization accessor (`Blueprint.stringkeys.<key>`)
pub const STRING_KEYS: &str = "stringkeys";

/// Bidirectional ordinal <-> member name table for one enum
#[derive(Debug, PartialEq, Eq)]
pub struct EnumTable {
    /// Enum name as it appears in qualified identifiers
    pub name: &'static str,
    /// Member names, indexed by ordinal
    pub members: &'static [&'static str],
}

impl EnumTable {
    /// Member name for an ordinal, if the ordinal is mapped
    pub fn name_of(&self, ordinal: i64) -> Option<&'static str> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| self.members.get(i).copied())
    }

    /// Ordinal for a member name
    pub fn ordinal_of(&self, member: &str) -> Option<i64> {
        self.members
            .iter()
            .position(|m| *m == member)
            .and_then(|i| i64::try_from(i).ok())
    }

    /// Render an ordinal as `Blueprint.<Enum>.<Member>`, or the raw integer
    /// when the ordinal has no member.
    pub fn qualified(&self, ordinal: i64) -> String {
        match self.name_of(ordinal) {
            Some(member) => format!("{}.{}.{}", NAMESPACE, self.name, member),
            None => ordinal.to_string(),
        }
    }
}

/// Common behaviour of every enum backed by an [`EnumTable`]
pub trait SymbolEnum: Copy + Sized + 'static {
    /// The shared symbol table
    const TABLE: &'static EnumTable;

    fn ordinal(self) -> i64;

    fn from_ordinal(ordinal: i64) -> Option<Self>;

    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;

    /// Qualified dotted name, e.g. `Blueprint.Anchor.TopLeft`
    fn qualified(self) -> String {
        Self::TABLE.qualified(self.ordinal())
    }
}

macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $table:literal {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All members in ordinal order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl SymbolEnum for $name {
            const TABLE: &'static EnumTable = &EnumTable {
                name: $table,
                members: &[$(stringify!($variant)),+],
            };

            fn ordinal(self) -> i64 {
                self as i64
            }

            fn from_ordinal(ordinal: i64) -> Option<Self> {
                usize::try_from(ordinal)
                    .ok()
                    .and_then(|i| Self::ALL.get(i).copied())
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(SymbolEnum::name(*self))
            }
        }
    };
}

symbol_enum! {
    /// Widget type of a node
    pub enum ElementKind as "ElementType" {
        Container,
        Text,
        Image,
        Button,
    }
}

symbol_enum! {
    /// One of the nine reference points on a 3x3 grid over a box
    pub enum Anchor as "Anchor" {
        TopLeft,
        TopCenter,
        TopRight,
        MiddleLeft,
        MiddleCenter,
        MiddleRight,
        BottomLeft,
        BottomCenter,
        BottomRight,
    }
}

symbol_enum! {
    /// How a node's background is filled
    pub enum FillStyle as "FillStyle" {
        Solid,
        Rounded,
        Outline,
        None,
    }
}

symbol_enum! {
    /// Source kind of an image node
    pub enum ImageKind as "ImageKind" {
        Sprite,
        Texture,
        Icon,
    }
}

symbol_enum! {
    /// Alignment of text inside a text node
    pub enum TextAnchor as "TextAnchor" {
        TopLeft,
        TopCenter,
        TopRight,
        MiddleLeft,
        MiddleCenter,
        MiddleRight,
        BottomLeft,
        BottomCenter,
        BottomRight,
    }
}

/// Every enum table recognized under the root namespace
pub const ENUM_TABLES: &[&EnumTable] = &[
    ElementKind::TABLE,
    Anchor::TABLE,
    FillStyle::TABLE,
    ImageKind::TABLE,
    TextAnchor::TABLE,
];

/// Find an enum table by its qualified-identifier name
pub fn enum_table(name: &str) -> Option<&'static EnumTable> {
    ENUM_TABLES.iter().copied().find(|t| t.name == name)
}
