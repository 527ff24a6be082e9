//! UI Blueprint CLI
//!
//! Usage:
//!   ui-blueprint [OPTIONS] <COMMAND>
//!
//! Commands:
//!   export   Convert a JSON tree snapshot to Blueprint.Build(...) code
//!   import   Parse code into a JSON tree snapshot
//!   bounds   Print the absolute bounds of every node in a snapshot
//!
//! Options:
//!   -v, --verbose  Increase log output on stderr (repeatable)
//!   -h, --help     Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

use ui_blueprint::{
    compute_all_bounds, export, import_into, CanvasConfig, ElementTree, ExportConfig,
    ImportConfig, ImportMode, NodeDefaults, SerializerConfig, StringTable,
};

#[derive(Parser)]
#[command(name = "ui-blueprint")]
#[command(about = "Convert UI widget trees to and from Blueprint.Build code")]
struct Cli {
    /// Increase log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a JSON tree snapshot to code
    Export {
        /// Snapshot file (reads from stdin if not provided)
        input: Option<PathBuf>,

        /// Existing string table (JSON) used to emit label references
        #[arg(short, long)]
        strings: Option<PathBuf>,

        /// Write the collected string table (JSON) to this file
        #[arg(long)]
        strings_out: Option<PathBuf>,

        /// Emit one declaration with one argument per root
        #[arg(short, long)]
        combined: bool,

        /// Indentation unit
        #[arg(long, default_value = "    ")]
        indent: String,
    },

    /// Parse code into a JSON tree snapshot
    Import {
        /// Code file (reads from stdin if not provided)
        input: Option<PathBuf>,

        /// Default table (TOML) used to backfill missing fields
        #[arg(short, long)]
        defaults: Option<PathBuf>,

        /// String table (JSON) used to resolve label references
        #[arg(short, long)]
        strings: Option<PathBuf>,

        /// Append the parsed roots to this snapshot instead of starting empty
        #[arg(short, long)]
        append_to: Option<PathBuf>,
    },

    /// Print absolute bounds for every node in a snapshot
    Bounds {
        /// Snapshot file (reads from stdin if not provided)
        input: Option<PathBuf>,

        /// Canvas width
        #[arg(long, default_value_t = 1920.0)]
        width: f64,

        /// Canvas height
        #[arg(long, default_value_t = 1080.0)]
        height: f64,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Export {
            input,
            strings,
            strings_out,
            combined,
            indent,
        } => {
            let tree: ElementTree = read_json(input.as_deref(), "snapshot");
            let localization: StringTable = match &strings {
                Some(path) => read_json(Some(path), "string table"),
                None => StringTable::new(),
            };
            let config = ExportConfig::new()
                .with_serializer(SerializerConfig::new().with_indent(indent))
                .with_localization(localization)
                .with_combined(combined);

            let exported = export(&tree, &config);
            if let Some(path) = &strings_out {
                write_json(path, &exported.strings);
            }
            print!("{}", exported.code);
        }

        Command::Import {
            input,
            defaults,
            strings,
            append_to,
        } => {
            let defaults = match &defaults {
                Some(path) => match NodeDefaults::from_file(path) {
                    Ok(d) => d,
                    Err(e) => fail(&format!(
                        "Error loading defaults '{}': {}",
                        path.display(),
                        e
                    )),
                },
                None => NodeDefaults::default(),
            };
            let mut config = ImportConfig::new().with_defaults(defaults.clone());
            if let Some(path) = &strings {
                config = config.with_string_table(read_json(Some(path), "string table"));
            }

            let (mut tree, mode) = match &append_to {
                Some(path) => (read_json(Some(path), "snapshot"), ImportMode::Append),
                None => (ElementTree::with_defaults(defaults), ImportMode::Replace),
            };

            let source = read_input(input.as_deref());
            let filename = input
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<stdin>".to_string());

            match import_into(&mut tree, &source, mode, &config) {
                Ok(roots) => {
                    debug!(roots = roots.len(), "adopted roots");
                    print_json(&tree);
                }
                Err(e) => {
                    eprint!("{}", e.format(&source, &filename));
                    std::process::exit(1);
                }
            }
        }

        Command::Bounds {
            input,
            width,
            height,
        } => {
            let tree: ElementTree = read_json(input.as_deref(), "snapshot");
            let canvas = CanvasConfig::new().with_size(width, height);
            print_json(&compute_all_bounds(&tree, &canvas));
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

/// Read a file, or stdin when no path is given
fn read_input(path: Option<&Path>) -> String {
    match path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => fail(&format!("Error reading file '{}': {}", path.display(), e)),
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => fail(&format!("Error reading from stdin: {}", e)),
            }
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: Option<&Path>, what: &str) -> T {
    let content = read_input(path);
    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(&format!("Error parsing {}: {}", what, e)),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) {
    let written = serde_json::to_string_pretty(value)
        .map_err(io::Error::other)
        .and_then(|json| fs::write(path, json));
    if let Err(e) = written {
        fail(&format!("Error writing '{}': {}", path.display(), e));
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(&format!("Error encoding JSON: {}", e)),
    }
}
