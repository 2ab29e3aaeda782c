#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `FOLIO_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
folio demo: render a JSON document tree as one terminal frame

USAGE:
    folio-demo [OPTIONS] [FILE]

    FILE is a JSON document tree. Without it a built-in sample is shown.

OPTIONS:
    --width=N            Frame width in columns (default: terminal width or 80)
    --height=N           Frame height in rows (default: terminal height or 24)
    --scroll=N           First document row shown (default: 0)
    --theme=NAME         dark, light, monochrome or solarized (default: auto)
    --overlay=KIND       Draw an overlay on top of the page
    --no-justify         Left-align paragraphs instead of justifying them
    --help, -h           Show this help message
    --version, -V        Show version

OVERLAYS:
    toc        Table of contents
    links      Index of every link
    labels     Jump labels over visible links
    inputs     Jump labels over visible inputs
    buffers    Open buffer list

ENVIRONMENT VARIABLES:
    FOLIO_DEMO_WIDTH       Override --width
    FOLIO_DEMO_HEIGHT      Override --height
    FOLIO_DEMO_THEME       Override --theme
    FOLIO_LOG              Log filter written to stderr (default: warn)";

/// Overlay drawn after the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Toc,
    Links,
    Labels,
    Inputs,
    Buffers,
}

impl OverlayKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "toc" => Some(Self::Toc),
            "links" => Some(Self::Links),
            "labels" => Some(Self::Labels),
            "inputs" => Some(Self::Inputs),
            "buffers" => Some(Self::Buffers),
            _ => None,
        }
    }
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Frame width; `None` means the terminal width.
    pub width: Option<u16>,
    /// Frame height; `None` means the terminal height.
    pub height: Option<u16>,
    pub scroll: usize,
    /// Theme preset name; `None` picks dark or light from the terminal.
    pub theme: Option<String>,
    pub overlay: Option<OverlayKind>,
    pub justify: bool,
    /// Document file; `None` renders the built-in sample.
    pub file: Option<String>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            scroll: 0,
            theme: None,
            overlay: None,
            justify: true,
            file: None,
        }
    }
}

/// What the arguments asked for.
#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version` or invalid input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(Parsed::Run(opts)) => opts,
            Ok(Parsed::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Parsed::Version) => {
                println!("folio-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with `var` looking up environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse_from<F>(args: &[String], var: F) -> Result<Parsed, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = var("FOLIO_DEMO_WIDTH")
            && let Ok(n) = val.parse()
        {
            opts.width = Some(n);
        }
        if let Some(val) = var("FOLIO_DEMO_HEIGHT")
            && let Ok(n) = val.parse()
        {
            opts.height = Some(n);
        }
        if let Some(val) = var("FOLIO_DEMO_THEME") {
            opts.theme = Some(val);
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Parsed::Help),
                "--version" | "-V" => return Ok(Parsed::Version),
                "--no-justify" => opts.justify = false,
                other => {
                    if let Some(val) = other.strip_prefix("--width=") {
                        opts.width = Some(number(val, "--width")?);
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        opts.height = Some(number(val, "--height")?);
                    } else if let Some(val) = other.strip_prefix("--scroll=") {
                        opts.scroll = number(val, "--scroll")?;
                    } else if let Some(val) = other.strip_prefix("--theme=") {
                        opts.theme = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--overlay=") {
                        opts.overlay = Some(
                            OverlayKind::parse(val)
                                .ok_or_else(|| format!("Invalid --overlay value: {val}"))?,
                        );
                    } else if other.starts_with('-') {
                        return Err(format!("Unknown argument: {other}"));
                    } else if opts.file.is_none() {
                        opts.file = Some(other.to_string());
                    } else {
                        return Err(format!("Unexpected extra file: {other}"));
                    }
                }
            }
        }

        Ok(Parsed::Run(opts))
    }
}

fn number<T: std::str::FromStr>(val: &str, flag: &str) -> Result<T, String> {
    val.parse()
        .map_err(|_| format!("Invalid {flag} value: {val}"))
}
