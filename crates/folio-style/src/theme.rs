#![forbid(unsafe_code)]

//! Theme system with semantic style slots.
//!
//! A [`Theme`] maps document roles (heading, link, quote bar, overlay
//! label) to concrete [`Style`]s. It is a plain value: the renderer and
//! every overlay function take it as an argument, so two renderers can
//! use different themes side by side.
//!
//! # Example
//! ```
//! use folio_style::Theme;
//!
//! let theme = Theme::by_name("light").unwrap_or_default();
//! assert_eq!(theme.name, "light");
//! assert!(Theme::preset_names().contains(&"solarized"));
//! ```

use std::env;

use folio_render::{Color, Style};

/// The handful of colors a preset is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Body text.
    pub text: Color,
    /// Secondary text: numbers, rules, details.
    pub muted: Color,
    /// Headings.
    pub heading: Color,
    /// Hyperlinks.
    pub link: Color,
    /// Inline and block code.
    pub code: Color,
    /// Borders of overlays and tables.
    pub border: Color,
    /// Background of overlay boxes.
    pub surface: Color,
    /// Typed portion of a jump label.
    pub highlight: Color,
    /// Untyped remainder of a jump label.
    pub accent: Color,
}

/// A theme with semantic style slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Preset name (`"custom"` for hand-built themes).
    pub name: &'static str,

    // Document content
    /// Paragraph and list text.
    pub text: Style,
    /// Level-1 headings.
    pub heading1: Style,
    /// Level-2 headings.
    pub heading2: Style,
    /// Level-3 headings.
    pub heading3: Style,
    /// Section numbers beside headings.
    pub heading_number: Style,
    /// Hyperlinks.
    pub link: Style,
    /// Inline code and code blocks.
    pub code: Style,
    /// Blockquote text.
    pub quote: Style,
    /// Vertical bar beside blockquotes.
    pub quote_bar: Style,
    /// Horizontal rules.
    pub rule: Style,
    /// Table borders.
    pub table_border: Style,
    /// Table header cells.
    pub table_header: Style,
    /// Form text fields.
    pub input: Style,
    /// Form submit buttons.
    pub button: Style,

    // Overlays
    pub overlay_border: Style,
    pub overlay_title: Style,
    pub overlay_text: Style,
    /// Secondary column (URLs, heading numbers).
    pub overlay_detail: Style,
    pub label_typed: Style,
    pub label_rest: Style,
    pub scroll_indicator: Style,
    /// Generic de-emphasis.
    pub dim: Style,
}

impl Default for Theme {
    fn default() -> Self {
        themes::dark()
    }
}

impl Theme {
    /// Names accepted by [`by_name`](Self::by_name).
    #[must_use]
    pub const fn preset_names() -> &'static [&'static str] {
        &["dark", "light", "monochrome", "solarized"]
    }

    /// Look up a preset by name, case-insensitively.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(themes::dark()),
            "light" => Some(themes::light()),
            "monochrome" | "mono" => Some(themes::monochrome()),
            "solarized" => Some(themes::solarized()),
            _ => None,
        }
    }

    /// The dark or light preset, whichever the terminal background suggests.
    #[must_use]
    pub fn auto() -> Self {
        if Self::detect_dark_mode() {
            themes::dark()
        } else {
            themes::light()
        }
    }

    /// Detect whether dark mode should be used.
    ///
    /// Reads `COLORFGBG` (`"fg;bg"`); defaults to dark.
    #[must_use]
    pub fn detect_dark_mode() -> bool {
        Self::detect_dark_mode_from_colorfgbg(env::var("COLORFGBG").ok().as_deref())
    }

    fn detect_dark_mode_from_colorfgbg(colorfgbg: Option<&str>) -> bool {
        if let Some(colorfgbg) = colorfgbg
            && let Some(bg_part) = colorfgbg.split(';').next_back()
            && let Ok(bg) = bg_part.trim().parse::<u8>()
        {
            // 7 and 15 are the white backgrounds.
            return bg != 7 && bg != 15;
        }
        true
    }

    /// Build every slot from a palette.
    #[must_use]
    pub fn from_palette(name: &'static str, p: &Palette) -> Self {
        let text = Style::new().fg(p.text);
        let muted = Style::new().fg(p.muted);
        Self {
            name,
            text,
            heading1: Style::new().fg(p.heading).bold().underline(),
            heading2: Style::new().fg(p.heading).bold(),
            heading3: Style::new().fg(p.heading).bold(),
            heading_number: muted.dim(),
            link: Style::new().fg(p.link).underline(),
            code: Style::new().fg(p.code),
            quote: muted.dim(),
            quote_bar: Style::new().fg(p.border),
            rule: muted,
            table_border: Style::new().fg(p.border),
            table_header: text.bold(),
            input: text.underline(),
            button: text.reverse(),
            overlay_border: Style::new().fg(p.border).bg(p.surface),
            overlay_title: Style::new().fg(p.heading).bg(p.surface).bold(),
            overlay_text: text.bg(p.surface),
            overlay_detail: muted.bg(p.surface),
            label_typed: Style::new().fg(p.highlight).bg(p.surface).bold(),
            label_rest: Style::new().fg(p.accent).bg(p.surface).bold(),
            scroll_indicator: muted.bg(p.surface),
            dim: muted.dim(),
        }
    }
}

/// Built-in theme presets.
pub mod themes {
    use super::*;

    /// Dark theme (the default).
    #[must_use]
    pub fn dark() -> Theme {
        Theme::from_palette(
            "dark",
            &Palette {
                text: Color::rgb(230, 237, 243),
                muted: Color::rgb(139, 148, 158),
                heading: Color::rgb(88, 166, 255),
                link: Color::rgb(121, 192, 255),
                code: Color::rgb(255, 166, 87),
                border: Color::rgb(72, 79, 88),
                surface: Color::rgb(22, 27, 34),
                highlight: Color::rgb(255, 123, 114),
                accent: Color::rgb(210, 153, 34),
            },
        )
    }

    /// Light theme.
    #[must_use]
    pub fn light() -> Theme {
        Theme::from_palette(
            "light",
            &Palette {
                text: Color::rgb(31, 35, 40),
                muted: Color::rgb(101, 109, 118),
                heading: Color::rgb(9, 105, 218),
                link: Color::rgb(5, 80, 174),
                code: Color::rgb(149, 56, 0),
                border: Color::rgb(208, 215, 222),
                surface: Color::rgb(246, 248, 250),
                highlight: Color::rgb(207, 34, 46),
                accent: Color::rgb(130, 80, 223),
            },
        )
    }

    /// Solarized (dark variant).
    #[must_use]
    pub fn solarized() -> Theme {
        Theme::from_palette(
            "solarized",
            &Palette {
                text: Color::rgb(131, 148, 150),
                muted: Color::rgb(88, 110, 117),
                heading: Color::rgb(38, 139, 210),
                link: Color::rgb(42, 161, 152),
                code: Color::rgb(203, 75, 22),
                border: Color::rgb(7, 54, 66),
                surface: Color::rgb(0, 43, 54),
                highlight: Color::rgb(220, 50, 47),
                accent: Color::rgb(181, 137, 0),
            },
        )
    }

    /// Attributes only, no colors. Suitable for `NO_COLOR` terminals.
    #[must_use]
    pub fn monochrome() -> Theme {
        let plain = Style::new();
        Theme {
            name: "monochrome",
            text: plain,
            heading1: plain.bold().underline(),
            heading2: plain.bold(),
            heading3: plain.bold(),
            heading_number: plain.dim(),
            link: plain.underline(),
            code: plain,
            quote: plain.dim(),
            quote_bar: plain,
            rule: plain.dim(),
            table_border: plain,
            table_header: plain.bold(),
            input: plain.underline(),
            button: plain.reverse(),
            overlay_border: plain,
            overlay_title: plain.bold(),
            overlay_text: plain,
            overlay_detail: plain.dim(),
            label_typed: plain.reverse().bold(),
            label_rest: plain.reverse(),
            scroll_indicator: plain.dim(),
            dim: plain.dim(),
        }
    }
}
