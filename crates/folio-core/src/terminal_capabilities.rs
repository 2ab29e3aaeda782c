#![forbid(unsafe_code)]

//! Terminal capability detection.
//!
//! Folio only needs to know two things about the output terminal: how
//! many colors it can show and whether it understands OSC 8 hyperlinks.
//! Both are derived from environment variables; when in doubt a feature
//! is disabled, since a missing color is harmless and a stray escape
//! sequence is not.
//!
//! | Variable       | Effect |
//! |----------------|--------|
//! | `NO_COLOR`     | disables all color and hyperlinks |
//! | `COLORTERM`    | `truecolor` / `24bit` enable 24-bit color |
//! | `TERM`         | `dumb` disables everything, `*256color*` enables 256 colors |
//! | `TERM_PROGRAM` | known modern terminals enable true color and OSC 8 |

use std::env;

/// Terminals known to handle 24-bit color and OSC 8 hyperlinks.
const MODERN_TERMINALS: &[&str] = &[
    "iTerm.app",
    "WezTerm",
    "Alacritty",
    "Ghostty",
    "kitty",
    "Rio",
    "Hyper",
    "Contour",
    "vscode",
];

#[derive(Debug, Clone, Default)]
struct DetectInputs {
    no_color: bool,
    term: String,
    term_program: String,
    colorterm: String,
    kitty_window_id: bool,
    wt_session: bool,
}

impl DetectInputs {
    fn from_env() -> Self {
        Self {
            no_color: env::var("NO_COLOR").is_ok(),
            term: env::var("TERM").unwrap_or_default(),
            term_program: env::var("TERM_PROGRAM").unwrap_or_default(),
            colorterm: env::var("COLORTERM").unwrap_or_default(),
            kitty_window_id: env::var("KITTY_WINDOW_ID").is_ok(),
            wt_session: env::var("WT_SESSION").is_ok(),
        }
    }
}

/// What the output terminal can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// True color (24-bit RGB) support.
    pub true_color: bool,
    /// 256-color palette support.
    pub colors_256: bool,
    /// Color output explicitly disabled (`NO_COLOR`).
    pub no_color: bool,
    /// OSC 8 hyperlinks support.
    pub osc8_hyperlinks: bool,
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self::basic()
    }
}

impl TerminalCapabilities {
    /// Detect terminal capabilities from the environment.
    #[must_use]
    pub fn detect() -> Self {
        let caps = Self::detect_from_inputs(&DetectInputs::from_env());
        tracing::debug!(
            true_color = caps.true_color,
            colors_256 = caps.colors_256,
            no_color = caps.no_color,
            osc8 = caps.osc8_hyperlinks,
            "terminal capabilities detected"
        );
        caps
    }

    fn detect_from_inputs(env: &DetectInputs) -> Self {
        let term = env.term.as_str();
        let term_program = env.term_program.as_str();
        let colorterm = env.colorterm.as_str();

        // Windows Terminal often omits TERM.
        let is_dumb = term == "dumb" || (term.is_empty() && !env.wt_session);
        let is_kitty = env.kitty_window_id || term.contains("kitty");
        let is_modern_terminal = MODERN_TERMINALS
            .iter()
            .any(|t| term_program.contains(t) || term.contains(&t.to_lowercase()))
            || env.wt_session;

        let true_color = !env.no_color
            && !is_dumb
            && (colorterm.contains("truecolor")
                || colorterm.contains("24bit")
                || is_modern_terminal
                || is_kitty);

        let colors_256 = !env.no_color && !is_dumb && (true_color || term.contains("256"));

        let osc8_hyperlinks = !env.no_color && !is_dumb && (is_modern_terminal || is_kitty);

        Self {
            true_color,
            colors_256,
            no_color: env.no_color,
            osc8_hyperlinks,
        }
    }

    /// Minimal capability set: 16 colors, no hyperlinks.
    ///
    /// Safe on any terminal, including dumb ones.
    #[must_use]
    pub const fn basic() -> Self {
        Self {
            true_color: false,
            colors_256: false,
            no_color: false,
            osc8_hyperlinks: false,
        }
    }

    /// Full-featured modern terminal.
    #[must_use]
    pub const fn modern() -> Self {
        Self {
            true_color: true,
            colors_256: true,
            no_color: false,
            osc8_hyperlinks: true,
        }
    }

    /// xterm with 256 colors, no true color or hyperlinks.
    #[must_use]
    pub const fn xterm_256color() -> Self {
        Self {
            true_color: false,
            colors_256: true,
            no_color: false,
            osc8_hyperlinks: false,
        }
    }

    /// Start a builder from the basic profile.
    #[must_use]
    pub fn builder() -> CapabilitiesBuilder {
        CapabilitiesBuilder {
            caps: Self::basic(),
        }
    }
}

/// Builder for explicit capability overrides.
#[derive(Debug, Clone)]
pub struct CapabilitiesBuilder {
    caps: TerminalCapabilities,
}

impl CapabilitiesBuilder {
    /// Set true color support.
    #[must_use]
    pub fn true_color(mut self, enabled: bool) -> Self {
        self.caps.true_color = enabled;
        self
    }

    /// Set 256-color support.
    #[must_use]
    pub fn colors_256(mut self, enabled: bool) -> Self {
        self.caps.colors_256 = enabled;
        self
    }

    /// Disable all color output.
    #[must_use]
    pub fn no_color(mut self, disabled: bool) -> Self {
        self.caps.no_color = disabled;
        self
    }

    /// Set OSC 8 hyperlink support.
    #[must_use]
    pub fn osc8_hyperlinks(mut self, enabled: bool) -> Self {
        self.caps.osc8_hyperlinks = enabled;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> TerminalCapabilities {
        self.caps
    }
}
