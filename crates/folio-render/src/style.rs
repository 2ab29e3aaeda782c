#![forbid(unsafe_code)]

//! Cell styling: attribute flags plus optional foreground/background color.

use crate::color::Color;

bitflags::bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD          = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM           = 0b0000_0010;
        /// Italic text.
        const ITALIC        = 0b0000_0100;
        /// Underlined text.
        const UNDERLINE     = 0b0000_1000;
        /// Reverse video (swap fg/bg).
        const REVERSE       = 0b0010_0000;
        /// Strikethrough text.
        const STRIKETHROUGH = 0b0100_0000;
    }
}

/// Visual style of a cell or a run of text.
///
/// `None` colors mean "terminal default". The default style is plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Attribute flags.
    pub flags: StyleFlags,
}

impl Style {
    /// The plain style: default colors, no attributes.
    pub const PLAIN: Self = Self {
        fg: None,
        bg: None,
        flags: StyleFlags::empty(),
    };

    /// Create a plain style.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::PLAIN
    }

    /// Set the foreground color.
    #[inline]
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[inline]
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add attribute flags.
    #[inline]
    #[must_use]
    pub fn add(mut self, flags: StyleFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Remove attribute flags.
    #[inline]
    #[must_use]
    pub fn remove(mut self, flags: StyleFlags) -> Self {
        self.flags &= !flags;
        self
    }

    /// Add bold.
    #[inline]
    #[must_use]
    pub fn bold(self) -> Self {
        self.add(StyleFlags::BOLD)
    }

    /// Add dim.
    #[inline]
    #[must_use]
    pub fn dim(self) -> Self {
        self.add(StyleFlags::DIM)
    }

    /// Add italic.
    #[inline]
    #[must_use]
    pub fn italic(self) -> Self {
        self.add(StyleFlags::ITALIC)
    }

    /// Add underline.
    #[inline]
    #[must_use]
    pub fn underline(self) -> Self {
        self.add(StyleFlags::UNDERLINE)
    }

    /// Add reverse video.
    #[inline]
    #[must_use]
    pub fn reverse(self) -> Self {
        self.add(StyleFlags::REVERSE)
    }

    /// Check whether a flag is set.
    #[inline]
    #[must_use]
    pub fn has(&self, flag: StyleFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Layer `other` on top of `self`.
    ///
    /// Flags are unioned; colors from `other` win where set.
    #[inline]
    #[must_use]
    pub fn patch(self, other: Style) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            flags: self.flags | other.flags,
        }
    }

    /// True when this style carries no colors and no attributes.
    #[inline]
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}
