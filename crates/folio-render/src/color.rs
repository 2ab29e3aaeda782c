#![forbid(unsafe_code)]

//! Theme colors and their reduction to what the terminal can show.
//!
//! Themes are authored in 24-bit RGB. The presenter calls
//! [`Color::downgrade`] once per style change to fit the detected
//! [`ColorProfile`].

/// How many colors the output terminal accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorProfile {
    /// Attributes only.
    Mono,
    /// The sixteen base colors.
    Ansi16,
    /// The xterm 256-entry palette.
    Ansi256,
    /// 24-bit RGB.
    TrueColor,
}

impl ColorProfile {
    /// Pick a profile from capability flags. `no_color` wins over everything.
    #[must_use]
    pub const fn from_flags(true_color: bool, colors_256: bool, no_color: bool) -> Self {
        match (no_color, true_color, colors_256) {
            (true, _, _) => Self::Mono,
            (false, true, _) => Self::TrueColor,
            (false, false, true) => Self::Ansi256,
            (false, false, false) => Self::Ansi16,
        }
    }
}

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared distance weighted by the eye's sensitivity to each channel.
    fn distance(self, other: Rgb) -> u64 {
        let sq = |a: u8, b: u8| {
            let d = i64::from(a) - i64::from(b);
            (d * d) as u64
        };
        2126 * sq(self.r, other.r) + 7152 * sq(self.g, other.g) + 722 * sq(self.b, other.b)
    }
}

/// The sixteen base terminal colors, in SGR order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ansi16 {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

/// xterm defaults for the base colors, indexed like [`Ansi16`].
const BASE_PALETTE: [(Ansi16, Rgb); 16] = [
    (Ansi16::Black, Rgb::new(0, 0, 0)),
    (Ansi16::Red, Rgb::new(205, 0, 0)),
    (Ansi16::Green, Rgb::new(0, 205, 0)),
    (Ansi16::Yellow, Rgb::new(205, 205, 0)),
    (Ansi16::Blue, Rgb::new(0, 0, 238)),
    (Ansi16::Magenta, Rgb::new(205, 0, 205)),
    (Ansi16::Cyan, Rgb::new(0, 205, 205)),
    (Ansi16::White, Rgb::new(229, 229, 229)),
    (Ansi16::BrightBlack, Rgb::new(127, 127, 127)),
    (Ansi16::BrightRed, Rgb::new(255, 0, 0)),
    (Ansi16::BrightGreen, Rgb::new(0, 255, 0)),
    (Ansi16::BrightYellow, Rgb::new(255, 255, 0)),
    (Ansi16::BrightBlue, Rgb::new(92, 92, 255)),
    (Ansi16::BrightMagenta, Rgb::new(255, 0, 255)),
    (Ansi16::BrightCyan, Rgb::new(0, 255, 255)),
    (Ansi16::BrightWhite, Rgb::new(255, 255, 255)),
];

/// Channel values of the 6x6x6 cube in the 256-color palette.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

impl Ansi16 {
    /// SGR index, 0 to 15.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    fn nearest(target: Rgb) -> Self {
        BASE_PALETTE
            .iter()
            .min_by_key(|(_, rgb)| target.distance(*rgb))
            .map_or(Self::Black, |(color, _)| *color)
    }
}

/// A color at whatever depth it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Rgb(Rgb),
    Ansi256(u8),
    Ansi16(Ansi16),
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// Reduce to `profile`. [`ColorProfile::Mono`] yields `None` so the
    /// cell falls back to the terminal's own colors.
    #[must_use]
    pub fn downgrade(self, profile: ColorProfile) -> Option<Self> {
        let reduced = match (profile, self) {
            (ColorProfile::Mono, _) => return None,
            (ColorProfile::TrueColor, c) => c,
            (ColorProfile::Ansi256, Self::Rgb(rgb)) => Self::Ansi256(palette_index(rgb)),
            (ColorProfile::Ansi256, c) => c,
            (ColorProfile::Ansi16, Self::Rgb(rgb)) => Self::Ansi16(Ansi16::nearest(rgb)),
            (ColorProfile::Ansi16, Self::Ansi256(index)) => {
                Self::Ansi16(Ansi16::nearest(palette_rgb(index)))
            }
            (ColorProfile::Ansi16, c @ Self::Ansi16(_)) => c,
        };
        Some(reduced)
    }
}

/// Closest 256-palette entry. Pure grays go to the 24-step ramp.
fn palette_index(rgb: Rgb) -> u8 {
    let Rgb { r, g, b } = rgb;
    if r == g && g == b {
        return match r {
            0..8 => 16,
            249.. => 231,
            _ => 232 + ((r - 8) / 10).min(23),
        };
    }
    let level = |v: u8| match v {
        0..48 => 0,
        48..115 => 1,
        _ => (v - 35) / 40,
    };
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

/// RGB value of a 256-palette entry.
fn palette_rgb(index: u8) -> Rgb {
    match index {
        0..16 => BASE_PALETTE[usize::from(index)].1,
        232.. => {
            let gray = 8 + 10 * (index - 232);
            Rgb::new(gray, gray, gray)
        }
        _ => {
            let i = usize::from(index - 16);
            Rgb::new(CUBE_LEVELS[i / 36], CUBE_LEVELS[(i / 6) % 6], CUBE_LEVELS[i % 6])
        }
    }
}
