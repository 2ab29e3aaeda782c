#![forbid(unsafe_code)]

//! ANSI escape sequence helpers.
//!
//! Pure byte-generation functions. The [`Presenter`](crate::presenter::Presenter)
//! owns all state tracking; nothing here remembers what was written before.
//!
//! | Sequence | Description |
//! |----------|-------------|
//! | `ESC [ n ; n m` | SGR (Select Graphic Rendition) |
//! | `ESC [ row ; col H` | CUP (Cursor Position, 1-indexed) |
//! | `ESC ] 8 ; ; url ST` | Hyperlink (OSC 8) |

use std::io::{self, Write};

use crate::color::{Ansi16, Color};
use crate::style::StyleFlags;

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Write SGR reset sequence.
#[inline]
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}

/// Flag to SGR "on" code, in emission order.
pub const FLAG_TABLE: [(StyleFlags, u8); 6] = [
    (StyleFlags::BOLD, 1),
    (StyleFlags::DIM, 2),
    (StyleFlags::ITALIC, 3),
    (StyleFlags::UNDERLINE, 4),
    (StyleFlags::REVERSE, 7),
    (StyleFlags::STRIKETHROUGH, 9),
];

/// Write one SGR sequence enabling every set flag.
///
/// Emits nothing for empty flags. Does not reset first.
pub fn sgr_flags<W: Write>(w: &mut W, flags: StyleFlags) -> io::Result<()> {
    if flags.is_empty() {
        return Ok(());
    }
    w.write_all(b"\x1b[")?;
    let mut first = true;
    for (flag, code) in FLAG_TABLE {
        if !flags.contains(flag) {
            continue;
        }
        if !first {
            w.write_all(b";")?;
        }
        write!(w, "{code}")?;
        first = false;
    }
    w.write_all(b"m")
}

/// Write a foreground color.
pub fn sgr_fg<W: Write>(w: &mut W, color: Color) -> io::Result<()> {
    match color {
        Color::Rgb(rgb) => write!(w, "\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b),
        Color::Ansi256(index) => write!(w, "\x1b[38;5;{index}m"),
        Color::Ansi16(ansi) => write!(w, "\x1b[{}m", ansi16_code(ansi, 30, 90)),
    }
}

/// Write a background color.
pub fn sgr_bg<W: Write>(w: &mut W, color: Color) -> io::Result<()> {
    match color {
        Color::Rgb(rgb) => write!(w, "\x1b[48;2;{};{};{}m", rgb.r, rgb.g, rgb.b),
        Color::Ansi256(index) => write!(w, "\x1b[48;5;{index}m"),
        Color::Ansi16(ansi) => write!(w, "\x1b[{}m", ansi16_code(ansi, 40, 100)),
    }
}

#[inline]
fn ansi16_code(ansi: Ansi16, base: u8, bright_base: u8) -> u8 {
    let index = ansi.as_u8();
    if index < 8 {
        base + index
    } else {
        bright_base + (index - 8)
    }
}

/// CUP (Cursor Position): `CSI row ; col H`
///
/// Row and col are 0-indexed input, converted to 1-indexed for ANSI.
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(
        w,
        "\x1b[{};{}H",
        row.saturating_add(1),
        col.saturating_add(1)
    )
}

/// Open an OSC 8 hyperlink.
///
/// Format: `OSC 8 ; ; uri ST` with ST = `ESC \`
pub fn hyperlink_start<W: Write>(w: &mut W, url: &str) -> io::Result<()> {
    write!(w, "\x1b]8;;{url}\x1b\\")
}

/// Close an OSC 8 hyperlink.
pub fn hyperlink_end<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b]8;;\x1b\\")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn to_string(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn flags_join_into_one_sequence() {
        let s = to_string(|w| sgr_flags(w, StyleFlags::BOLD | StyleFlags::UNDERLINE));
        assert_eq!(s, "\x1b[1;4m");
    }

    #[test]
    fn empty_flags_emit_nothing() {
        assert_eq!(to_string(|w| sgr_flags(w, StyleFlags::empty())), "");
    }

    #[test]
    fn colors_per_kind() {
        assert_eq!(
            to_string(|w| sgr_fg(w, Color::Rgb(Rgb::new(1, 2, 3)))),
            "\x1b[38;2;1;2;3m"
        );
        assert_eq!(to_string(|w| sgr_bg(w, Color::Ansi256(42))), "\x1b[48;5;42m");
        assert_eq!(
            to_string(|w| sgr_fg(w, Color::Ansi16(Ansi16::Red))),
            "\x1b[31m"
        );
        assert_eq!(
            to_string(|w| sgr_bg(w, Color::Ansi16(Ansi16::BrightBlue))),
            "\x1b[104m"
        );
    }

    #[test]
    fn cup_is_one_indexed() {
        assert_eq!(to_string(|w| cup(w, 0, 0)), "\x1b[1;1H");
        assert_eq!(to_string(|w| cup(w, 4, 9)), "\x1b[5;10H");
    }

    #[test]
    fn hyperlink_pair() {
        let s = to_string(|w| {
            hyperlink_start(w, "https://x.test")?;
            w.write_all(b"x")?;
            hyperlink_end(w)
        });
        assert_eq!(s, "\x1b]8;;https://x.test\x1b\\x\x1b]8;;\x1b\\");
    }
}
