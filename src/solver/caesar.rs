//! Caesar shifts: every rotation of the alphabet, for eyeballing

use serde::Serialize;
use std::fmt;

/// `text` rotated forward by `shift` letters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaesarShift {
    pub shift: u8,
    pub text: String,
}

impl fmt::Display for CaesarShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>2}. {}", self.shift, self.text)
    }
}

/// Rotate one byte, keeping its case; non-letters are returned unchanged
#[inline]
#[must_use]
pub const fn shift_byte(byte: u8, shift: u8) -> u8 {
    let base = match byte {
        b'A'..=b'Z' => b'A',
        b'a'..=b'z' => b'a',
        _ => return byte,
    };
    base + (byte - base + shift % 26) % 26
}

/// All 25 non-trivial shifts of `text`, in shift order
///
/// # Examples
/// ```
/// use puzzle_solver::solver::caesar_shifts;
///
/// let shifts = caesar_shifts("HAL");
/// assert_eq!(shifts.len(), 25);
/// assert_eq!(shifts[0].text, "IBM");
/// ```
#[must_use]
pub fn caesar_shifts(text: &str) -> Vec<CaesarShift> {
    (1..26)
        .map(|shift| CaesarShift {
            shift,
            text: text.bytes().map(|b| char::from(shift_byte(b, shift))).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_wrap_and_keep_case() {
        assert_eq!(shift_byte(b'A', 1), b'B');
        assert_eq!(shift_byte(b'Z', 2), b'B');
        assert_eq!(shift_byte(b'y', 5), b'd');
        assert_eq!(shift_byte(b' ', 10), b' ');
        assert_eq!(shift_byte(b'm', 26), b'm');
    }

    #[test]
    fn every_shift_is_listed() {
        let shifts = caesar_shifts("Hello, World");
        assert_eq!(shifts.first().map(|s| s.shift), Some(1));
        assert_eq!(shifts.last().map(|s| s.shift), Some(25));
        assert_eq!(shifts[12].text, "Uryyb, Jbeyq");
        assert_eq!(shifts[24].text, "Gdkkn, Vnqkc");
    }

    #[test]
    fn display_numbers_lines() {
        let shift = CaesarShift {
            shift: 3,
            text: "KHOOR".into(),
        };
        assert_eq!(shift.to_string(), " 3. KHOOR");
    }
}
