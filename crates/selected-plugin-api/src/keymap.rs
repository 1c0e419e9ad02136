//! Key-combination parsing for keycombo actions.
//!
//! A combo string is a space-separated list of tokens, e.g. `"cmd shift t"`.
//! Each token is looked up in two static tables:
//!
//! ```text
//! "cmd shift t"
//!    │    │   │
//!    ▼    ▼   ▼
//! modifier table ──► Modifiers::COMMAND | Modifiers::SHIFT
//! key table      ──► keycodes::T
//! ```
//!
//! Unknown tokens are skipped. Modifiers accumulate; the first recognized
//! key wins.

use bitflags::bitflags;

bitflags! {
    /// Modifier flags, using CoreGraphics event-flag bit values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u64 {
        const SHIFT = 0x0002_0000;
        const CONTROL = 0x0004_0000;
        const OPTION = 0x0008_0000;
        const COMMAND = 0x0010_0000;
        const FUNCTION = 0x0080_0000;
    }
}

// =============================================================================
// Key Code Constants
// =============================================================================

/// macOS virtual key codes.
pub mod keycodes {
    pub const A: u16 = 0;
    pub const S: u16 = 1;
    pub const D: u16 = 2;
    pub const F: u16 = 3;
    pub const H: u16 = 4;
    pub const G: u16 = 5;
    pub const Z: u16 = 6;
    pub const X: u16 = 7;
    pub const C: u16 = 8;
    pub const V: u16 = 9;
    pub const B: u16 = 11;
    pub const Q: u16 = 12;
    pub const W: u16 = 13;
    pub const E: u16 = 14;
    pub const R: u16 = 15;
    pub const Y: u16 = 16;
    pub const T: u16 = 17;
    pub const NUM_1: u16 = 18;
    pub const NUM_2: u16 = 19;
    pub const NUM_3: u16 = 20;
    pub const NUM_4: u16 = 21;
    pub const NUM_6: u16 = 22;
    pub const NUM_5: u16 = 23;
    pub const EQUAL: u16 = 24;
    pub const NUM_9: u16 = 25;
    pub const NUM_7: u16 = 26;
    pub const MINUS: u16 = 27;
    pub const NUM_8: u16 = 28;
    pub const NUM_0: u16 = 29;
    pub const RIGHT_BRACKET: u16 = 30;
    pub const O: u16 = 31;
    pub const U: u16 = 32;
    pub const LEFT_BRACKET: u16 = 33;
    pub const I: u16 = 34;
    pub const P: u16 = 35;
    pub const RETURN: u16 = 36;
    pub const L: u16 = 37;
    pub const J: u16 = 38;
    pub const QUOTE: u16 = 39;
    pub const K: u16 = 40;
    pub const SEMICOLON: u16 = 41;
    pub const BACKSLASH: u16 = 42;
    pub const COMMA: u16 = 43;
    pub const SLASH: u16 = 44;
    pub const N: u16 = 45;
    pub const M: u16 = 46;
    pub const PERIOD: u16 = 47;
    pub const TAB: u16 = 48;
    pub const SPACE: u16 = 49;
    pub const GRAVE: u16 = 50;
    pub const DELETE: u16 = 51;
    pub const ESCAPE: u16 = 53;
    pub const F5: u16 = 96;
    pub const F6: u16 = 97;
    pub const F7: u16 = 98;
    pub const F3: u16 = 99;
    pub const F8: u16 = 100;
    pub const F9: u16 = 101;
    pub const F11: u16 = 103;
    pub const F10: u16 = 109;
    pub const F12: u16 = 111;
    pub const HOME: u16 = 115;
    pub const PAGE_UP: u16 = 116;
    pub const FORWARD_DELETE: u16 = 117;
    pub const F4: u16 = 118;
    pub const END: u16 = 119;
    pub const F2: u16 = 120;
    pub const PAGE_DOWN: u16 = 121;
    pub const F1: u16 = 122;
    pub const LEFT: u16 = 123;
    pub const RIGHT: u16 = 124;
    pub const DOWN: u16 = 125;
    pub const UP: u16 = 126;
}

// =============================================================================
// Lookup Tables
// =============================================================================

/// Modifier-name table.
pub fn modifier_from_name(name: &str) -> Option<Modifiers> {
    Some(match name {
        "cmd" | "command" | "\u{2318}" => Modifiers::COMMAND,
        "ctrl" | "control" | "\u{2303}" => Modifiers::CONTROL,
        "alt" | "option" | "opt" | "\u{2325}" => Modifiers::OPTION,
        "shift" | "\u{21E7}" => Modifiers::SHIFT,
        "fn" | "function" => Modifiers::FUNCTION,
        _ => return None,
    })
}

/// Key-name table.
pub fn key_name_to_code(name: &str) -> Option<u16> {
    use keycodes::*;

    Some(match name {
        "a" => A,
        "b" => B,
        "c" => C,
        "d" => D,
        "e" => E,
        "f" => F,
        "g" => G,
        "h" => H,
        "i" => I,
        "j" => J,
        "k" => K,
        "l" => L,
        "m" => M,
        "n" => N,
        "o" => O,
        "p" => P,
        "q" => Q,
        "r" => R,
        "s" => S,
        "t" => T,
        "u" => U,
        "v" => V,
        "w" => W,
        "x" => X,
        "y" => Y,
        "z" => Z,
        "0" => NUM_0,
        "1" => NUM_1,
        "2" => NUM_2,
        "3" => NUM_3,
        "4" => NUM_4,
        "5" => NUM_5,
        "6" => NUM_6,
        "7" => NUM_7,
        "8" => NUM_8,
        "9" => NUM_9,
        "=" | "equal" => EQUAL,
        "-" | "minus" => MINUS,
        "[" => LEFT_BRACKET,
        "]" => RIGHT_BRACKET,
        "'" | "quote" => QUOTE,
        ";" | "semicolon" => SEMICOLON,
        "\\" | "backslash" => BACKSLASH,
        "," | "comma" => COMMA,
        "/" | "slash" => SLASH,
        "." | "period" => PERIOD,
        "`" | "grave" => GRAVE,
        "space" => SPACE,
        "return" | "enter" => RETURN,
        "tab" => TAB,
        "delete" | "backspace" => DELETE,
        "forwarddelete" => FORWARD_DELETE,
        "escape" | "esc" => ESCAPE,
        "home" => HOME,
        "end" => END,
        "pageup" => PAGE_UP,
        "pagedown" => PAGE_DOWN,
        "left" => LEFT,
        "right" => RIGHT,
        "up" => UP,
        "down" => DOWN,
        "f1" => F1,
        "f2" => F2,
        "f3" => F3,
        "f4" => F4,
        "f5" => F5,
        "f6" => F6,
        "f7" => F7,
        "f8" => F8,
        "f9" => F9,
        "f10" => F10,
        "f11" => F11,
        "f12" => F12,
        _ => return None,
    })
}

// =============================================================================
// Key Combo
// =============================================================================

/// A parsed key combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyCombo {
    /// Modifier keys held during the press.
    pub modifiers: Modifiers,

    /// Virtual key code, if any token named a key.
    pub keycode: Option<u16>,
}

impl KeyCombo {
    /// Parse a space-separated combo string like `"cmd shift t"`.
    ///
    /// Never fails: unrecognized tokens are ignored.
    pub fn parse(combo_str: &str) -> Self {
        let mut combo = Self::default();

        for token in combo_str.split_whitespace() {
            let token = token.to_lowercase();
            if let Some(modifier) = modifier_from_name(&token) {
                combo.modifiers |= modifier;
            }
            if combo.keycode.is_none() {
                combo.keycode = key_name_to_code(&token);
            }
        }

        combo
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cmd_shift_t() {
        let combo = KeyCombo::parse("cmd shift t");
        assert_eq!(combo.modifiers, Modifiers::COMMAND | Modifiers::SHIFT);
        assert_eq!(combo.keycode, Some(keycodes::T));
    }

    #[test]
    fn test_unknown_tokens_are_ignored_anywhere() {
        let expected = KeyCombo::parse("cmd shift t");
        assert_eq!(KeyCombo::parse("xyz cmd shift t"), expected);
        assert_eq!(KeyCombo::parse("cmd xyz shift t"), expected);
        assert_eq!(KeyCombo::parse("cmd shift t xyz"), expected);
    }

    #[test]
    fn test_first_key_wins() {
        let combo = KeyCombo::parse("ctrl a b");
        assert_eq!(combo.modifiers, Modifiers::CONTROL);
        assert_eq!(combo.keycode, Some(keycodes::A));
    }

    #[test]
    fn test_modifiers_accumulate() {
        let combo = KeyCombo::parse("cmd option ctrl fn shift return");
        assert!(combo.modifiers.contains(Modifiers::COMMAND));
        assert!(combo.modifiers.contains(Modifiers::OPTION));
        assert!(combo.modifiers.contains(Modifiers::CONTROL));
        assert!(combo.modifiers.contains(Modifiers::FUNCTION));
        assert!(combo.modifiers.contains(Modifiers::SHIFT));
        assert_eq!(combo.keycode, Some(keycodes::RETURN));
    }

    #[test]
    fn test_case_and_whitespace() {
        let combo = KeyCombo::parse("  CMD   Shift  F5 ");
        assert_eq!(combo.modifiers, Modifiers::COMMAND | Modifiers::SHIFT);
        assert_eq!(combo.keycode, Some(keycodes::F5));
    }

    #[test]
    fn test_modifiers_only() {
        let combo = KeyCombo::parse("cmd shift");
        assert_eq!(combo.modifiers, Modifiers::COMMAND | Modifiers::SHIFT);
        assert_eq!(combo.keycode, None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(KeyCombo::parse(""), KeyCombo::default());
    }

    #[test]
    fn test_flag_bits_match_coregraphics() {
        assert_eq!(Modifiers::COMMAND.bits(), 0x100000);
        assert_eq!(Modifiers::SHIFT.bits(), 0x20000);
        assert_eq!(Modifiers::CONTROL.bits(), 0x40000);
        assert_eq!(Modifiers::OPTION.bits(), 0x80000);
    }
}
