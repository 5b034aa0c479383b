/// Named code points the tokenizer cares about.
pub struct UnicodeChar;

impl UnicodeChar {
    pub const NULL: char = '\u{0000}';
    pub const BACKSPACE: char = '\u{0008}';
    pub const TAB: char = '\u{000B}';
    pub const SHIFT_OUT: char = '\u{000E}';
    pub const INFORMATION_SEPARATOR_ONE: char = '\u{001F}';
    pub const DELETE: char = '\u{007F}';
    pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';
}
