//! Nickname entry
//!
//! A nickname is 3–12 characters from `[A-Za-z0-9_]`, case-sensitive.

pub const MIN_LEN: usize = 3;
pub const MAX_LEN: usize = 12;

/// True when `name` is an acceptable nickname.
pub fn is_valid(name: &str) -> bool {
    let len = name.chars().count();
    (MIN_LEN..=MAX_LEN).contains(&len)
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Text typed on the nickname screen.
///
/// Any printable character is accepted up to `MAX_LEN`; validation only
/// gates `confirm`, so an invalid buffer simply cannot be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NicknameBuffer {
    text: String,
}

impl NicknameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, c: char) {
        if self.text.chars().count() < MAX_LEN && !c.is_control() {
            self.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_valid(&self) -> bool {
        is_valid(&self.text)
    }

    /// The nickname if the buffer is valid; `None` leaves the buffer as is.
    pub fn confirm(&self) -> Option<String> {
        self.is_valid().then(|| self.text.clone())
    }
}
