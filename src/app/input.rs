use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

// long enough for any sane boil, short enough to fit the box
const MAX_LEN: usize = 8;

/// Seconds typed by the user. Only digits and a single `.` get in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DurationInput(String);

impl DurationInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn add_ch(&mut self, ch: char) {
        if self.len() >= MAX_LEN {
            return;
        }
        match ch {
            '0'..='9' => self.push(ch),
            '.' if !self.contains('.') => self.push(ch),
            _ => (),
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

impl Deref for DurationInput {
    type Target = String;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DurationInput {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Display for DurationInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
