//! Token budget tracking for pasted transcripts.
//!
//! A "token" here is a whitespace-delimited piece of text, used only to cap
//! the size of the input. It has nothing to do with model tokenizers.

use serde::Serialize;

/// Default token ceiling for transcript input.
pub const DEFAULT_MAX_TOKENS: usize = 1000;

/// Estimate the number of tokens in `text`.
///
/// Counts the pieces produced by splitting on runs of whitespace. Splitting
/// keeps empty pieces at the edges, so `""` counts as 1 and `" a "` counts as 3.
/// Whitespace is the ECMAScript `\s` set, not
/// [`char::is_whitespace`]: U+FEFF separates, U+0085 does not.
pub fn estimate(text: &str) -> usize {
    let mut count = 1;
    let mut in_gap = false;

    for c in text.chars() {
        if is_separator(c) {
            if !in_gap {
                count += 1;
                in_gap = true;
            }
        } else {
            in_gap = false;
        }
    }

    count
}

/// ECMAScript whitespace and line terminators.
fn is_separator(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' ' | '\u{A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

/// Remaining budget. Negative means the input is over the ceiling.
pub fn remaining(ceiling: usize, used: usize) -> i64 {
    ceiling as i64 - used as i64
}

/// Token budget for the current transcript input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenBudget {
    pub ceiling: usize,
    pub used: usize,
}

impl TokenBudget {
    /// Create an empty budget with the given ceiling.
    pub fn new(ceiling: usize) -> Self {
        Self { ceiling, used: 0 }
    }

    /// Create a budget with usage computed from `text`.
    pub fn for_text(ceiling: usize, text: &str) -> Self {
        Self {
            ceiling,
            used: estimate(text),
        }
    }

    /// Recompute usage after an edit.
    pub fn update(&mut self, text: &str) {
        self.used = estimate(text);
    }

    /// Reset usage to zero.
    pub fn reset(&mut self) {
        self.used = 0;
    }

    pub fn remaining(&self) -> i64 {
        remaining(self.ceiling, self.used)
    }

    /// Whether the input is over the ceiling.
    pub fn is_exceeded(&self) -> bool {
        self.remaining() < 0
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}
