use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Language-neutral multi-level string comparison: base characters, then
/// accents, then case with lowercase first. Remaining ties fall back to
/// code point order so the result is total.
///
/// At the first level characters are grouped the way root collation groups
/// them: whitespace, punctuation, symbols, currency signs, digits, letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collator;

impl Collator {
    pub fn new() -> Self {
        Self
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        primary_key(a)
            .cmp(&primary_key(b))
            .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
            .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
            .then_with(|| a.cmp(b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Group {
    Whitespace,
    Punctuation,
    Symbol,
    Currency,
    Digit,
    Letter,
}

const PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%";
const SYMBOLS: &str = "`^+<=>|~";
const CURRENCY: &str = "$¢£¤¥€";

fn weight(c: char) -> (Group, u32) {
    let in_table = |table: &str| table.chars().position(|t| t == c).map(|i| i as u32);

    if c.is_whitespace() {
        return (Group::Whitespace, c as u32);
    }
    if let Some(i) = in_table(PUNCTUATION) {
        return (Group::Punctuation, i);
    }
    if let Some(i) = in_table(SYMBOLS) {
        return (Group::Symbol, i);
    }
    if let Some(i) = in_table(CURRENCY) {
        return (Group::Currency, i);
    }
    if let Some(digit) = c.to_digit(10) {
        return (Group::Digit, digit);
    }
    if c.is_numeric() {
        return (Group::Digit, 10 + c as u32);
    }
    if c.is_alphabetic() {
        return (Group::Letter, c as u32);
    }
    if c.is_ascii_punctuation() {
        return (Group::Punctuation, PUNCTUATION.len() as u32 + c as u32);
    }
    (Group::Symbol, SYMBOLS.len() as u32 + c as u32)
}

fn primary_key(s: &str) -> Vec<(Group, u32)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(weight)
        .collect()
}

fn secondary_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}

