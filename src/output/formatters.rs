//! Formatting utilities for terminal output

use crate::core::letters::ALPHABET;
use std::collections::BTreeMap;
use std::time::Duration;

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Two aligned rows: cipher letters over their plain letters
#[must_use]
pub fn mapping_rows(mapping: &BTreeMap<char, char>) -> (String, String) {
    let cipher: Vec<String> = mapping.keys().map(char::to_string).collect();
    let plain: Vec<String> = mapping.values().map(char::to_string).collect();
    (cipher.join(" "), plain.join(" "))
}

/// Two aligned rows: the alphabet over a full 26 letter key
#[must_use]
pub fn key_rows(key: &str) -> (String, String) {
    let alphabet: Vec<String> = ALPHABET.iter().map(|&b| char::from(b).to_string()).collect();
    let key: Vec<String> = key.chars().map(String::from).collect();
    (alphabet.join(" "), key.join(" "))
}

/// Human readable elapsed time
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    if duration.as_secs() >= 1 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
