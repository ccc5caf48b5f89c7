//! # Size Text Module
//!
//! This module recognizes size measurements in the follow-up text a user
//! sends after an image (e.g., "15cm", "about 20 cm", "1.5m") and
//! canonicalizes them for the appraisal prompt. Text without a recognizable
//! measurement is passed through trimmed; the conversation never rejects a
//! size answer.

use lazy_static::lazy_static;
use regex::Regex;

// Quantity followed by a length unit, English spellings and abbreviations
pub const SIZE_PATTERN: &str = r"(?i)\b(\d+(?:\.\d+)?)\s*(cm|centimeter(?:s)?|centimetre(?:s)?|mm|millimeter(?:s)?|millimetre(?:s)?|m|meter(?:s)?|metre(?:s)?|in|inch(?:es)?|ft|foot|feet)\b";

// Lazy static regex for the size pattern to avoid recompilation
lazy_static! {
    pub static ref SIZE_REGEX: Regex =
        Regex::new(SIZE_PATTERN).expect("Size pattern should be valid");
}

/// A size measurement detected in user text
#[derive(Debug, Clone, PartialEq)]
pub struct SizeMatch {
    /// The numeric quantity as written (e.g., "15", "1.5")
    pub quantity: String,
    /// The canonical unit (e.g., "cm", "m", "in")
    pub unit: &'static str,
}

impl SizeMatch {
    /// Canonical form used in the appraisal prompt (e.g., "15cm")
    pub fn canonical(&self) -> String {
        format!("{}{}", self.quantity, self.unit)
    }
}

/// Find the first size measurement in the given text
pub fn detect_size(text: &str) -> Option<SizeMatch> {
    let captures = SIZE_REGEX.captures(text)?;
    Some(SizeMatch {
        quantity: captures[1].to_string(),
        unit: canonical_unit(&captures[2]),
    })
}

/// Normalize a size answer for the prompt.
///
/// Returns the canonical measurement when one is recognized, otherwise the
/// trimmed input unchanged.
pub fn normalize_size_text(text: &str) -> String {
    match detect_size(text) {
        Some(size) => size.canonical(),
        None => text.trim().to_string(),
    }
}

fn canonical_unit(raw: &str) -> &'static str {
    match raw.to_lowercase().as_str() {
        "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => "cm",
        "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => "mm",
        "m" | "meter" | "meters" | "metre" | "metres" => "m",
        "in" | "inch" | "inches" => "in",
        _ => "ft",
    }
}
