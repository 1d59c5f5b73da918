//! Special King detection for Standard pack contents.
//!
//! A King is "special" when it carries any of the Red Seal, Steel or Gold
//! markers. The markers are reported in a fixed canonical order so that
//! `Gold Red Seal King` and `Red Seal Gold King` share one lookup key.

use regex::Regex;
use std::sync::LazyLock;

static RE_KING_SUIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bKing of ([A-Za-z]+)").expect("king pattern"));

static MARKERS: LazyLock<[(&'static str, Regex); 3]> = LazyLock::new(|| {
    [
        ("Red Seal", Regex::new(r"(?i)\bRed Seal\b").expect("red seal pattern")),
        ("Steel", Regex::new(r"(?i)\bSteel\b").expect("steel pattern")),
        ("Gold", Regex::new(r"(?i)\bGold\b").expect("gold pattern")),
    ]
});

const KING_INFIX: &str = " King of ";

/// Markers present in `text`, in canonical order.
pub fn variant_markers(text: &str) -> Vec<&'static str> {
    MARKERS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(label, _)| *label)
        .collect()
}

/// Space-joined canonical markers, `None` for a plain King.
pub fn variant_prefix(text: &str) -> Option<String> {
    let markers = variant_markers(text);
    if markers.is_empty() {
        None
    } else {
        Some(markers.join(" "))
    }
}

/// Canonical `"<prefix> King of <Suit>"` key for a pack item, if the item is a
/// special King.
pub fn special_king(item: &str) -> Option<String> {
    let captures = RE_KING_SUIT.captures(item)?;
    let suit = capitalize(&captures[1]);
    let prefix = variant_prefix(item)?;
    Some(format!("{prefix}{KING_INFIX}{suit}"))
}

/// Variant prefix part of a canonical king key.
pub fn king_prefix(key: &str) -> &str {
    key.split_once(KING_INFIX)
        .map(|(prefix, _)| prefix)
        .unwrap_or(key)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}
