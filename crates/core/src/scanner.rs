//! Single-pass scanner over the simulator's run log.
//!
//! The log is line oriented: an ante header opens a record, single-line
//! sections (Tags, Voucher, Boss) update it directly, and the Shop Queue and
//! Packs headers switch the scanner into a block mode that lasts until a blank
//! line or the next section header.

use crate::kings::special_king;
use crate::{AnteRecord, LookupTables, PackCategory};
use regex::Regex;
use std::sync::LazyLock;

static RE_ANTE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:==)?\s*ANTE\s+(\d+)(?:==)?").expect("ante header pattern")
});
static RE_SHOP_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\)\s+(.*)$").expect("shop line pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    None,
    Shop,
    Packs,
}

/// Whole-word, case-sensitive matcher for one tracked name.
#[derive(Debug, Clone)]
struct NamePattern {
    name: String,
    whole: Regex,
    negative: Option<Regex>,
}

impl NamePattern {
    fn new(name: &str, with_negative: bool) -> Option<Self> {
        let body = word_bounded(name);
        let whole = Regex::new(&body).ok()?;
        let negative = if with_negative {
            Regex::new(&format!(r"\bNegative\s+{body}")).ok()
        } else {
            None
        };
        Some(Self {
            name: name.to_string(),
            whole,
            negative,
        })
    }

    fn matches(&self, text: &str) -> bool {
        self.whole.is_match(text)
    }

    fn is_negative(&self, text: &str) -> bool {
        self.negative
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(text))
    }
}

/// `\b` only makes sense next to word characters, so names such as
/// `Mr. Bones` keep a boundary on the side that has one.
fn word_bounded(name: &str) -> String {
    let is_word = |ch: char| ch.is_alphanumeric() || ch == '_';
    let lead = if name.chars().next().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    let tail = if name.chars().last().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    format!("{lead}{}{tail}", regex::escape(name))
}

/// Compiled scanner for one set of lookup tables; reusable across logs.
#[derive(Debug, Clone)]
pub struct LogScanner<'t> {
    tables: &'t LookupTables,
    jokers: Vec<NamePattern>,
    spectrals: Vec<NamePattern>,
}

impl<'t> LogScanner<'t> {
    pub fn new(tables: &'t LookupTables) -> Self {
        let jokers = tables
            .jokers()
            .iter()
            .filter_map(|name| NamePattern::new(name, true))
            .collect();
        let spectrals = tables
            .spectrals()
            .iter()
            .filter_map(|name| NamePattern::new(name, false))
            .collect();
        Self {
            tables,
            jokers,
            spectrals,
        }
    }

    /// Scans `lines` and returns every ante that has something to report,
    /// in log order.
    pub fn scan<I, S>(&self, lines: I) -> Vec<AnteRecord<'t>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pass = ScanPass {
            scanner: self,
            antes: Vec::new(),
            current: None,
            state: ScanState::None,
        };
        for raw in lines {
            pass.feed(raw.as_ref());
        }
        pass.finish()
    }
}

struct ScanPass<'s, 't> {
    scanner: &'s LogScanner<'t>,
    antes: Vec<AnteRecord<'t>>,
    current: Option<AnteRecord<'t>>,
    state: ScanState,
}

impl<'s, 't> ScanPass<'s, 't> {
    fn feed(&mut self, raw: &str) {
        if let Some(captures) = RE_ANTE_HEADER.captures(raw) {
            self.flush();
            self.current = Some(AnteRecord::new(&captures[1], self.scanner.tables));
            self.state = ScanState::None;
            return;
        }
        let Some(ante) = self.current.as_mut() else {
            return;
        };

        let line = raw.trim();
        if line.is_empty() {
            self.state = ScanState::None;
            return;
        }

        if line.starts_with("Shop Queue") {
            self.state = ScanState::Shop;
            return;
        }
        if line.starts_with("Packs") {
            self.state = ScanState::Packs;
            return;
        }
        if line.starts_with("Tags") {
            for tag in split_csv(after_first(line, ':')) {
                ante.add_tag(tag);
            }
            self.state = ScanState::None;
            return;
        }
        if line.starts_with("Voucher") {
            ante.set_voucher(section_value(line));
            self.state = ScanState::None;
            return;
        }
        if line.starts_with("Boss") {
            ante.set_boss(section_value(line));
            self.state = ScanState::None;
            return;
        }

        match self.state {
            ScanState::Shop => scan_shop_line(self.scanner, ante, line),
            ScanState::Packs => scan_pack_line(self.scanner, ante, line),
            ScanState::None => tracing::trace!(line, "ignored line outside of a section"),
        }
    }

    fn flush(&mut self) {
        let Some(ante) = self.current.take() else {
            return;
        };
        if ante.has_output() {
            tracing::debug!(ante = ante.number(), "ante collected");
            self.antes.push(ante);
        } else {
            tracing::debug!(ante = ante.number(), "ante dropped, nothing tracked");
        }
    }

    fn finish(mut self) -> Vec<AnteRecord<'t>> {
        self.flush();
        self.antes
    }
}

fn scan_shop_line(scanner: &LogScanner<'_>, ante: &mut AnteRecord<'_>, line: &str) {
    let Some(captures) = RE_SHOP_LINE.captures(line) else {
        tracing::trace!(line, "not a shop entry");
        return;
    };
    let Ok(index) = captures[1].parse::<u32>() else {
        tracing::trace!(line, "shop index out of range");
        return;
    };
    let item = &captures[2];
    for pattern in &scanner.jokers {
        if pattern.matches(item) {
            ante.add_jester(&pattern.name, pattern.is_negative(item), index);
        }
    }
}

fn scan_pack_line(scanner: &LogScanner<'_>, ante: &mut AnteRecord<'_>, line: &str) {
    let Some(category) = scanner.tables.pack_prefixes().classify(line) else {
        return;
    };
    let cards = split_csv(after_first(line, '-'));
    match category {
        PackCategory::Standard => {
            for card in cards {
                if let Some(king) = special_king(card) {
                    ante.add_king(&king);
                }
            }
        }
        PackCategory::Buffoon => {
            for card in cards {
                for pattern in scanner.jokers.iter().filter(|p| p.matches(card)) {
                    ante.add_buffoon_jester(&pattern.name);
                }
            }
        }
        PackCategory::Spectral => {
            for card in cards {
                for pattern in scanner.spectrals.iter().filter(|p| p.matches(card)) {
                    ante.add_spectral(&pattern.name);
                }
            }
        }
    }
}

/// Text after the first `delim`, or nothing when the delimiter is absent.
fn after_first(line: &str, delim: char) -> &str {
    line.split_once(delim).map(|(_, rest)| rest).unwrap_or("")
}

fn section_value(line: &str) -> Option<&str> {
    Some(after_first(line, ':').trim()).filter(|value| !value.is_empty())
}

fn split_csv(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|item| !item.is_empty())
}
