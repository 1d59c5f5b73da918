use crate::{AnteDetails, LogScanner, LookupTables, SummaryError, SummaryOptions, TrackedLists};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Entry point tying the scanner and the formatter to one set of tables.
#[derive(Debug, Clone)]
pub struct Summarizer {
    tables: LookupTables,
}

impl Summarizer {
    /// Refuses tables that lack any of the classification sets.
    pub fn new(tables: LookupTables) -> Result<Self, SummaryError> {
        if let Some(section) = tables.missing_section() {
            return Err(SummaryError::MissingTables(section.to_string()));
        }
        Ok(Self { tables })
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    pub fn tracked_lists(&self) -> TrackedLists {
        self.tables.tracked_lists()
    }

    pub fn parse_log<I, S>(&self, lines: I, options: &SummaryOptions) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        LogScanner::new(&self.tables)
            .scan(lines)
            .iter()
            .map(|ante| ante.format_output(options))
            .collect()
    }

    pub fn parse_log_to_details<I, S>(&self, lines: I) -> Vec<AnteDetails>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        LogScanner::new(&self.tables)
            .scan(lines)
            .iter()
            .map(|ante| ante.to_details())
            .collect()
    }

    pub fn summarize_text(&self, text: &str, options: &SummaryOptions) -> String {
        let normalized = normalize_text(text);
        self.parse_log(normalized.split('\n'), options).join("\n")
    }

    /// Summary line per ante number; the first occurrence of a number wins.
    pub fn summarize_to_ante_map(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> BTreeMap<u32, String> {
        let normalized = normalize_text(text);
        let mut map = BTreeMap::new();
        for ante in LogScanner::new(&self.tables).scan(normalized.split('\n')) {
            let Ok(number) = ante.number().parse::<u32>() else {
                continue;
            };
            map.entry(number)
                .or_insert_with(|| ante.format_output(options));
        }
        map
    }

    pub fn summarize_file(
        &self,
        path: &Path,
        options: &SummaryOptions,
    ) -> Result<Vec<String>, SummaryError> {
        let raw = read_log(path)?;
        Ok(self.parse_log(raw.split('\n'), options))
    }

    pub fn details_for_file(&self, path: &Path) -> Result<Vec<AnteDetails>, SummaryError> {
        let raw = read_log(path)?;
        Ok(self.parse_log_to_details(raw.split('\n')))
    }
}

/// Collapses `\r\n` and lone `\r` into `\n`.
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn read_log(path: &Path) -> Result<String, SummaryError> {
    let raw = fs::read_to_string(path).map_err(|err| SummaryError::read(path, err))?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "log read");
    Ok(normalize_text(&raw))
}
