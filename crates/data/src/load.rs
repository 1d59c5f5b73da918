use crate::schema::{LocaleFile, TrackedFile};
use anyhow::{bail, Context};
use seedlog_core::LookupTables;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const TRACKED_FILE: &str = "tracked.json";
const LOCALE_DIR: &str = "locale";
pub const DEFAULT_LOCALE: &str = "zh_CN";
pub const TABLES_ENV: &str = "SEEDLOG_TABLES";

const BUILTIN_TRACKED: &str = include_str!("../../../assets/tables/tracked.json");
const BUILTIN_ZH_CN: &str = include_str!("../../../assets/tables/locale/zh_CN.json");
const BUILTIN_EN_US: &str = include_str!("../../../assets/tables/locale/en_US.json");

const KING_PREFIXES: &[&str] = &[
    "Red Seal",
    "Steel",
    "Gold",
    "Red Seal Steel",
    "Red Seal Gold",
];

/// Tables compiled into the binary, for the default locale.
pub fn builtin_tables() -> anyhow::Result<LookupTables> {
    builtin_tables_with_locale(None)
}

pub fn builtin_tables_with_locale(locale: Option<&str>) -> anyhow::Result<LookupTables> {
    let tracked: TrackedFile =
        serde_json::from_str(BUILTIN_TRACKED).context("parse builtin tracked.json")?;
    let locale = normalize_locale(locale);
    let raw = match locale.as_str() {
        "zh_CN" => BUILTIN_ZH_CN,
        "en_US" => BUILTIN_EN_US,
        other => bail!("no builtin locale {other}"),
    };
    let labels: LocaleFile =
        serde_json::from_str(raw).with_context(|| format!("parse builtin locale {locale}"))?;
    build_tables(tracked, labels)
}

pub fn load_tables(dir: &Path) -> anyhow::Result<LookupTables> {
    load_tables_with_locale(dir, None)
}

/// Reads `tracked.json` and `locale/<locale>.json` from `dir`. A missing
/// locale file leaves every name untranslated; a missing tracked file is an
/// error.
pub fn load_tables_with_locale(dir: &Path, locale: Option<&str>) -> anyhow::Result<LookupTables> {
    let tracked_path = dir.join(TRACKED_FILE);
    if !tracked_path.exists() {
        bail!("missing {}", tracked_path.display());
    }
    let tracked: TrackedFile = load_json(&tracked_path)?;
    let locale = normalize_locale(locale);
    let locale_path = dir.join(LOCALE_DIR).join(format!("{locale}.json"));
    let labels: LocaleFile = if locale_path.exists() {
        load_json(&locale_path)?
    } else {
        tracing::warn!(path = %locale_path.display(), "locale file missing, names stay untranslated");
        LocaleFile::default()
    };
    build_tables(tracked, labels).with_context(|| format!("validate {}", dir.display()))
}

/// Uses `dir` when given, then the `SEEDLOG_TABLES` directory, then the
/// builtin tables.
pub fn resolve_tables(dir: Option<&Path>, locale: Option<&str>) -> anyhow::Result<LookupTables> {
    if let Some(dir) = dir {
        return load_tables_with_locale(dir, locale);
    }
    if let Some(dir) = std::env::var_os(TABLES_ENV) {
        return load_tables_with_locale(Path::new(&dir), locale);
    }
    builtin_tables_with_locale(locale)
}

pub fn normalize_locale(locale: Option<&str>) -> String {
    let raw = locale.unwrap_or(DEFAULT_LOCALE).trim();
    if raw.is_empty() {
        return DEFAULT_LOCALE.to_string();
    }
    let lowered = raw.replace('-', "_").to_ascii_lowercase();
    match lowered.as_str() {
        "zh" | "zh_cn" | "zh_hans" | "zh_hans_cn" => "zh_CN".to_string(),
        "en" | "en_us" => "en_US".to_string(),
        _ => raw.replace('-', "_"),
    }
}

fn build_tables(tracked: TrackedFile, labels: LocaleFile) -> anyhow::Result<LookupTables> {
    validate_tracked(&tracked)?;
    for prefix in labels.king_labels.keys() {
        if !KING_PREFIXES.contains(&prefix.as_str()) {
            bail!("unknown king variant {prefix:?}");
        }
    }
    let mut builder = LookupTables::builder();
    builder.face_groups = tracked.face_groups;
    builder.spectrals = tracked.spectrals;
    builder.tags = tracked.tags;
    builder.vouchers = tracked.vouchers;
    builder.alert_bosses = tracked.alert_bosses;
    builder.pack_prefixes = tracked.pack_prefixes;
    builder.king_labels = labels.king_labels;
    builder.translations = labels.translations;
    let tables = builder.build();
    if let Some(section) = tables.missing_section() {
        bail!("{section} is empty");
    }
    Ok(tables)
}

fn validate_tracked(tracked: &TrackedFile) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for group in &tracked.face_groups {
        if group.emoji.is_empty() {
            bail!("face group without emoji");
        }
        for card in &group.cards {
            if card.trim().is_empty() {
                bail!("empty joker name in face group {}", group.emoji);
            }
            if !seen.insert(card.as_str()) {
                bail!("joker {card} listed in more than one face group");
            }
        }
    }
    for entry in tracked.tags.iter().chain(&tracked.vouchers) {
        if entry.emoji.is_empty() {
            bail!("{} has no emoji", entry.name);
        }
    }
    let names = tracked
        .spectrals
        .iter()
        .chain(&tracked.alert_bosses)
        .chain(tracked.tags.iter().map(|entry| &entry.name))
        .chain(tracked.vouchers.iter().map(|entry| &entry.name));
    for name in names {
        if name.trim().is_empty() {
            bail!("empty tracked name");
        }
    }
    for prefix in tracked
        .pack_prefixes
        .standard
        .iter()
        .chain(&tracked.pack_prefixes.buffoon)
        .chain(&tracked.pack_prefixes.spectral)
    {
        if !prefix.ends_with('-') {
            bail!("pack prefix {prefix:?} must end with '-'");
        }
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
