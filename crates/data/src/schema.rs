use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub use seedlog_core::{EmojiEntry, FaceGroup, LookupTables, PackPrefixes, TrackedLists};

/// `tracked.json`: locale independent classification lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedFile {
    pub face_groups: Vec<FaceGroup>,
    pub spectrals: Vec<String>,
    pub tags: Vec<EmojiEntry>,
    pub vouchers: Vec<EmojiEntry>,
    pub alert_bosses: Vec<String>,
    #[serde(default)]
    pub pack_prefixes: PackPrefixes,
}

/// `locale/<code>.json`: display labels for one locale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocaleFile {
    #[serde(default)]
    pub translations: HashMap<String, String>,
    #[serde(default)]
    pub king_labels: BTreeMap<String, String>,
}
