use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Tag whose emoji gets an alert prefix when it leads the Tags line.
pub const NEGATIVE_TAG: &str = "Negative Tag";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaceGroup {
    pub emoji: String,
    #[serde(default)]
    pub color: String,
    pub cards: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmojiEntry {
    pub name: String,
    pub emoji: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackCategory {
    Standard,
    Buffoon,
    Spectral,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackPrefixes {
    #[serde(default)]
    pub standard: Vec<String>,
    #[serde(default)]
    pub buffoon: Vec<String>,
    #[serde(default)]
    pub spectral: Vec<String>,
}

impl PackPrefixes {
    pub fn prefixes(&self, category: PackCategory) -> &[String] {
        match category {
            PackCategory::Standard => &self.standard,
            PackCategory::Buffoon => &self.buffoon,
            PackCategory::Spectral => &self.spectral,
        }
    }

    /// Plain prefix test, standard packs first.
    pub fn classify(&self, line: &str) -> Option<PackCategory> {
        [
            PackCategory::Standard,
            PackCategory::Buffoon,
            PackCategory::Spectral,
        ]
        .into_iter()
        .find(|category| {
            self.prefixes(*category)
                .iter()
                .any(|prefix| line.starts_with(prefix.as_str()))
        })
    }
}

/// Snapshot of every classification list, in table order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackedLists {
    pub jokers: Vec<String>,
    pub spectrals: Vec<String>,
    pub tags: Vec<String>,
    pub vouchers: Vec<String>,
    pub bosses: Vec<String>,
}

/// Classification sets, emoji and translations for one locale.
///
/// Built once by the data loader and shared by reference with the scanner and
/// formatter; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct LookupTables {
    face_groups: Vec<FaceGroup>,
    jokers: Vec<String>,
    spectrals: Vec<String>,
    tags: Vec<EmojiEntry>,
    vouchers: Vec<EmojiEntry>,
    alert_bosses: Vec<String>,
    king_labels: BTreeMap<String, String>,
    pack_prefixes: PackPrefixes,
    translations: HashMap<String, String>,
    joker_set: HashSet<String>,
    spectral_set: HashSet<String>,
    boss_set: HashSet<String>,
    face_by_joker: HashMap<String, usize>,
}

#[derive(Debug, Clone, Default)]
pub struct TablesBuilder {
    pub face_groups: Vec<FaceGroup>,
    pub spectrals: Vec<String>,
    pub tags: Vec<EmojiEntry>,
    pub vouchers: Vec<EmojiEntry>,
    pub alert_bosses: Vec<String>,
    pub king_labels: BTreeMap<String, String>,
    pub pack_prefixes: PackPrefixes,
    pub translations: HashMap<String, String>,
}

impl TablesBuilder {
    pub fn build(self) -> LookupTables {
        let mut jokers = Vec::new();
        let mut joker_set = HashSet::new();
        let mut face_by_joker = HashMap::new();
        for (group_idx, group) in self.face_groups.iter().enumerate() {
            for card in &group.cards {
                if joker_set.insert(card.clone()) {
                    jokers.push(card.clone());
                    face_by_joker.insert(card.clone(), group_idx);
                }
            }
        }
        let mut spectrals = Vec::new();
        let mut spectral_set = HashSet::new();
        for name in self.spectrals {
            if spectral_set.insert(name.clone()) {
                spectrals.push(name);
            }
        }
        let boss_set = self.alert_bosses.iter().cloned().collect();
        LookupTables {
            face_groups: self.face_groups,
            jokers,
            spectrals,
            tags: self.tags,
            vouchers: self.vouchers,
            alert_bosses: self.alert_bosses,
            king_labels: self.king_labels,
            pack_prefixes: self.pack_prefixes,
            translations: self.translations,
            joker_set,
            spectral_set,
            boss_set,
            face_by_joker,
        }
    }
}

impl LookupTables {
    pub fn builder() -> TablesBuilder {
        TablesBuilder::default()
    }

    pub fn jokers(&self) -> &[String] {
        &self.jokers
    }

    pub fn spectrals(&self) -> &[String] {
        &self.spectrals
    }

    pub fn face_groups(&self) -> &[FaceGroup] {
        &self.face_groups
    }

    pub fn pack_prefixes(&self) -> &PackPrefixes {
        &self.pack_prefixes
    }

    /// Localized label for `key`, or the key itself.
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.translate_or(key, key)
    }

    pub fn translate_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.translations
            .get(key)
            .map(String::as_str)
            .unwrap_or(default)
    }

    pub fn is_tracked_joker(&self, name: &str) -> bool {
        self.joker_set.contains(name)
    }

    pub fn is_tracked_spectral(&self, name: &str) -> bool {
        self.spectral_set.contains(name)
    }

    pub fn is_tracked_tag(&self, name: &str) -> bool {
        self.tag_emoji(name).is_some()
    }

    pub fn is_tracked_voucher(&self, name: &str) -> bool {
        self.voucher_emoji(name).is_some()
    }

    pub fn is_tracked_boss(&self, name: &str) -> bool {
        self.boss_set.contains(name)
    }

    pub fn tag_emoji(&self, name: &str) -> Option<&str> {
        lookup_emoji(&self.tags, name)
    }

    pub fn voucher_emoji(&self, name: &str) -> Option<&str> {
        lookup_emoji(&self.vouchers, name)
    }

    pub fn face_emoji(&self, joker: &str) -> Option<&str> {
        self.face_group(joker).map(|group| group.emoji.as_str())
    }

    /// Color hint of the joker's face group; empty colors mean "default".
    pub fn face_color(&self, joker: &str) -> Option<&str> {
        self.face_group(joker)
            .map(|group| group.color.as_str())
            .filter(|color| !color.is_empty())
    }

    pub fn king_label(&self, prefix: &str) -> Option<&str> {
        self.king_labels.get(prefix).map(String::as_str)
    }

    pub fn tracked_lists(&self) -> TrackedLists {
        TrackedLists {
            jokers: self.jokers.clone(),
            spectrals: self.spectrals.clone(),
            tags: self.tags.iter().map(|entry| entry.name.clone()).collect(),
            vouchers: self.vouchers.iter().map(|entry| entry.name.clone()).collect(),
            bosses: self.alert_bosses.clone(),
        }
    }

    /// Name of the first mandatory classification set that is empty.
    pub fn missing_section(&self) -> Option<&'static str> {
        if self.jokers.is_empty() {
            Some("jokers")
        } else if self.spectrals.is_empty() {
            Some("spectrals")
        } else if self.tags.is_empty() {
            Some("tags")
        } else if self.vouchers.is_empty() {
            Some("vouchers")
        } else if self.alert_bosses.is_empty() {
            Some("alert_bosses")
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.missing_section().is_some()
    }

    fn face_group(&self, joker: &str) -> Option<&FaceGroup> {
        self.face_by_joker
            .get(joker)
            .and_then(|idx| self.face_groups.get(*idx))
    }
}

fn lookup_emoji<'a>(entries: &'a [EmojiEntry], name: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.emoji.as_str())
        .filter(|emoji| !emoji.is_empty())
}
