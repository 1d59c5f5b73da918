use crate::kings::variant_markers;
use crate::summary::{format_record, tag_emojis};
use crate::{LookupTables, SummaryOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JesterCard {
    pub name: String,
    pub negative: bool,
    pub index: u32,
    pub order: u32,
}

/// Owned snapshot of an ante record, independent of locale and formatting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnteDetails {
    pub number: String,
    pub tag_names: Vec<String>,
    pub tag_emojis: Vec<String>,
    pub tag_output_names: Vec<String>,
    pub spectral_cards: Vec<String>,
    pub king_cards: Vec<String>,
    pub buffoon_jesters: Vec<String>,
    pub jester_cards: Vec<JesterCard>,
    #[serde(default)]
    pub voucher: Option<String>,
    #[serde(default)]
    pub boss: Option<String>,
}

/// Tracked entities collected for a single ante.
#[derive(Debug, Clone)]
pub struct AnteRecord<'t> {
    tables: &'t LookupTables,
    pub(crate) number: String,
    pub(crate) jester_cards: Vec<JesterCard>,
    pub(crate) buffoon_jesters: Vec<String>,
    pub(crate) spectral_cards: Vec<String>,
    pub(crate) king_cards: Vec<String>,
    pub(crate) tag_names: Vec<String>,
    pub(crate) tag_output_names: Vec<String>,
    pub(crate) voucher: Option<String>,
    pub(crate) boss: Option<String>,
    order_counter: u32,
}

impl<'t> AnteRecord<'t> {
    pub fn new(number: impl Into<String>, tables: &'t LookupTables) -> Self {
        Self {
            tables,
            number: number.into(),
            jester_cards: Vec::new(),
            buffoon_jesters: Vec::new(),
            spectral_cards: Vec::new(),
            king_cards: Vec::new(),
            tag_names: Vec::new(),
            tag_output_names: Vec::new(),
            voucher: None,
            boss: None,
            order_counter: 0,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn tables(&self) -> &'t LookupTables {
        self.tables
    }

    pub fn add_jester(&mut self, name: &str, negative: bool, index: u32) {
        if !self.tables.is_tracked_joker(name) {
            return;
        }
        let order = self.order_counter;
        self.order_counter += 1;
        self.jester_cards.push(JesterCard {
            name: name.to_string(),
            negative,
            index,
            order,
        });
    }

    pub fn add_buffoon_jester(&mut self, name: &str) {
        if self.tables.is_tracked_joker(name) {
            push_unique(&mut self.buffoon_jesters, name);
        }
    }

    pub fn add_spectral(&mut self, name: &str) {
        if self.tables.is_tracked_spectral(name) {
            push_unique(&mut self.spectral_cards, name);
        }
    }

    pub fn add_tag(&mut self, name: &str) {
        push_unique(&mut self.tag_output_names, name);
        if self.tables.is_tracked_tag(name) {
            push_unique(&mut self.tag_names, name);
        }
    }

    /// Plain kings are never recorded.
    pub fn add_king(&mut self, description: &str) {
        let normalized = description.trim();
        if normalized.is_empty() || variant_markers(normalized).is_empty() {
            return;
        }
        push_unique(&mut self.king_cards, normalized);
    }

    pub fn set_voucher(&mut self, name: Option<&str>) {
        self.voucher = name.map(str::to_string);
    }

    pub fn set_boss(&mut self, name: Option<&str>) {
        self.boss = name.map(str::to_string);
    }

    /// Whether the ante carries anything worth a summary line. A tracked boss
    /// or voucher alone does not count.
    pub fn has_output(&self) -> bool {
        !self.tag_names.is_empty()
            || !self.jester_cards.is_empty()
            || !self.spectral_cards.is_empty()
            || !self.king_cards.is_empty()
            || !self.buffoon_jesters.is_empty()
    }

    pub fn format_output(&self, options: &SummaryOptions) -> String {
        format_record(self, options)
    }

    /// True when the raw Tags order starts with the Negative Tag.
    pub fn leads_with_negative_tag(&self) -> bool {
        self.tag_output_names
            .first()
            .is_some_and(|name| name == crate::NEGATIVE_TAG)
    }

    pub fn to_details(&self) -> AnteDetails {
        AnteDetails {
            number: self.number.clone(),
            tag_names: self.tag_names.clone(),
            tag_emojis: tag_emojis(self),
            tag_output_names: self.tag_output_names.clone(),
            spectral_cards: self.spectral_cards.clone(),
            king_cards: self.king_cards.clone(),
            buffoon_jesters: self.buffoon_jesters.clone(),
            jester_cards: self.jester_cards.clone(),
            voucher: self.voucher.clone(),
            boss: self.boss.clone(),
        }
    }
}

fn push_unique(items: &mut Vec<String>, name: &str) {
    if !items.iter().any(|item| item == name) {
        items.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmojiEntry, FaceGroup};

    fn tables() -> LookupTables {
        let mut builder = LookupTables::builder();
        builder.face_groups = vec![FaceGroup {
            emoji: "👥".to_string(),
            color: String::new(),
            cards: vec!["Blueprint".to_string(), "Brainstorm".to_string()],
        }];
        builder.spectrals = vec!["The Soul".to_string()];
        builder.tags = vec![
            EmojiEntry {
                name: "Negative Tag".to_string(),
                emoji: "🎞️".to_string(),
            },
            EmojiEntry {
                name: "Double Tag".to_string(),
                emoji: "🖇️".to_string(),
            },
        ];
        builder.build()
    }

    #[test]
    fn untracked_entities_are_ignored() {
        let tables = tables();
        let mut record = AnteRecord::new("1", &tables);
        record.add_jester("Joker", false, 1);
        record.add_buffoon_jester("Joker");
        record.add_spectral("Wraith");
        record.add_tag("Uncommon Tag");
        assert!(!record.has_output());
        assert_eq!(record.tag_output_names, ["Uncommon Tag"]);
    }

    #[test]
    fn jesters_keep_duplicates_with_fresh_order() {
        let tables = tables();
        let mut record = AnteRecord::new("2", &tables);
        record.add_jester("Blueprint", false, 3);
        record.add_jester("Brainstorm", true, 1);
        record.add_jester("Blueprint", false, 3);
        let orders: Vec<u32> = record.jester_cards.iter().map(|card| card.order).collect();
        assert_eq!(orders, [0, 1, 2]);
        assert_eq!(record.jester_cards.len(), 3);
        assert!(record.jester_cards[1].negative);
    }

    #[test]
    fn sets_deduplicate_by_name() {
        let tables = tables();
        let mut record = AnteRecord::new("3", &tables);
        record.add_buffoon_jester("Blueprint");
        record.add_buffoon_jester("Blueprint");
        record.add_spectral("The Soul");
        record.add_spectral("The Soul");
        record.add_tag("Double Tag");
        record.add_tag("Double Tag");
        assert_eq!(record.buffoon_jesters, ["Blueprint"]);
        assert_eq!(record.spectral_cards, ["The Soul"]);
        assert_eq!(record.tag_names, ["Double Tag"]);
    }

    #[test]
    fn add_king_skips_plain_and_duplicate_kings() {
        let tables = tables();
        let mut record = AnteRecord::new("4", &tables);
        record.add_king("King of Hearts");
        assert!(!record.has_output());
        record.add_king("  Gold King of Hearts ");
        record.add_king("Gold King of Hearts");
        assert_eq!(record.king_cards, ["Gold King of Hearts"]);
        assert!(record.has_output());
    }

    #[test]
    fn boss_and_voucher_do_not_count_as_output() {
        let tables = tables();
        let mut record = AnteRecord::new("5", &tables);
        record.set_boss(Some("The Ox"));
        record.set_voucher(Some("Director's Cut"));
        assert!(!record.has_output());
        record.set_boss(None);
        assert_eq!(record.boss, None);
    }

    #[test]
    fn details_are_detached_snapshots() {
        let tables = tables();
        let mut record = AnteRecord::new("6", &tables);
        record.add_tag("Negative Tag");
        let details = record.to_details();
        record.add_tag("Double Tag");
        assert_eq!(details.tag_names, ["Negative Tag"]);
        assert_eq!(details.tag_emojis, ["‼️🎞️"]);
        assert_eq!(record.tag_names.len(), 2);
    }

    #[test]
    fn details_json_uses_camel_case_keys() {
        let tables = tables();
        let mut record = AnteRecord::new("8", &tables);
        record.add_tag("Uncommon Tag");
        record.add_tag("Negative Tag");
        record.add_jester("Brainstorm", true, 2);
        let details = record.to_details();
        let value = serde_json::to_value(&details).expect("serialize");
        assert_eq!(value["tagNames"], serde_json::json!(["Negative Tag"]));
        assert_eq!(
            value["tagOutputNames"],
            serde_json::json!(["Uncommon Tag", "Negative Tag"])
        );
        assert_eq!(value["jesterCards"][0]["name"], "Brainstorm");
        assert_eq!(value["jesterCards"][0]["negative"], true);
        assert!(value.get("tag_names").is_none());
        let back: AnteDetails = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, details);
    }
}
