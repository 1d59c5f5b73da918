//! Rendering of an ante record into a single summary line.
//!
//! Sections always appear in the same order (alerts, tags, spectrals, kings,
//! buffoon jokers, shop jokers) and are joined with `" | "` after the
//! `"<ante>："` head.

use crate::kings::king_prefix;
use crate::{AnteRecord, LookupTables, SummaryOptions, NEGATIVE_TAG};

pub const SECTION_SEPARATOR: &str = " | ";
pub const ITEM_SEPARATOR: &str = "、";
pub const ANTE_SEPARATOR: &str = "：";

const ALERT: &str = "‼️";
const BOSS_ALERT: &str = "‼️☠️";
const SPECTRAL_MARK: &str = "💠";
const KING_MARK: &str = "♔";
const BUFFOON_MARK: &str = "👝";

pub fn format_record(record: &AnteRecord<'_>, options: &SummaryOptions) -> String {
    let sections: Vec<String> = [
        alert_section(record, options),
        tag_section(record, options),
        spectral_section(record, options),
        king_section(record, options),
        buffoon_section(record, options),
        shop_section(record, options),
    ]
    .into_iter()
    .filter(|section| !section.is_empty())
    .collect();
    format!(
        "{}{ANTE_SEPARATOR}{}",
        record.number(),
        sections.join(SECTION_SEPARATOR)
    )
}

/// Emoji of each tracked tag, with the alert prefix on a leading Negative Tag.
pub fn tag_emojis(record: &AnteRecord<'_>) -> Vec<String> {
    let tables = record.tables();
    record
        .tag_names
        .iter()
        .filter_map(|tag| {
            tables
                .tag_emoji(tag)
                .map(|emoji| format!("{}{emoji}", negative_prefix(record, tag)))
        })
        .collect()
}

fn display_name(tables: &LookupTables, name: &str, options: &SummaryOptions) -> String {
    let localized = tables.translate(name);
    if options.chinese_only {
        localized.to_string()
    } else {
        format!("{localized}({name})")
    }
}

fn face<'a>(tables: &'a LookupTables, joker: &str, options: &SummaryOptions) -> &'a str {
    if options.face_emoji {
        tables.face_emoji(joker).unwrap_or("")
    } else {
        ""
    }
}

fn negative_prefix(record: &AnteRecord<'_>, tag: &str) -> &'static str {
    if tag == NEGATIVE_TAG && record.leads_with_negative_tag() {
        ALERT
    } else {
        ""
    }
}

fn alert_section(record: &AnteRecord<'_>, options: &SummaryOptions) -> String {
    let tables = record.tables();
    let mut out = String::new();
    if let Some(boss) = record.boss.as_deref().filter(|b| tables.is_tracked_boss(b)) {
        out.push_str(BOSS_ALERT);
        out.push_str(&display_name(tables, boss, options));
    }
    if let Some(voucher) = record
        .voucher
        .as_deref()
        .filter(|v| tables.is_tracked_voucher(v))
    {
        out.push_str(tables.voucher_emoji(voucher).unwrap_or_default());
        out.push_str(&display_name(tables, voucher, options));
    }
    out
}

fn tag_section(record: &AnteRecord<'_>, options: &SummaryOptions) -> String {
    let tables = record.tables();
    record
        .tag_names
        .iter()
        .filter_map(|tag| {
            let emoji = tables.tag_emoji(tag)?;
            Some(format!(
                "{}{emoji}{}",
                negative_prefix(record, tag),
                display_name(tables, tag, options)
            ))
        })
        .collect()
}

fn spectral_section(record: &AnteRecord<'_>, options: &SummaryOptions) -> String {
    if record.spectral_cards.is_empty() {
        return String::new();
    }
    let tables = record.tables();
    let items: Vec<String> = record
        .spectral_cards
        .iter()
        .map(|name| display_name(tables, name, options))
        .collect();
    format!("{SPECTRAL_MARK}{}", items.join(ITEM_SEPARATOR))
}

fn king_section(record: &AnteRecord<'_>, options: &SummaryOptions) -> String {
    let tables = record.tables();
    let items: Vec<String> = record
        .king_cards
        .iter()
        .filter_map(|key| {
            let prefix = king_prefix(key);
            let label = tables.king_label(prefix)?;
            Some(if options.chinese_only {
                label.to_string()
            } else {
                format!("{label}({prefix} King)")
            })
        })
        .collect();
    if items.is_empty() {
        return String::new();
    }
    format!("{KING_MARK}{}", items.join(ITEM_SEPARATOR))
}

fn buffoon_section(record: &AnteRecord<'_>, options: &SummaryOptions) -> String {
    let tables = record.tables();
    let items: Vec<String> = record
        .buffoon_jesters
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let mark = if idx == 0 { BUFFOON_MARK } else { "" };
            format!(
                "{mark}{}{}",
                face(tables, name, options),
                display_name(tables, name, options)
            )
        })
        .collect();
    items.join(ITEM_SEPARATOR)
}

fn shop_section(record: &AnteRecord<'_>, options: &SummaryOptions) -> String {
    let tables = record.tables();
    let mut cards: Vec<_> = record.jester_cards.iter().collect();
    cards.sort_by_key(|card| card.order);
    let items: Vec<String> = cards
        .into_iter()
        .map(|card| {
            let localized = tables.translate(&card.name);
            let neg = if card.negative { ALERT } else { "" };
            let glyph = face(tables, &card.name, options);
            if options.chinese_only {
                format!("{glyph}{localized}{neg}#{}", card.index)
            } else {
                format!("{glyph}{localized}{neg}({} #{})", card.name, card.index)
            }
        })
        .collect();
    items.join(ITEM_SEPARATOR)
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
        builder.spectrals = vec!["The Soul".to_string(), "Cryptid".to_string()];
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
        builder.vouchers = vec![EmojiEntry {
            name: "Retcon".to_string(),
            emoji: "🔄".to_string(),
        }];
        builder.alert_bosses = vec!["The Hook".to_string()];
        builder
            .king_labels
            .insert("Gold".to_string(), "黄金K".to_string());
        for (en, zh) in [
            ("Blueprint", "蓝图"),
            ("Brainstorm", "头脑"),
            ("The Soul", "灵魂"),
            ("Cryptid", "神秘生物"),
            ("Negative Tag", "负片标签"),
            ("Double Tag", "双倍标签"),
            ("Retcon", "重拍"),
            ("The Hook", "钩子"),
        ] {
            builder.translations.insert(en.to_string(), zh.to_string());
        }
        builder.build()
    }

    #[test]
    fn empty_record_keeps_ante_head() {
        let tables = tables();
        let record = AnteRecord::new("7", &tables);
        assert_eq!(format_record(&record, &SummaryOptions::default()), "7：");
    }

    #[test]
    fn bilingual_line_orders_every_section() {
        let tables = tables();
        let mut record = AnteRecord::new("3", &tables);
        record.set_boss(Some("The Hook"));
        record.set_voucher(Some("Retcon"));
        record.add_tag("Double Tag");
        record.add_tag("Negative Tag");
        record.add_spectral("Cryptid");
        record.add_spectral("The Soul");
        record.add_king("Gold King of Clubs");
        record.add_buffoon_jester("Brainstorm");
        record.add_buffoon_jester("Blueprint");
        record.add_jester("Blueprint", true, 4);
        let line = format_record(&record, &SummaryOptions::bilingual());
        assert_eq!(
            line,
            "3：‼️☠️钩子(The Hook)🔄重拍(Retcon) | 🖇️双倍标签(Double Tag)🎞️负片标签(Negative Tag) \
             | 💠神秘生物(Cryptid)、灵魂(The Soul) | ♔黄金K(Gold King) \
             | 👝头脑(Brainstorm)、蓝图(Blueprint) | 蓝图‼️(Blueprint #4)"
        );
    }

    #[test]
    fn chinese_only_line_drops_original_names() {
        let tables = tables();
        let mut record = AnteRecord::new("1", &tables);
        record.add_tag("Negative Tag");
        record.add_jester("Brainstorm", false, 2);
        let line = format_record(&record, &SummaryOptions::chinese_only());
        assert_eq!(line, "1：‼️🎞️负片标签 | 头脑#2");
    }

    #[test]
    fn unsupported_king_combination_is_not_rendered() {
        let tables = tables();
        let mut record = AnteRecord::new("2", &tables);
        record.add_king("Steel Gold King of Hearts");
        assert!(record.has_output());
        assert_eq!(format_record(&record, &SummaryOptions::chinese_only()), "2：");
    }

    #[test]
    fn shop_jesters_render_in_insertion_order() {
        let tables = tables();
        let mut record = AnteRecord::new("5", &tables);
        record.add_jester("Brainstorm", false, 3);
        record.add_jester("Blueprint", false, 1);
        let line = format_record(&record, &SummaryOptions::chinese_only());
        assert_eq!(line, "5：头脑#3、蓝图#1");
    }

    #[test]
    fn face_emoji_prefixes_jokers_when_enabled() {
        let tables = tables();
        let mut record = AnteRecord::new("6", &tables);
        record.add_buffoon_jester("Blueprint");
        record.add_jester("Brainstorm", false, 1);
        let options = SummaryOptions::chinese_only().with_face_emoji(true);
        assert_eq!(format_record(&record, &options), "6：👝👥蓝图 | 👥头脑#1");
    }

    #[test]
    fn untracked_boss_and_voucher_leave_alert_empty() {
        let tables = tables();
        let mut record = AnteRecord::new("4", &tables);
        record.set_boss(Some("The Wall"));
        record.set_voucher(Some("Overstock"));
        record.add_jester("Blueprint", false, 1);
        assert_eq!(
            format_record(&record, &SummaryOptions::chinese_only()),
            "4：蓝图#1"
        );
        record.set_voucher(Some("Retcon"));
        assert_eq!(
            format_record(&record, &SummaryOptions::chinese_only()),
            "4：🔄重拍 | 蓝图#1"
        );
    }
}
