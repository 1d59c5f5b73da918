use serde::{Deserialize, Serialize};

/// Output grammar switches for the summary formatter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Render only the localized name instead of `localized(original)`.
    #[serde(default)]
    pub chinese_only: bool,
    /// Prefix jokers with the glyph of their face group.
    #[serde(default)]
    pub face_emoji: bool,
}

impl SummaryOptions {
    pub fn chinese_only() -> Self {
        Self {
            chinese_only: true,
            ..Self::default()
        }
    }

    pub fn bilingual() -> Self {
        Self::default()
    }

    pub fn with_face_emoji(mut self, enabled: bool) -> Self {
        self.face_emoji = enabled;
        self
    }
}
