#[cfg(test)]
#[path = "generation_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// How much effort the server should put into question generation. Sent as
/// the `qualityLevel` form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum QualityLevel {
    Fast,
    Standard,
    High,
}

impl Default for QualityLevel {
    fn default() -> QualityLevel {
        return QualityLevel::Standard;
    }
}

impl QualityLevel {
    pub fn parse(text: String) -> Option<QualityLevel> {
        return QualityLevel::iter().find(|e| return e.to_string() == text);
    }
}

/// Settings captured at submission time. There is no Debug impl so the key
/// cannot end up in logs.
#[derive(Clone, Default)]
pub struct GenerationConfig {
    pub quality: QualityLevel,
    pub review_enabled: bool,
    pub api_key: String,
}
