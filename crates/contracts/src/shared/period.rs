use serde::{Deserialize, Deserializer, Serialize};

/// A year or month key as stored by the backend ("2024", "7").
///
/// Sometimes serialized as a number, so deserialization accepts both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PeriodKey(pub String);

impl PeriodKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value used for ordering; non-numeric keys sort last.
    pub fn number(&self) -> Option<i32> {
        self.0.trim().parse().ok()
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        crate::shared::de::string_or_number(deserializer).map(PeriodKey)
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeriodKey {
    fn from(value: &str) -> Self {
        PeriodKey(value.to_string())
    }
}
