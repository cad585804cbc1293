//! List filter preference.
//!
//! Persisted independently of the collection under its own storage key.

use serde::{Deserialize, Serialize};

/// Which todos the list surface shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoFilter {
    #[default]
    All,
    /// Only `completed == false`.
    Active,
    /// Only `completed == true`.
    Completed,
}

impl TodoFilter {
    pub const ALL: [TodoFilter; 3] = [Self::All, Self::Active, Self::Completed];

    /// Stable storage value (`all|active|completed`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Parses a stored value, falling back to `All` for anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        Self::parse(value.trim()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::TodoFilter;

    #[test]
    fn unknown_values_fall_back_to_all() {
        assert_eq!(TodoFilter::parse_or_default("archived"), TodoFilter::All);
        assert_eq!(TodoFilter::parse_or_default(""), TodoFilter::All);
        assert_eq!(TodoFilter::parse_or_default("active"), TodoFilter::Active);
    }

    #[test]
    fn storage_values_are_stable() {
        for filter in TodoFilter::ALL {
            assert_eq!(TodoFilter::parse(filter.as_str()), Some(filter));
        }
    }
}
