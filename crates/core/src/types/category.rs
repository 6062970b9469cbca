//! Product category.

use serde::{Deserialize, Serialize};

/// Error returned when a submitted value is not one of the known categories.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0:?}")]
pub struct CategoryError(pub String);

/// Product category.
///
/// The wire value is the lowercase identifier used by the form's `<select>`.
/// Anything outside this allow-list is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Higiene,
    Alimento,
    Limpeza,
    Farmacia,
    Outro,
}

impl Category {
    /// Every category, in the order the form lists them.
    pub const ALL: [Self; 5] = [
        Self::Higiene,
        Self::Alimento,
        Self::Limpeza,
        Self::Farmacia,
        Self::Outro,
    ];

    /// The value submitted by the form and shown in the listing.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Higiene => "higiene",
            Self::Alimento => "alimento",
            Self::Limpeza => "limpeza",
            Self::Farmacia => "farmacia",
            Self::Outro => "outro",
        }
    }

    /// Human-readable label for the form's options.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Higiene => "Higiene",
            Self::Alimento => "Alimento",
            Self::Limpeza => "Limpeza",
            Self::Farmacia => "Farmácia",
            Self::Outro => "Outro",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CategoryError(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trips_every_category() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert!("Higiene".parse::<Category>().is_err());
        assert!("FARMACIA".parse::<Category>().is_err());
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "eletronicos".parse::<Category>().unwrap_err();
        assert_eq!(err, CategoryError("eletronicos".to_string()));
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(Category::Farmacia.label(), "Farmácia");
        assert_eq!(Category::Outro.label(), "Outro");
    }

    #[test]
    fn test_serde_uses_wire_value() {
        let json = serde_json::to_string(&Category::Limpeza).unwrap();
        assert_eq!(json, "\"limpeza\"");
    }
}
