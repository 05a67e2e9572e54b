//! Model module - the completion models a run may select

/// Completion model identifier
///
/// Runs pick one of a small fixed set of hosted models:
/// - Gpt4: higher quality, slower (default)
/// - Gpt35Turbo: cheaper and faster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelId {
    /// `gpt-4`
    #[default]
    Gpt4,

    /// `gpt-3.5-turbo`
    Gpt35Turbo,
}

impl ModelId {
    /// Every supported model, in display order
    pub const ALL: [ModelId; 2] = [ModelId::Gpt4, ModelId::Gpt35Turbo];

    /// Get the identifier sent to the completion service
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Gpt4 => "gpt-4",
            ModelId::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }

    /// Parse a model identifier (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gpt-4" | "gpt4" => Some(ModelId::Gpt4),
            "gpt-3.5-turbo" | "gpt-3.5" | "gpt35" => Some(ModelId::Gpt35Turbo),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let supported: Vec<_> = Self::ALL.iter().map(|m| m.as_str()).collect();
            format!("Unsupported model: {} (expected one of: {})", s, supported.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_identifiers() {
        for model in ModelId::ALL {
            assert_eq!(ModelId::parse(model.as_str()), Some(model));
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(ModelId::parse("GPT-4"), Some(ModelId::Gpt4));
        assert_eq!(ModelId::parse(" gpt-3.5-turbo "), Some(ModelId::Gpt35Turbo));
    }

    #[test]
    fn test_unknown_model() {
        assert!(ModelId::parse("llama2").is_none());
        let err = "llama2".parse::<ModelId>().unwrap_err();
        assert!(err.contains("gpt-4"));
    }

    #[test]
    fn test_default_is_gpt4() {
        assert_eq!(ModelId::default(), ModelId::Gpt4);
        assert_eq!(ModelId::default().to_string(), "gpt-4");
    }
}
