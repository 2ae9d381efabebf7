//! Record kinds and the trait every stored record implements

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContentError;
use crate::Result;

/// The five content categories the site persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Home,
    HomeArticles,
    ScamTrends,
    ScamChecker,
    ArticleSettings,
}

/// What a failed save does once it has been logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Return the error to the caller
    Propagate,
    /// Report success to the caller
    Swallow,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Home,
        RecordKind::HomeArticles,
        RecordKind::ScamTrends,
        RecordKind::ScamChecker,
        RecordKind::ArticleSettings,
    ];

    /// Storage key the record lives under
    pub fn key(&self) -> &'static str {
        match self {
            RecordKind::Home => "homeData",
            RecordKind::HomeArticles => "homeArticles",
            RecordKind::ScamTrends => "scamTrendsData",
            RecordKind::ScamChecker => "scamCheckerQuiz",
            RecordKind::ArticleSettings => "articleSettings",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Home => "home",
            RecordKind::HomeArticles => "home-articles",
            RecordKind::ScamTrends => "scam-trends",
            RecordKind::ScamChecker => "scam-checker",
            RecordKind::ArticleSettings => "article-settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Home => "Home content",
            RecordKind::HomeArticles => "Home articles",
            RecordKind::ScamTrends => "Scam trends",
            RecordKind::ScamChecker => "Scam checker quiz",
            RecordKind::ArticleSettings => "Article display settings",
        }
    }

    /// Only the scam trends editor shows a failure state for saves; every
    /// other record reports success after logging.
    pub fn write_policy(&self) -> WritePolicy {
        match self {
            RecordKind::ScamTrends => WritePolicy::Propagate,
            _ => WritePolicy::Swallow,
        }
    }

    pub fn from_key(key: &str) -> Option<RecordKind> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted || kind.key() == wanted)
            .ok_or_else(|| ContentError::NotFound(format!("record kind `{wanted}`")))
    }
}

/// A content record with a compiled default.
pub trait ContentRecord: Serialize + DeserializeOwned + Clone {
    const KIND: RecordKind;

    /// Object fields merged field-by-field with their defaults.
    const NESTED_FIELDS: &'static [&'static str] = &[];

    fn default_record() -> Self;

    /// Checks applied to content imported through the admin tool.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = RecordKind::ALL.iter().map(|k| k.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), RecordKind::ALL.len());
    }

    #[test]
    fn test_parse_by_name_or_key() {
        assert_eq!("scam-trends".parse::<RecordKind>().unwrap(), RecordKind::ScamTrends);
        assert_eq!("homeData".parse::<RecordKind>().unwrap(), RecordKind::Home);
        assert!("nope".parse::<RecordKind>().is_err());
        assert_eq!(RecordKind::from_key("articleSettings"), Some(RecordKind::ArticleSettings));
    }

    #[test]
    fn test_only_scam_trends_propagates() {
        for kind in RecordKind::ALL {
            let expected = if kind == RecordKind::ScamTrends {
                WritePolicy::Propagate
            } else {
                WritePolicy::Swallow
            };
            assert_eq!(kind.write_policy(), expected, "{kind}");
        }
    }
}
