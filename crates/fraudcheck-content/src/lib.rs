//! Fraud Check Content
//!
//! Site content records (home page, articles, scam trends, scam checker
//! quiz, article settings) kept in durable key-value storage. Every read
//! returns a complete record: defaults fill whatever storage lacks.

mod config;
mod error;
mod merge;
mod record;
mod records;
mod store;

pub use config::{Config, DEFAULT_QUOTA_BYTES};
pub use error::ContentError;
pub use merge::overlay;
pub use record::{ContentRecord, RecordKind, WritePolicy};
pub use records::{
    Article, ArticleLayout, ArticleSettings, ArticlesSection, CommunityReports, Feature,
    HomeArticles, HomeContent, HomeHero, QuizOption, QuizOutcome, QuizQuestion, RiskLevel,
    ScamCategory, ScamCheckerQuiz, ScamOfTheWeek, ScamTrendsContent, ScamTrendsHero,
    TipOfTheWeek, UserReportedScam, DAY_FORMAT, PAST_SCAMS_LIMIT,
};
pub use records::parse_day;
pub use store::ContentStore;

// Re-export storage backends
pub use fraudcheck_storage::{KeyValueStorage, MemoryStorage, StorageError, StoredEntry};
#[cfg(target_arch = "wasm32")]
pub use fraudcheck_storage::BrowserStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use fraudcheck_storage::Database;

pub type Result<T> = std::result::Result<T, ContentError>;

/// Initialize logging
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed by an embedding application
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
