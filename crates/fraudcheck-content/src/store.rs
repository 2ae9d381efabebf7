//! Content store
//!
//! Reads never fail: a missing record is seeded with its default, and text
//! that is not a JSON object is logged and replaced by the default. A stored
//! object whose fields no longer fit the record keeps every field that does;
//! the rest come from the default and storage is left as it was. Writes log
//! every failure and only the scam trends record hands the failure back to
//! its caller.

use serde_json::Value;
use std::sync::Arc;

use fraudcheck_storage::KeyValueStorage;

use crate::error::ContentError;
use crate::merge;
use crate::record::{ContentRecord, RecordKind, WritePolicy};
use crate::records::{
    ArticleSettings, HomeArticles, HomeContent, ScamCheckerQuiz, ScamOfTheWeek,
    ScamTrendsContent, UserReportedScam,
};
use crate::Result;

#[derive(Clone)]
pub struct ContentStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl ContentStore {
    pub fn new<S: KeyValueStorage + 'static>(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn from_shared(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    /// Read a record, falling back to its default.
    pub fn load<R: ContentRecord>(&self) -> R {
        let key = R::KIND.key();

        let raw = match self.storage.get_item(key) {
            Ok(raw) => raw,
            Err(e) => {
                // Storage may be back later; don't clobber what it holds
                tracing::error!(key = %key, error = %e, "Failed to read content record");
                return R::default_record();
            }
        };

        let Some(raw) = raw else {
            tracing::info!(key = %key, "No stored content, seeding default");
            let default = R::default_record();
            self.seed(&default);
            return default;
        };

        match parse_merged::<R>(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Stored content is corrupt, restoring default");
                let default = R::default_record();
                self.seed(&default);
                default
            }
        }
    }

    /// Write a record, applying its kind's write policy to failures.
    pub fn save<R: ContentRecord>(&self, record: &R) -> Result<()> {
        let result = self.write(record);
        match R::KIND.write_policy() {
            WritePolicy::Propagate => result,
            WritePolicy::Swallow => Ok(()),
        }
    }

    fn write<R: ContentRecord>(&self, record: &R) -> Result<()> {
        let key = R::KIND.key();
        let result: Result<()> = serde_json::to_string(record)
            .map_err(Into::into)
            .and_then(|text| self.storage.set_item(key, &text).map_err(Into::into));

        if let Err(e) = &result {
            tracing::error!(key = %key, error = %e, "Failed to save content record");
        }
        result
    }

    fn seed<R: ContentRecord>(&self, default: &R) {
        // Failure is already logged by write
        let _ = self.write(default);
    }

    // === Home ===

    pub fn get_home_data(&self) -> HomeContent {
        self.load()
    }

    pub fn set_home_data(&self, data: &HomeContent) {
        let _ = self.save(data);
    }

    pub fn get_home_articles(&self) -> HomeArticles {
        self.load()
    }

    pub fn set_home_articles(&self, data: &HomeArticles) {
        let _ = self.save(data);
    }

    // === Scam trends ===

    pub fn get_scam_trends_data(&self) -> ScamTrendsContent {
        self.load()
    }

    /// The scam trends editor shows a failure state, so errors come back.
    pub fn set_scam_trends_data(&self, data: &ScamTrendsContent) -> Result<()> {
        self.save(data)
    }

    pub fn add_user_report(&self, report: UserReportedScam) -> Result<ScamTrendsContent> {
        let mut data = self.get_scam_trends_data();
        tracing::info!(report_id = %report.id, scam_type = %report.scam_type, "Adding user report");
        data.add_user_report(report);
        self.set_scam_trends_data(&data)?;
        Ok(data)
    }

    pub fn promote_scam_of_the_week(&self, scam: ScamOfTheWeek) -> Result<ScamTrendsContent> {
        let mut data = self.get_scam_trends_data();
        tracing::info!(name = %scam.name, "Promoting scam of the week");
        data.promote_scam_of_the_week(scam);
        self.set_scam_trends_data(&data)?;
        Ok(data)
    }

    // === Scam checker ===

    pub fn get_scam_checker_quiz(&self) -> ScamCheckerQuiz {
        self.load()
    }

    pub fn set_scam_checker_quiz(&self, data: &ScamCheckerQuiz) {
        let _ = self.save(data);
    }

    // === Article settings ===

    pub fn get_article_settings(&self) -> ArticleSettings {
        self.load()
    }

    pub fn set_article_settings(&self, data: &ArticleSettings) {
        let _ = self.save(data);
    }

    // === Admin ===

    /// The merged record of `kind` as JSON.
    pub fn snapshot(&self, kind: RecordKind) -> Result<Value> {
        let value = match kind {
            RecordKind::Home => serde_json::to_value(self.get_home_data())?,
            RecordKind::HomeArticles => serde_json::to_value(self.get_home_articles())?,
            RecordKind::ScamTrends => serde_json::to_value(self.get_scam_trends_data())?,
            RecordKind::ScamChecker => serde_json::to_value(self.get_scam_checker_quiz())?,
            RecordKind::ArticleSettings => serde_json::to_value(self.get_article_settings())?,
        };
        Ok(value)
    }

    /// Replace `kind` with JSON text. Partial input is merged over the
    /// default. Unlike the editor setters every failure is returned.
    pub fn import(&self, kind: RecordKind, text: &str) -> Result<()> {
        match kind {
            RecordKind::Home => self.import_record::<HomeContent>(text),
            RecordKind::HomeArticles => self.import_record::<HomeArticles>(text),
            RecordKind::ScamTrends => self.import_record::<ScamTrendsContent>(text),
            RecordKind::ScamChecker => self.import_record::<ScamCheckerQuiz>(text),
            RecordKind::ArticleSettings => self.import_record::<ArticleSettings>(text),
        }
    }

    /// Restore the compiled default of `kind`.
    pub fn reset(&self, kind: RecordKind) -> Result<()> {
        tracing::info!(key = %kind.key(), "Resetting content record to default");
        match kind {
            RecordKind::Home => self.write(&HomeContent::default_record()),
            RecordKind::HomeArticles => self.write(&HomeArticles::default_record()),
            RecordKind::ScamTrends => self.write(&ScamTrendsContent::default_record()),
            RecordKind::ScamChecker => self.write(&ScamCheckerQuiz::default_record()),
            RecordKind::ArticleSettings => self.write(&ArticleSettings::default_record()),
        }
    }

    fn import_record<R: ContentRecord>(&self, text: &str) -> Result<()> {
        let (_, merged) = merge_stored::<R>(text)?;
        let record: R = serde_json::from_value(merged)?;
        record.validate()?;
        self.write(&record)?;
        tracing::info!(key = %R::KIND.key(), "Imported content record");
        Ok(())
    }
}

/// Parse stored text and overlay it on the record's default. Fields that do
/// not fit the record fall back to their defaults.
fn parse_merged<R: ContentRecord>(raw: &str) -> Result<R> {
    let (default, merged) = merge_stored::<R>(raw)?;
    match serde_json::from_value(merged.clone()) {
        Ok(record) => Ok(record),
        Err(e) => {
            tracing::warn!(
                key = %R::KIND.key(),
                error = %e,
                "Stored content does not fit, keeping the fields that do"
            );
            Ok(serde_json::from_value(keep_fitting_fields::<R>(default, merged))?)
        }
    }
}

/// The record's default as JSON and the stored text merged over it.
fn merge_stored<R: ContentRecord>(raw: &str) -> Result<(Value, Value)> {
    let stored: Value = serde_json::from_str(raw)?;
    if !stored.is_object() {
        return Err(ContentError::Validation(format!(
            "`{}` is not a JSON object",
            R::KIND.key()
        )));
    }
    let default = serde_json::to_value(R::default_record())?;
    let merged = merge::overlay(default.clone(), stored, R::NESTED_FIELDS);
    tracing::debug!(key = %R::KIND.key(), "Merged stored content over default");
    Ok((default, merged))
}

/// Rebuild `merged` from the default, taking each stored field only if the
/// record still deserializes with it. Nested fields are checked per member.
fn keep_fitting_fields<R: ContentRecord>(default: Value, merged: Value) -> Value {
    let Value::Object(fields) = merged else {
        return default;
    };

    let mut kept = default.clone();
    for (field, value) in fields {
        if fits::<R>(&default, &field, value.clone()) {
            set_field(&mut kept, &field, value);
            continue;
        }

        let nested = R::NESTED_FIELDS.contains(&field.as_str());
        match (nested, value, default.get(&field)) {
            (true, Value::Object(members), Some(base)) => {
                let mut section = base.clone();
                for (member, member_value) in members {
                    let mut candidate = base.clone();
                    set_field(&mut candidate, &member, member_value.clone());
                    if fits::<R>(&default, &field, candidate) {
                        set_field(&mut section, &member, member_value);
                    } else {
                        tracing::warn!(
                            key = %R::KIND.key(),
                            field = %field,
                            member = %member,
                            "Ignoring stored field"
                        );
                    }
                }
                set_field(&mut kept, &field, section);
            }
            _ => {
                tracing::warn!(key = %R::KIND.key(), field = %field, "Ignoring stored field");
            }
        }
    }
    kept
}

fn fits<R: ContentRecord>(default: &Value, field: &str, value: Value) -> bool {
    let mut candidate = default.clone();
    set_field(&mut candidate, field, value);
    serde_json::from_value::<R>(candidate).is_ok()
}

fn set_field(target: &mut Value, field: &str, value: Value) {
    if let Some(object) = target.as_object_mut() {
        object.insert(field.to_string(), value);
    }
}
