//! Content records and their compiled defaults

mod article_settings;
mod articles;
mod home;
mod quiz;
mod scam_trends;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub use article_settings::ArticleSettings;
pub use articles::{Article, HomeArticles};
pub use home::{
    ArticleLayout, ArticlesSection, CommunityReports, Feature, HomeContent, HomeHero, TipOfTheWeek,
};
pub use quiz::{QuizOption, QuizOutcome, QuizQuestion, RiskLevel, ScamCheckerQuiz};
pub use scam_trends::{
    ScamCategory, ScamOfTheWeek, ScamTrendsContent, ScamTrendsHero, UserReportedScam,
    PAST_SCAMS_LIMIT,
};

/// Format used for dates written by this crate.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Calendar day of a stored date string.
///
/// Accepts `YYYY-MM-DD` as well as full timestamps (`2024-03-11T09:00:00.000Z`,
/// with or without an offset), which is what the site's editors write.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DAY_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|t| t.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|t| t.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ContentRecord;
    use chrono::Datelike;

    #[test]
    fn test_parse_day_formats() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(parse_day("2024-03-11"), Some(day));
        assert_eq!(parse_day(" 2024-03-11 "), Some(day));
        assert_eq!(parse_day("2024-03-11T09:00:00.000Z"), Some(day));
        assert_eq!(parse_day("2024-03-11T09:00:00+02:00"), Some(day));
        assert_eq!(parse_day("2024-03-11T09:00:00"), Some(day));
        assert_eq!(parse_day("2024-02-30"), None);
        assert_eq!(parse_day("last week"), None);
        assert_eq!(parse_day(""), None);
    }

    #[test]
    fn test_every_default_date_is_valid() {
        let articles = HomeArticles::default_record();
        let trends = ScamTrendsContent::default_record();

        let dates = articles
            .articles
            .iter()
            .map(|a| (a.slug.as_str(), a.date.as_str()))
            .chain(std::iter::once((
                trends.scam_of_the_week.name.as_str(),
                trends.scam_of_the_week.report_date.as_str(),
            )))
            .chain(
                trends
                    .past_scam_of_the_week
                    .iter()
                    .map(|s| (s.name.as_str(), s.report_date.as_str())),
            )
            .chain(
                trends
                    .user_reported_scams
                    .iter()
                    .map(|r| (r.id.as_str(), r.report_date.as_str())),
            );

        let mut count = 0;
        for (owner, raw) in dates {
            let day = parse_day(raw)
                .unwrap_or_else(|| panic!("default date `{raw}` of `{owner}` does not parse"));
            assert_eq!(day.format(DAY_FORMAT).to_string(), raw, "`{owner}`");
            assert!(day.year() >= 2020, "`{owner}` has implausible date {raw}");
            count += 1;
        }
        assert!(count >= 5);
    }
}
