//! Scam trends page content

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::ContentError;
use crate::record::{ContentRecord, RecordKind};
use crate::records::{parse_day, DAY_FORMAT};
use crate::Result;

/// How many past scams of the week are kept
pub const PAST_SCAMS_LIMIT: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScamTrendsContent {
    pub hero: ScamTrendsHero,
    pub scam_of_the_week: ScamOfTheWeek,
    pub past_scam_of_the_week: Vec<ScamOfTheWeek>,
    pub scam_categories: Vec<ScamCategory>,
    pub user_reported_scams: Vec<UserReportedScam>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScamTrendsHero {
    pub title: String,
    pub subtitle: String,
    pub logo: String,
    pub text_color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScamOfTheWeek {
    pub name: String,
    pub description: String,
    pub red_flags: Vec<String>,
    pub source: String,
    /// What to do if you are targeted
    pub action: String,
    /// `YYYY-MM-DD`, or a full timestamp in older records
    pub report_date: String,
}

impl ScamOfTheWeek {
    pub fn report_day(&self) -> Option<NaiveDate> {
        parse_day(&self.report_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScamCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    pub red_flags: Vec<String>,
    pub source: String,
    pub action: String,
    pub related: String,
    pub image: String,
    pub include_image: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserReportedScam {
    pub id: String,
    #[serde(rename = "type")]
    pub scam_type: String,
    pub description: String,
    pub report_date: String,
    pub action: String,
    /// Where the scam was seen, empty when not given
    pub url: String,
}

impl UserReportedScam {
    pub fn report_day(&self) -> Option<NaiveDate> {
        parse_day(&self.report_date)
    }

    /// New report dated today with a fresh id.
    pub fn new(
        scam_type: String,
        description: String,
        action: String,
        url: String,
    ) -> Result<Self> {
        if scam_type.trim().is_empty() {
            return Err(ContentError::Validation("scam type cannot be empty".to_string()));
        }
        if description.trim().is_empty() {
            return Err(ContentError::Validation(
                "scam description cannot be empty".to_string(),
            ));
        }

        let url = url.trim().to_string();
        validate_url(&url)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            scam_type: scam_type.trim().to_string(),
            description: description.trim().to_string(),
            report_date: Utc::now().date_naive().format(DAY_FORMAT).to_string(),
            action: action.trim().to_string(),
            url,
        })
    }
}

fn validate_url(raw: &str) -> Result<()> {
    if raw.is_empty() {
        return Ok(());
    }
    url::Url::parse(raw)
        .map(|_| ())
        .map_err(|e| ContentError::Validation(format!("invalid url `{raw}`: {e}")))
}

impl ScamTrendsContent {
    pub fn category(&self, id: &str) -> Option<&ScamCategory> {
        self.scam_categories.iter().find(|c| c.id == id)
    }

    /// Make `scam` the scam of the week. The previous one moves to the front
    /// of the past list, which is capped at `PAST_SCAMS_LIMIT`.
    pub fn promote_scam_of_the_week(&mut self, scam: ScamOfTheWeek) {
        let previous = std::mem::replace(&mut self.scam_of_the_week, scam);
        self.past_scam_of_the_week.insert(0, previous);
        self.past_scam_of_the_week.truncate(PAST_SCAMS_LIMIT);
    }

    pub fn add_user_report(&mut self, report: UserReportedScam) {
        self.user_reported_scams.insert(0, report);
    }

    /// Returns the removed report, if any.
    pub fn remove_user_report(&mut self, id: &str) -> Option<UserReportedScam> {
        let idx = self.user_reported_scams.iter().position(|r| r.id == id)?;
        Some(self.user_reported_scams.remove(idx))
    }
}

impl ContentRecord for ScamTrendsContent {
    const KIND: RecordKind = RecordKind::ScamTrends;
    const NESTED_FIELDS: &'static [&'static str] = &["hero", "scamOfTheWeek"];

    fn default_record() -> Self {
        Self {
            hero: ScamTrendsHero {
                title: "Scam Trends".to_string(),
                subtitle: "The scams we are seeing right now, and how to spot them.".to_string(),
                logo: "/images/logo-trends.svg".to_string(),
                text_color: "#ffffff".to_string(),
            },
            scam_of_the_week: ScamOfTheWeek {
                name: "Fake energy rebate".to_string(),
                description: "Emails and texts promise a government energy bill rebate and ask for your bank details to pay it."
                    .to_string(),
                red_flags: strings(&[
                    "Asks for card or bank details to receive money",
                    "Deadline to claim within 24 hours",
                    "Sender address does not match the official domain",
                ]),
                source: "Action Fraud".to_string(),
                action: "Do not click the link. Forward the message to 7726 or report@phishing.gov.uk."
                    .to_string(),
                report_date: "2024-03-11".to_string(),
            },
            past_scam_of_the_week: vec![ScamOfTheWeek {
                name: "Hi Mum text".to_string(),
                description: "A message from an unknown number claims to be your child who has lost their phone and needs money urgently."
                    .to_string(),
                red_flags: strings(&[
                    "New number you have never seen",
                    "Urgent request for money",
                    "Excuses why they cannot call",
                ]),
                source: "National Trading Standards".to_string(),
                action: "Call your child on their known number before sending anything.".to_string(),
                report_date: "2024-03-04".to_string(),
            }],
            scam_categories: vec![
                ScamCategory {
                    id: "phishing".to_string(),
                    name: "Phishing".to_string(),
                    description: "Messages that impersonate trusted organisations to steal logins or payment details."
                        .to_string(),
                    red_flags: strings(&[
                        "Generic greeting",
                        "Links to look-alike websites",
                        "Threats that your account will be closed",
                    ]),
                    source: "NCSC".to_string(),
                    action: "Report suspicious emails to report@phishing.gov.uk.".to_string(),
                    related: "impersonation".to_string(),
                    image: "/images/categories/phishing.jpg".to_string(),
                    include_image: true,
                },
                ScamCategory {
                    id: "impersonation".to_string(),
                    name: "Impersonation".to_string(),
                    description: "Callers pretending to be your bank, the police or a government department."
                        .to_string(),
                    red_flags: strings(&[
                        "Pressure to act immediately",
                        "Requests to move money or buy gift cards",
                        "Caller asks you to keep it secret",
                    ]),
                    source: "UK Finance".to_string(),
                    action: "Hang up and call 159 to reach your bank safely.".to_string(),
                    related: "phishing".to_string(),
                    image: "/images/categories/impersonation.jpg".to_string(),
                    include_image: false,
                },
                ScamCategory {
                    id: "investment".to_string(),
                    name: "Investment".to_string(),
                    description: "Offers of guaranteed high returns, often in cryptocurrency, promoted on social media."
                        .to_string(),
                    red_flags: strings(&[
                        "Returns that sound too good to be true",
                        "Celebrity endorsements",
                        "Firm not on the FCA register",
                    ]),
                    source: "FCA".to_string(),
                    action: "Check the FCA Warning List before investing.".to_string(),
                    related: String::new(),
                    image: "/images/categories/investment.jpg".to_string(),
                    include_image: true,
                },
            ],
            user_reported_scams: Vec::new(),
        }
    }

    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for category in &self.scam_categories {
            if !ids.insert(category.id.as_str()) {
                return Err(ContentError::Validation(format!(
                    "duplicate scam category `{}`",
                    category.id
                )));
            }
        }
        for report in &self.user_reported_scams {
            validate_url(report.url.trim())?;
        }
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
