//! Scam checker quiz
//!
//! Each answer carries a score; the total against the highest possible
//! total gives the risk rating shown to the visitor.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::ContentError;
use crate::record::{ContentRecord, RecordKind};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScamCheckerQuiz {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<QuizOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizOption {
    pub value: String,
    pub label: String,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutcome {
    pub score: u32,
    pub max_score: u32,
    pub risk: RiskLevel,
}

impl QuizQuestion {
    pub fn option(&self, value: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.value == value)
    }

    fn max_score(&self) -> u32 {
        self.options.iter().map(|o| o.score).max().unwrap_or(0)
    }
}

impl ScamCheckerQuiz {
    pub fn question(&self, id: &str) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Sum of the chosen option scores. Answers to unknown questions and
    /// unknown option values count as zero.
    pub fn score(&self, answers: &HashMap<String, String>) -> u32 {
        self.questions
            .iter()
            .filter_map(|q| {
                let value = answers.get(&q.id)?;
                q.option(value).map(|o| o.score)
            })
            .sum()
    }

    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(QuizQuestion::max_score).sum()
    }

    pub fn assess(&self, answers: &HashMap<String, String>) -> QuizOutcome {
        let score = self.score(answers);
        let max_score = self.max_score();

        QuizOutcome {
            score,
            max_score,
            risk: RiskLevel::from_ratio(score, max_score),
        }
    }
}

impl RiskLevel {
    /// High from 60% of the maximum, medium from 30%.
    pub fn from_ratio(score: u32, max_score: u32) -> Self {
        if max_score == 0 {
            return RiskLevel::Low;
        }

        let percent = u64::from(score) * 100 / u64::from(max_score);
        match percent {
            p if p >= 60 => RiskLevel::High,
            p if p >= 30 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

impl ContentRecord for ScamCheckerQuiz {
    const KIND: RecordKind = RecordKind::ScamChecker;

    fn default_record() -> Self {
        Self {
            questions: vec![
                yes_no(
                    "unexpected",
                    "Did the contact come out of the blue?",
                    2,
                ),
                yes_no(
                    "urgency",
                    "Are you being pressured to act quickly?",
                    3,
                ),
                yes_no(
                    "payment",
                    "Have you been asked to pay by bank transfer, gift card or cryptocurrency?",
                    4,
                ),
                yes_no(
                    "personal_details",
                    "Have you been asked for passwords, PINs or security codes?",
                    4,
                ),
                QuizQuestion {
                    id: "channel".to_string(),
                    text: "How were you contacted?".to_string(),
                    options: vec![
                        option("phone", "Phone call", 2),
                        option("text", "Text or messaging app", 2),
                        option("email", "Email", 1),
                        option("social", "Social media", 2),
                        option("in_person", "In person", 0),
                    ],
                },
            ],
        }
    }

    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for question in &self.questions {
            if !ids.insert(question.id.as_str()) {
                return Err(ContentError::Validation(format!(
                    "duplicate question id `{}`",
                    question.id
                )));
            }
            if question.options.is_empty() {
                return Err(ContentError::Validation(format!(
                    "question `{}` has no options",
                    question.id
                )));
            }
        }
        Ok(())
    }
}

fn option(value: &str, label: &str, score: u32) -> QuizOption {
    QuizOption {
        value: value.to_string(),
        label: label.to_string(),
        score,
    }
}

fn yes_no(id: &str, text: &str, score: u32) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        text: text.to_string(),
        options: vec![
            option("yes", "Yes", score),
            option("no", "No", 0),
            option("unsure", "Not sure", score / 2),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_max_score() {
        // 2 + 3 + 4 + 4 + 2
        assert_eq!(ScamCheckerQuiz::default_record().max_score(), 15);
    }

    #[test]
    fn test_no_answers_is_low_risk() {
        let outcome = ScamCheckerQuiz::default_record().assess(&HashMap::new());
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.risk, RiskLevel::Low);
    }

    #[test]
    fn test_high_risk() {
        let quiz = ScamCheckerQuiz::default_record();
        let outcome = quiz.assess(&answers(&[
            ("urgency", "yes"),
            ("payment", "yes"),
            ("personal_details", "yes"),
        ]));
        assert_eq!(outcome.score, 11);
        assert_eq!(outcome.risk, RiskLevel::High);
    }

    #[test]
    fn test_medium_risk_and_unknown_answers_ignored() {
        let quiz = ScamCheckerQuiz::default_record();
        let outcome = quiz.assess(&answers(&[
            ("payment", "yes"),
            ("channel", "email"),
            ("urgency", "maybe"),
            ("not_a_question", "yes"),
        ]));
        assert_eq!(outcome.score, 5);
        assert_eq!(outcome.risk, RiskLevel::Medium);
    }

    #[test]
    fn test_risk_thresholds() {
        assert_eq!(RiskLevel::from_ratio(0, 0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_ratio(2, 10), RiskLevel::Low);
        assert_eq!(RiskLevel::from_ratio(3, 10), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_ratio(6, 10), RiskLevel::High);
    }

    #[test]
    fn test_validate() {
        let mut quiz = ScamCheckerQuiz::default_record();
        assert!(quiz.validate().is_ok());

        quiz.questions[0].options.clear();
        assert!(quiz.validate().is_err());
    }
}
