//! Articles listed on the homepage and the articles page

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::error::ContentError;
use crate::record::{ContentRecord, RecordKind};
use crate::records::parse_day;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeArticles {
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    /// URL path segment, unique across articles
    pub slug: String,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`, or a full timestamp in older records
    pub date: String,
    pub image: String,
    /// Markdown body
    pub content: String,
    pub category: String,
}

impl Article {
    pub fn day(&self) -> Option<NaiveDate> {
        parse_day(&self.date)
    }
}

impl HomeArticles {
    pub fn find(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    /// Replace the article with the same slug, or append it.
    pub fn upsert(&mut self, article: Article) {
        match self.articles.iter_mut().find(|a| a.slug == article.slug) {
            Some(existing) => *existing = article,
            None => self.articles.push(article),
        }
    }

    /// Returns the removed article, if any.
    pub fn remove(&mut self, slug: &str) -> Option<Article> {
        let idx = self.articles.iter().position(|a| a.slug == slug)?;
        Some(self.articles.remove(idx))
    }

    /// Undated articles sort last.
    pub fn newest_first(&self) -> Vec<&Article> {
        let mut sorted: Vec<&Article> = self.articles.iter().collect();
        sorted.sort_by(|a, b| b.day().cmp(&a.day()).then_with(|| a.title.cmp(&b.title)));
        sorted
    }

    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .articles
            .iter()
            .map(|a| a.category.trim())
            .filter(|c| !c.is_empty())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }
}

impl ContentRecord for HomeArticles {
    const KIND: RecordKind = RecordKind::HomeArticles;

    fn default_record() -> Self {
        Self {
            articles: vec![
                Article {
                    slug: "safe-account-scams".to_string(),
                    title: "\"Safe account\" scams: how they work".to_string(),
                    description: "Fraudsters posing as your bank pressure you to move savings into an account they control."
                        .to_string(),
                    date: "2024-03-11".to_string(),
                    image: "/images/articles/safe-account.jpg".to_string(),
                    content: "A caller claims your account has been compromised and urges you to transfer your money somewhere safe. Banks never do this. End the call and ring the number printed on your card."
                        .to_string(),
                    category: "Banking".to_string(),
                },
                Article {
                    slug: "parcel-delivery-texts".to_string(),
                    title: "Fake parcel delivery texts".to_string(),
                    description: "A missed-delivery text with a link asking for a small redelivery fee is a common phishing lure."
                        .to_string(),
                    date: "2024-02-26".to_string(),
                    image: "/images/articles/parcel-text.jpg".to_string(),
                    content: "Couriers rarely charge redelivery fees by text. Check tracking on the courier's own website rather than following the link."
                        .to_string(),
                    category: "Phishing".to_string(),
                },
                Article {
                    slug: "romance-scams".to_string(),
                    title: "Spotting a romance scam".to_string(),
                    description: "An online match who quickly professes love and then needs money is the classic pattern."
                        .to_string(),
                    date: "2024-02-05".to_string(),
                    image: "/images/articles/romance.jpg".to_string(),
                    content: "Be wary of anyone you have never met in person asking for money, gift cards or cryptocurrency, however convincing the story."
                        .to_string(),
                    category: "Relationships".to_string(),
                },
            ],
        }
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for article in &self.articles {
            if article.slug.trim().is_empty() {
                return Err(ContentError::Validation(format!(
                    "article `{}` has an empty slug",
                    article.title
                )));
            }
            if !seen.insert(article.slug.as_str()) {
                return Err(ContentError::Validation(format!(
                    "duplicate article slug `{}`",
                    article.slug
                )));
            }
        }
        Ok(())
    }
}
