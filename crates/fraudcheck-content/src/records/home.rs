//! Homepage content

use serde::{Deserialize, Serialize};

use crate::record::{ContentRecord, RecordKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    pub hero: HomeHero,
    pub features: Vec<Feature>,
    pub tip_of_the_week: TipOfTheWeek,
    pub community_reports: CommunityReports,
    pub articles: ArticlesSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeHero {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    /// CSS color for text drawn over the hero image
    pub text_color: String,
    /// Vertical focus of the hero image, in percent
    pub image_offset: f64,
}

/// Editors assign ids from the clock, so they can be large.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipOfTheWeek {
    pub title: String,
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunityReports {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticlesSection {
    pub title: String,
    pub layout: ArticleLayout,
}

/// Layout of the homepage article list. Names the site does not know yet
/// are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArticleLayout {
    #[default]
    Grid,
    List,
    Carousel,
    Other(String),
}

impl ArticleLayout {
    pub fn as_str(&self) -> &str {
        match self {
            ArticleLayout::Grid => "grid",
            ArticleLayout::List => "list",
            ArticleLayout::Carousel => "carousel",
            ArticleLayout::Other(name) => name,
        }
    }
}

impl From<String> for ArticleLayout {
    fn from(name: String) -> Self {
        match name.as_str() {
            "grid" => ArticleLayout::Grid,
            "list" => ArticleLayout::List,
            "carousel" => ArticleLayout::Carousel,
            _ => ArticleLayout::Other(name),
        }
    }
}

impl From<ArticleLayout> for String {
    fn from(layout: ArticleLayout) -> Self {
        match layout {
            ArticleLayout::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl HomeContent {
    pub fn feature(&self, id: u64) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Next free feature id
    pub fn next_feature_id(&self) -> u64 {
        self.features.iter().map(|f| f.id).max().map_or(1, |max| max + 1)
    }
}

impl ContentRecord for HomeContent {
    const KIND: RecordKind = RecordKind::Home;
    const NESTED_FIELDS: &'static [&'static str] =
        &["hero", "tipOfTheWeek", "communityReports", "articles"];

    fn default_record() -> Self {
        Self {
            hero: HomeHero {
                title: "Is it a scam? Check before you click.".to_string(),
                subtitle: "Free, independent help to spot fraud, protect your money and report scams."
                    .to_string(),
                image: "/images/hero-home.jpg".to_string(),
                text_color: "#ffffff".to_string(),
                image_offset: 50.0,
            },
            features: vec![
                Feature {
                    id: 1,
                    title: "Scam Checker".to_string(),
                    description: "Answer a few questions about a message, call or offer and get an instant risk rating."
                        .to_string(),
                    icon: "shield-check".to_string(),
                },
                Feature {
                    id: 2,
                    title: "Scam Trends".to_string(),
                    description: "See the scams currently doing the rounds and the red flags to look for."
                        .to_string(),
                    icon: "trending-up".to_string(),
                },
                Feature {
                    id: 3,
                    title: "Get Help".to_string(),
                    description: "Step-by-step guidance on what to do if you have been targeted."
                        .to_string(),
                    icon: "life-buoy".to_string(),
                },
            ],
            tip_of_the_week: TipOfTheWeek {
                title: "Tip of the week".to_string(),
                text: "Your bank will never ask you to move money to a \"safe account\". Hang up and call the number on the back of your card."
                    .to_string(),
                link: "/articles/safe-account-scams".to_string(),
            },
            community_reports: CommunityReports {
                title: "Recently reported by the community".to_string(),
            },
            articles: ArticlesSection {
                title: "Latest advice".to_string(),
                layout: ArticleLayout::Grid,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(HomeContent::default_record()).unwrap();
        assert!(value["hero"]["textColor"].is_string());
        assert_eq!(value["hero"]["imageOffset"], json!(50.0));
        assert!(value["tipOfTheWeek"]["link"].is_string());
        assert_eq!(value["articles"]["layout"], json!("grid"));
    }

    #[test]
    fn test_feature_ids() {
        let home = HomeContent::default_record();
        assert_eq!(home.feature(2).unwrap().title, "Scam Trends");
        assert!(home.feature(42).is_none());
        assert_eq!(home.next_feature_id(), 4);
    }

    #[test]
    fn test_feature_without_icon_and_clock_id() {
        let feature: Feature =
            serde_json::from_value(json!({"id": 1710147600000u64, "title": "Mine"})).unwrap();
        assert_eq!(feature.id, 1_710_147_600_000);
        assert_eq!(feature.title, "Mine");
        assert!(feature.icon.is_empty());
    }

    #[test]
    fn test_unknown_layout_round_trips() {
        let section: ArticlesSection =
            serde_json::from_value(json!({"title": "Reads", "layout": "masonry"})).unwrap();
        assert_eq!(section.layout, ArticleLayout::Other("masonry".to_string()));
        assert_eq!(serde_json::to_value(&section).unwrap()["layout"], "masonry");

        let known: ArticleLayout = serde_json::from_value(json!("list")).unwrap();
        assert_eq!(known, ArticleLayout::List);
    }
}
