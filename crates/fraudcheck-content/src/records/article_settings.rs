//! Article display settings

use serde::{Deserialize, Serialize};

use crate::record::{ContentRecord, RecordKind};
use crate::records::articles::Article;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSettings {
    pub background_image: String,
    /// Used for articles that carry no image of their own
    pub default_hero_image: String,
}

impl ArticleSettings {
    pub fn hero_image_for<'a>(&'a self, article: &'a Article) -> &'a str {
        if article.image.trim().is_empty() {
            &self.default_hero_image
        } else {
            &article.image
        }
    }
}

impl ContentRecord for ArticleSettings {
    const KIND: RecordKind = RecordKind::ArticleSettings;

    fn default_record() -> Self {
        Self {
            background_image: "/images/article-background.jpg".to_string(),
            default_hero_image: "/images/article-hero-default.jpg".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::articles::HomeArticles;

    #[test]
    fn test_hero_image_fallback() {
        let settings = ArticleSettings::default_record();
        let mut article = HomeArticles::default_record().articles[0].clone();

        article.image = "/images/custom.jpg".to_string();
        assert_eq!(settings.hero_image_for(&article), "/images/custom.jpg");

        article.image = "  ".to_string();
        assert_eq!(
            settings.hero_image_for(&article),
            "/images/article-hero-default.jpg"
        );
    }
}
