//! Catalog product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Indoor,
    #[serde(rename = "Out Door")]
    OutDoor,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Indoor, Category::OutDoor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Indoor => "Indoor",
            Category::OutDoor => "Out Door",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    #[schema(example = "Ceramic pot")]
    pub name: String,
    #[schema(example = 19.99)]
    pub price: f64,
    pub category: Category,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// Fields for a new catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category: Category,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::parse("Out Door"), Some(Category::OutDoor));
        assert_eq!(Category::parse("outdoor"), None);
        assert_eq!(
            serde_json::to_string(&Category::OutDoor).unwrap(),
            "\"Out Door\""
        );
    }
}
