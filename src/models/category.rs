//! Category model
//!
//! Categories form a two-level hierarchy: main categories and subcategories.
//! A subcategory's `parent_id` must reference a main category.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Whether a category is a top-level (main) category or a subcategory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    #[default]
    Main,
    Sub,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Sub => write!(f, "sub"),
        }
    }
}

/// A spending category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Main category or subcategory
    pub kind: CategoryKind,

    /// Parent category (set for subcategories, None for main categories)
    pub parent_id: Option<CategoryId>,
}

impl Category {
    /// Create a new main category
    pub fn main(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind: CategoryKind::Main,
            parent_id: None,
        }
    }

    /// Create a new subcategory under a main category
    pub fn sub(name: impl Into<String>, parent_id: CategoryId) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind: CategoryKind::Sub,
            parent_id: Some(parent_id),
        }
    }

    /// Validate the category's own shape (parent existence is checked by the store)
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Category name cannot be empty".to_string());
        }
        match self.kind {
            CategoryKind::Main if self.parent_id.is_some() => {
                Err("Main category cannot have a parent".to_string())
            }
            CategoryKind::Sub if self.parent_id.is_none() => {
                Err("Subcategory must have a parent".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_category() {
        let cat = Category::main("Groceries");
        assert_eq!(cat.kind, CategoryKind::Main);
        assert!(cat.parent_id.is_none());
        assert!(cat.validate().is_ok());
    }

    #[test]
    fn test_subcategory() {
        let parent = Category::main("Groceries");
        let sub = Category::sub("Produce", parent.id);
        assert_eq!(sub.kind, CategoryKind::Sub);
        assert_eq!(sub.parent_id, Some(parent.id));
        assert!(sub.validate().is_ok());
    }

    #[test]
    fn test_validate_shape() {
        let mut cat = Category::main("Groceries");
        cat.parent_id = Some(CategoryId::new());
        assert!(cat.validate().is_err());

        let mut sub = Category::sub("Produce", CategoryId::new());
        sub.parent_id = None;
        assert!(sub.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let cat = Category::main("Transport");
        let json = serde_json::to_string(&cat).unwrap();
        assert!(json.contains("\"kind\":\"main\""));
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(cat, deserialized);
    }
}
