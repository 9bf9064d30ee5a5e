use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Categories every new group starts with.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Groceries",
    "Utilities",
    "Rent",
    "Internet",
    "Household Items",
    "Entertainment",
    "Other",
];

/// Label used to group expenses for filtering and statistics.
///
/// Categories play no part in balance aggregation.
///
/// # Examples
///
/// ```
/// use share_ledger::core::category::Category;
///
/// assert_eq!(Category::default(), Category::new("Other"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::new("Other")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors arising from category list edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("category name must not be empty")]
    EmptyName,
    #[error("category {0} already exists")]
    Duplicate(Category),
}

/// Ordered list of distinct categories known to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct CategoryList {
    categories: Vec<Category>,
}

impl CategoryList {
    /// An empty list, without the defaults.
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Add a category. The name is trimmed before the uniqueness check.
    pub fn add(&mut self, category: Category) -> Result<(), CategoryError> {
        let trimmed = category.as_str().trim();
        if trimmed.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        let category = Category::new(trimmed);
        if self.contains(&category) {
            return Err(CategoryError::Duplicate(category));
        }
        self.categories.push(category);
        Ok(())
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryList {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| Category::new(*c)).collect(),
        }
    }
}

impl TryFrom<Vec<Category>> for CategoryList {
    type Error = CategoryError;

    fn try_from(categories: Vec<Category>) -> Result<Self, Self::Error> {
        let mut list = Self::empty();
        for category in categories {
            list.add(category)?;
        }
        Ok(list)
    }
}

impl From<CategoryList> for Vec<Category> {
    fn from(list: CategoryList) -> Self {
        list.categories
    }
}
