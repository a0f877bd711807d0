// linkr/src/domain/search.rs
use crate::domain::error::DomainError;
use crate::domain::link::Link;
use std::fmt;
use std::str::FromStr;

/// Link fields that support substring search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Category,
    Group,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Name, SearchField::Category, SearchField::Group];

    pub fn value_of<'a>(&self, link: &'a Link) -> &'a str {
        match self {
            SearchField::Name => &link.name,
            SearchField::Category => &link.category,
            SearchField::Group => &link.group,
        }
    }

    /// Comma separated list of the accepted field names
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchField::Name => write!(f, "name"),
            SearchField::Category => write!(f, "category"),
            SearchField::Group => write!(f, "group"),
        }
    }
}

impl FromStr for SearchField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SearchField::Name),
            "category" => Ok(SearchField::Category),
            "group" => Ok(SearchField::Group),
            other => Err(DomainError::Validation(format!(
                "Unknown search field '{}'. Allowed fields: {}",
                other,
                Self::allowed()
            ))),
        }
    }
}

/// A search match together with its position in the full collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub index: usize,
    pub link: &'a Link,
}
