// linkr/src/domain/link.rs
use crate::domain::error::{DomainError, DomainResult};
use derive_builder::Builder;
use itertools::Itertools;
use std::fmt;

/// Field separator of the persisted line format
pub const DELIMITER: char = '|';

const FIELD_COUNT: usize = 5;

/// A categorized link entry
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[builder(setter(into))]
pub struct Link {
    pub category: String,
    pub group: String,
    pub name: String,
    pub description: String,
    pub url: String,
}

impl Link {
    pub fn new<S: AsRef<str>>(category: S, group: S, name: S, description: S, url: S) -> Self {
        Self {
            category: category.as_ref().to_string(),
            group: group.as_ref().to_string(),
            name: name.as_ref().to_string(),
            description: description.as_ref().to_string(),
            url: url.as_ref().to_string(),
        }
    }

    /// Parse one line of the link file: `category|group|name|description|url`
    pub fn parse(line: &str) -> DomainResult<Self> {
        let parts: Vec<&str> = line.split(DELIMITER).collect();
        if parts.len() != FIELD_COUNT {
            return Err(DomainError::Format {
                line: line.to_string(),
            });
        }

        Ok(Self::new(parts[0], parts[1], parts[2], parts[3], parts[4]))
    }

    pub fn serialize(&self) -> String {
        self.fields().iter().join(&DELIMITER.to_string())
    }

    /// True if any field contains the delimiter, i.e. the link would not survive a save/load cycle
    pub fn has_delimiter(&self) -> bool {
        self.fields().iter().any(|f| f.contains(DELIMITER))
    }

    fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            self.category.as_str(),
            self.group.as_str(),
            self.name.as_str(),
            self.description.as_str(),
            self.url.as_str(),
        ]
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}/{}]: {}", self.name, self.category, self.group, self.url)
    }
}
