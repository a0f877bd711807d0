// linkr/src/domain/link_list.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::link::Link;
use crate::domain::search::{SearchField, SearchHit};

/// Ordered in-memory collection of links.
///
/// Positions are insertion order and are what commands refer to, so every
/// lookup reports indices relative to the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkList {
    links: Vec<Link>,
}

impl LinkList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    pub fn as_slice(&self) -> &[Link] {
        &self.links
    }

    /// Appends a link and returns its index; duplicates are allowed
    pub fn append(&mut self, link: Link) -> usize {
        self.links.push(link);
        self.links.len() - 1
    }

    pub fn get(&self, index: usize) -> DomainResult<&Link> {
        self.links
            .get(index)
            .ok_or_else(|| self.out_of_range(index as i64))
    }

    pub fn remove_at(&mut self, index: usize) -> DomainResult<Link> {
        if index >= self.links.len() {
            return Err(self.out_of_range(index as i64));
        }
        Ok(self.links.remove(index))
    }

    /// Swaps in a freshly loaded collection as a whole
    pub fn replace(&mut self, links: Vec<Link>) {
        self.links = links;
    }

    /// Case-insensitive substring match on one field
    pub fn find_by_field(&self, field: SearchField, query: &str) -> Vec<SearchHit<'_>> {
        let needle = query.to_lowercase();
        self.links
            .iter()
            .enumerate()
            .filter(|(_, link)| field.value_of(link).to_lowercase().contains(&needle))
            .map(|(index, link)| SearchHit { index, link })
            .collect()
    }

    /// Case-sensitive exact match on the group
    pub fn find_by_group_exact(&self, group: &str) -> Vec<&Link> {
        self.links.iter().filter(|link| link.group == group).collect()
    }

    pub fn out_of_range(&self, index: i64) -> DomainError {
        DomainError::IndexOutOfRange {
            index,
            len: self.links.len(),
        }
    }
}

impl From<Vec<Link>> for LinkList {
    fn from(links: Vec<Link>) -> Self {
        Self { links }
    }
}
