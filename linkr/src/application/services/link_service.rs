// linkr/src/application/services/link_service.rs
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::link::Link;
use crate::domain::link_list::LinkList;
use crate::domain::opener::LinkOpener;
use crate::domain::repositories::LinkRepository;
use crate::domain::search::{SearchField, SearchHit};
use crate::util::validation::ValidationHelper;
use tracing::{debug, instrument, warn};

/// Result of opening every link of a group
#[derive(Debug)]
pub struct GroupOpenOutcome {
    pub opened: usize,
    pub failures: Vec<DomainError>,
}

/// Owns the session's link collection and mediates all access to it
#[derive(Debug)]
pub struct LinkService {
    links: LinkList,
    links_dir: PathBuf,
    current_file: Option<PathBuf>,
    repository: Arc<dyn LinkRepository>,
    opener: Arc<dyn LinkOpener>,
}

impl LinkService {
    pub fn new(
        links_dir: impl Into<PathBuf>,
        repository: Arc<dyn LinkRepository>,
        opener: Arc<dyn LinkOpener>,
    ) -> Self {
        Self {
            links: LinkList::new(),
            links_dir: links_dir.into(),
            current_file: None,
            repository,
            opener,
        }
    }

    pub fn links(&self) -> &LinkList {
        &self.links
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Place a user supplied file name inside the links directory
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.links_dir.join(file_name)
    }

    /// Load `file_name` from the links directory, replacing the collection.
    ///
    /// On any error the current collection is left untouched.
    #[instrument(skip(self), level = "debug")]
    pub fn load_file(&mut self, file_name: &str) -> DomainResult<PathBuf> {
        let path = self.resolve(file_name);
        self.load_path(&path)?;
        Ok(path)
    }

    #[instrument(skip(self), level = "debug")]
    pub fn load_path(&mut self, path: &Path) -> DomainResult<usize> {
        if !path.exists() {
            return Err(DomainError::NotFound(path.to_path_buf()));
        }
        let loaded = self.repository.load(path)?;
        let count = loaded.len();
        self.links.replace(loaded);
        self.current_file = Some(path.to_path_buf());
        debug!("Collection replaced with {} links from {}", count, path.display());
        Ok(count)
    }

    #[instrument(skip(self), level = "debug")]
    pub fn save_file(&mut self, file_name: &str) -> DomainResult<PathBuf> {
        let path = self.resolve(file_name);
        self.repository.save(&path, self.links.as_slice())?;
        self.current_file = Some(path.clone());
        Ok(path)
    }

    /// Validate and append a new link, returning its index
    #[instrument(skip(self), level = "debug")]
    pub fn add_link(&mut self, link: Link) -> DomainResult<usize> {
        ValidationHelper::validate_url(&link.url)?;
        if link.has_delimiter() {
            warn!("Link '{}' contains the field delimiter; it will not load back after saving", link.name);
        }
        Ok(self.links.append(link))
    }

    pub fn remove_link(&mut self, index: usize) -> DomainResult<Link> {
        self.links.remove_at(index)
    }

    pub fn search(&self, field: SearchField, query: &str) -> Vec<SearchHit<'_>> {
        self.links.find_by_field(field, query)
    }

    #[instrument(skip(self), level = "debug")]
    pub fn open_link(&self, index: usize) -> DomainResult<()> {
        let link = self.links.get(index)?;
        self.opener.open(&link.url)
    }

    /// Open every link whose group matches exactly; individual failures do not stop the rest
    #[instrument(skip(self), level = "debug")]
    pub fn open_group(&self, group: &str) -> DomainResult<GroupOpenOutcome> {
        let members = self.links.find_by_group_exact(group);
        if members.is_empty() {
            return Err(DomainError::GroupNotFound(group.to_string()));
        }

        let mut outcome = GroupOpenOutcome {
            opened: 0,
            failures: Vec::new(),
        };
        for link in members {
            match self.opener.open(&link.url) {
                Ok(()) => outcome.opened += 1,
                Err(e) => {
                    debug!("Failed to open {}: {}", link.url, e);
                    outcome.failures.push(e);
                }
            }
        }
        Ok(outcome)
    }

    /// True if the collection holds a link that would corrupt the file format
    pub fn has_unsafe_links(&self) -> bool {
        self.links.iter().any(Link::has_delimiter)
    }
}
