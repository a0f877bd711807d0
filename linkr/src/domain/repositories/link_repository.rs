// linkr/src/domain/repositories/link_repository.rs

use crate::domain::error::DomainResult;
use crate::domain::link::Link;
use std::path::Path;

/// Persistence of a whole link collection.
///
/// Loading is all-or-nothing: an implementation returns either every link of
/// the source or an error, never a partial collection.
pub trait LinkRepository: std::fmt::Debug + Send + Sync {
    /// Read all links from `path` in file order
    fn load(&self, path: &Path) -> DomainResult<Vec<Link>>;

    /// Overwrite `path` with the given links in order
    fn save(&self, path: &Path, links: &[Link]) -> DomainResult<()>;
}
