// linkr/src/domain/opener.rs
use crate::domain::error::DomainResult;
use std::fmt::Debug;

/// Hands a URL over to whatever is registered to open it
pub trait LinkOpener: Debug + Send + Sync {
    fn open(&self, url: &str) -> DomainResult<()>;
}
