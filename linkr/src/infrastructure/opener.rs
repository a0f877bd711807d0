// linkr/src/infrastructure/opener.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::opener::LinkOpener;
use tracing::{debug, instrument};

/// Opens URLs with the operating system's default handler
#[derive(Debug, Default, Clone)]
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    #[instrument(skip(self), level = "debug")]
    fn open(&self, url: &str) -> DomainResult<()> {
        debug!("Opening URL with default OS command: {}", url);
        open::that(url).map_err(|e| DomainError::Open {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
