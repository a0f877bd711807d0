// linkr/src/infrastructure/repositories/lis_file_repository.rs

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::link::Link;
use crate::domain::repositories::LinkRepository;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, instrument};

/// Plain text link file: one `category|group|name|description|url` line per link
#[derive(Debug, Default, Clone)]
pub struct LisFileRepository;

impl LisFileRepository {
    pub fn new() -> Self {
        Self
    }
}

impl LinkRepository for LisFileRepository {
    #[instrument(skip(self), level = "debug")]
    fn load(&self, path: &Path) -> DomainResult<Vec<Link>> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DomainError::NotFound(path.to_path_buf()),
            _ => DomainError::io(path, e),
        })?;

        let reader = BufReader::new(file);
        let mut links = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(|e| DomainError::io(path, e))?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if line.trim().is_empty() {
                continue;
            }
            links.push(Link::parse(line)?);
        }

        debug!("Loaded {} links from {}", links.len(), path.display());
        Ok(links)
    }

    #[instrument(skip(self, links), level = "debug")]
    fn save(&self, path: &Path, links: &[Link]) -> DomainResult<()> {
        let file = File::create(path).map_err(|e| DomainError::io(path, e))?;
        let mut writer = BufWriter::new(file);

        for link in links {
            writeln!(writer, "{}", link.serialize()).map_err(|e| DomainError::io(path, e))?;
        }
        writer.flush().map_err(|e| DomainError::io(path, e))?;

        debug!("Saved {} links to {}", links.len(), path.display());
        Ok(())
    }
}
