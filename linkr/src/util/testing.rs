// linkr/src/util/testing.rs

use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::opener::LinkOpener;

/// Links used by tests that need a populated link file
pub const SAMPLE_LINKS: &str = "\
news|daily|Hacker News|tech news|https://news.ycombinator.com
school|C#|Learn C#|language docs|https://learn.microsoft.com/dotnet/csharp
school|C#|School portal|courses and schedule|https://school.example.org
fun|games|Lichess|play chess|https://lichess.org
";

static TEST_ENV: OnceLock<()> = OnceLock::new();

/// Initializes the global test environment exactly once (logging only).
pub fn init_test_env() {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
    });
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the LINKR_* environment variables when dropped
#[derive(Debug, Clone)]
pub struct EnvGuard {
    links_dir: Option<String>,
    default_file: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            links_dir: env::var("LINKR_LINKS_DIR").ok(),
            default_file: env::var("LINKR_DEFAULT_FILE").ok(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        env::remove_var("LINKR_LINKS_DIR");
        env::remove_var("LINKR_DEFAULT_FILE");
        if let Some(val) = &self.links_dir {
            env::set_var("LINKR_LINKS_DIR", val);
        }
        if let Some(val) = &self.default_file {
            env::set_var("LINKR_DEFAULT_FILE", val);
        }
    }
}

/// Creates a temporary links directory holding `links.lis` with [`SAMPLE_LINKS`].
pub fn setup_links_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("links.lis"), SAMPLE_LINKS).expect("Failed to write links.lis");
    dir
}

/// A `LinkOpener` that records URLs instead of launching anything
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
    failure: Mutex<Option<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `open` call fail with `reason`
    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock().expect("opener lock poisoned") = Some(reason.to_string());
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().expect("opener lock poisoned").clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> DomainResult<()> {
        if let Some(reason) = self.failure.lock().expect("opener lock poisoned").as_ref() {
            return Err(DomainError::Open {
                url: url.to_string(),
                reason: reason.clone(),
            });
        }
        self.opened
            .lock()
            .expect("opener lock poisoned")
            .push(url.to_string());
        Ok(())
    }
}
