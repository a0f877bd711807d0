// linkr/src/cli/mod.rs
use crate::application::LinkService;
use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::cli::input::{BufReadSource, LineSource, ReadlineSource};
use crate::cli::repl::Repl;
use crate::config::{state_dir, Settings};
use crate::infrastructure::opener::SystemLinkOpener;
use crate::infrastructure::repositories::LisFileRepository;
use std::io::{self, IsTerminal};
use std::sync::Arc;
use tracing::{debug, instrument};

pub mod args;
pub mod command;
pub mod display;
pub mod error;
pub mod input;
pub mod repl;

/// Build the service from settings and run the interactive loop on stdin/stdout
#[instrument(skip_all, level = "debug")]
pub fn execute_command(cli: Cli, settings: &Settings) -> CliResult<()> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(());
    }

    let service = LinkService::new(
        settings.links_dir(),
        Arc::new(LisFileRepository::new()),
        Arc::new(SystemLinkOpener),
    );
    let color = !cli.no_color && io::stdout().is_terminal();

    if io::stdin().is_terminal() {
        let history = state_dir().map(|d| d.join("history.txt"));
        debug!("Interactive terminal, history at {:?}", history);
        run_repl(service, ReadlineSource::new(history)?, settings, color)
    } else {
        debug!("Reading commands from non-terminal stdin");
        run_repl(
            service,
            BufReadSource::new(io::stdin().lock(), io::stdout()),
            settings,
            color,
        )
    }
}

fn run_repl<S: LineSource>(
    service: LinkService,
    source: S,
    settings: &Settings,
    color: bool,
) -> CliResult<()> {
    let mut repl = Repl::new(service, source, io::stdout()).with_color(color);
    repl.load_startup(&settings.default_path())?;
    repl.run()
}
