// linkr/src/main.rs
use clap::Parser;
use crossterm::style::Stylize;
use linkr::cli::args::Cli;
use linkr::config::load_settings;
use linkr::exitcode;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

#[instrument]
fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug, cli.no_color);

    let mut settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            print_error(&format!("Failed to load settings: {}", e), cli.no_color);
            std::process::exit(exitcode::USAGE);
        }
    };
    if let Some(links_dir) = &cli.links_dir {
        debug!("Using links directory from command line: {}", links_dir);
        settings.links_dir = links_dir.clone();
    }

    let no_color = cli.no_color;
    if let Err(e) = linkr::cli::execute_command(cli, &settings) {
        print_error(&format!("Error: {}", e), no_color);
        std::process::exit(exitcode::IOERR);
    }
}

fn print_error(msg: &str, no_color: bool) {
    if no_color {
        eprintln!("{}", msg);
    } else {
        eprintln!("{}", msg.red());
    }
}

fn setup_logging(verbosity: u8, no_color: bool) {
    debug!("INIT: Attempting logger init from main.rs");

    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Line editor internals are noisy at trace level
    let noisy_modules = ["rustyline"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}
