// linkr/src/cli/repl.rs

use crossterm::style::Stylize;
use std::fmt;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::application::LinkService;
use crate::cli::command::{Command, HELP_TEXT};
use crate::cli::display::show_links;
use crate::cli::error::{CliError, CliResult};
use crate::cli::input::LineSource;
use crate::domain::error::DomainError;
use crate::domain::link::{Link, LinkBuilder, DELIMITER};
use crate::domain::search::SearchField;
use crate::util::validation::ValidationHelper;

pub const PROMPT: &str = "> ";
pub const WELCOME: &str = "Welcome to the link list! Type 'help' for help.";
pub const FAREWELL: &str = "Goodbye! Welcome back!";

/// Whether the loop keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The interactive command interpreter.
///
/// Reads a line, dispatches it against the owned `LinkService` and writes the
/// result to `out`. Command failures are reported and never end the loop.
pub struct Repl<S: LineSource, W: Write> {
    service: LinkService,
    source: S,
    out: W,
    color: bool,
}

impl<S: LineSource, W: Write> Repl<S, W> {
    pub fn new(service: LinkService, source: S, out: W) -> Self {
        Self {
            service,
            source,
            out,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn service(&self) -> &LinkService {
        &self.service
    }

    pub fn into_parts(self) -> (LinkService, W) {
        (self.service, self.out)
    }

    /// Load the startup file; failures are reported and the session starts empty
    #[instrument(skip(self), level = "debug")]
    pub fn load_startup(&mut self, path: &Path) -> CliResult<()> {
        match self.service.load_path(path) {
            Ok(count) => {
                info!("Loaded {} links from {}", count, path.display());
                Ok(())
            }
            Err(e) => self.report(&format!("Failed to load links at startup: {}", e)),
        }
    }

    /// Run until `quit` or end of input
    #[instrument(skip(self), level = "debug")]
    pub fn run(&mut self) -> CliResult<()> {
        writeln!(self.out, "{}", WELCOME)?;

        loop {
            self.out.flush()?;
            let line = match self.source.read_line(PROMPT) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("End of input");
                    writeln!(self.out)?;
                    writeln!(self.out, "{}", FAREWELL)?;
                    break;
                }
                Err(CliError::OperationAborted) => continue,
                Err(e @ CliError::InvalidInput(_)) => {
                    self.report(&e)?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            match self.handle_line(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => self.report(&e)?,
            }
        }

        self.out.flush()?;
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> CliResult<Flow> {
        let command = Command::parse(line.trim())?;
        debug!(?command, "Dispatching command");
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> CliResult<Flow> {
        match command {
            Command::Help => writeln!(self.out, "{}", HELP_TEXT)?,
            Command::Quit => {
                writeln!(self.out, "{}", FAREWELL)?;
                return Ok(Flow::Quit);
            }
            Command::List => self.list()?,
            Command::New => self.new_link()?,
            Command::Search { field, query } => self.search(field, &query)?,
            Command::Save { file } => {
                let path = self.service.save_file(&file)?;
                writeln!(self.out, "Links saved to {}.", path.display())?;
                if self.service.has_unsafe_links() {
                    self.warn_user(&format!(
                        "some links contain '{}'; {} will not load back",
                        DELIMITER,
                        path.display()
                    ))?;
                }
            }
            Command::Load { file } => {
                let path = self.service.load_file(&file)?;
                writeln!(
                    self.out,
                    "Links loaded from {} ({} links).",
                    path.display(),
                    self.service.links().len()
                )?;
            }
            Command::Remove { index } => {
                let index = self.parse_index(&index)?;
                let removed = self.service.remove_link(index)?;
                debug!("Removed {}", removed);
                writeln!(self.out, "Link at index {} removed.", index)?;
            }
            Command::OpenLink { index } => {
                let index = self.parse_index(&index)?;
                self.service.open_link(index)?;
            }
            Command::OpenGroup { group } => self.open_group(&group)?,
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> CliResult<()> {
        let links = self.service.links();
        if links.is_empty() {
            writeln!(self.out, "No links to show.")?;
            return Ok(());
        }
        show_links(&mut self.out, links.iter().enumerate())?;
        if let Some(file) = self.service.current_file() {
            writeln!(self.out, "{} links, current file: {}", links.len(), file.display())?;
        }
        Ok(())
    }

    fn search(&mut self, field: SearchField, query: &str) -> CliResult<()> {
        let hits = self.service.search(field, query);
        if hits.is_empty() {
            writeln!(self.out, "No links with '{}' in {}.", query, field)?;
            return Ok(());
        }
        show_links(&mut self.out, hits.iter().map(|hit| (hit.index, hit.link)))?;
        Ok(())
    }

    fn new_link(&mut self) -> CliResult<()> {
        writeln!(self.out, "Create a new link:")?;
        let link = self
            .prompt_link()
            .map_err(|e| e.context("New link aborted"))?;

        let unsafe_fields = link.has_delimiter();
        let index = self.service.add_link(link)?;
        writeln!(self.out, "New link added at index {}.", index)?;

        if unsafe_fields {
            warn!("New link contains the field delimiter");
            self.warn_user(&format!(
                "a field contains '{}'; this link will break the file format when saved",
                DELIMITER
            ))?;
        }
        Ok(())
    }

    fn prompt_link(&mut self) -> CliResult<Link> {
        let mut builder = LinkBuilder::default();
        builder
            .category(self.prompt_required("category")?)
            .group(self.prompt_required("group")?)
            .name(self.prompt_required("name")?)
            .description(self.prompt_required("description")?)
            .url(self.prompt_required("url")?);
        Ok(builder.build().map_err(DomainError::from)?)
    }

    /// Ask for one field until a non-blank answer is given
    fn prompt_required(&mut self, label: &str) -> CliResult<String> {
        let prompt = format!("  {}: ", label);
        loop {
            self.out.flush()?;
            let answer = self
                .source
                .read_line(&prompt)?
                .ok_or(CliError::InputClosed)?;
            let answer = answer.trim();
            match ValidationHelper::validate_not_blank(label, answer) {
                Ok(()) => return Ok(answer.to_string()),
                Err(e) => writeln!(self.out, "  {}", e)?,
            }
        }
    }

    fn open_group(&mut self, group: &str) -> CliResult<()> {
        let outcome = self.service.open_group(group)?;
        for failure in &outcome.failures {
            self.report(failure)?;
        }
        writeln!(
            self.out,
            "Opened {} of {} links in group '{}'.",
            outcome.opened,
            outcome.opened + outcome.failures.len(),
            group
        )?;
        Ok(())
    }

    /// Parse an index argument; negative numbers are reported as out of range
    fn parse_index(&self, raw: &str) -> CliResult<usize> {
        let links = self.service.links();
        match raw.parse::<i64>() {
            Ok(index) if index >= 0 => Ok(index as usize),
            Ok(index) => Err(links.out_of_range(index).into()),
            Err(_) => {
                let hint = if links.is_empty() {
                    "the link list is empty".to_string()
                } else {
                    format!("enter a value in the range [0, {}]", links.len() - 1)
                };
                Err(CliError::InvalidArgument(format!(
                    "'{}' is not a valid index; {}",
                    raw, hint
                )))
            }
        }
    }

    fn report(&mut self, err: &dyn fmt::Display) -> CliResult<()> {
        debug!("Command failed: {}", err);
        let msg = format!("Error: {}", err);
        if self.color {
            writeln!(self.out, "{}", msg.red())?;
        } else {
            writeln!(self.out, "{}", msg)?;
        }
        Ok(())
    }

    fn warn_user(&mut self, msg: &str) -> CliResult<()> {
        let msg = format!("Warning: {}", msg);
        if self.color {
            writeln!(self.out, "{}", msg.yellow())?;
        } else {
            writeln!(self.out, "{}", msg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::input::BufReadSource;
    use crate::infrastructure::repositories::LisFileRepository;
    use crate::util::testing::{init_test_env, setup_links_dir, RecordingOpener};
    use std::io::{Cursor, Sink};
    use std::sync::Arc;
    use tempfile::TempDir;

    type TestRepl = Repl<BufReadSource<Cursor<Vec<u8>>, Sink>, Vec<u8>>;

    fn repl_with_input(input: &str) -> (TempDir, TestRepl, Arc<RecordingOpener>) {
        repl_with_bytes(input.as_bytes())
    }

    fn repl_with_bytes(input: &[u8]) -> (TempDir, TestRepl, Arc<RecordingOpener>) {
        init_test_env();
        let dir = setup_links_dir();
        let opener = Arc::new(RecordingOpener::new());
        let service = LinkService::new(
            dir.path(),
            Arc::new(LisFileRepository::new()),
            opener.clone(),
        );
        let source = BufReadSource::new(Cursor::new(input.to_vec()), std::io::sink());
        let mut repl = Repl::new(service, source, Vec::new());
        repl.load_startup(&dir.path().join("links.lis")).unwrap();
        (dir, repl, opener)
    }

    fn repl_without_startup_file(dir: &TempDir, input: &str) -> TestRepl {
        init_test_env();
        let service = LinkService::new(
            dir.path(),
            Arc::new(LisFileRepository::new()),
            Arc::new(RecordingOpener::new()),
        );
        let source = BufReadSource::new(Cursor::new(input.as_bytes().to_vec()), std::io::sink());
        Repl::new(service, source, Vec::new())
    }

    fn output(repl: TestRepl) -> String {
        let (_, out) = repl.into_parts();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn given_quit_when_run_then_welcome_and_farewell_printed() {
        let (_dir, mut repl, _) = repl_with_input("quit\nlist\n");
        repl.run().unwrap();
        let out = output(repl);
        assert!(out.starts_with(WELCOME));
        assert!(out.contains(FAREWELL));
        assert!(!out.contains("|0 |"));
    }

    #[test]
    fn given_end_of_input_when_run_then_loop_ends_cleanly() {
        let (_dir, mut repl, _) = repl_with_input("list\n");
        repl.run().unwrap();
        assert!(output(repl).contains(FAREWELL));
    }

    #[test]
    fn given_list_when_run_then_rows_with_indices() {
        let (_dir, mut repl, _) = repl_with_input("list\nquit\n");
        repl.run().unwrap();
        let out = output(repl);
        assert!(out.contains("|0 |news      |daily     |Hacker News"));
        assert!(out.contains("|3 |fun       |games     |Lichess"));
    }

    #[test]
    fn given_empty_line_and_unknown_command_when_run_then_reported_and_loop_continues() {
        let (_dir, mut repl, _) = repl_with_input("\nfoo bar\nlist\nquit\n");
        repl.run().unwrap();
        let out = output(repl);
        assert!(out.contains("Error: Unknown command: ''"));
        assert!(out.contains("Error: Unknown command: 'foo'. Valid commands: help, quit"));
        assert!(out.contains("|0 |"));
    }

    #[test]
    fn given_search_when_run_then_true_indices_shown() {
        let (_dir, mut repl, _) = repl_with_input("search name SCHOOL\nquit\n");
        repl.run().unwrap();
        let out = output(repl);
        assert!(out.contains("|2 |school    |C#        |School portal"));
        assert!(!out.contains("|0 |"));
    }

    #[test]
    fn given_search_without_match_when_run_then_informational_message() {
        let (_dir, mut repl, _) = repl_with_input("search group nothing\nquit\n");
        repl.run().unwrap();
        assert!(output(repl).contains("No links with 'nothing' in group."));
    }

    #[test]
    fn given_new_with_valid_fields_when_run_then_link_appended() {
        let (_dir, mut repl, _) = repl_with_input(
            "new\nnews\ndaily\nLobsters\nlink aggregator\nhttps://lobste.rs\nquit\n",
        );
        repl.run().unwrap();
        assert_eq!(repl.service().links().len(), 5);
        assert_eq!(repl.service().links().get(4).unwrap().url, "https://lobste.rs");
        assert!(output(repl).contains("New link added at index 4."));
    }

    #[test]
    fn given_new_with_blank_answers_when_run_then_reprompted() {
        let (_dir, mut repl, _) = repl_with_input(
            "new\n\n  \nnews\ndaily\nLobsters\nagg\nhttps://lobste.rs\nquit\n",
        );
        repl.run().unwrap();
        assert_eq!(repl.service().links().get(4).unwrap().category, "news");
        assert!(output(repl).contains("category must not be empty"));
    }

    #[test]
    fn given_new_with_malformed_url_when_run_then_rejected_and_count_unchanged() {
        let (_dir, mut repl, _) = repl_with_input("new\na\nb\nc\nd\nnot a url\nquit\n");
        repl.run().unwrap();
        assert_eq!(repl.service().links().len(), 4);
        let out = output(repl);
        assert!(out.contains("Error: Validation failed: 'not a url' is not a valid URL"));
    }

    #[test]
    fn given_input_ends_during_new_when_run_then_aborted_without_append() {
        let (_dir, mut repl, _) = repl_with_input("new\na\nb\n");
        repl.run().unwrap();
        assert_eq!(repl.service().links().len(), 4);
        assert!(output(repl).contains("New link aborted: Input ended"));
    }

    #[test]
    fn given_new_with_delimiter_when_run_then_added_with_warning() {
        let (_dir, mut repl, _) = repl_with_input("new\na\nb\nc|d\ne\nhttp://x\nquit\n");
        repl.run().unwrap();
        assert_eq!(repl.service().links().len(), 5);
        assert!(output(repl).contains("Warning: a field contains '|'"));
    }

    #[test]
    fn given_remove_when_run_then_link_removed_and_confirmed() {
        let (_dir, mut repl, _) = repl_with_input("remove 0\nquit\n");
        repl.run().unwrap();
        assert_eq!(repl.service().links().len(), 3);
        assert_eq!(repl.service().links().get(0).unwrap().name, "Learn C#");
        assert!(output(repl).contains("Link at index 0 removed."));
    }

    #[test]
    fn given_remove_index_equal_to_len_when_run_then_error_cites_range() {
        let (_dir, mut repl, _) = repl_with_input("remove 4\nquit\n");
        repl.run().unwrap();
        assert_eq!(repl.service().links().len(), 4);
        assert!(output(repl).contains("Error: Index 4 is invalid. Enter a value in the range [0, 3]."));
    }

    #[test]
    fn given_remove_with_non_integer_or_negative_when_run_then_descriptive_errors() {
        let (_dir, mut repl, _) = repl_with_input("remove abc\nremove -1\nquit\n");
        repl.run().unwrap();
        assert_eq!(repl.service().links().len(), 4);
        let out = output(repl);
        assert!(out.contains("'abc' is not a valid index; enter a value in the range [0, 3]"));
        assert!(out.contains("Index -1 is invalid."));
    }

    #[test]
    fn given_open_link_when_run_then_opener_called_with_url() {
        let (_dir, mut repl, opener) = repl_with_input("open link 3\nopen link 9\nquit\n");
        repl.run().unwrap();
        assert_eq!(opener.opened(), vec!["https://lichess.org"]);
        assert!(output(repl).contains("Index 9 is invalid."));
    }

    #[test]
    fn given_open_group_when_run_then_every_member_opened() {
        let (_dir, mut repl, opener) = repl_with_input("open group C#\nopen group nope\nquit\n");
        repl.run().unwrap();
        assert_eq!(opener.opened().len(), 2);
        let out = output(repl);
        assert!(out.contains("Opened 2 of 2 links in group 'C#'."));
        assert!(out.contains("Error: Group 'nope' not found"));
    }

    #[test]
    fn given_failing_opener_when_open_link_then_error_reported_and_loop_continues() {
        let (_dir, mut repl, opener) = repl_with_input("open link 0\nlist\nquit\n");
        opener.fail_with("no browser");
        repl.run().unwrap();
        let out = output(repl);
        assert!(out.contains("Error: Cannot open 'https://news.ycombinator.com': no browser"));
        assert!(out.contains("|0 |"));
    }

    #[test]
    fn given_save_then_load_when_run_then_paths_echoed_and_state_restored() {
        let (dir, mut repl, _) = repl_with_input("save copy.lis\nremove 0\nload copy.lis\nquit\n");
        repl.run().unwrap();
        assert_eq!(repl.service().links().len(), 4);
        let out = output(repl);
        let copy = dir.path().join("copy.lis");
        assert!(out.contains(&format!("Links saved to {}.", copy.display())));
        assert!(out.contains(&format!("Links loaded from {} (4 links).", copy.display())));
    }

    #[test]
    fn given_save_into_missing_directory_when_run_then_io_error_and_list_shows_unsaved_state() {
        let (_dir, mut repl, _) = repl_with_input("remove 0\nsave missing_dir/foo.lis\nlist\nquit\n");
        repl.run().unwrap();
        let out = output(repl);
        assert!(out.contains("Error: IO error on"));
        assert!(out.contains("foo.lis"));
        assert!(out.contains("|0 |school    |C#        |Learn C#"));
    }

    #[test]
    fn given_malformed_file_when_load_then_format_error_and_previous_links_kept() {
        let (dir, mut repl, _) = repl_with_input("load bad.lis\nquit\n");
        std::fs::write(dir.path().join("bad.lis"), "A|B|C|D|http://x\nA|B\n").unwrap();
        repl.run().unwrap();
        assert_eq!(repl.service().links().len(), 4);
        assert!(output(repl).contains("'A|B'"));
    }

    #[test]
    fn given_missing_file_when_load_then_not_found_reported() {
        let (_dir, mut repl, _) = repl_with_input("load nothing.lis\nload\nquit\n");
        repl.run().unwrap();
        let out = output(repl);
        assert!(out.contains("Error: File not found:"));
        assert!(out.contains("Error: Invalid argument: enter a file name: load <file>"));
    }

    #[test]
    fn given_missing_startup_file_when_load_startup_then_reported_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut repl = repl_without_startup_file(&dir, "list\nquit\n");

        repl.load_startup(&dir.path().join("links.lis")).unwrap();
        repl.run().unwrap();

        let out = output(repl);
        assert!(out.contains("Failed to load links at startup"));
        assert!(out.contains("No links to show."));
    }

    #[test]
    fn given_malformed_startup_file_when_load_startup_then_reported_and_session_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let startup = dir.path().join("links.lis");
        std::fs::write(&startup, "A|B|C|D|http://x\nA|B\n").unwrap();
        let mut repl = repl_without_startup_file(&dir, "list\nhelp\nquit\n");

        repl.load_startup(&startup).unwrap();
        repl.run().unwrap();

        assert!(repl.service().links().is_empty());
        assert_eq!(repl.service().current_file(), None);
        let out = output(repl);
        assert!(out.contains("Error: Failed to load links at startup"));
        assert!(out.contains("'A|B'"));
        assert!(out.contains("No links to show."));
        assert!(out.contains("open group <name>"));
        assert!(out.contains(FAREWELL));
    }

    #[test]
    fn given_invalid_utf8_line_when_run_then_loop_continues_to_quit() {
        let (_dir, mut repl, _) = repl_with_bytes(b"list\n\xff\xfe\nlist\nquit\n");

        repl.run().unwrap();

        let out = output(repl);
        assert_eq!(out.matches("|0 |news      |daily     |Hacker News").count(), 2);
        assert!(out.contains("Error: Unknown command: '\u{FFFD}\u{FFFD}'"));
        assert!(out.contains(FAREWELL));
    }

    #[test]
    fn given_loaded_file_when_list_then_current_file_shown() {
        let (dir, mut repl, _) = repl_with_input("list\nsave copy.lis\nlist\nquit\n");
        repl.run().unwrap();
        let out = output(repl);
        let original = dir.path().join("links.lis");
        let copy = dir.path().join("copy.lis");
        assert!(out.contains(&format!("4 links, current file: {}", original.display())));
        assert!(out.contains(&format!("4 links, current file: {}", copy.display())));
    }

    #[test]
    fn given_link_with_delimiter_when_save_then_user_warned() {
        let (_dir, mut repl, _) =
            repl_with_input("save clean.lis\nnew\na\nb\nc|d\ne\nhttp://x\nsave dirty.lis\nquit\n");
        repl.run().unwrap();
        let out = output(repl);
        assert_eq!(out.matches("Warning: some links contain '|'").count(), 1);
        assert!(out.contains("dirty.lis will not load back"));
    }

    #[test]
    fn given_help_when_run_then_usage_for_all_commands() {
        let (_dir, mut repl, _) = repl_with_input("help\nquit\n");
        repl.run().unwrap();
        let out = output(repl);
        for name in crate::cli::command::COMMAND_NAMES {
            assert!(out.contains(name), "help text lacks {}", name);
        }
        assert!(out.contains("open group <name>"));
    }
}
