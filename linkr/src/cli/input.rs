// linkr/src/cli/input.rs
use crate::cli::error::{CliError, CliResult};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

/// Where the interpreter reads its lines from.
///
/// `Ok(None)` signals end of input; Ctrl-C surfaces as `CliError::OperationAborted`
/// and an undecodable line as `CliError::InvalidInput`. Both only affect the current line.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> CliResult<Option<String>>;
}

/// Line editor with history, used when stdin is a terminal
pub struct ReadlineSource {
    editor: DefaultEditor,
    history_file: Option<PathBuf>,
}

impl ReadlineSource {
    pub fn new(history_file: Option<PathBuf>) -> CliResult<Self> {
        let mut editor = DefaultEditor::new()
            .map_err(|e| CliError::Other(format!("Failed to create readline editor: {}", e)))?;

        if let Some(path) = &history_file {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).ok();
            }
            if let Err(e) = editor.load_history(path) {
                debug!("No existing history file or failed to load: {}", e);
            }
        }

        Ok(Self {
            editor,
            history_file,
        })
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, prompt: &str) -> CliResult<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => Err(CliError::OperationAborted),
            Err(ReadlineError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                Err(CliError::InvalidInput("line is not valid UTF-8".to_string()))
            }
            Err(e) => Err(CliError::Other(format!("Readline error: {}", e))),
        }
    }
}

impl Drop for ReadlineSource {
    fn drop(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                debug!("Failed to save history: {}", e);
            }
        }
    }
}

/// Plain line reader for pipes and scripted input; prompts go to `prompt_out`.
///
/// Bytes that are not valid UTF-8 are replaced rather than failing the read.
pub struct BufReadSource<R: BufRead, W: Write> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> BufReadSource<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for BufReadSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> CliResult<Option<String>> {
        write!(self.prompt_out, "{}", prompt)?;
        self.prompt_out.flush()?;

        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}
