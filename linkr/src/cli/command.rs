// linkr/src/cli/command.rs
use crate::cli::error::{CliError, CliResult};
use crate::domain::error::DomainError;
use crate::domain::search::SearchField;

/// Names accepted as the first token of a line
pub const COMMAND_NAMES: [&str; 9] = [
    "help", "quit", "list", "new", "search", "save", "load", "remove", "open",
];

pub const HELP_TEXT: &str = r#"Commands:
  help                      show this help text
  quit                      leave the program
  list                      list all links with their index
  new                       create a new link; you are asked for
                            category, group, name, description and URL
  search <field> <term>     case-insensitive search in name, category or group
                            example: search name school
  save <file>               save all links to <file> in the links directory
                            example: save my_links.lis
  load <file>               replace the current links with those in <file>
                            example: load my_links.lis
  remove <index>            remove the link at <index>
                            example: remove 0
  open link <index>         open the link at <index>
                            example: open link 0
  open group <name>         open every link in group <name>
                            example: open group School"#;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    List,
    New,
    Search { field: SearchField, query: String },
    Save { file: String },
    Load { file: String },
    /// Index is kept raw; it can only be range-checked against the collection
    Remove { index: String },
    OpenLink { index: String },
    OpenGroup { group: String },
}

impl Command {
    /// Tokenize on whitespace and match the first token exactly (case-sensitive)
    pub fn parse(line: &str) -> CliResult<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = tokens.split_first() else {
            return Err(CliError::UnknownCommand(String::new()));
        };

        match name {
            "help" => Ok(Command::Help),
            "quit" => Ok(Command::Quit),
            "list" => Ok(Command::List),
            "new" => Ok(Command::New),
            "search" => parse_search(args),
            "save" => single_file_arg(args, "save").map(|file| Command::Save { file }),
            "load" => single_file_arg(args, "load").map(|file| Command::Load { file }),
            "remove" => match args {
                [index] => Ok(Command::Remove {
                    index: index.to_string(),
                }),
                _ => Err(CliError::InvalidArgument(
                    "usage: remove <index>".to_string(),
                )),
            },
            "open" => parse_open(args),
            other => Err(CliError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_search(args: &[&str]) -> CliResult<Command> {
    let [field, terms @ ..] = args else {
        return Err(CliError::InvalidArgument(format!(
            "usage: search <field> <term>, field is one of: {}",
            SearchField::allowed()
        )));
    };
    let field: SearchField = field
        .parse()
        .map_err(|e: DomainError| CliError::InvalidArgument(e.to_string()))?;
    if terms.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "missing search term: search {} <term>",
            field
        )));
    }
    Ok(Command::Search {
        field,
        query: terms.join(" "),
    })
}

fn single_file_arg(args: &[&str], command: &str) -> CliResult<String> {
    match args {
        [file] => Ok(file.to_string()),
        [] => Err(CliError::InvalidArgument(format!(
            "enter a file name: {} <file>",
            command
        ))),
        _ => Err(CliError::InvalidArgument(format!(
            "file names cannot contain spaces: {} <file>",
            command
        ))),
    }
}

fn parse_open(args: &[&str]) -> CliResult<Command> {
    match args {
        ["link", index] => Ok(Command::OpenLink {
            index: index.to_string(),
        }),
        ["group", name @ ..] if !name.is_empty() => Ok(Command::OpenGroup {
            group: name.join(" "),
        }),
        _ => Err(CliError::InvalidArgument(
            "usage: open link <index> | open group <name>".to_string(),
        )),
    }
}
