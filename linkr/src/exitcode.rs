/// Standard Unix exit codes for the linkr CLI application.
///
/// Command line usage error - invalid arguments, unreadable config file, etc.
pub const USAGE: i32 = 64;

/// Input/output error on the terminal
pub const IOERR: i32 = 74;
