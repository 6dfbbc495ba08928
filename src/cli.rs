//! Command-line argument parsing.
//!
//! Usage:
//!   sake [-h] [-i <script>] [<statement>...]
//!
//! Every trailing positional argument is appended to the script as its own
//! `;`-terminated statement, so `sake clean all` runs the `clean` and `all`
//! targets of the default script.

use std::path::PathBuf;

/// Default script file, looked up in the working directory.
pub const DEFAULT_SCRIPT: &str = "m.sk";

/// Parsed command-line arguments.
#[derive(Debug)]
pub struct CliArgs {
    /// Script to run (`-i <file>`, default `m.sk`).
    pub script: PathBuf,
    /// Statements appended after the script text, in order.
    pub commands: Vec<String>,
    /// `-h`: print usage and exit.
    pub help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        CliArgs {
            script: PathBuf::from(DEFAULT_SCRIPT),
            commands: Vec::new(),
            help: false,
        }
    }
}

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(&raw[1..])
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // Non-flag argument: a statement to append.
        if !arg.starts_with('-') || arg == "-" {
            args.commands.push(arg.to_owned());
            i += 1;
            continue;
        }

        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'h' => args.help = true,

                // -i<file> or -i <file>
                'i' => {
                    let file = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err("-i requires a file argument".to_owned());
                    };
                    args.script = PathBuf::from(file);
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    Ok(args)
}

/// Usage text, printed on `-h` and on argument errors.
pub fn usage() -> &'static str {
    "usage: sake [-h] [-i <script>] [<statement>...]\n\
     \n\
     options:\n\
       -i <script>  evaluate <script> instead of ./m.sk\n\
       -h           show this help\n\
     \n\
     each <statement> is appended to the script as its own `;`-terminated\n\
     statement and evaluated after the script's text."
}

// ── Tests ─────────────────────────────────────────────────────────────────────
