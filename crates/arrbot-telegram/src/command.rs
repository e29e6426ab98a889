//! Command parsing: the outer `/radarr` command and its sub-command router.

use teloxide::utils::command::BotCommands;

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot and get help")]
    Start,

    #[command(description = "Show help message")]
    Help,

    #[command(description = "Movie library: /radarr [status|list|me|tag|untag|search|add|help]")]
    Radarr(String),
}

/// Usage text for `/radarr help` and the start message.
pub const HELP_TEXT: &str = "\
/radarr [ status [+] | list | me | tag <id> | untag <id> | search <title> | add <tmdb id> ]
    status - library summary (+ adds a per-user breakdown)
    list [search terms] - list movies in the library
    me [search terms] - movies tagged with your username
    tag <id> - tag a movie with your username
    untag <id> - untag a movie with your username
    search <title words> - search the external catalog
    add <tmdb id> - add a movie to the library

If search terms are provided the top 10 fuzzy matches are shown.";

const USAGE_TAG: &str = "Please provide a movie ID to tag: /radarr tag <id>";
const USAGE_UNTAG: &str = "Please provide a movie ID to untag: /radarr untag <id>";
const USAGE_SEARCH: &str = "Please provide a title to search for: /radarr search <title words>";
const USAGE_ADD: &str = "Please provide a TMDB ID to add: /radarr add <tmdb id>";

/// A parsed `/radarr` sub-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryCommand {
    Status { extended: bool },
    List(Vec<String>),
    Me(Vec<String>),
    Tag(u64),
    Untag(u64),
    Search(Vec<String>),
    Add(u64),
    Help,
}

/// Why a `/radarr` invocation did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The sub-command word is not known.
    Unknown(String),
    /// A required argument is missing.
    MissingArgument { usage: &'static str },
    /// The argument should have been a numeric id.
    InvalidId {
        argument: String,
        usage: &'static str,
    },
}

impl ParseError {
    /// The reply text for this parse failure.
    pub fn reply(&self) -> String {
        match self {
            ParseError::Unknown(word) => format!("Unknown command {word}"),
            ParseError::MissingArgument { usage } => (*usage).to_string(),
            ParseError::InvalidId { argument, usage } => {
                format!("'{argument}' is not a numeric ID. {usage}")
            }
        }
    }
}

impl LibraryCommand {
    /// Parse the free-form text after `/radarr`. An empty invocation means
    /// `status`, matching the original bot.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut words = input.split_whitespace();

        let Some(word) = words.next() else {
            return Ok(LibraryCommand::Status { extended: false });
        };
        let rest: Vec<String> = words.map(str::to_string).collect();

        match word {
            "status" => Ok(LibraryCommand::Status {
                extended: rest.first().is_some_and(|a| a == "+"),
            }),
            "list" => Ok(LibraryCommand::List(rest)),
            "me" => Ok(LibraryCommand::Me(rest)),
            "tag" => parse_id(&rest, USAGE_TAG).map(LibraryCommand::Tag),
            "untag" => parse_id(&rest, USAGE_UNTAG).map(LibraryCommand::Untag),
            "search" => {
                if rest.is_empty() {
                    Err(ParseError::MissingArgument {
                        usage: USAGE_SEARCH,
                    })
                } else {
                    Ok(LibraryCommand::Search(rest))
                }
            }
            "add" => parse_id(&rest, USAGE_ADD).map(LibraryCommand::Add),
            "help" => Ok(LibraryCommand::Help),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_id(args: &[String], usage: &'static str) -> Result<u64, ParseError> {
    let Some(arg) = args.first() else {
        return Err(ParseError::MissingArgument { usage });
    };
    arg.parse().map_err(|_| ParseError::InvalidId {
        argument: arg.clone(),
        usage,
    })
}
