pub mod greeting;
pub mod keywords;
pub mod matching;

use teloxide::utils::command::BotCommands;

/// Each variant carries its raw argument text; handlers split it on whitespace
/// and answer with a usage message when it does not fit.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Keyword bot commands:")]
pub enum Command {
    #[command(description = "Show help")]
    Help,
    #[command(description = "Count a keyword: /add <keyword>")]
    Add(String),
    #[command(description = "Set a keyword value: /set <key> <value>")]
    Set(String),
    #[command(description = "Read a keyword value: /get <key>")]
    Get(String),
    #[command(description = "Remove a keyword: /delete <key>")]
    Delete(String),
    #[command(description = "Say hello: /hello <name>")]
    Hello(String),
    #[command(
        rename = "find_matches",
        description = "Share interests and find others: /find_matches <id> <interest...>"
    )]
    FindMatches(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Add(_) => "add",
            Command::Set(_) => "set",
            Command::Get(_) => "get",
            Command::Delete(_) => "delete",
            Command::Hello(_) => "hello",
            Command::FindMatches(_) => "find_matches",
        }
    }

    pub fn args(&self) -> &str {
        match self {
            Command::Help => "",
            Command::Add(args)
            | Command::Set(args)
            | Command::Get(args)
            | Command::Delete(args)
            | Command::Hello(args)
            | Command::FindMatches(args) => args,
        }
    }
}
