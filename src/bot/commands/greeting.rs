use crate::utils::validation::split_args;

pub const HELP_TEXT: &str = "Helping you helping you.";
pub const HELLO_USAGE: &str = "Usage: /hello <keyword>";

pub fn handle_help() -> String {
    HELP_TEXT.to_string()
}

pub fn handle_hello(args: &str) -> String {
    match split_args(args).as_slice() {
        [name] => format!("Good day,{name}!"),
        _ => HELLO_USAGE.to_string(),
    }
}
