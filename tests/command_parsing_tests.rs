use keyword_chatbot::bot::commands::Command;
use teloxide::utils::command::BotCommands;

#[cfg(test)]
mod command_parsing_tests {
    use super::*;

    #[test]
    fn test_help_command_parsing() {
        let result = Command::parse("/help", "testbot");
        assert_eq!(result.unwrap(), Command::Help);
    }

    #[test]
    fn test_add_command_parsing() {
        let result = Command::parse("/add apple", "testbot");
        assert_eq!(result.unwrap(), Command::Add("apple".to_string()));
    }

    #[test]
    fn test_set_command_keeps_all_arguments() {
        let result = Command::parse("/set apple 42", "testbot");
        assert_eq!(result.unwrap(), Command::Set("apple 42".to_string()));
    }

    #[test]
    fn test_get_and_delete_command_parsing() {
        assert_eq!(
            Command::parse("/get apple", "testbot").unwrap(),
            Command::Get("apple".to_string())
        );
        assert_eq!(
            Command::parse("/delete apple", "testbot").unwrap(),
            Command::Delete("apple".to_string())
        );
    }

    #[test]
    fn test_hello_command_parsing() {
        let result = Command::parse("/hello world", "testbot");
        assert_eq!(result.unwrap(), Command::Hello("world".to_string()));
    }

    #[test]
    fn test_find_matches_uses_snake_case_name() {
        let result = Command::parse("/find_matches alice chess go", "testbot");
        assert_eq!(
            result.unwrap(),
            Command::FindMatches("alice chess go".to_string())
        );

        assert!(Command::parse("/findmatches alice chess", "testbot").is_err());
    }

    #[test]
    fn test_command_addressed_to_bot() {
        let result = Command::parse("/add@testbot apple", "testbot");
        assert_eq!(result.unwrap(), Command::Add("apple".to_string()));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Command::parse("/subscribe news", "testbot").is_err());
        assert!(Command::parse("/start", "testbot").is_err());
    }

    #[test]
    fn test_command_names_are_case_sensitive() {
        assert!(Command::parse("/Add apple", "testbot").is_err());
        assert!(Command::parse("/HELP", "testbot").is_err());
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert!(Command::parse("add apple", "testbot").is_err());
    }

    #[test]
    fn test_command_name_and_args_accessors() {
        let cmd = Command::parse("/find_matches alice chess", "testbot").unwrap();
        assert_eq!(cmd.name(), "find_matches");
        assert_eq!(cmd.args(), "alice chess");
        assert_eq!(Command::Help.args(), "");
    }

    #[test]
    fn test_descriptions_list_every_command() {
        let descriptions = Command::descriptions().to_string();
        for name in ["/help", "/add", "/set", "/get", "/delete", "/hello", "/find_matches"] {
            assert!(descriptions.contains(name), "missing {name} in:\n{descriptions}");
        }
    }
}
