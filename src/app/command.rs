//! Command parsing for the session prompt

/// Parsed command from the session prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select a numbered choice: 1-9
    Choose(usize),
    /// Answer a true/false question: t or f
    Bool(bool),
    /// Free-text answer: a <text>
    Answer(String),
    /// Move to the next question: n or next
    Next,
    /// Move to the previous question: b or back
    Back,
    /// Jump to a question by 1-based position: j <k>
    Jump(usize),
    /// Quit the session: q or quit
    Quit,
    /// Show help: ? or help
    Help,
    /// Empty input
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
    /// Argument present but not usable
    InvalidArgument(String),
}

/// Parse one line of session input
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    // A bare number selects that choice on the current question.
    if let Ok(n) = input.parse::<usize>() {
        return if (1..=9).contains(&n) {
            ParseResult::Ok(Command::Choose(n))
        } else {
            ParseResult::InvalidArgument(format!("choice {} is not between 1 and 9", n))
        };
    }

    // Split into command and arguments
    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "t" | "true" => ParseResult::Ok(Command::Bool(true)),
        "f" | "false" => ParseResult::Ok(Command::Bool(false)),
        "a" | "answer" => {
            if args.is_empty() {
                ParseResult::MissingArgument("answer".to_string())
            } else {
                ParseResult::Ok(Command::Answer(args.to_string()))
            }
        }
        "n" | "next" => ParseResult::Ok(Command::Next),
        "b" | "back" => ParseResult::Ok(Command::Back),
        "j" | "jump" => {
            if args.is_empty() {
                ParseResult::MissingArgument("jump".to_string())
            } else {
                match args.parse::<usize>() {
                    Ok(position) if position >= 1 => ParseResult::Ok(Command::Jump(position)),
                    _ => ParseResult::InvalidArgument(format!("jump target {:?} is not a question number", args)),
                }
            }
        }
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_choice_number() {
        assert!(matches!(parse_command("1"), ParseResult::Ok(Command::Choose(1))));
        assert!(matches!(parse_command("4"), ParseResult::Ok(Command::Choose(4))));
        assert!(matches!(parse_command(" 2 "), ParseResult::Ok(Command::Choose(2))));
    }

    #[test]
    fn parse_choice_out_of_range() {
        assert!(matches!(parse_command("0"), ParseResult::InvalidArgument(_)));
        assert!(matches!(parse_command("10"), ParseResult::InvalidArgument(_)));
    }

    #[test]
    fn parse_true_false() {
        assert!(matches!(parse_command("t"), ParseResult::Ok(Command::Bool(true))));
        assert!(matches!(parse_command("TRUE"), ParseResult::Ok(Command::Bool(true))));
        assert!(matches!(parse_command("f"), ParseResult::Ok(Command::Bool(false))));
        assert!(matches!(parse_command("False"), ParseResult::Ok(Command::Bool(false))));
    }

    #[test]
    fn parse_free_answer() {
        match parse_command("a photosynthesis") {
            ParseResult::Ok(Command::Answer(text)) => assert_eq!(text, "photosynthesis"),
            _ => panic!("Expected Answer command"),
        }
    }

    #[test]
    fn parse_free_answer_keeps_inner_spaces() {
        match parse_command("answer the mitochondria is the powerhouse") {
            ParseResult::Ok(Command::Answer(text)) => {
                assert_eq!(text, "the mitochondria is the powerhouse");
            }
            _ => panic!("Expected Answer command"),
        }
    }

    #[test]
    fn parse_answer_missing_arg() {
        assert!(matches!(parse_command("a"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_navigation() {
        assert!(matches!(parse_command("n"), ParseResult::Ok(Command::Next)));
        assert!(matches!(parse_command("next"), ParseResult::Ok(Command::Next)));
        assert!(matches!(parse_command("b"), ParseResult::Ok(Command::Back)));
        assert!(matches!(parse_command("back"), ParseResult::Ok(Command::Back)));
    }

    #[test]
    fn parse_jump_command() {
        assert!(matches!(parse_command("j 3"), ParseResult::Ok(Command::Jump(3))));
        assert!(matches!(parse_command("jump 12"), ParseResult::Ok(Command::Jump(12))));
    }

    #[test]
    fn parse_jump_rejects_bad_targets() {
        assert!(matches!(parse_command("j"), ParseResult::MissingArgument(_)));
        assert!(matches!(parse_command("j zero"), ParseResult::InvalidArgument(_)));
        assert!(matches!(parse_command("j 0"), ParseResult::InvalidArgument(_)));
    }

    #[test]
    fn parse_quit_command() {
        assert!(matches!(parse_command("q"), ParseResult::Ok(Command::Quit)));
        assert!(matches!(parse_command("quit"), ParseResult::Ok(Command::Quit)));
        assert!(matches!(parse_command("Q"), ParseResult::Ok(Command::Quit)));
    }

    #[test]
    fn parse_help_command() {
        assert!(matches!(parse_command("help"), ParseResult::Ok(Command::Help)));
        assert!(matches!(parse_command("h"), ParseResult::Ok(Command::Help)));
        assert!(matches!(parse_command("?"), ParseResult::Ok(Command::Help)));
    }

    #[test]
    fn parse_unknown_command() {
        assert!(matches!(parse_command("skip"), ParseResult::UnknownCommand(_)));
    }

    #[test]
    fn parse_empty_is_nop() {
        assert!(matches!(parse_command(""), ParseResult::Ok(Command::Nop)));
        assert!(matches!(parse_command("   "), ParseResult::Ok(Command::Nop)));
    }
}
