use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive chat (default)
    Chat,

    /// Ask a single question and print the reply
    Ask {
        /// The question; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
}

/// A line typed at the chat prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Empty,
    Quit,
    Reset,
    History,
    Help,
    Unknown(&'a str),
    Message(&'a str),
}

impl<'a> ReplInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ReplInput::Empty;
        }

        match trimmed {
            "/quit" | "/exit" | "/q" => ReplInput::Quit,
            "/reset" | "/new" => ReplInput::Reset,
            "/history" => ReplInput::History,
            "/help" | "/?" => ReplInput::Help,
            cmd if cmd.starts_with('/') => ReplInput::Unknown(cmd),
            text => ReplInput::Message(text),
        }
    }
}

pub const REPL_HELP: &str = "\
Commands:
  /history   show the conversation so far
  /reset     start a new conversation
  /quit      leave (Ctrl-D works too)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplInput::parse("  /quit \n"), ReplInput::Quit);
        assert_eq!(ReplInput::parse("/reset"), ReplInput::Reset);
        assert_eq!(ReplInput::parse("/history"), ReplInput::History);
        assert_eq!(ReplInput::parse("/help"), ReplInput::Help);
        assert_eq!(ReplInput::parse("/fly"), ReplInput::Unknown("/fly"));
    }

    #[test]
    fn test_parse_message_and_blank() {
        assert_eq!(ReplInput::parse("\n"), ReplInput::Empty);
        assert_eq!(
            ReplInput::parse("Is Porto walkable?\n"),
            ReplInput::Message("Is Porto walkable?")
        );
    }
}
