/// Prefix that marks a line as a REPL command instead of a chat message.
pub const COMMAND_PREFIX: char = '/';

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    CommandMeta {
        name: "help",
        desc: "Lists out all available commands.",
    },
    CommandMeta {
        name: "reset",
        desc: "Clears the conversation back to the greeting.",
    },
    CommandMeta {
        name: "history",
        desc: "Prints every turn of the current conversation.",
    },
    CommandMeta {
        name: "quit",
        desc: "Leaves the chat.",
    },
];

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Reset,
    History,
    Quit,
    Unknown(String),
}

impl Command {
    /// `None` when the line is a chat message.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix(COMMAND_PREFIX)?;
        let name = rest.split_whitespace().next().unwrap_or_default();

        Some(match name.to_ascii_lowercase().as_str() {
            "help" => Command::Help,
            "reset" | "clear" => Command::Reset,
            "history" => Command::History,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(name.to_owned()),
        })
    }
}

pub fn help_text() -> String {
    COMMANDS
        .iter()
        .map(|command| format!("{}{:<8} {}", COMMAND_PREFIX, command.name, command.desc))
        .collect::<Vec<_>>()
        .join("\n")
}
