//! The `:` command line of the editor.

/// Commands accepted on the editor command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExCommand {
    /// `:w`, save and keep editing.
    Write,
    /// `:x` or `:wq`, save and return to the viewer once the save lands.
    WriteQuit,
    /// `:q` or `:q!`, discard the buffer.
    Quit,
}

impl ExCommand {
    /// Parses a submitted command line, leading colon included.
    ///
    /// Surrounding whitespace is ignored. Unknown text yields `None`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            ":w" => Some(Self::Write),
            ":x" | ":wq" => Some(Self::WriteQuit),
            ":q" | ":q!" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Input accumulated while the command line is open. Always starts with `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    input: String,
}

impl Default for CommandLine {
    fn default() -> Self {
        Self {
            input: ":".to_string(),
        }
    }
}

impl CommandLine {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.input
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    /// Removes the last character, keeping the leading colon.
    pub fn backspace(&mut self) {
        if self.input.chars().count() > 1 {
            self.input.pop();
        }
    }

    #[must_use]
    pub fn command(&self) -> Option<ExCommand> {
        ExCommand::parse(&self.input)
    }
}
