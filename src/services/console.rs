/// Console Service
/// Command entry, history recall and the append-only output log

use crate::models::{ConsoleState, LogLine};

#[derive(Debug, Default)]
pub struct Console {
    history: Vec<String>,
    /// Recall cursor; equals `history.len()` right after a send
    cursor: usize,
    entry: String,
    log: Vec<LogLine>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the field contents as typed by the user
    pub fn set_entry(&mut self, entry: impl Into<String>) {
        self.entry = entry.into();
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn log(&self) -> &[LogLine] {
        &self.log
    }

    /// Send the current entry.
    ///
    /// The command goes into the history before `send` runs. The "Sent" log
    /// line is only written, and the entry only cleared, once `send` succeeds.
    pub fn submit<E>(
        &mut self,
        send: impl FnOnce(&str) -> Result<(), E>,
    ) -> Result<&LogLine, E> {
        let command = self.entry.clone();
        self.history.push(command.clone());
        self.cursor = self.history.len();

        send(&command)?;

        self.entry.clear();
        Ok(self.append(LogLine::sent(command)))
    }

    /// Step back through the history (Up key)
    pub fn history_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.recall()
    }

    /// Step forward through the history (Down key)
    pub fn history_forward(&mut self) -> bool {
        if self.cursor + 1 >= self.history.len() {
            return false;
        }
        self.cursor += 1;
        self.recall()
    }

    pub fn push_received(&mut self, line: impl Into<String>) -> &LogLine {
        self.append(LogLine::received(line))
    }

    pub fn state(&self) -> ConsoleState {
        ConsoleState {
            entry: self.entry.clone(),
            cursor: self.cursor,
            history_len: self.history.len(),
            log: self.log.iter().map(ToString::to_string).collect(),
        }
    }

    fn recall(&mut self) -> bool {
        match self.history.get(self.cursor) {
            Some(command) => {
                self.entry = command.clone();
                true
            }
            None => false,
        }
    }

    fn append(&mut self, line: LogLine) -> &LogLine {
        self.log.push(line);
        &self.log[self.log.len() - 1]
    }
}
