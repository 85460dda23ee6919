use std::io::{self, BufRead, BufReader};
use std::thread::{self, JoinHandle};

use kanal::Sender;

/// A line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    ToggleAcademic,
    Help,
    Quit,
    Ignore,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Command::Ignore;
        }

        match trimmed {
            ":a" | ":academic" => Command::ToggleAcademic,
            ":h" | ":help" | "?" => Command::Help,
            ":q" | ":quit" => Command::Quit,
            other if other.starts_with(':') => Command::Help,
            other => Command::Submit(other.to_string()),
        }
    }
}

/// Blocking stdin reader on its own thread. The channel closes at EOF.
pub fn spawn_stdin_reader(tx: Sender<String>) -> io::Result<JoinHandle<()>> {
    spawn_line_reader(BufReader::new(io::stdin()), tx)
}

pub fn spawn_line_reader<R>(reader: R, tx: Sender<String>) -> io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("medterm-stdin".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
            tracing::debug!("line reader stopping");
        })
}
