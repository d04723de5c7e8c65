use std::fmt::Display;
use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;
use backend::{ElectionApp, Screen, StatusField};

pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented terminal: prompts on `out`, answers from `input`.
pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R: AsyncBufRead + Unpin, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { lines: input.lines(), out }
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// `None` once input is exhausted.
    pub async fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}: ", label)?;
        self.out.flush()?;
        self.lines.next_line().await
    }

    pub async fn choose(&mut self) -> io::Result<Option<String>> {
        Ok(self.ask(">").await?.map(|choice| choice.trim().to_lowercase()))
    }

    /// Title of the current screen followed by every status text it owns.
    pub fn header(&mut self, app: &ElectionApp) -> io::Result<()> {
        let screen = app.screen();
        self.say("")?;
        self.say(format_args!("== {} ==", screen))?;
        for field in StatusField::owned_by(screen) {
            let text = app.status(field);
            if text.is_empty() {
                continue;
            }
            match field_label(field) {
                Some(label) => self.say(format_args!("{}:\n{}", label, text))?,
                None => self.say(format_args!("[{}]", text))?,
            }
        }
        Ok(())
    }

    pub fn menu(&mut self, entries: &[(&str, &str)]) -> io::Result<()> {
        for (key, text) in entries {
            self.say(format_args!("  {}) {}", key, text))?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }
}

fn field_label(field: StatusField) -> Option<&'static str> {
    match field {
        StatusField::VotersList => Some("Voters"),
        StatusField::ResultsList => Some("Results"),
        _ => None,
    }
}

/// Controller errors are already on the status board; only log them here.
pub fn settle<T>(result: backend::Result<T>) -> Option<T> {
    result.map_err(|e| debug!("{}", e)).ok()
}

pub fn unknown_choice<R: AsyncBufRead + Unpin, W: Write>(console: &mut Console<R, W>, choice: &str) -> io::Result<Flow> {
    console.say(format_args!("Unknown option '{}'", choice))?;
    Ok(Flow::Continue)
}

pub fn back_label(screen: Screen) -> &'static str {
    match screen {
        Screen::AdminPanel => "logout",
        Screen::Ballot => "leave without voting",
        _ => "back",
    }
}
