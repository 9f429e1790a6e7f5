//! Interactive terminal prompts.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::errors::{WrappedError, WrappedResult};

/// Line-oriented prompts over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn info(&mut self, message: &str) -> WrappedResult<()> {
        writeln!(self.output, "\n {} ", message).map_err(prompt_io)
    }

    fn ask(&mut self, question: &str) -> WrappedResult<String> {
        write!(self.output, "\n {} ", question).map_err(prompt_io)?;
        self.output.flush().map_err(prompt_io)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(prompt_io)?;
        if read == 0 {
            return Err(WrappedError::PromptFailed("unexpected end of input".to_string()));
        }
        Ok(line.trim().to_string())
    }

    /// Free-text answer, trimmed.
    pub fn prompt(&mut self, message: &str) -> WrappedResult<String> {
        self.ask(&format!("{}:", message))
    }

    /// Yes/no question. An empty answer picks `default`.
    pub fn confirmation(&mut self, message: &str, default: bool) -> WrappedResult<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.ask(&format!("{} {}:", message, hint))?;
            match answer.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please enter Y or N").map_err(prompt_io)?,
            }
        }
    }

    /// Asks until one of `choices` is entered. An empty answer picks
    /// `default` when there is one.
    pub fn choice(
        &mut self,
        message: &str,
        choices: &[String],
        default: Option<&str>,
    ) -> WrappedResult<String> {
        let listed = choices.join("/");
        let question = match default {
            Some(d) => format!("{} [{}] ({}):", message, listed, d),
            None => format!("{} [{}]:", message, listed),
        };
        loop {
            let answer = self.ask(&question)?;
            if answer.is_empty() {
                if let Some(d) = default {
                    return Ok(d.to_string());
                }
            }
            if choices.iter().any(|c| *c == answer) {
                return Ok(answer);
            }
            writeln!(self.output, "Please select one of the available options").map_err(prompt_io)?;
        }
    }
}

fn prompt_io(err: io::Error) -> WrappedError {
    WrappedError::PromptFailed(err.to_string())
}
