//! Prompter adapters.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use sceleton_core::{
    application::{ApplicationError, ports::Prompter},
    error::{SceletonError, SceletonResult},
};

/// Line-based prompter over stdin/stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompter;

impl StdinPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for StdinPrompter {
    fn ask(&self, prompt: &str, default: Option<&str>) -> SceletonResult<String> {
        let mut stdout = io::stdout().lock();
        match default {
            Some(d) => write!(stdout, "{prompt} [{d}]: "),
            None => write!(stdout, "{prompt}: "),
        }
        .and_then(|()| stdout.flush())
        .map_err(prompt_error)?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line).map_err(prompt_error)?;
        if read == 0 {
            return Err(ApplicationError::PromptFailed {
                reason: "end of input".into(),
            }
            .into());
        }

        let answer = line.trim();
        Ok(match default {
            Some(d) if answer.is_empty() => d.to_string(),
            _ => answer.to_string(),
        })
    }

    fn show_menu(&self, title: &str, items: &[String]) -> SceletonResult<()> {
        let mut stdout = io::stdout().lock();
        write_menu(&mut stdout, title, items).map_err(prompt_error)
    }

    fn warn(&self, message: &str) -> SceletonResult<()> {
        writeln!(io::stderr(), "{message}").map_err(prompt_error)
    }
}

/// `title:` followed by one `  n) item` line per entry, numbered from 1.
pub fn write_menu(out: &mut impl Write, title: &str, items: &[String]) -> io::Result<()> {
    writeln!(out, "{title}:")?;
    for (i, item) in items.iter().enumerate() {
        writeln!(out, "  {:>3}) {item}", i + 1)?;
    }
    Ok(())
}

fn prompt_error(e: io::Error) -> SceletonError {
    ApplicationError::PromptFailed {
        reason: e.to_string(),
    }
    .into()
}

/// Replays canned answers (testing).
///
/// An empty answer yields the default, as at a real terminal. Running out of
/// answers fails with `PromptFailed`.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    transcript: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            transcript: RefCell::default(),
        }
    }

    /// Everything asked, shown or warned, in order.
    pub fn transcript(&self) -> Vec<String> {
        self.transcript.borrow().clone()
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, prompt: &str, default: Option<&str>) -> SceletonResult<String> {
        self.transcript.borrow_mut().push(format!("ask: {prompt}"));
        let answer = self.answers.borrow_mut().pop_front().ok_or_else(|| {
            ApplicationError::PromptFailed {
                reason: format!("no scripted answer for '{prompt}'"),
            }
        })?;

        Ok(match default {
            Some(d) if answer.is_empty() => d.to_string(),
            _ => answer,
        })
    }

    fn show_menu(&self, title: &str, items: &[String]) -> SceletonResult<()> {
        self.transcript
            .borrow_mut()
            .push(format!("menu: {title} ({} items)", items.len()));
        Ok(())
    }

    fn warn(&self, message: &str) -> SceletonResult<()> {
        self.transcript.borrow_mut().push(format!("warn: {message}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_is_numbered_from_one() {
        let mut out = Vec::new();
        write_menu(&mut out, "License", &["MIT License".into(), "BSD License".into()]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "License:\n    1) MIT License\n    2) BSD License\n"
        );
    }

    #[test]
    fn scripted_empty_answer_uses_default() {
        let prompter = ScriptedPrompter::new(["", "Ada"]);
        assert_eq!(prompter.ask("Version", Some("0.1.0")).unwrap(), "0.1.0");
        assert_eq!(prompter.ask("Author", None).unwrap(), "Ada");
        assert!(prompter.ask("E-mail", None).is_err());
        assert_eq!(prompter.remaining(), 0);
    }
}
