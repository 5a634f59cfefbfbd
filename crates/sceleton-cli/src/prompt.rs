//! Terminal prompter.
//!
//! With the `interactive` feature and a terminal on stdin, questions go
//! through `dialoguer`; otherwise answers are read line by line from stdin.

use sceleton_adapters::StdinPrompter;
use sceleton_core::application::Prompter;

#[cfg(feature = "interactive")]
pub use interactive::DialoguerPrompter;

/// Prompter for this process.
pub fn terminal_prompter() -> Box<dyn Prompter> {
    #[cfg(feature = "interactive")]
    {
        use std::io::IsTerminal as _;
        if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
            return Box::new(DialoguerPrompter::new());
        }
    }
    Box::new(StdinPrompter::new())
}

#[cfg(feature = "interactive")]
mod interactive {
    use console::{Term, style};
    use dialoguer::{Input, theme::ColorfulTheme};

    use sceleton_adapters::prompt::write_menu;
    use sceleton_core::{
        application::{ApplicationError, Prompter},
        error::SceletonResult,
    };

    /// Coloured prompts on stderr.
    pub struct DialoguerPrompter {
        theme: ColorfulTheme,
        term: Term,
    }

    impl DialoguerPrompter {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
                term: Term::stderr(),
            }
        }
    }

    impl Default for DialoguerPrompter {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Prompter for DialoguerPrompter {
        fn ask(&self, prompt: &str, default: Option<&str>) -> SceletonResult<String> {
            let mut input = Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty(true);
            if let Some(default) = default {
                input = input.default(default.to_string());
            }
            input
                .interact_text_on(&self.term)
                .map_err(|e| prompt_failed(e.to_string()))
        }

        fn show_menu(&self, title: &str, items: &[String]) -> SceletonResult<()> {
            let mut term = self.term.clone();
            write_menu(&mut term, &style(title).bold().to_string(), items)
                .map_err(|e| prompt_failed(e.to_string()))
        }

        fn warn(&self, message: &str) -> SceletonResult<()> {
            self.term
                .write_line(&style(message).yellow().to_string())
                .map_err(|e| prompt_failed(e.to_string()))
        }
    }

    fn prompt_failed(reason: String) -> sceleton_core::error::SceletonError {
        ApplicationError::PromptFailed { reason }.into()
    }
}
