//! Passcode Prompt UI/CLI Interaction
//!
//! Collects the override passcode from the user once the daily limit is
//! reached. Supports both interactive (stdin) and non-interactive
//! (scripted) modes so the flow can be driven in tests.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Mutex;

use tracing::{debug, warn};

/// What the user did at the passcode prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    /// A code was entered (not yet verified)
    Code(String),

    /// The user abandoned the prompt
    Cancelled,
}

/// Passcode prompt manager
pub struct PasscodePrompt {
    interactive: bool,
    scripted: Mutex<VecDeque<PromptInput>>,
}

impl PasscodePrompt {
    /// Create an interactive prompt reading from stdin
    pub fn new() -> Self {
        Self {
            interactive: true,
            scripted: Mutex::new(VecDeque::new()),
        }
    }

    /// Create a scripted prompt for tests
    ///
    /// Inputs are returned in order; once exhausted, the prompt cancels.
    pub fn scripted(inputs: Vec<PromptInput>) -> Self {
        Self {
            interactive: false,
            scripted: Mutex::new(inputs.into()),
        }
    }

    /// Announce the limit and ask for a passcode
    ///
    /// `limit` is shown in the explanation; call [`Self::ask_again`] after
    /// a rejection instead of repeating the explanation.
    pub fn ask(&self, limit: u32) -> anyhow::Result<PromptInput> {
        if self.interactive {
            println!("\nDaily limit reached.");
            println!(
                "You've used all {limit} free generations for today. \
                 Enter the passcode to unlock unlimited access."
            );
        }
        self.read_input()
    }

    /// Ask again after an incorrect code
    pub fn ask_again(&self) -> anyhow::Result<PromptInput> {
        if self.interactive {
            println!("Incorrect passcode. Please try again.");
        }
        self.read_input()
    }

    fn read_input(&self) -> anyhow::Result<PromptInput> {
        if !self.interactive {
            let next = self.scripted.lock().unwrap().pop_front();
            debug!("Scripted passcode prompt returned {:?}", next);
            return Ok(next.unwrap_or(PromptInput::Cancelled));
        }

        print!("Passcode (or 'q' to cancel): ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => {
                // EOF: treat like a cancel
                warn!("No input provided (EOF), cancelling passcode prompt");
                Ok(PromptInput::Cancelled)
            }
            Ok(_) => {
                let input = input.trim();
                if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
                    Ok(PromptInput::Cancelled)
                } else {
                    Ok(PromptInput::Code(input.to_string()))
                }
            }
            Err(err) => Err(anyhow::anyhow!("failed to read input: {err}")),
        }
    }
}

impl Default for PasscodePrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompt_returns_inputs_in_order() {
        let prompt = PasscodePrompt::scripted(vec![
            PromptInput::Code("0000".to_string()),
            PromptInput::Code("1122".to_string()),
        ]);

        assert_eq!(prompt.ask(3).unwrap(), PromptInput::Code("0000".to_string()));
        assert_eq!(
            prompt.ask_again().unwrap(),
            PromptInput::Code("1122".to_string())
        );
    }

    #[test]
    fn test_scripted_prompt_cancels_when_exhausted() {
        let prompt = PasscodePrompt::scripted(vec![]);
        assert_eq!(prompt.ask(3).unwrap(), PromptInput::Cancelled);
    }

    #[test]
    fn test_scripted_cancel() {
        let prompt = PasscodePrompt::scripted(vec![PromptInput::Cancelled]);
        assert_eq!(prompt.ask(3).unwrap(), PromptInput::Cancelled);
    }
}
