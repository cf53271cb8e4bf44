//! Interactive prompt layer for `appforge new`.
//!
//! Values given as flags are never prompted for. Prompts are shown only when
//! `--no-input` is absent and stdin is a terminal; otherwise the fallback
//! value is used as-is.

use std::io::IsTerminal;

use tracing::debug;

use crate::error::{CliError, CliResult};

/// Checks a typed answer; the error string is shown and the prompt repeats.
pub type Validator = fn(&str) -> Result<(), String>;

/// Asks for missing values, or silently falls back when prompting is off.
#[derive(Debug, Clone, Copy)]
pub struct Prompter {
    enabled: bool,
}

impl Prompter {
    /// Build a prompter for this invocation.
    ///
    /// Fails with `FeatureNotAvailable` when prompting is wanted but the
    /// binary was built without the `interactive` feature.
    pub fn new(no_input: bool) -> CliResult<Self> {
        let enabled = !no_input && std::io::stdin().is_terminal();
        if !no_input && !enabled {
            debug!("stdin is not a terminal; prompts disabled");
        }
        if enabled && !cfg!(feature = "interactive") {
            return Err(CliError::FeatureNotAvailable {
                feature: "interactive",
            });
        }
        Ok(Self { enabled })
    }

    /// A prompter that never asks.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// `flag` if given, else the answer to `label`, else `fallback`.
    pub fn value(
        &self,
        flag: Option<String>,
        label: &str,
        fallback: &str,
        validate: Option<Validator>,
    ) -> CliResult<String> {
        match flag {
            Some(value) => Ok(value),
            None if self.enabled => ask_text(label, fallback, validate),
            None => Ok(fallback.to_string()),
        }
    }

    /// Yes/no question, defaulting to yes. Always yes when disabled.
    pub fn confirm(&self, label: &str) -> CliResult<bool> {
        if !self.enabled {
            return Ok(true);
        }
        ask_confirm(label)
    }
}

#[cfg(feature = "interactive")]
fn ask_text(label: &str, fallback: &str, validate: Option<Validator>) -> CliResult<String> {
    use dialoguer::Input;

    let mut input = Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true);
    if !fallback.is_empty() {
        input = input.default(fallback.to_string());
    }
    if let Some(check) = validate {
        input = input.validate_with(move |answer: &String| check(answer));
    }
    input.interact_text().map_err(|e| CliError::PromptFailed {
        message: e.to_string(),
    })
}

#[cfg(feature = "interactive")]
fn ask_confirm(label: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(label)
        .default(true)
        .interact()
        .map_err(|e| CliError::PromptFailed {
            message: e.to_string(),
        })
}

#[cfg(not(feature = "interactive"))]
fn ask_text(_label: &str, _fallback: &str, _validate: Option<Validator>) -> CliResult<String> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

#[cfg(not(feature = "interactive"))]
fn ask_confirm(_label: &str) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
