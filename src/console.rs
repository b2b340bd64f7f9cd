use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::time::Duration;

use thiserror::Error;

use crate::render::Renderer;

#[derive(Debug, Error)]
pub enum InputError {
    /// Input ended while a prompt was blocking. Observed by the run loop
    /// between state turns and terminates the session.
    #[error("interrupted while waiting for input")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A rejected user entry plus the corrective message to show. Always handled
/// by re-prompting at the boundary that produced it; never escapes a prompt
/// helper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError(message.into())
    }
}

/// The interactive surface the session talks to: a blocking `prompt` and the
/// display calls, with pacing for round-by-round output. Implemented by the
/// real terminal and by the scripted console the tests drive.
pub trait Console {
    fn prompt(&mut self, text: &str) -> Result<String, InputError>;
    fn line(&mut self, text: &str);
    fn heading(&mut self, title: &str);
    fn panel(&mut self, body: &str);
    fn notice(&mut self, text: &str);
    fn error(&mut self, text: &str);
    /// Display pacing between simulation rounds. No-op by default.
    fn pause(&mut self) {}
}

/// Console over stdin and a presentation backend.
pub struct TerminalConsole {
    renderer: Box<dyn Renderer>,
    round_delay: Duration,
}

impl TerminalConsole {
    pub fn new(renderer: Box<dyn Renderer>, round_delay: Duration) -> Self {
        TerminalConsole {
            renderer,
            round_delay,
        }
    }
}

impl Console for TerminalConsole {
    fn prompt(&mut self, text: &str) -> Result<String, InputError> {
        self.renderer.prompt_text(text);
        let mut buf = String::new();
        let read = io::stdin().lock().read_line(&mut buf)?;
        if read == 0 {
            return Err(InputError::Interrupted);
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }

    fn line(&mut self, text: &str) {
        self.renderer.line(text);
    }

    fn heading(&mut self, title: &str) {
        self.renderer.heading(title);
    }

    fn panel(&mut self, body: &str) {
        self.renderer.panel(body);
    }

    fn notice(&mut self, text: &str) {
        self.renderer.notice(text);
    }

    fn error(&mut self, text: &str) {
        self.renderer.error(text);
    }

    fn pause(&mut self) {
        if !self.round_delay.is_zero() {
            std::thread::sleep(self.round_delay);
        }
    }
}

/// Feeds a pre-baked input script and records everything the session would
/// have displayed. Running out of script surfaces as an interrupt, the same
/// way a closed stdin does.
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    pub fn output_text(&self) -> String {
        self.output.join("\n")
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, text: &str) -> Result<String, InputError> {
        self.output.push(text.to_string());
        self.inputs.pop_front().ok_or(InputError::Interrupted)
    }

    fn line(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn heading(&mut self, title: &str) {
        self.output.push(format!("========== {title} =========="));
    }

    fn panel(&mut self, body: &str) {
        self.output.push(body.to_string());
    }

    fn notice(&mut self, text: &str) {
        self.output.push(format!("[Info] {text}"));
    }

    fn error(&mut self, text: &str) {
        self.output.push(format!("[Error] {text}"));
    }
}

pub fn validate_nonempty(raw: &str, message: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::new(message));
    }
    Ok(value.to_string())
}

/// Digit-only entry in `0..=max`. Signs and stray characters are rejected
/// outright rather than parsed leniently.
pub fn validate_points(raw: &str, max: u32) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    let err = || {
        ValidationError::new(format!(
            "Ability points must be an integer from 0 to {max}."
        ))
    };
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(err());
    }
    match trimmed.parse::<u32>() {
        Ok(value) if value <= max => Ok(value),
        _ => Err(err()),
    }
}

/// Loops until `raw` trims to something non-empty.
pub fn prompt_nonempty(
    console: &mut dyn Console,
    text: &str,
    message: &str,
) -> Result<String, InputError> {
    loop {
        let raw = console.prompt(text)?;
        match validate_nonempty(&raw, message) {
            Ok(value) => return Ok(value),
            Err(err) => console.error(&err.0),
        }
    }
}

/// Loops until a digit-only entry within the budget comes back.
pub fn prompt_points(
    console: &mut dyn Console,
    text: &str,
    max: u32,
) -> Result<u32, InputError> {
    loop {
        let raw = console.prompt(text)?;
        match validate_points(&raw, max) {
            Ok(value) => return Ok(value),
            Err(err) => console.error(&err.0),
        }
    }
}

/// Shows a numbered option list once, then prompts until a valid choice is
/// entered. Returns the 1-based choice.
pub fn choose(
    console: &mut dyn Console,
    title: &str,
    options: &[&str],
) -> Result<usize, InputError> {
    console.heading(title);
    for (n, option) in options.iter().enumerate() {
        console.line(&format!("{}. {option}", n + 1));
    }
    loop {
        let raw = console.prompt("> ")?;
        let trimmed = raw.trim();
        if trimmed.chars().all(|c| c.is_ascii_digit()) && !trimmed.is_empty() {
            if let Ok(choice) = trimmed.parse::<usize>() {
                if (1..=options.len()).contains(&choice) {
                    return Ok(choice);
                }
            }
        }
        console.error(&format!(
            "Invalid choice. Please select a number from 1 to {}.",
            options.len()
        ));
    }
}
