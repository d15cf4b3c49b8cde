use std::io::{self, BufRead, Write};

/// Blocking yes/no question put to the user before destructive work.
pub trait Prompt {
    fn ask(&mut self, message: &str) -> bool;
}

/// Asks on stdout and reads the answer from stdin. Anything but `y`/`yes`
/// is a no.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, message: &str) -> bool {
        let stdin = io::stdin();
        ask_with(message, &mut stdin.lock(), &mut io::stdout())
    }
}

/// Answers yes without asking. Backs `--yes`.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn ask(&mut self, message: &str) -> bool {
        tracing::debug!("auto-confirmed: {message}");
        true
    }
}

fn ask_with(message: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
    if let Err(err) = write!(output, "{message} [y/N] ").and_then(|()| output.flush()) {
        tracing::warn!("failed to write prompt: {err}");
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(err) => {
            tracing::warn!("failed to read answer, assuming no: {err}");
            false
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Replays a fixed answer and records every question.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answer: bool,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn ask(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answer
    }
}
