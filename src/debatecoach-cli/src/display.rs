//! Terminal rendering for the coaching session.

use std::io::{self, Write};

use colored::Colorize;
use debatecoach_core::{CoachError, PracticeMode, Transcript};
use tracing::warn;

const WIDTH: usize = 70;

pub fn print_header() {
    println!();
    println!("{}", "═".repeat(WIDTH).bright_blue());
    println!("{}", "  🗣️  Debate Coach".bright_blue().bold());
    println!("{}", "═".repeat(WIDTH).bright_blue());
    println!("{}", "Welcome to the Ultimate Debate Companion!".bold());
    println!("👋 Choose your debate style below to start your journey in mastering debate.");
    println!("{}", "─".repeat(WIDTH).dimmed());
    println!();
}

pub fn print_goodbye() {
    println!();
    println!("{}", "  Session ended. Keep practising!".bright_green().bold());
    println!();
}

/// Show the heading and, where the mode has them, its rules.
pub fn print_mode_intro(mode: PracticeMode) {
    println!();
    println!("{}", mode.heading().bright_magenta().bold());
    if let Some(rules) = mode.rules() {
        // The first line repeats the heading.
        for line in rules.lines().skip(1) {
            println!("  {}", line);
        }
    }
    println!();
}

pub fn print_rules(mode: PracticeMode) {
    match mode.rules() {
        Some(rules) => println!("{}", rules),
        None => println!(
            "{} has no fixed rules. Pick a topic and a complexity level to get started.",
            mode.display_name()
        ),
    }
}

pub fn print_history(transcript: &Transcript) {
    if transcript.is_empty() {
        return;
    }

    println!();
    println!("{}", "Conversation History".bold().underline());
    for message in transcript {
        if message.is_user() {
            println!("{} {}", "You ▶".bright_cyan().bold(), message.content());
        } else {
            println!("{}", "Coach ▶".bright_green().bold());
            for line in textwrap(message.content(), WIDTH - 4).lines() {
                println!("  {}", line);
            }
        }
        println!();
    }
    println!("{}", "─".repeat(WIDTH).dimmed());
}

pub fn print_failure(error: &CoachError) {
    eprintln!(
        "{} The coach could not respond right now. Please try again.",
        "Error:".red().bold()
    );
    eprintln!("  {}", error.to_string().dimmed());
}

pub fn print_empty_input() {
    println!("{}", "Nothing to coach: the input was empty.".yellow());
}

/// Live sink for a streaming reply.
///
/// Each update carries the full text so far; only the part not yet shown is
/// written, which gives the typing effect on a terminal that cannot redraw.
/// The first write error is logged and the display goes quiet for the rest
/// of the reply.
pub struct LiveDisplay<W: Write> {
    out: W,
    shown: usize,
    failed: bool,
}

impl LiveDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LiveDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: 0,
            failed: false,
        }
    }

    pub fn update(&mut self, accumulated: &str) {
        if self.failed {
            return;
        }
        let header = self.shown == 0;
        let fresh = unseen_suffix(accumulated, self.shown);
        let result = self.write_chunk(header, fresh);
        self.check(result);
        self.shown = accumulated.len();
    }

    /// Terminate the streamed block, if anything was shown.
    pub fn finish(&mut self) {
        if self.failed || self.shown == 0 {
            return;
        }
        let result = self.out.write_all(b"\n\n").and_then(|()| self.out.flush());
        self.check(result);
    }

    fn write_chunk(&mut self, header: bool, fresh: &str) -> io::Result<()> {
        if header {
            writeln!(self.out, "{}", "Coach ▶".bright_green().bold())?;
        }
        self.out.write_all(fresh.as_bytes())?;
        self.out.flush()
    }

    fn check(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            warn!(error = %e, "stopped live output of the reply");
            self.failed = true;
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

/// The part of `accumulated` past the first `shown` bytes. Falls back to the
/// whole text if `shown` is not a valid prefix length.
fn unseen_suffix(accumulated: &str, shown: usize) -> &str {
    accumulated.get(shown..).unwrap_or(accumulated)
}

/// Simple text wrapping function.
fn textwrap(text: &str, width: usize) -> String {
    let mut result = String::new();

    for (i, paragraph) in text.lines().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        let mut current_line_len = 0;
        for word in paragraph.split_whitespace() {
            if current_line_len + word.len() + 1 > width && current_line_len > 0 {
                result.push('\n');
                current_line_len = 0;
            }
            if current_line_len > 0 {
                result.push(' ');
                current_line_len += 1;
            }
            result.push_str(word);
            current_line_len += word.len();
        }
    }

    result
}
