use anyhow::{anyhow, Result};
use std::io::{BufRead, Write};

use crate::convention::CATALOG;

/// What the user wants after seeing the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based index into the candidate list.
    Pick(usize),
    More,
    Quit,
}

impl Choice {
    /// Parse a 1-based number, `m`/`more` or `q`/`quit`.
    pub fn from_input(input: &str, candidates: usize) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "m" | "more" => Some(Choice::More),
            "q" | "quit" | "" => Some(Choice::Quit),
            n => n
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=candidates).contains(n))
                .map(|n| Choice::Pick(n - 1)),
        }
    }
}

/// Non-empty, trimmed candidate lines from a model reply.
pub fn split_candidates(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render earlier candidates as `* a, * b` for the "not duplicates of" part of the prompt.
pub fn previous_suggestions(seed: Option<&str>, seen: &[String]) -> Option<String> {
    let listed = seen
        .iter()
        .map(|s| format!("* {s}"))
        .collect::<Vec<_>>()
        .join(", ");

    match (seed.filter(|s| !s.is_empty()), listed.is_empty()) {
        (None, true) => None,
        (Some(seed), true) => Some(seed.to_string()),
        (None, false) => Some(listed),
        (Some(seed), false) => Some(format!("{seed}, {listed}")),
    }
}

/// Print `prompt` and read one trimmed line. End of input reads as an empty line.
pub fn prompt_input<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut buf = String::new();
    input.read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

/// Show the candidates and read a valid [`Choice`].
pub fn ask_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    candidates: &[String],
) -> Result<Choice> {
    writeln!(out)?;
    for (idx, candidate) in candidates.iter().enumerate() {
        writeln!(out, "  {}) {}", idx + 1, candidate)?;
    }
    writeln!(out, "  m) fetch more")?;
    writeln!(out, "  q) quit")?;

    loop {
        let answer = prompt_input(input, out, "Select a commit message: ")?;
        if let Some(choice) = Choice::from_input(&answer, candidates.len()) {
            return Ok(choice);
        }
        writeln!(out, "Invalid choice. Enter 1-{}, m, or q.", candidates.len())?;
    }
}

/// Ask for one of the known conventions or a free-text one.
pub fn ask_convention<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    writeln!(out, "Select a commit convention:")?;
    for (idx, (name, _)) in CATALOG.iter().enumerate() {
        writeln!(out, "  {}) {}", idx + 1, name)?;
    }
    let other = CATALOG.len() + 1;
    writeln!(out, "  {other}) Other")?;

    loop {
        let answer = prompt_input(input, out, &format!("Enter choice [1-{other}]: "))?;
        match answer.parse::<usize>() {
            Ok(n) if (1..other).contains(&n) => return Ok(CATALOG[n - 1].0.to_string()),
            Ok(n) if n == other => break,
            _ if answer.is_empty() => return Err(anyhow!("no convention selected")),
            _ => writeln!(out, "Invalid choice.")?,
        }
    }

    loop {
        let custom = prompt_input(input, out, "Describe your commit convention: ")?;
        if !custom.is_empty() {
            return Ok(custom);
        }
        writeln!(out, "Convention cannot be empty.")?;
    }
}
