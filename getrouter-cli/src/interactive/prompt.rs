//! Prompts. Every method returns `None` when the user cancels.

use std::io::{self, BufRead, IsTerminal, Write};

use super::fuzzy::{rank_fuzzy_choices, FuzzyChoice, DEFAULT_LIMIT};

/// Source of interactive answers.
pub trait Prompter {
    /// Whether a user is there to answer.
    fn is_interactive(&self) -> bool;

    /// Picks one of `items`; returns its index.
    fn select(&mut self, message: &str, items: &[String]) -> Option<usize>;

    /// Searches `choices` and picks one; returns its index.
    fn fuzzy_select(&mut self, message: &str, choices: &[FuzzyChoice]) -> Option<usize>;

    /// Free text, pre-filled with `initial`.
    fn text(&mut self, message: &str, initial: &str) -> Option<String>;

    /// Yes/no question.
    fn confirm(&mut self, message: &str, default: bool) -> Option<bool>;
}

// ============================================================================
// Terminal
// ============================================================================

/// Line-based prompts on stdin/stdout.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// Creates a terminal prompter.
    pub fn new() -> Self {
        Self
    }

    /// Prints `prompt` and reads one trimmed line; `None` on EOF or error.
    fn read_line(prompt: &str) -> Option<String> {
        print!("{prompt}");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Reads a 1-based choice among `count` entries. Empty input picks the
    /// first, `q` cancels.
    fn read_choice(count: usize) -> Option<Option<usize>> {
        let answer = Self::read_line("Select [1]: ")?;
        if answer.eq_ignore_ascii_case("q") {
            return None;
        }
        if answer.is_empty() {
            return Some(Some(0));
        }
        Some(
            answer
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=count).contains(n))
                .map(|n| n - 1),
        )
    }
}

impl Prompter for TerminalPrompter {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn select(&mut self, message: &str, items: &[String]) -> Option<usize> {
        loop {
            println!("{message}");
            for (n, item) in items.iter().enumerate() {
                println!("  {}) {item}", n + 1);
            }
            match Self::read_choice(items.len())? {
                Some(index) => return Some(index),
                None => println!("Invalid selection."),
            }
        }
    }

    fn fuzzy_select(&mut self, message: &str, choices: &[FuzzyChoice]) -> Option<usize> {
        println!("{message}");
        loop {
            let query = Self::read_line("Search (Enter for all, q to cancel): ")?;
            if query.eq_ignore_ascii_case("q") {
                return None;
            }
            let ranked = rank_fuzzy_choices(choices, &query, DEFAULT_LIMIT);
            if ranked.is_empty() {
                println!("No matches.");
                continue;
            }
            for (n, &index) in ranked.iter().enumerate() {
                let choice = &choices[index];
                match &choice.description {
                    Some(description) => println!("  {}) {} - {description}", n + 1, choice.title),
                    None => println!("  {}) {}", n + 1, choice.title),
                }
            }
            match Self::read_choice(ranked.len())? {
                Some(n) => return Some(ranked[n]),
                None => println!("Invalid selection."),
            }
        }
    }

    fn text(&mut self, message: &str, initial: &str) -> Option<String> {
        let prompt = if initial.is_empty() {
            format!("{message}: ")
        } else {
            format!("{message} [{initial}]: ")
        };
        let answer = Self::read_line(&prompt)?;
        Some(if answer.is_empty() { initial.to_string() } else { answer })
    }

    fn confirm(&mut self, message: &str, default: bool) -> Option<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        let answer = Self::read_line(&format!("{message} ({hint}) "))?;
        match answer.to_ascii_lowercase().as_str() {
            "" => Some(default),
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => Some(default),
        }
    }
}

// ============================================================================
// Scripted (tests)
// ============================================================================

/// One prepared answer for [`ScriptedPrompter`].
#[cfg(test)]
#[derive(Debug, Clone)]
pub enum Answer {
    /// Index for `select`.
    Select(usize),
    /// Query for `fuzzy_select`; the best match is taken.
    Search(String),
    /// Reply for `text`.
    Text(String),
    /// Reply for `confirm`.
    Confirm(bool),
    /// Cancel whatever is asked.
    Cancel,
}

/// Replays prepared answers in order and records the prompts it saw.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<Answer>,
    /// Messages of the prompts asked so far.
    pub asked: Vec<String>,
    /// Reported by `is_interactive`.
    pub interactive: bool,
}

#[cfg(test)]
impl ScriptedPrompter {
    /// Interactive prompter answering with `answers`.
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
            interactive: true,
        }
    }

    /// Prompter that reports no terminal.
    pub fn non_interactive() -> Self {
        Self::default()
    }

    fn next(&mut self, message: &str) -> Answer {
        self.asked.push(message.to_string());
        self.answers.pop_front().unwrap_or(Answer::Cancel)
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn select(&mut self, message: &str, items: &[String]) -> Option<usize> {
        match self.next(message) {
            Answer::Select(index) if index < items.len() => Some(index),
            _ => None,
        }
    }

    fn fuzzy_select(&mut self, message: &str, choices: &[FuzzyChoice]) -> Option<usize> {
        match self.next(message) {
            Answer::Search(query) => rank_fuzzy_choices(choices, &query, DEFAULT_LIMIT)
                .first()
                .copied(),
            _ => None,
        }
    }

    fn text(&mut self, message: &str, _initial: &str) -> Option<String> {
        match self.next(message) {
            Answer::Text(text) => Some(text),
            _ => None,
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Option<bool> {
        match self.next(message) {
            Answer::Confirm(value) => Some(value),
            _ => None,
        }
    }
}
