//! Fuzzy lookup of an entity by display name.
//!
//! Names are compared with a token-sort ratio: both strings are lower-cased,
//! split on anything that is not alphanumeric, the tokens sorted and joined,
//! and the normalized Levenshtein similarity scaled to 0..=100. A score of
//! [`AUTO_ACCEPT_SCORE`] or more picks the best candidate outright; anything
//! lower is handed to a [`Disambiguator`].

use itertools::Itertools;
use log::{debug, info};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Scores at or above this are accepted without asking.
pub const AUTO_ACCEPT_SCORE: u8 = 95;
/// How many candidates a disambiguator is offered.
pub const TOP_CANDIDATES: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("No candidate names to match '{0}' against")]
    NoCandidates(String),

    #[error("'{query}' is ambiguous and no candidate was chosen")]
    Ambiguous { query: String },

    #[error("Failed to read the selection: {0}")]
    Prompt(String),
}

/// A candidate name and its similarity to the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredName {
    pub name: String,
    pub score: u8,
}

/// Chooses among close candidates when no score is high enough.
pub trait Disambiguator {
    /// Returns the 0-based index of the chosen candidate, or `None` to abort.
    fn choose(
        &mut self,
        query: &str,
        candidates: &[ScoredName],
    ) -> Result<Option<usize>, MatchError>;
}

/// Never chooses. Used for unattended runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortOnAmbiguity;

impl Disambiguator for AbortOnAmbiguity {
    fn choose(&mut self, _: &str, _: &[ScoredName]) -> Result<Option<usize>, MatchError> {
        Ok(None)
    }
}

/// Prints a numbered list and reads the choice from a line of input.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Disambiguator for ConsolePrompt<R, W> {
    fn choose(
        &mut self,
        query: &str,
        candidates: &[ScoredName],
    ) -> Result<Option<usize>, MatchError> {
        let prompt_err = |e: io::Error| MatchError::Prompt(e.to_string());

        writeln!(self.output, "No exact match for '{}'. Closest entities:", query)
            .map_err(prompt_err)?;
        for (i, candidate) in candidates.iter().enumerate() {
            writeln!(self.output, "{}. {} ({})", i + 1, candidate.name, candidate.score)
                .map_err(prompt_err)?;
        }
        write!(self.output, "Select an entity by typing its number: ").map_err(prompt_err)?;
        self.output.flush().map_err(prompt_err)?;

        let mut line = String::new();
        self.input.read_line(&mut line).map_err(prompt_err)?;
        Ok(line
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=candidates.len()).contains(n))
            .map(|n| n - 1))
    }
}

fn sorted_tokens(s: &str) -> String {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .sorted()
        .join(" ")
}

/// Length of the longest common subsequence, in characters.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut row = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            row[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(row[j])
            };
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}

/// Token-sort similarity in `0..=100`: the indel ratio `2·LCS / (len_a + len_b)`
/// of the sorted token strings, rounded half to even.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = sorted_tokens(a).chars().collect();
    let b: Vec<char> = sorted_tokens(b).chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let ratio = (2 * lcs_len(&a, &b)) as f64 / (a.len() + b.len()) as f64;
    (ratio * 100.0).round_ties_even() as u8
}

/// Scores every distinct candidate, best first. Ties keep input order.
pub fn rank<'a, I>(query: &str, candidates: I) -> Vec<ScoredName>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .unique()
        .map(|name| ScoredName {
            name: name.to_string(),
            score: token_sort_ratio(query, name),
        })
        .sorted_by(|a, b| b.score.cmp(&a.score))
        .collect()
}

/// Resolves a user-typed name to one candidate.
pub fn resolve<'a, I>(
    query: &str,
    candidates: I,
    disambiguator: &mut dyn Disambiguator,
) -> Result<String, MatchError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ranked = rank(query, candidates);
    ranked.truncate(TOP_CANDIDATES);

    let best = ranked
        .first()
        .ok_or_else(|| MatchError::NoCandidates(query.to_string()))?;
    debug!("Best matches for '{}': {:?}", query, ranked);

    if best.score >= AUTO_ACCEPT_SCORE {
        info!("'{}' matched '{}' ({})", query, best.name, best.score);
        return Ok(best.name.clone());
    }

    match disambiguator.choose(query, &ranked)? {
        Some(index) if index < ranked.len() => {
            let chosen = ranked.swap_remove(index);
            info!("'{}' resolved to '{}' by selection", query, chosen.name);
            Ok(chosen.name)
        }
        _ => Err(MatchError::Ambiguous {
            query: query.to_string(),
        }),
    }
}
