//! Approximate name matching.
//!
//! Scores are the Ratcliff/Obershelp "gestalt" ratio: find the longest common
//! substring, recurse into what is left on either side of it, and compare the
//! total matched length against the combined length of both strings. It is
//! forgiving of typos and truncated names, which is what users type at the
//! prompt.

use std::collections::HashMap;

use thiserror::Error;

/// Second strings at least this long get popular characters ignored as match seeds.
const AUTOJUNK_MIN_LEN: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("no candidate names to match against")]
    NoCandidates,
}

/// Similarity ratio in `[0, 1]` between two strings, compared as given.
///
/// Two empty strings are identical and score `1.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = BlockMatcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

/// Pick the candidate most similar to `query`.
///
/// Both sides are trimmed and lowercased before scoring; the original
/// candidate string is returned. Among candidates sharing the top score the
/// last one listed wins.
pub fn closest_match<S: AsRef<str>>(query: &str, candidates: &[S]) -> Result<String, MatchError> {
    best_of(query, candidates.iter().map(|c| Some(c.as_ref())))
}

/// Like [`closest_match`], for candidate lists with holes. A missing entry is
/// scored as the empty string.
pub fn closest_match_opt<S: AsRef<str>>(
    query: &str,
    candidates: &[Option<S>],
) -> Result<String, MatchError> {
    best_of(
        query,
        candidates.iter().map(|c| c.as_ref().map(|s| s.as_ref())),
    )
}

fn best_of<'a>(
    query: &str,
    candidates: impl Iterator<Item = Option<&'a str>>,
) -> Result<String, MatchError> {
    let query = normalize(query);
    let mut best: Option<(f64, &str)> = None;

    for candidate in candidates {
        let candidate = candidate.unwrap_or("");
        let score = similarity(&query, &normalize(candidate));
        if best.is_none_or(|(top, _)| score >= top) {
            best = Some((score, candidate));
        }
    }

    best.map(|(_, name)| name.to_string())
        .ok_or(MatchError::NoCandidates)
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character of `b`, ascending.
    b_index: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &ch) in b.iter().enumerate() {
            b_index.entry(ch).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b_index.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b_index }
    }

    /// Total size of all matching blocks.
    fn matched_len(&self) -> usize {
        let mut matched = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, size) = self.longest_match(alo, ahi, blo, bhi);
            if size == 0 {
                continue;
            }
            matched += size;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                pending.push((i + size, ahi, j + size, bhi));
            }
        }

        matched
    }

    /// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`, returned as
    /// `(start_in_a, start_in_b, len)`. Ties go to the run starting earliest
    /// in `a`, then earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // run length of matches ending at (i - 1, j), keyed by j
        let mut run_ending: HashMap<usize, usize> = HashMap::new();
        for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_run: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b_index.get(ch) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_ending.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            run_ending = next_run;
        }

        // Characters dropped as popular never seed a run but may still extend one.
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}
