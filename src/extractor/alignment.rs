//! Alignment strings are `[law axis] [good axis]`, e.g. `Chaotic Evil`, with
//! `True Neutral` as the one irregular spelling.

/// The two independent axes of an alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    pub lawfulness: String,
    pub goodness: String,
}

/// Split a single alignment value.
///
/// Empty input yields empty axes. A single word fills both axes. Words after
/// the second are ignored.
pub fn split_alignment(value: &str) -> Alignment {
    if value.is_empty() {
        return Alignment::default();
    }

    let mut value = value.trim();
    if value.eq_ignore_ascii_case("true neutral") {
        value = "Neutral Neutral";
    }

    let mut tokens = value.split(' ');
    let first = tokens.next().unwrap_or_default();
    let second = tokens.next().unwrap_or(first);

    Alignment {
        lawfulness: first.to_string(),
        goodness: second.to_string(),
    }
}

/// Law/chaos part of each alignment, position for position.
pub fn lawfulness<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|v| split_alignment(v.as_ref()).lawfulness)
        .collect()
}

/// Good/evil part of each alignment, position for position.
pub fn goodness<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|v| split_alignment(v.as_ref()).goodness)
        .collect()
}
