use std::collections::HashMap;

/// One value per configured keyword; a keyword with no matching line maps to `""`.
pub type FieldRecord = HashMap<String, String>;

/// Decoration the wiki appends to linked attribute values.
const LIST_MARKER: &str = "(List)";

/// Pull one value per keyword out of free text.
///
/// The text is split into trimmed, non-empty lines and only lines starting
/// with some keyword are kept. Each keyword then takes the first kept line
/// starting with it, minus the keyword, colons, and `(List)` markers.
pub fn extract<S: AsRef<str>>(text: &str, keywords: &[S]) -> FieldRecord {
    let lines = keyword_lines(text, keywords);

    keywords
        .iter()
        .map(|keyword| {
            let keyword = keyword.as_ref();
            let value = first_line_for(&lines, keyword)
                .map(|line| clean_value(line, keyword))
                .unwrap_or_default();
            (keyword.to_string(), value)
        })
        .collect()
}

/// Trimmed, non-empty lines that start with any of the keywords.
fn keyword_lines<'t, S: AsRef<str>>(text: &'t str, keywords: &[S]) -> Vec<&'t str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| keywords.iter().any(|k| line.starts_with(k.as_ref())))
        .collect()
}

/// First line that starts with `keyword`.
///
/// This is a plain prefix test: with keywords `Race` and `Race Bonus`, a
/// `Race Bonus: ...` line listed before the `Race: ...` line is what `Race`
/// picks up.
fn first_line_for<'l>(lines: &[&'l str], keyword: &str) -> Option<&'l str> {
    lines.iter().copied().find(|line| line.starts_with(keyword))
}

fn clean_value(line: &str, keyword: &str) -> String {
    line.replacen(keyword, "", 1)
        .replace(':', "")
        .replace(LIST_MARKER, "")
        .trim()
        .to_string()
}
