use std::fs;

use crate::extractor::{ContentError, content_text, goodness, lawfulness, monster_record};

const CONTENT: &str = "mw-content-text";
const KEYWORDS: [&str; 4] = ["Race", "Type", "Subtype", "Alignment"];

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_infobox_fields() {
    let record = monster_record(&fixture("hobgoblin.html"), CONTENT, &KEYWORDS).unwrap();

    assert_eq!(record["Race"], "Hobgoblin");
    assert_eq!(record["Type"], "Humanoid");
    assert_eq!(record["Subtype"], "Goblinoid");
    assert_eq!(record["Alignment"], "Lawful Evil");
}

#[test]
fn test_text_outside_content_section_is_ignored() {
    let text = content_text(&fixture("hobgoblin.html"), CONTENT).unwrap();

    assert!(!text.contains("Navigation"));
    assert!(!text.contains("wgPageName"));
    assert!(text.contains("raiding parties"));
}

#[test]
fn test_later_prose_does_not_override_infobox() {
    let record = monster_record(&fixture("hobgoblin.html"), CONTENT, &["Race"]).unwrap();
    // "Race relations ..." also starts with the keyword but comes later
    assert_eq!(record["Race"], "Hobgoblin");
}

#[test]
fn test_sparse_page_degrades_to_empty_fields() {
    let record = monster_record(&fixture("sparse.html"), CONTENT, &KEYWORDS).unwrap();

    assert_eq!(record.len(), KEYWORDS.len());
    assert_eq!(record["Race"], "");
    assert_eq!(record["Type"], "");
    // the value sits on the next line, which carries no keyword
    assert_eq!(record["Alignment"], "");
}

#[test]
fn test_wrong_content_section_is_reported() {
    let err = monster_record(&fixture("hobgoblin.html"), "bodyContent", &KEYWORDS).unwrap_err();
    assert_eq!(err, ContentError::SectionMissing("bodyContent".to_string()));
}

#[test]
fn test_alignment_column_decomposes() {
    let pages = ["hobgoblin.html", "sparse.html"];
    let alignments: Vec<String> = pages
        .iter()
        .map(|page| monster_record(&fixture(page), CONTENT, &KEYWORDS).unwrap()["Alignment"].clone())
        .collect();

    assert_eq!(lawfulness(&alignments), ["Lawful", ""]);
    assert_eq!(goodness(&alignments), ["Evil", ""]);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use crate::extractor::{extract, split_alignment};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_has_one_entry_per_keyword(
            text in "(?s).{0,400}",
            keywords in proptest::collection::hash_set("[A-Za-z ]{1,12}", 0..6),
        ) {
            let keywords: Vec<String> = keywords.into_iter().collect();
            let record = extract(&text, &keywords);
            prop_assert_eq!(record.len(), keywords.len());
            for keyword in &keywords {
                let value = &record[keyword];
                prop_assert!(!value.contains(':'));
                prop_assert_eq!(value.trim(), value.as_str());
            }
        }

        #[test]
        fn test_split_alignment_never_panics(value in ".{0,60}") {
            let split = split_alignment(&value);
            prop_assert!(!split.lawfulness.contains(' '));
            prop_assert!(!split.goodness.contains(' '));
        }
    }
}
