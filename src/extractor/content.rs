use scraper::{ElementRef, Html};
use thiserror::Error;

use crate::html::element_by_id;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("page has no element with id '{0}'")]
    SectionMissing(String),
}

const SKIPPED_ELEMENTS: [&str; 2] = ["script", "style"];

/// All text under the element whose id is `section_id`, line breaks kept.
/// Text inside `<script>` and `<style>` is left out.
pub fn content_text(html: &str, section_id: &str) -> Result<String, ContentError> {
    let document = Html::parse_document(html);
    section_text(&document, section_id)
}

pub fn section_text(document: &Html, section_id: &str) -> Result<String, ContentError> {
    element_by_id(document, section_id)
        .map(visible_text)
        .ok_or_else(|| ContentError::SectionMissing(section_id.to_string()))
}

fn visible_text(element: ElementRef) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| SKIPPED_ELEMENTS.contains(&el.value().name()));
            (!hidden).then_some(&**text)
        })
        .collect()
}
