use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static WITH_ID: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[id]").unwrap());

/// First element in document order whose `id` attribute equals `id` exactly.
pub fn element_by_id<'a>(document: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    document
        .select(&WITH_ID)
        .find(|element| element.value().id() == Some(id))
}
