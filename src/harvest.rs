//! Name → link tables from wiki pages.
//!
//! Quest listings and quest pages share one layout: a section heading whose
//! anchor carries an id, followed by a table whose first column links to
//! the detail page of each entry.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::html::element_by_id;

static FIRST_COLUMN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table tr td:nth-of-type(1)").unwrap());

static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HarvestError {
    #[error("section '{0}' not found")]
    SectionNotFound(String),

    #[error("no table follows section '{0}'")]
    TableNotFound(String),
}

/// Names mapped to absolute URLs, in the order the page lists them.
///
/// Inserting a name that is already present replaces its URL but keeps the
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMap {
    entries: Vec<(String, Url)>,
}

impl LinkMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: String, url: Url) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = url,
            None => self.entries.push((name, url)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Url> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, url)| url)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Url)> {
        self.entries.iter().map(|(name, url)| (name.as_str(), url))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse `html` and harvest the table after `section_label`.
pub fn harvest_html(html: &str, section_label: &str, base_url: &Url) -> Result<LinkMap, HarvestError> {
    let document = Html::parse_document(html);
    harvest(&document, section_label, base_url)
}

/// First-column links of the table following the section anchored at
/// `section_label`, resolved against `base_url`.
///
/// The table is the next element after the anchor's parent (the heading).
/// First-column cells without a usable link are skipped.
#[instrument(skip(document, base_url))]
pub fn harvest(document: &Html, section_label: &str, base_url: &Url) -> Result<LinkMap, HarvestError> {
    let marker = element_by_id(document, section_label)
        .ok_or_else(|| HarvestError::SectionNotFound(section_label.to_string()))?;

    let table = marker
        .parent()
        .and_then(|heading| heading.next_siblings().find_map(ElementRef::wrap))
        .ok_or_else(|| HarvestError::TableNotFound(section_label.to_string()))?;

    let mut links = LinkMap::new();
    for cell in table.select(&FIRST_COLUMN) {
        match cell_link(cell, base_url) {
            Some((name, url)) => links.insert(name, url),
            None => {
                let text = cell.text().collect::<String>();
                debug!(cell = text.trim(), "skipping first-column cell without a usable link");
            }
        }
    }

    debug!(entries = links.len(), "harvested links");
    Ok(links)
}

/// Name and resolved target of the first link in a cell.
///
/// The name is the link's `title`, or its text when there is no title.
fn cell_link(cell: ElementRef<'_>, base_url: &Url) -> Option<(String, Url)> {
    let link = cell.select(&LINK).next()?;
    let href = link.value().attr("href")?;

    let name = link
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| link.text().collect::<String>().trim().to_string());
    if name.is_empty() {
        return None;
    }

    let url = base_url.join(href).ok()?;
    Some((name, url))
}
