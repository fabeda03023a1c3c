pub mod alignment;
pub mod content;
pub mod record;

#[cfg(test)]
mod tests;

pub use alignment::{Alignment, goodness, lawfulness, split_alignment};
pub use content::{ContentError, content_text};
pub use record::{FieldRecord, extract};

/// Field record for a monster page: the content section's text run through
/// the keyword extractor.
pub fn monster_record<S: AsRef<str>>(
    html: &str,
    content_section: &str,
    keywords: &[S],
) -> Result<FieldRecord, ContentError> {
    let text = content_text(html, content_section)?;
    Ok(extract(&text, keywords))
}
