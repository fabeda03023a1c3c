use thiserror::Error;
use url::Url;

use crate::extractor::ContentError;
use crate::fetcher::FetchError;
use crate::harvest::HarvestError;
use crate::matcher::MatchError;

/// Why a quest lookup was abandoned. Every variant ends the current query
/// only; the console carries on with the next one.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: Url,
        #[source]
        source: FetchError,
    },

    #[error("unexpected page layout at {url}: {source}")]
    Layout {
        url: Url,
        #[source]
        source: HarvestError,
    },

    #[error("monster page {url} is missing its content: {source}")]
    Content {
        url: Url,
        #[source]
        source: ContentError,
    },

    #[error("no quests listed under '{level}': {source}")]
    NoQuests {
        level: String,
        #[source]
        source: MatchError,
    },
}

impl LookupError {
    /// Whether running the same query again might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Fetch { source, .. } => source.should_retry(),
            Self::Layout { .. } | Self::Content { .. } | Self::NoQuests { .. } => false,
        }
    }
}
