//! Quest name in, sorted monster table out.

pub mod errors;

pub use errors::LookupError;

use tracing::{debug, info, instrument};
use url::Url;

use crate::config::Config;
use crate::extractor::{Alignment, FieldRecord, goodness, lawfulness, monster_record};
use crate::fetcher::PageSource;
use crate::harvest::{LinkMap, harvest_html};
use crate::matcher::{MatchError, closest_match};
use crate::table::{ALIGNMENT, MonsterRow, OutputTable, TableSchema};

/// A query resolved to one quest of the configured level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestMatch {
    pub quest: String,
    pub quest_url: Url,
}

/// Result of one lookup: which quest the query resolved to and its monsters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestMonsters {
    pub quest: String,
    pub quest_url: Url,
    pub table: OutputTable,
}

/// Runs lookups against one configuration and page source.
///
/// Built fresh for every query; nothing is cached between lookups.
pub struct MonsterLookup<S> {
    config: Config,
    schema: TableSchema,
    source: S,
}

impl<S: PageSource> MonsterLookup<S> {
    pub fn new(config: Config, source: S) -> Self {
        let schema = TableSchema::from_keywords(config.columns());
        Self {
            config,
            schema,
            source,
        }
    }

    /// Resolve `quest_query` to the closest listed quest and tabulate the
    /// monsters on its page.
    ///
    /// Pages are fetched one after another; the first failure aborts the
    /// whole lookup.
    #[instrument(skip(self))]
    pub async fn resolve_quest_monsters(&self, quest_query: &str) -> Result<QuestMonsters, LookupError> {
        let found = self.match_quest(quest_query).await?;
        let table = self.tabulate(&found).await?;
        Ok(QuestMonsters {
            quest: found.quest,
            quest_url: found.quest_url,
            table,
        })
    }

    /// Fetch the level listing and pick the quest closest to `quest_query`.
    #[instrument(skip(self))]
    pub async fn match_quest(&self, quest_query: &str) -> Result<QuestMatch, LookupError> {
        let quests = self.quest_links().await?;
        let (quest, quest_url) = self.closest_quest(quest_query, &quests)?;
        info!(quest = %quest, url = %quest_url, "The closest matching quest was: {quest}.");
        Ok(QuestMatch { quest, quest_url })
    }

    /// Fetch every monster listed on the quest page and build the sorted table.
    #[instrument(skip_all, fields(quest = %found.quest))]
    pub async fn tabulate(&self, found: &QuestMatch) -> Result<OutputTable, LookupError> {
        let monsters = self
            .links_on(&found.quest_url, self.config.monster_section())
            .await?;
        debug!(count = monsters.len(), "monsters listed for quest");

        let mut names = Vec::with_capacity(monsters.len());
        let mut records = Vec::with_capacity(monsters.len());
        for (name, url) in monsters.iter() {
            records.push(self.monster(url).await?);
            names.push(name.to_string());
        }

        Ok(OutputTable::new(self.schema.clone(), self.rows(names, records)))
    }

    async fn quest_links(&self) -> Result<LinkMap, LookupError> {
        self.links_on(self.config.quest_listing_url(), self.config.level())
            .await
    }

    fn closest_quest(&self, query: &str, quests: &LinkMap) -> Result<(String, Url), LookupError> {
        let no_quests = |source| LookupError::NoQuests {
            level: self.config.level().to_string(),
            source,
        };

        let quest = closest_match(query, &quests.names()).map_err(no_quests)?;
        let url = quests
            .get(&quest)
            .cloned()
            .ok_or_else(|| no_quests(MatchError::NoCandidates))?;
        Ok((quest, url))
    }

    async fn links_on(&self, url: &Url, section: &str) -> Result<LinkMap, LookupError> {
        let html = self.fetch(url).await?;
        harvest_html(&html, section, self.config.base_url()).map_err(|source| LookupError::Layout {
            url: url.clone(),
            source,
        })
    }

    #[instrument(skip_all, fields(url = %url))]
    async fn monster(&self, url: &Url) -> Result<FieldRecord, LookupError> {
        let html = self.fetch(url).await?;
        monster_record(&html, self.config.content_section(), self.config.columns()).map_err(
            |source| LookupError::Content {
                url: url.clone(),
                source,
            },
        )
    }

    async fn fetch(&self, url: &Url) -> Result<String, LookupError> {
        self.source
            .fetch_page(url)
            .await
            .map_err(|source| LookupError::Fetch {
                url: url.clone(),
                source,
            })
    }

    /// One row per monster, with the alignment column split into its axes.
    fn rows(&self, names: Vec<String>, records: Vec<FieldRecord>) -> Vec<MonsterRow> {
        let alignments: Vec<&str> = records
            .iter()
            .map(|record| record.get(ALIGNMENT).map(String::as_str).unwrap_or_default())
            .collect();
        let mut laws = lawfulness(&alignments).into_iter();
        let mut goods = goodness(&alignments).into_iter();

        names
            .into_iter()
            .zip(&records)
            .map(|(name, record)| {
                let alignment = self.schema.has_alignment().then(|| Alignment {
                    lawfulness: laws.next().unwrap_or_default(),
                    goodness: goods.next().unwrap_or_default(),
                });
                MonsterRow::from_record(name, record, &self.schema, alignment)
            })
            .collect()
    }
}
