//! Interactive prompt: one quest name per line until the user quits.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::config::{Config, ConfigError};
use crate::fetcher::PageSource;
use crate::lookup::MonsterLookup;

const QUIT_TOKENS: [&str; 3] = ["q", "quit", "exit"];

pub fn is_quit(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    QUIT_TOKENS.contains(&input.as_str())
}

/// Read quest names from `input` and print their monster tables to `output`.
///
/// `load_config` runs before every lookup so configuration edits apply to the
/// next query. A configuration failure ends the loop; a failed lookup only
/// ends that query.
pub async fn run<R, W, S, F>(
    input: R,
    output: &mut W,
    source: &S,
    mut load_config: F,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: PageSource,
    F: FnMut() -> Result<Config, ConfigError>,
{
    let mut lines = input.lines();
    writeln!(output, "Starting.")?;

    loop {
        writeln!(output, "\nPlease enter a quest name. Enter 'quit' to leave.")?;
        write!(output, "Quest Name: ")?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            break;
        };
        let query = line.trim();
        if is_quit(query) {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let config = match load_config() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "configuration unavailable");
                writeln!(output, "{err}")?;
                break;
            }
        };

        info!(query, "looking up quest");
        let lookup = MonsterLookup::new(config, source);
        let result = match lookup.match_quest(query).await {
            Ok(found) => {
                writeln!(output, "The closest matching quest was: {}.", found.quest)?;
                output.flush()?;
                lookup.tabulate(&found).await
            }
            Err(err) => Err(err),
        };
        match result {
            Ok(table) => write!(output, "{table}")?,
            Err(err) => {
                warn!(error = %err, "lookup failed");
                writeln!(output, "Lookup failed: {err}")?;
                if err.is_transient() {
                    writeln!(output, "The wiki may be temporarily unavailable; try again shortly.")?;
                }
            }
        }
    }

    writeln!(output, "Ending.")?;
    Ok(())
}
