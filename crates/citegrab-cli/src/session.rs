//! The interactive prompt loop.
//!
//! Each pass reads a query, searches arXiv, lists every result and harvests it. A failure
//! anywhere in a pass is shown to the user and logged, then the loop asks for the next
//! query. Typing `exit` (any case) or closing stdin ends the loop.

use citegrab::{arxiv::SearchQuery, format};
use tracing::{error, info};

use super::*;

/// Text of the query prompt.
pub static QUERY_PROMPT: &str = "Enter a search term (or 'exit' to quit)";

/// Runs the loop until the user exits.
///
/// Only a failure to read input or write output ends the loop early.
pub async fn run<I: UserInteraction>(
  interaction: &mut I,
  harvester: &Harvester,
  config: &Config,
) -> Result<()> {
  loop {
    let Some(input) = interaction.prompt(QUERY_PROMPT)? else {
      break;
    };

    let query = input.trim();
    if query.eq_ignore_ascii_case("exit") {
      break;
    }
    if query.is_empty() {
      interaction.reply(ResponseContent::Info("Please enter a search term."))?;
      continue;
    }

    if let Err(e) = search_and_harvest(interaction, harvester, config, query).await {
      if matches!(e, CliError::Io(_)) {
        return Err(e);
      }
      error!("Query {query:?} failed: {e}");
      interaction.reply(ResponseContent::Error(&e))?;
    }
  }

  interaction.reply(ResponseContent::Info("Exiting the program."))
}

/// One pass of the loop: search for `query` and harvest every result.
async fn search_and_harvest<I: UserInteraction>(
  interaction: &mut I,
  harvester: &Harvester,
  config: &Config,
  query: &str,
) -> Result<()> {
  let max_results = if config.prompt_for_count {
    read_count(interaction, config.max_results)?
  } else {
    config.max_results
  };

  info!("Searching arXiv for {query:?} (max {max_results} results)");
  let results =
    harvester.client().search(&SearchQuery::new(query).with_max_results(max_results)).await?;

  if results.is_empty() {
    return interaction.reply(ResponseContent::Info("No results found."));
  }

  for (index, paper) in results.iter().enumerate() {
    interaction.reply(ResponseContent::Paper {
      index: index + 1,
      paper,
      summary_len: config.summary_preview_len,
    })?;

    let mut replied = Ok(());
    harvester
      .harvest(paper, &format::timestamp(), |event| {
        if replied.is_ok() {
          replied = interaction.reply(ResponseContent::Harvest(&event));
        }
      })
      .await?;
    replied?;
  }

  Ok(())
}

/// Asks how many results to fetch. A blank answer or closed input keeps `default`.
fn read_count<I: UserInteraction>(interaction: &mut I, default: usize) -> Result<usize> {
  let Some(input) =
    interaction.prompt(&format!("How many results would you like? (default {default})"))?
  else {
    return Ok(default);
  };

  let input = input.trim();
  if input.is_empty() {
    return Ok(default);
  }
  match input.parse::<usize>() {
    Ok(count) if count > 0 => Ok(count),
    _ => Err(CliError::InvalidCount(input.to_string())),
  }
}
