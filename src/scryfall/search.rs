use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::error::FetchError;
use crate::scryfall::{SearchCard, SearchPage};
use crate::utils::http::get_user_agent;

pub struct ScryfallApi;

impl ScryfallApi {
    fn search_url() -> &'static str {
        "https://api.scryfall.com/cards/search"
    }
}

// Courtesy delay between page requests to keep the API gods happy
const PAGE_DELAY: Duration = Duration::from_millis(500);

/// Fetch every card of a token set. Token sets use the parent set's code
/// with a `t` prefix, so "mh3" searches `s:tmh3`.
pub async fn fetch_token_set(set_code: &str) -> Result<Vec<SearchCard>, FetchError> {
    let client = reqwest::Client::new();
    let query = format!("s:t{}", set_code.to_lowercase());

    let mut cards = Vec::new();
    let mut next_page: Option<String> = None;
    let mut page = 1;
    let mut progress: Option<ProgressBar> = None;

    loop {
        let request = match &next_page {
            Some(url) => client.get(url),
            None => client
                .get(ScryfallApi::search_url())
                .query(&[("q", query.as_str())]),
        };

        debug!("requesting page {}", page);
        let response = request
            .header("User-Agent", get_user_agent())
            .send()
            .await?;

        let result: SearchPage = response.json().await?;

        if result.object == "error" {
            return Err(FetchError::Api {
                details: result
                    .details
                    .unwrap_or_else(|| format!("error occurred downloading page {}", page)),
            });
        }

        let bar = progress.get_or_insert_with(|| {
            let bar = ProgressBar::new(result.total_cards.unwrap_or(0));
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                    )
                    .unwrap()
                    .progress_chars("#>-"),
            );
            bar
        });
        bar.inc(result.data.len() as u64);

        cards.extend(result.data);

        if !result.has_more {
            break;
        }
        next_page = result.next_page;
        if next_page.is_none() {
            break;
        }
        page += 1;

        tokio::time::sleep(PAGE_DELAY).await;
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    Ok(cards)
}
