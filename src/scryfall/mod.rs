use log::{debug, warn};
use serde::Deserialize;

pub mod search;

/// One page of a Scryfall search result. Error responses reuse the same
/// shape with `object == "error"` and a `details` message.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub data: Vec<SearchCard>,
    #[serde(default)]
    pub has_more: bool,
    pub next_page: Option<String>,
    pub details: Option<String>,
    pub total_cards: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ImageUris {
    pub large: String,
}

/// A card as returned by the search endpoint. Double-faced tokens carry
/// their per-face data in `card_faces` instead of the top-level fields.
#[derive(Debug, Deserialize)]
pub struct SearchCard {
    pub name: String,
    #[serde(default)]
    pub layout: String,
    #[serde(default)]
    pub oracle_text: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub colors: Vec<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub image_uris: Option<ImageUris>,
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
}

/// One face of a double-faced token.
#[derive(Debug, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub oracle_text: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub colors: Vec<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub image_uris: Option<ImageUris>,
}

/// The fields the reconciler and the XML writers need from one token,
/// unified to the shapes the database uses for comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRecord {
    /// Token name from Scryfall as written.
    pub name: String,
    pub text: String,
    pub type_line: String,
    /// Color letters sorted alphabetically and joined, e.g. "BG".
    pub colors: String,
    /// "P/T", or empty for tokens without power and toughness.
    pub pt: String,
    /// Large-size image, empty if Scryfall supplied none.
    pub image_url: String,
}

impl TokenRecord {
    fn new(
        name: &str,
        oracle_text: &str,
        type_line: &str,
        colors: &[String],
        power: Option<&str>,
        toughness: Option<&str>,
        image_uris: Option<&ImageUris>,
    ) -> Self {
        let mut letters: Vec<&str> = colors.iter().map(String::as_str).collect();
        letters.sort_unstable();

        let pt = match (power, toughness) {
            (Some(power), Some(toughness)) => format!("{}/{}", power, toughness),
            _ => String::new(),
        };

        let image_url = match image_uris {
            Some(uris) => uris.large.clone(),
            None => {
                warn!("no image uris for {}", name);
                String::new()
            }
        };

        TokenRecord {
            name: name.to_owned(),
            text: oracle_text.to_owned(),
            type_line: type_line.to_owned(),
            colors: letters.concat(),
            pt,
            image_url,
        }
    }
}

/// Flatten fetched cards into token records, one per face for double-faced
/// tokens and one per card for everything else.
pub fn token_records(cards: &[SearchCard]) -> Vec<TokenRecord> {
    let mut records = Vec::new();
    let mut double_faced = 0;

    for card in cards {
        if card.layout == "double_faced_token" {
            double_faced += 1;
            for face in &card.card_faces {
                records.push(TokenRecord::new(
                    &face.name,
                    &face.oracle_text,
                    &face.type_line,
                    &face.colors,
                    face.power.as_deref(),
                    face.toughness.as_deref(),
                    face.image_uris.as_ref(),
                ));
            }
        } else {
            records.push(TokenRecord::new(
                &card.name,
                &card.oracle_text,
                &card.type_line,
                &card.colors,
                card.power.as_deref(),
                card.toughness.as_deref(),
                card.image_uris.as_ref(),
            ));
        }
    }

    debug!(
        "{} double-faced entries among {} fetched cards",
        double_faced,
        cards.len()
    );
    records
}
