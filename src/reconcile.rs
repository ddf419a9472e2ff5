//! Pure diff between the fetched token set and the current database. No
//! fuzzy matching and no related-card resolution; a token with reworded
//! reminder text is a new token.

use crate::cockatrice::CardFields;
use crate::scryfall::TokenRecord;

/// A fetched token that matched at least one existing entry, with the
/// positions of every entry it matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Reprint {
    pub record: TokenRecord,
    pub matches: Vec<usize>,
}

/// Result of diffing one fetched set against the database. Both sides
/// preserve fetch order.
#[derive(Debug, Default)]
pub struct Partition {
    pub reprints: Vec<Reprint>,
    pub new_tokens: Vec<TokenRecord>,
}

/// Database names may carry a trailing ` Token` or disambiguating spaces,
/// so the name comparison is a prefix check; everything else is exact.
fn matches(card: &CardFields, record: &TokenRecord) -> bool {
    card.name.starts_with(&record.name)
        && card.text == record.text
        && card.type_line == record.type_line
        && card.colors == record.colors
        && card.pt == record.pt
}

/// Partition fetched records into reprints and new tokens.
pub fn partition(cards: &[CardFields], fetched: &[TokenRecord]) -> Partition {
    let mut result = Partition::default();

    for record in fetched {
        let matched: Vec<usize> = cards
            .iter()
            .enumerate()
            .filter(|(_, card)| matches(card, record))
            .map(|(index, _)| index)
            .collect();

        if matched.is_empty() {
            result.new_tokens.push(record.clone());
        } else {
            result.reprints.push(Reprint {
                record: record.clone(),
                matches: matched,
            });
        }
    }

    result
}
