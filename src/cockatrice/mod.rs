//! The Cockatrice side of the pipeline: loading the current token
//! database, pulling out the fields tokens are matched on, and writing the
//! two output files.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::error::{Error, ParseError};

pub mod entry;
pub mod xmltree;

use xmltree::{Element, Node};

/// Comparable fields of one database entry, unified to the same shapes the
/// Scryfall records use: absent elements read as empty strings and color
/// letters are sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct CardFields {
    pub name: String,
    pub text: String,
    pub type_line: String,
    pub colors: String,
    pub pt: String,
}

/// An in-memory Cockatrice token database. The source file is never
/// written back; updates go to a separate copy.
pub struct TokenDatabase {
    root: Element,
}

impl TokenDatabase {
    /// Read and parse a database file.
    pub fn load(path: &Path) -> Result<Self, ParseError> {
        let contents = fs::read_to_string(path).map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse database XML. The path only feeds error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ParseError> {
        let root = xmltree::parse(contents)
            .map_err(|source| ParseError::Xml {
                path: path.to_path_buf(),
                source,
            })?
            .ok_or_else(|| ParseError::MissingCards {
                path: path.to_path_buf(),
            })?;

        if root.child("cards").is_none() {
            return Err(ParseError::MissingCards {
                path: path.to_path_buf(),
            });
        }

        let database = TokenDatabase { root };
        debug!("loaded {} entries from {}", database.cards().count(), path.display());
        Ok(database)
    }

    fn cards(&self) -> impl Iterator<Item = &Element> {
        self.root
            .child("cards")
            .into_iter()
            .flat_map(|cards| cards.child_elements("card"))
    }

    /// The comparable fields of every entry, in document order.
    pub fn card_fields(&self) -> Vec<CardFields> {
        self.cards()
            .map(|card| {
                let prop = card.child("prop");

                let mut colors: Vec<char> = prop
                    .map(|prop| prop.child_text("colors"))
                    .unwrap_or_default()
                    .chars()
                    .collect();
                colors.sort_unstable();

                CardFields {
                    name: card.child_text("name"),
                    text: card.child_text("text"),
                    type_line: prop.map(|prop| prop.child_text("type")).unwrap_or_default(),
                    colors: colors.into_iter().collect(),
                    pt: prop.map(|prop| prop.child_text("pt")).unwrap_or_default(),
                }
            })
            .collect()
    }

    /// Insert a new set line into the entry at `index` (position within the
    /// card list), directly after its `prop` block so the new printing
    /// lands ahead of the older ones.
    pub fn insert_set_line(&mut self, index: usize, set_line: Element) {
        let Some(cards) = self.root.child_mut("cards") else {
            return;
        };

        let mut seen = 0;
        for node in cards.children.iter_mut() {
            if let Node::Element(card) = node {
                if card.name == "card" {
                    if seen == index {
                        card.insert_after("prop", set_line);
                        return;
                    }
                    seen += 1;
                }
            }
        }
    }

    /// Write the updated database copy.
    pub fn write(&self, path: &Path) -> Result<(), Error> {
        write_document(&self.root, path)
    }

    #[cfg(test)]
    fn card_at(&self, index: usize) -> &Element {
        self.cards().nth(index).unwrap()
    }
}

/// Wrap new-token entries in the `newtokens` document the manual review
/// workflow expects and write it, even when there are none.
pub fn write_new_tokens(entries: Vec<Element>, path: &Path) -> Result<(), Error> {
    let mut cards = Element::new("cards");
    for entry in entries {
        cards.push(entry);
    }

    let mut root = Element::new("newtokens");
    root.push(cards);
    write_document(&root, path)
}

fn write_document(root: &Element, path: &Path) -> Result<(), Error> {
    let xml = xmltree::to_xml(root).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::Other, e.to_string()),
    })?;

    fs::write(path, xml).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn sample_database() -> TokenDatabase {
    let source = r#"<?xml version="1.0" encoding="UTF-8"?>
        <cockatrice_carddatabase version="3">
            <cards>
                <card>
                    <name>Goblin</name>
                    <prop>
                        <colors>R</colors>
                        <type>Token Creature — Goblin</type>
                        <maintype>Creature</maintype>
                        <cmc>0</cmc>
                        <pt>1/1</pt>
                    </prop>
                    <set picURL="https://example.com/goblin-dmu.jpg">DMU</set>
                    <reverse-related>Some Goblin Maker</reverse-related>
                    <token>1</token>
                    <tablerow>2</tablerow>
                </card>
                <card>
                    <name>Clue</name>
                    <text>{2}, Sacrifice this artifact: Draw a card.</text>
                    <prop>
                        <type>Token Artifact — Clue</type>
                        <maintype>Artifact</maintype>
                        <cmc>0</cmc>
                    </prop>
                    <set picURL="https://example.com/clue-mkm.jpg">MKM</set>
                    <token>1</token>
                    <tablerow>1</tablerow>
                </card>
            </cards>
        </cockatrice_carddatabase>"#;

    TokenDatabase::parse(source, Path::new("tokens.xml")).unwrap()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn card_fields_unify_absent_elements_to_empty() {
        let database = sample_database();
        let fields = database.card_fields();

        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields[0],
            CardFields {
                name: "Goblin".to_owned(),
                text: String::new(),
                type_line: "Token Creature — Goblin".to_owned(),
                colors: "R".to_owned(),
                pt: "1/1".to_owned(),
            }
        );
        assert_eq!(fields[1].colors, "");
        assert_eq!(fields[1].pt, "");
        assert_eq!(
            fields[1].text,
            "{2}, Sacrifice this artifact: Draw a card."
        );
    }

    #[test]
    fn card_fields_sort_color_letters() {
        let source = r#"<cockatrice_carddatabase version="3">
            <cards>
                <card>
                    <name>Spider</name>
                    <prop>
                        <colors>GB</colors>
                        <type>Token Creature — Spider</type>
                    </prop>
                </card>
            </cards>
        </cockatrice_carddatabase>"#;

        let database = TokenDatabase::parse(source, Path::new("tokens.xml")).unwrap();
        assert_eq!(database.card_fields()[0].colors, "BG");
    }

    #[test]
    fn insert_set_line_lands_after_prop() {
        let mut database = sample_database();
        let mut set_line = Element::with_text("set", "MH3");
        set_line.set_attr("picURL", "https://example.com/goblin-mh3.jpg");

        database.insert_set_line(0, set_line);

        let card = database.card_at(0);
        let names: Vec<&str> = card
            .children
            .iter()
            .filter_map(|node| match node {
                Node::Element(element) => Some(element.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "name",
                "prop",
                "set",
                "set",
                "reverse-related",
                "token",
                "tablerow"
            ]
        );

        let sets: Vec<String> = card.child_elements("set").map(|e| e.text()).collect();
        assert_eq!(sets, vec!["MH3".to_owned(), "DMU".to_owned()]);
    }

    #[test]
    fn missing_cards_element_is_a_parse_error() {
        let result = TokenDatabase::parse("<notadatabase/>", Path::new("tokens.xml"));
        assert!(matches!(result, Err(ParseError::MissingCards { .. })));
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let result = TokenDatabase::parse("<cards><card></cards>", Path::new("tokens.xml"));
        assert!(matches!(result, Err(ParseError::Xml { .. })));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TokenDatabase::load(&dir.path().join("missing.xml"));
        assert!(matches!(result, Err(ParseError::Read { .. })));
    }

    #[test]
    fn written_copy_reparses_to_the_same_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token_file_mh3_update.xml");

        let database = sample_database();
        database.write(&path).unwrap();

        let reread = TokenDatabase::load(&path).unwrap();
        assert_eq!(reread.card_fields(), database.card_fields());
    }

    #[test]
    fn update_pipeline_keeps_entries_and_adds_set_lines() {
        use crate::cockatrice::entry;
        use crate::reconcile;
        use crate::scryfall::TokenRecord;

        let mut database = sample_database();
        let fetched = vec![
            TokenRecord {
                name: "Goblin".to_owned(),
                text: String::new(),
                type_line: "Token Creature — Goblin".to_owned(),
                colors: "R".to_owned(),
                pt: "1/1".to_owned(),
                image_url: "https://example.com/goblin-mh3.jpg".to_owned(),
            },
            TokenRecord {
                name: "Zombie".to_owned(),
                text: String::new(),
                type_line: "Token Creature — Zombie".to_owned(),
                colors: "B".to_owned(),
                pt: "2/2".to_owned(),
                image_url: "https://example.com/zombie-mh3.jpg".to_owned(),
            },
        ];

        let partition = reconcile::partition(&database.card_fields(), &fetched);
        assert_eq!(partition.reprints.len(), 1);
        assert_eq!(partition.new_tokens.len(), 1);

        for reprint in &partition.reprints {
            for &index in &reprint.matches {
                database.insert_set_line(index, entry::set_line(&reprint.record, "mh3"));
            }
        }

        // same entries as before, goblin now carrying the new printing first
        assert_eq!(database.card_fields().len(), 2);
        let goblin = database.card_at(0);
        let sets: Vec<String> = goblin.child_elements("set").map(|e| e.text()).collect();
        assert_eq!(sets, vec!["MH3".to_owned(), "DMU".to_owned()]);
        assert_eq!(
            goblin.child("set").unwrap().attrs,
            vec![(
                "picURL".to_owned(),
                "https://example.com/goblin-mh3.jpg".to_owned()
            )]
        );
    }

    #[test]
    fn new_tokens_document_is_written_even_when_empty() {
        let mut root = Element::new("newtokens");
        root.push(Element::new("cards"));
        let xml = xmltree::to_xml(&root).unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<newtokens>\n    <cards/>\n</newtokens>\n"
        );
    }
}
