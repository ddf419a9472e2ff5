//! Builders for the XML written for newly fetched printings: the `set`
//! line added to an existing entry and the complete `card` entry for a
//! token the database has never seen.

use crate::scryfall::TokenRecord;

use super::xmltree::Element;

// Scryfall rolls 'State', 'Counter', and 'Companion' into 'Card'; none of
// these bare type lines get a cmc line by Cockatrice convention
const SHORT_TAG_LIST: [&str; 4] = ["Emblem", "Dungeon", "Card", "Token"];

/// A `<set>` line carrying the new printing's set code and image.
pub fn set_line(record: &TokenRecord, set_code: &str) -> Element {
    let mut set = Element::with_text("set", &set_code.to_uppercase());
    set.set_attr("picURL", &record.image_url);
    set
}

/// Maintype for a type line. Creature supersedes Artifact and Enchantment,
/// so the order of checks matters.
fn maintype(type_line: &str) -> Option<&'static str> {
    if type_line.contains("Emblem") {
        Some("Emblem")
    } else if type_line.contains("Dungeon") {
        Some("Dungeon")
    } else if type_line.contains("Creature") {
        Some("Creature")
    } else if type_line.contains("Artifact") {
        Some("Artifact")
    } else if type_line.contains("Enchantment") {
        Some("Enchantment")
    } else {
        None
    }
}

/// Subtype portion of a type line; anything after the emdash. Type lines
/// without one are guaranteed not to need a name suffix.
fn subtype(type_line: &str) -> Option<&str> {
    type_line.split(" — ").nth(1)
}

/// Build a complete database entry for a token with no existing match.
pub fn new_card(record: &TokenRecord, set_code: &str) -> Element {
    let mut card = Element::new("card");

    // A subtype matching the name marks a generic token, which takes the
    // conventional 'Token' suffix; all other names stay as Scryfall wrote
    // them.
    let mut name = record.name.clone();
    if subtype(&record.type_line) == Some(record.name.as_str()) {
        name.push_str(" Token");
    }
    card.push(Element::with_text("name", &name));

    if !record.text.is_empty() {
        card.push(Element::with_text("text", &record.text));
    }

    let mut prop = Element::new("prop");

    if !record.colors.is_empty() {
        prop.push(Element::with_text("colors", &record.colors));
    }

    prop.push(Element::with_text("type", &record.type_line));

    let main = match maintype(&record.type_line) {
        Some(main) => main,
        None => {
            println!(
                "Could not determine maintype for {}. Please edit manually",
                record.name
            );
            "Please edit manually"
        }
    };
    prop.push(Element::with_text("maintype", main));

    if !SHORT_TAG_LIST.contains(&record.type_line.as_str()) {
        prop.push(Element::with_text("cmc", "0"));
    }

    if !record.pt.is_empty() {
        prop.push(Element::with_text("pt", &record.pt));
    }

    card.push(prop);
    card.push(set_line(record, set_code));

    // Tokens that transform need a related entry filled in by hand; the
    // empty text keeps these from collapsing to short tags
    if record.text.contains("transform") || record.text.contains("Transform") {
        card.push(Element::with_text("related", ""));
    }
    card.push(Element::with_text("reverse-related", ""));

    card.push(Element::with_text("token", "1"));

    let tablerow = if main == "Creature" { "2" } else { "1" };
    card.push(Element::with_text("tablerow", tablerow));

    card
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::xmltree;
    use super::*;

    fn record(name: &str, text: &str, type_line: &str) -> TokenRecord {
        TokenRecord {
            name: name.to_owned(),
            text: text.to_owned(),
            type_line: type_line.to_owned(),
            colors: String::new(),
            pt: String::new(),
            image_url: "https://example.com/img.jpg".to_owned(),
        }
    }

    #[test]
    fn creature_supersedes_artifact_and_enchantment() {
        assert_eq!(
            maintype("Token Artifact Creature — Construct"),
            Some("Creature")
        );
        assert_eq!(
            maintype("Token Enchantment Creature — Zombie"),
            Some("Creature")
        );
        assert_eq!(maintype("Token Artifact — Treasure"), Some("Artifact"));
        assert_eq!(maintype("Emblem — Teferi"), Some("Emblem"));
        assert_eq!(maintype("Dungeon"), Some("Dungeon"));
        assert_eq!(maintype("Card"), None);
    }

    #[test]
    fn generic_token_name_gets_suffix() {
        let card = new_card(&record("Treasure", "", "Token Artifact — Treasure"), "mh3");
        assert_eq!(card.child_text("name"), "Treasure Token");
    }

    #[test]
    fn named_token_keeps_its_name() {
        let card = new_card(
            &record("Marit Lage", "Flying, indestructible", "Token Legendary Creature — Avatar"),
            "mh3",
        );
        assert_eq!(card.child_text("name"), "Marit Lage");
    }

    #[test]
    fn bare_type_lines_get_no_cmc() {
        let card = new_card(&record("The Monarch", "", "Card"), "mh3");
        assert!(card.child("prop").unwrap().child("cmc").is_none());

        let card = new_card(&record("Zombie", "", "Token Creature — Zombie"), "mh3");
        assert_eq!(card.child("prop").unwrap().child_text("cmc"), "0");
    }

    #[test]
    fn transforming_token_gets_related_stub() {
        let with = new_card(
            &record("Incubator", "{2}: Transform this artifact.", "Token Artifact — Incubator"),
            "mom",
        );
        assert!(with.child("related").is_some());

        let without = new_card(&record("Treasure", "", "Token Artifact — Treasure"), "mom");
        assert!(without.child("related").is_none());
    }

    #[test]
    fn tablerow_is_two_only_for_creatures() {
        let creature = new_card(&record("Zombie", "", "Token Creature — Zombie"), "mh3");
        assert_eq!(creature.child_text("tablerow"), "2");

        let artifact = new_card(&record("Treasure", "", "Token Artifact — Treasure"), "mh3");
        assert_eq!(artifact.child_text("tablerow"), "1");
    }

    #[test]
    fn full_entry_serializes_in_schema_order() {
        let mut angel = record("Angel", "Flying, vigilance", "Token Creature — Angel");
        angel.colors = "W".to_owned();
        angel.pt = "4/4".to_owned();
        angel.image_url = "https://cards.scryfall.io/large/angel.jpg".to_owned();

        let xml = xmltree::to_xml(&new_card(&angel, "dsk")).unwrap();
        let expected = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
                        <card>\n\
                        \x20   <name>Angel</name>\n\
                        \x20   <text>Flying, vigilance</text>\n\
                        \x20   <prop>\n\
                        \x20       <colors>W</colors>\n\
                        \x20       <type>Token Creature — Angel</type>\n\
                        \x20       <maintype>Creature</maintype>\n\
                        \x20       <cmc>0</cmc>\n\
                        \x20       <pt>4/4</pt>\n\
                        \x20   </prop>\n\
                        \x20   <set picURL=\"https://cards.scryfall.io/large/angel.jpg\">DSK</set>\n\
                        \x20   <reverse-related></reverse-related>\n\
                        \x20   <token>1</token>\n\
                        \x20   <tablerow>2</tablerow>\n\
                        </card>\n";
        assert_eq!(xml, expected);
    }

    #[test]
    fn undetermined_maintype_gets_placeholder() {
        let card = new_card(&record("The Ring", "Your Ring-bearer is legendary.", "Token"), "ltr");
        assert_eq!(
            card.child("prop").unwrap().child_text("maintype"),
            "Please edit manually"
        );
    }
}
