use std::path::PathBuf;

use clap::Parser;

mod cockatrice;
mod error;
mod reconcile;
mod scryfall;
mod utils;

use cockatrice::TokenDatabase;
use error::Error;

/// Simple program to reconcile a Cockatrice token database with a token
/// set fetched from Scryfall
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Set code of the parent set; the token set's `t` prefix is added
    /// automatically
    set_code: String,

    /// Path to the current token XML file
    xml_file: PathBuf,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(&args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<(), Error> {
    // Parse the current database first so a bad path never costs an API call
    let mut database = TokenDatabase::load(&args.xml_file)?;
    let cards = database.card_fields();

    println!("Fetching token set for {} from Scryfall...", args.set_code);
    let fetched = scryfall::search::fetch_token_set(&args.set_code).await?;
    let records = scryfall::token_records(&fetched);

    let partition = reconcile::partition(&cards, &records);

    let mut reprint_count = 0;
    for reprint in &partition.reprints {
        for &index in &reprint.matches {
            let set_line = cockatrice::entry::set_line(&reprint.record, &args.set_code);
            database.insert_set_line(index, set_line);
            reprint_count += 1;
        }
    }

    let entries: Vec<_> = partition
        .new_tokens
        .iter()
        .map(|record| cockatrice::entry::new_card(record, &args.set_code))
        .collect();
    let new_token_count = entries.len();

    let update_path = utils::files::updated_database_path(&args.xml_file, &args.set_code);
    let new_tokens_path = utils::files::new_tokens_path(&args.xml_file, &args.set_code);

    database.write(&update_path)?;
    cockatrice::write_new_tokens(entries, &new_tokens_path)?;

    println!(
        "Created {} new token entries in {}",
        new_token_count,
        new_tokens_path.display()
    );
    println!(
        "Appended set lines for {} reprinted tokens in {}",
        reprint_count,
        update_path.display()
    );
    println!("Please check entries for accuracy, fill in related and reverse-related elements,");
    println!("and add spaces after non-unique token names as necessary.");

    Ok(())
}
