use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while pulling a token set from Scryfall.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request failed or the response body could not be decoded.
    #[error("request to Scryfall failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Scryfall answered with an error object, e.g. for an unknown set code.
    #[error("Scryfall rejected the search: {details}")]
    Api { details: String },
}

/// Failure while reading the existing token database.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("malformed XML in {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        source: quick_xml::Error,
    },

    /// The document parsed but is not a Cockatrice card database.
    #[error("{} has no <cards> element", path.display())]
    MissingCards { path: PathBuf },
}

/// Top-level error for one run of the tool.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}
