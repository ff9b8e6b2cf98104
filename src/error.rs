use thiserror::Error;

use crate::helpers::billboard::ChartError;
use crate::helpers::http_client::HttpClientError;

/// Errors surfaced to callers of the corpus builders
///
/// Lyrics lookups never produce these; a song without lyrics is reported in
/// the corpus report instead.
#[derive(Debug, Error)]
pub enum CorporaError {
    #[error("genre, {genre} is not in the accepted genre list. Please use genre_list() to find acceptable genres: {}", .allowed.join(", "))]
    InvalidGenre { genre: String, allowed: Vec<String> },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Http(#[from] HttpClientError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CorporaError>;
