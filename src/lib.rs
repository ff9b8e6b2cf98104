/// Configuration file handling
pub mod config;

/// Charts, genres and corpus assembly
pub mod corpus;

/// Song, album and artist entities with lazily fetched contents
pub mod data;

/// Crate-level error type
pub mod error;

/// HTTP, page parsing, lyrics and chart helpers
pub mod helpers;

/// Logging setup
pub mod logging;

pub use config::CorporaConfig;
pub use corpus::{ChartCollection, ChartCollector, CorpusReport, Genre, LyricsLibrary};
pub use data::{Album, Artist, CacheSlot, Song};
pub use error::CorporaError;
pub use helpers::lyrics::{LyricWiki, LyricsStatus};
