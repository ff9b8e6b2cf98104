//! Corpus assembly on top of the entities: charts, genres and the artist identity map

pub mod chart;
pub mod genre;
pub mod library;
pub mod report;

pub use chart::{ChartCollection, ChartCollector};
pub use genre::{Genre, GENRE_CHART_WEEKS, GENRE_LIST};
pub use library::LyricsLibrary;
pub use report::{CorpusReport, SongReport};
