use log::info;

use crate::corpus::ChartCollector;
use crate::data::Song;
use crate::error::{CorporaError, Result};
use crate::helpers::billboard::ChartProvider;

/// Genres with a chart of their own
pub const GENRE_LIST: [&str; 7] = [
    "r-b-hip-hop",
    "country",
    "rock",
    "latin",
    "dance-electronic",
    "christian",
    "gospel",
];

/// Weeks of chart history read for a genre (about two years)
pub const GENRE_CHART_WEEKS: usize = 104;

/// The songs and artists of a genre chart
#[derive(Debug, Clone)]
pub struct Genre {
    id: String,
    songs: Vec<Song>,
    artists: Vec<String>,
}

impl Genre {
    /// The accepted genre identifiers
    pub fn genre_list() -> &'static [&'static str] {
        &GENRE_LIST
    }

    /// Check a genre identifier against the accepted list
    pub fn validate(genre_id: &str) -> Result<()> {
        if GENRE_LIST.contains(&genre_id) {
            Ok(())
        } else {
            Err(CorporaError::InvalidGenre {
                genre: genre_id.to_string(),
                allowed: GENRE_LIST.iter().map(|g| g.to_string()).collect(),
            })
        }
    }

    /// Chart name used for a genre
    pub fn chart_id(genre_id: &str) -> String {
        format!("{}-songs", genre_id)
    }

    /// Collect the songs of a genre from its chart
    ///
    /// Fails before touching the chart when the identifier is not in
    /// [`GENRE_LIST`].
    pub fn resolve(genre_id: &str, provider: &dyn ChartProvider) -> Result<Self> {
        Self::validate(genre_id)?;

        let collection = ChartCollector::new(provider).collect(GENRE_CHART_WEEKS, &Self::chart_id(genre_id))?;
        let artists = collection.artists();
        info!(
            "Genre '{}': {} songs by {} artists",
            genre_id,
            collection.len(),
            artists.len()
        );

        Ok(Self {
            id: genre_id.to_string(),
            songs: collection.into_songs(),
            artists,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn songs_mut(&mut self) -> &mut [Song] {
        &mut self.songs
    }

    /// Primary artists of the genre's songs, each once
    pub fn artists(&self) -> &[String] {
        &self.artists
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_genres_validate() {
        for genre in Genre::genre_list() {
            assert!(Genre::validate(genre).is_ok());
        }
        assert_eq!(Genre::genre_list().len(), 7);
    }

    #[test]
    fn test_unknown_genre_names_itself_and_the_list() {
        let err = Genre::validate("polka").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("polka"));
        assert!(message.contains("genre_list()"));
        for genre in GENRE_LIST {
            assert!(message.contains(genre), "missing {} in {}", genre, message);
        }
        match err {
            CorporaError::InvalidGenre { allowed, .. } => assert_eq!(allowed.len(), 7),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_chart_id() {
        assert_eq!(Genre::chart_id("rock"), "rock-songs");
    }
}
