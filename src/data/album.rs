use std::fmt;
use std::hash::{Hash, Hasher};

use log::{debug, warn};

use crate::data::{CacheSlot, Song};
use crate::helpers::lyrics::LyricWiki;

/// Represents an album page on the lyrics site
#[derive(Debug, Clone)]
pub struct Album {
    /// Album name
    name: String,
    /// Name of the artist the album belongs to
    artist: String,
    /// URL of the album page; without it the track list cannot be read
    link: Option<String>,
    /// Tracks in album order, fetched on first access
    songs: CacheSlot<Vec<Song>>,
}

impl Album {
    pub fn new(name: impl Into<String>, artist: impl Into<String>, link: Option<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            link,
            songs: CacheSlot::Unresolved,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Whether the track list has been fetched
    pub fn is_resolved(&self) -> bool {
        self.songs.is_resolved()
    }

    /// Tracks of this album, fetching the album page the first time
    ///
    /// An album page without a track list gives an empty list, which is
    /// cached like any other result. A failed fetch returns an empty list
    /// without caching it.
    pub fn song_list(&mut self, wiki: &LyricWiki) -> &[Song] {
        if !self.songs.is_resolved() {
            match self.fetch_songs(wiki) {
                Some(songs) => self.songs = CacheSlot::from_list(songs),
                None => return &[],
            }
        }
        self.songs.as_slice()
    }

    /// Tracks already fetched, without fetching
    pub fn cached_songs(&self) -> &[Song] {
        self.songs.as_slice()
    }

    pub fn cached_songs_mut(&mut self) -> &mut [Song] {
        self.songs.as_mut_slice()
    }

    fn fetch_songs(&self, wiki: &LyricWiki) -> Option<Vec<Song>> {
        let Some(link) = &self.link else {
            debug!("Album '{}' has no page, no tracks to read", self.name);
            return Some(Vec::new());
        };
        match wiki.album_tracks(link) {
            Ok(tracks) => Some(
                tracks
                    .into_iter()
                    .map(|track| Song::new(track.text, self.artist.as_str()).with_link(track.url))
                    .collect(),
            ),
            Err(e) => {
                warn!("Could not read tracks of album '{}' by {}: {}", self.name, self.artist, e);
                None
            }
        }
    }
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.artist == other.artist
    }
}

impl Eq for Album {}

impl Hash for Album {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.artist.hash(state);
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
