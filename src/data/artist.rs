use std::fmt;
use std::hash::{Hash, Hasher};

use log::{debug, info, warn};

use crate::corpus::CorpusReport;
use crate::data::{Album, CacheSlot, Song};
use crate::helpers::lyrics::LyricWiki;

/// Represents an artist on the lyrics site
///
/// The name is the artist's identity. Albums are read from the artist's
/// index page the first time they are asked for and kept afterwards.
#[derive(Debug, Clone)]
pub struct Artist {
    name: String,
    albums: CacheSlot<Vec<Album>>,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            albums: CacheSlot::Unresolved,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the album list has been fetched
    pub fn is_resolved(&self) -> bool {
        self.albums.is_resolved()
    }

    /// Albums of this artist, fetching the index page the first time
    ///
    /// An index page without album sections gives an empty list. A failed
    /// fetch also gives an empty list but is not cached.
    pub fn album_list(&mut self, wiki: &LyricWiki) -> &[Album] {
        if !self.albums.is_resolved() {
            match wiki.artist_albums(&self.name) {
                Ok(links) => {
                    let albums = links
                        .into_iter()
                        .map(|link| Album::new(link.text, self.name.as_str(), Some(link.url)))
                        .collect();
                    self.albums = CacheSlot::from_list(albums);
                }
                Err(e) => {
                    warn!("Could not read albums of {}: {}", self.name, e);
                    return &[];
                }
            }
        }
        self.albums.as_slice()
    }

    /// Albums already fetched, without fetching
    pub fn cached_albums(&self) -> &[Album] {
        self.albums.as_slice()
    }

    /// Every song on every album, in album order
    pub fn song_list(&mut self, wiki: &LyricWiki) -> Vec<&Song> {
        self.load_songs(wiki);
        self.albums
            .as_slice()
            .iter()
            .flat_map(|album| album.cached_songs())
            .collect()
    }

    /// Find a song of this artist among the albums fetched so far
    pub fn find_cached_song(&self, title: &str) -> Option<&Song> {
        self.albums
            .as_slice()
            .iter()
            .flat_map(|album| album.cached_songs())
            .find(|song| song.title() == title)
    }

    pub fn find_cached_song_mut(&mut self, title: &str) -> Option<&mut Song> {
        self.albums
            .as_mut_slice()
            .iter_mut()
            .flat_map(|album| album.cached_songs_mut())
            .find(|song| song.title() == title)
    }

    /// Lyrics of every song of this artist
    ///
    /// Songs whose lyrics cannot be found or fetched are skipped; the report
    /// says which ones.
    pub fn lyrics(&mut self, wiki: &LyricWiki) -> CorpusReport {
        self.load_songs(wiki);

        let mut report = CorpusReport::new(self.name.as_str());
        for album in self.albums.as_mut_slice() {
            debug!("Collecting lyrics of album '{}'", album.name());
            for song in album.cached_songs_mut() {
                let result = song.resolve_lyrics(wiki).map(|_| ());
                report.record(song, result);
            }
        }
        info!("{}", report);
        report
    }

    fn load_songs(&mut self, wiki: &LyricWiki) {
        self.album_list(wiki);
        for album in self.albums.as_mut_slice() {
            album.song_list(wiki);
        }
    }
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Artist {}

impl Hash for Artist {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
