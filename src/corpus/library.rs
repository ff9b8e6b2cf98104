use std::collections::HashMap;

use log::{debug, info};

use crate::corpus::CorpusReport;
use crate::data::{Artist, Song};
use crate::helpers::lyrics::{self, LyricWiki};

/// Keeps one `Artist` per name for the lifetime of a run
///
/// Asking for the same artist twice gives the same entity, so albums, songs
/// and lyrics fetched once are reused by every later request.
#[derive(Debug)]
pub struct LyricsLibrary {
    wiki: LyricWiki,
    artists: HashMap<String, Artist>,
}

impl LyricsLibrary {
    pub fn new(wiki: LyricWiki) -> Self {
        Self {
            wiki,
            artists: HashMap::new(),
        }
    }

    pub fn wiki(&self) -> &LyricWiki {
        &self.wiki
    }

    /// Number of distinct artists seen so far
    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    /// The artist with this name, created on first use
    pub fn artist(&mut self, name: &str) -> &mut Artist {
        self.artists
            .entry(name.to_string())
            .or_insert_with(|| Artist::new(name))
    }

    /// Lyrics of every song of an artist, joined into one corpus
    pub fn artist_corpus(&mut self, name: &str) -> CorpusReport {
        let Self { wiki, artists } = self;
        let artist = artists
            .entry(name.to_string())
            .or_insert_with(|| Artist::new(name));
        artist.lyrics(wiki)
    }

    /// Lyrics of a single song, or an empty string when there are none
    ///
    /// A song already known from the artist's albums is resolved in place so
    /// its lyrics stay cached; otherwise the song is looked up by search.
    pub fn song_lyrics(&mut self, artist: &str, title: &str) -> String {
        let Self { wiki, artists } = self;
        let wiki: &LyricWiki = wiki;
        if let Some(known) = artists.get_mut(artist) {
            if let Some(song) = known.find_cached_song_mut(title) {
                debug!("Using album entry for {}", song);
                return song.lyrics(wiki);
            }
        }
        lyrics::resolve_lyrics(wiki, artist, title)
    }

    /// Lyrics of a list of songs, joined into one corpus
    ///
    /// Songs without lyrics are skipped and reported.
    pub fn songs_corpus(&mut self, name: &str, songs: &mut [Song]) -> CorpusReport {
        let mut report = CorpusReport::new(name);
        for song in songs.iter_mut() {
            let result = song.resolve_lyrics(&self.wiki).map(|_| ());
            report.record(song, result);
        }
        info!("{}", report);
        report
    }
}
