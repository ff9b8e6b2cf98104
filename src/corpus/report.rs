use std::fmt;

use log::{debug, warn};

use crate::data::Song;
use crate::helpers::lyrics::{LyricsResult, LyricsStatus};

/// What happened to one song while a corpus was assembled
#[derive(Debug, Clone, PartialEq)]
pub struct SongReport {
    pub title: String,
    pub artist: String,
    pub status: LyricsStatus,
}

/// A lyrics corpus together with the outcome of every song that went into it
#[derive(Debug, Clone, Default)]
pub struct CorpusReport {
    name: String,
    songs: Vec<SongReport>,
    text: String,
}

impl CorpusReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Record the lyrics lookup of one song, appending its cached lyrics to the corpus
    pub fn record(&mut self, song: &Song, result: LyricsResult<()>) {
        let status = LyricsStatus::from(&result);
        match (&status, result) {
            (_, Ok(())) => self.text.push_str(song.cached_lyrics().unwrap_or_default()),
            (LyricsStatus::NotFound, _) => debug!("Skipping {}: no lyrics", song),
            (_, Err(e)) => warn!("Skipping {}: {}", song, e),
        }
        self.songs.push(SongReport {
            title: song.title().to_string(),
            artist: song.artist().to_string(),
            status,
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The concatenated lyrics of every song that had some
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn songs(&self) -> &[SongReport] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn found(&self) -> usize {
        self.count(|s| matches!(s, LyricsStatus::Found))
    }

    pub fn not_found(&self) -> usize {
        self.count(|s| matches!(s, LyricsStatus::NotFound))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, LyricsStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&LyricsStatus) -> bool) -> usize {
        self.songs.iter().filter(|s| pred(&s.status)).count()
    }
}

impl fmt::Display for CorpusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} songs, {} with lyrics, {} without, {} failed",
            self.name,
            self.len(),
            self.found(),
            self.not_found(),
            self.failed()
        )
    }
}
