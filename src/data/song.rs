//! A song with lazily fetched lyrics

use std::fmt;
use std::hash::{Hash, Hasher};

use log::debug;

use crate::data::{Artist, CacheSlot};
use crate::helpers::lyrics::{LyricsError, LyricsLookup, LyricsProvider, LyricsResult};

#[derive(Debug, Clone)]
pub struct Song {
    title: String,
    /// Name of the artist; songs refer to artists by name only
    artist: String,
    /// Page of this song on the lyrics site, when known
    link: Option<String>,
    lyrics: CacheSlot<String>,
}

impl Song {
    /// Create a song from a title and an artist name
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            link: None,
            lyrics: CacheSlot::Unresolved,
        }
    }

    /// Create a song belonging to an artist entity
    pub fn by(title: impl Into<String>, artist: &Artist) -> Self {
        Self::new(title, artist.name())
    }

    /// Attach the song's page on the lyrics site
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn lyrics_slot(&self) -> &CacheSlot<String> {
        &self.lyrics
    }

    /// Lyrics already fetched for this song, without fetching
    pub fn cached_lyrics(&self) -> Option<&str> {
        self.lyrics.get().map(String::as_str)
    }

    /// Store lyrics obtained elsewhere; an empty text marks the song as having none
    pub fn set_lyrics(&mut self, lyrics: impl Into<String>) {
        let lyrics = lyrics.into();
        self.lyrics = if lyrics.is_empty() {
            CacheSlot::ResolvedEmpty
        } else {
            CacheSlot::Resolved(lyrics)
        };
    }

    /// Fetch lyrics unless they were fetched before
    ///
    /// Found lyrics and definite not-found answers are cached on the song.
    /// Other failures leave the song unresolved so a later call tries again.
    pub fn resolve_lyrics(&mut self, provider: &dyn LyricsProvider) -> LyricsResult<&str> {
        match self.lyrics {
            CacheSlot::Resolved(_) => {}
            CacheSlot::ResolvedEmpty => return Err(LyricsError::NotFound),
            CacheSlot::Unresolved => match self.fetch_lyrics(provider) {
                Ok(text) => self.lyrics = CacheSlot::Resolved(text),
                Err(LyricsError::NotFound) => {
                    self.lyrics = CacheSlot::ResolvedEmpty;
                    return Err(LyricsError::NotFound);
                }
                Err(e) => return Err(e),
            },
        }
        self.cached_lyrics().ok_or(LyricsError::NotFound)
    }

    /// Lyrics of this song, or an empty string when there are none
    pub fn lyrics(&mut self, provider: &dyn LyricsProvider) -> String {
        let result = self.resolve_lyrics(provider).map(str::to_string);
        match result {
            Ok(text) => text,
            Err(e) => {
                debug!("No lyrics for {}: {}", self, e);
                String::new()
            }
        }
    }

    fn fetch_lyrics(&self, provider: &dyn LyricsProvider) -> LyricsResult<String> {
        if let Some(link) = &self.link {
            match provider.get_lyrics_by_url(link) {
                Err(LyricsError::NotFound) => {
                    debug!("No lyrics on {}, searching instead", link);
                }
                other => return other,
            }
        }
        provider.get_lyrics_by_metadata(&LyricsLookup::new(self.artist.as_str(), self.title.as_str()))
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        // Links and lyrics are not part of a song's identity
        self.title == other.title && self.artist == other.artist
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.artist.hash(state);
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' by {}", self.title, self.artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        answer: LyricsResult<String>,
        by_url: Option<LyricsResult<String>>,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new(answer: LyricsResult<String>) -> Self {
            Self { answer, by_url: None, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn bump(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl LyricsProvider for CountingProvider {
        fn get_lyrics_by_metadata(&self, _lookup: &LyricsLookup) -> LyricsResult<String> {
            self.bump();
            self.answer.clone()
        }

        fn get_lyrics_by_url(&self, _url: &str) -> LyricsResult<String> {
            self.bump();
            self.by_url.clone().unwrap_or(Err(LyricsError::NotFound))
        }

        fn provider_name(&self) -> &'static str {
            "counting"
        }
    }

    #[test]
    fn test_identity_ignores_link_and_lyrics() {
        let mut a = Song::new("One Dance", "Drake").with_link("http://w/a");
        a.set_lyrics("text");
        let b = Song::new("One Dance", "Drake");
        assert_eq!(a, b);
        assert_ne!(a, Song::new("One Dance", "Wizkid"));
        assert_ne!(a, Song::new("Hotline Bling", "Drake"));
    }

    #[test]
    fn test_found_lyrics_are_cached() {
        let provider = CountingProvider::new(Ok("words".to_string()));
        let mut song = Song::new("One Dance", "Drake");
        assert_eq!(song.resolve_lyrics(&provider).unwrap(), "words");
        assert_eq!(song.lyrics(&provider), "words");
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_not_found_is_cached_as_empty() {
        let provider = CountingProvider::new(Err(LyricsError::NotFound));
        let mut song = Song::new("Nope", "Drake");
        assert_eq!(song.lyrics(&provider), "");
        assert_eq!(song.lyrics_slot(), &CacheSlot::ResolvedEmpty);
        assert_eq!(song.lyrics(&provider), "");
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_transient_failure_stays_unresolved() {
        let provider = CountingProvider::new(Err(LyricsError::NetworkError("timeout".to_string())));
        let mut song = Song::new("One Dance", "Drake");
        assert!(song.resolve_lyrics(&provider).is_err());
        assert!(!song.lyrics_slot().is_resolved());
        assert!(song.resolve_lyrics(&provider).is_err());
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn test_linked_song_uses_its_page_first() {
        let mut provider = CountingProvider::new(Ok("searched".to_string()));
        provider.by_url = Some(Ok("from page".to_string()));
        let mut song = Song::new("One Dance", "Drake").with_link("http://w/wiki/Drake:One_Dance");
        assert_eq!(song.lyrics(&provider), "from page");
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_linked_song_falls_back_to_search() {
        let provider = CountingProvider::new(Ok("searched".to_string()));
        let mut song = Song::new("One Dance", "Drake").with_link("http://w/wiki/Drake:One_Dance");
        assert_eq!(song.lyrics(&provider), "searched");
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn test_song_by_artist_entity() {
        let artist = Artist::new("Drake");
        assert_eq!(Song::by("One Dance", &artist), Song::new("One Dance", "Drake"));
    }
}
