//! Lyrics provider trait and the lyrics wiki implementation

use std::error::Error;
use std::fmt;

use log::{debug, warn};

use crate::helpers::http_client::{HttpClient, HttpClientError};
use crate::helpers::wiki;

/// Result type for lyrics operations
pub type LyricsResult<T> = Result<T, LyricsError>;

/// Error type for lyrics operations
#[derive(Debug, Clone, PartialEq)]
pub enum LyricsError {
    /// Song not found (no search result, no page or no lyrics on the page)
    NotFound,
    /// Network error that may go away on a later attempt
    NetworkError(String),
    /// The site answered with something we could not use
    ParseError(String),
}

impl LyricsError {
    /// Whether a later lookup of the same song might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, LyricsError::NetworkError(_))
    }
}

impl fmt::Display for LyricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LyricsError::NotFound => write!(f, "Lyrics not found"),
            LyricsError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            LyricsError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl Error for LyricsError {}

impl From<HttpClientError> for LyricsError {
    fn from(error: HttpClientError) -> Self {
        match error {
            HttpClientError::NotFound(_) => LyricsError::NotFound,
            e if e.is_transient() => LyricsError::NetworkError(e.to_string()),
            e => LyricsError::ParseError(e.to_string()),
        }
    }
}

/// Outcome of resolving one song, kept per song in corpus reports
#[derive(Debug, Clone, PartialEq)]
pub enum LyricsStatus {
    /// Lyrics are available (freshly fetched or cached)
    Found,
    /// The site has no lyrics for this song
    NotFound,
    /// The lookup failed for another reason
    Failed(String),
}

impl<T> From<&LyricsResult<T>> for LyricsStatus {
    fn from(result: &LyricsResult<T>) -> Self {
        match result {
            Ok(_) => LyricsStatus::Found,
            Err(LyricsError::NotFound) => LyricsStatus::NotFound,
            Err(e) => LyricsStatus::Failed(e.to_string()),
        }
    }
}

/// Lookup parameters for finding lyrics by metadata
#[derive(Debug, Clone)]
pub struct LyricsLookup {
    /// Artist name (required)
    pub artist: String,
    /// Song title (required)
    pub title: String,
}

impl LyricsLookup {
    /// Create a new lyrics lookup
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }
}

/// Trait for providing lyrics from various sources
pub trait LyricsProvider: Send + Sync {
    /// Get lyrics by artist and song metadata
    fn get_lyrics_by_metadata(&self, lookup: &LyricsLookup) -> LyricsResult<String>;

    /// Get lyrics from a song page
    fn get_lyrics_by_url(&self, url: &str) -> LyricsResult<String>;

    /// Get the name/identifier of this lyrics provider
    fn provider_name(&self) -> &'static str;
}

/// Resolve lyrics for an artist and title, never failing
///
/// Any error collapses to an empty string. Not-found results are logged at
/// debug level, everything else as a warning.
pub fn resolve_lyrics(provider: &dyn LyricsProvider, artist: &str, title: &str) -> String {
    match provider.get_lyrics_by_metadata(&LyricsLookup::new(artist, title)) {
        Ok(lyrics) => lyrics,
        Err(LyricsError::NotFound) => {
            debug!("No lyrics for '{}' by '{}'", title, artist);
            String::new()
        }
        Err(e) => {
            warn!("{} lookup for '{}' by '{}' failed: {}", provider.provider_name(), title, artist, e);
            String::new()
        }
    }
}

/// A link found on a wiki page, already resolved to an absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    pub text: String,
    pub url: String,
}

/// Client for the lyrics wiki
#[derive(Debug, Clone)]
pub struct LyricWiki {
    client: Box<dyn HttpClient>,
    base_url: String,
}

impl LyricWiki {
    /// Create a wiki client on top of an HTTP client
    pub fn new(client: Box<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn links(&self, raw: Vec<(String, String)>) -> Vec<WikiLink> {
        raw.into_iter()
            .filter_map(|(text, href)| match wiki::resolve_href(&self.base_url, &href) {
                Some(url) => Some(WikiLink { text, url }),
                None => {
                    debug!("Dropping unresolvable link '{}' ({})", text, href);
                    None
                }
            })
            .collect()
    }

    /// List the albums on an artist's index page
    ///
    /// An artist without an index page has no albums. Other fetch failures
    /// are returned so callers can tell them apart from an empty result.
    pub fn artist_albums(&self, artist: &str) -> Result<Vec<WikiLink>, HttpClientError> {
        let url = wiki::artist_url(&self.base_url, artist);
        let html = match self.client.get(&url) {
            Ok(html) => html,
            Err(HttpClientError::NotFound(_)) => {
                debug!("No artist page for '{}'", artist);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        let albums = self.links(wiki::parse_album_headings(&html));
        debug!("Found {} albums for '{}'", albums.len(), artist);
        Ok(albums)
    }

    /// List the tracks on an album page, in track order
    pub fn album_tracks(&self, album_url: &str) -> Result<Vec<WikiLink>, HttpClientError> {
        let html = match self.client.get(album_url) {
            Ok(html) => html,
            Err(HttpClientError::NotFound(_)) => {
                debug!("Album page {} does not exist", album_url);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        let tracks = self.links(wiki::parse_track_list(&html));
        debug!("Found {} tracks on {}", tracks.len(), album_url);
        Ok(tracks)
    }
}

impl LyricsProvider for LyricWiki {
    fn get_lyrics_by_metadata(&self, lookup: &LyricsLookup) -> LyricsResult<String> {
        let search = wiki::search_url(&self.base_url, &lookup.artist, &lookup.title);
        let html = self.client.get(&search)?;

        let href = wiki::parse_search_result(&html).ok_or_else(|| {
            debug!("No search result for '{}' by '{}'", lookup.title, lookup.artist);
            LyricsError::NotFound
        })?;
        let url = wiki::resolve_href(&self.base_url, &href)
            .ok_or_else(|| LyricsError::ParseError(format!("Unusable result link: {}", href)))?;

        self.get_lyrics_by_url(&url)
    }

    fn get_lyrics_by_url(&self, url: &str) -> LyricsResult<String> {
        let html = self.client.get(url)?;
        wiki::parse_lyrics(&html).ok_or(LyricsError::NotFound)
    }

    fn provider_name(&self) -> &'static str {
        "lyricwiki"
    }
}
