/*!
 * Page structure lookups for the lyrics wiki
 *
 * Every function here works on an HTML string that was already fetched, so
 * the network side stays in the HTTP client and these stay testable with
 * inline fixtures.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Default location of the lyrics wiki
pub const DEFAULT_WIKI_BASE_URL: &str = "http://lyrics.wikia.com";

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("invalid built-in selector")
}

static SEARCH_RESULT: Lazy<Selector> = Lazy::new(|| selector("li.result"));
static SEARCH_RESULT_LINK: Lazy<Selector> = Lazy::new(|| selector("a.result-link[href]"));
static LYRIC_BOX: Lazy<Selector> = Lazy::new(|| selector("div.lyricbox"));
static HEADLINE: Lazy<Selector> = Lazy::new(|| selector("span.mw-headline"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static CONTENT: Lazy<Selector> = Lazy::new(|| selector("div.mw-content-text"));
static ORDERED_LIST: Lazy<Selector> = Lazy::new(|| selector("ol"));
static LIST_ITEM: Lazy<Selector> = Lazy::new(|| selector("li"));

// "Album:Title (2016)" -> "Title"
static ALBUM_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[^:]*:)?(.*?)(?: \(.*)?$").expect("invalid album title pattern"));

/// Build the search page URL for an artist and title
///
/// Words are percent-encoded individually and joined with `+`.
pub fn search_url(base_url: &str, artist: &str, title: &str) -> String {
    format!(
        "{}/wiki/Special:Search?search={}:{}",
        base_url.trim_end_matches('/'),
        plus_encode(artist),
        plus_encode(title)
    )
}

/// Build the index page URL of an artist
pub fn artist_url(base_url: &str, artist: &str) -> String {
    format!("{}/wiki/{}", base_url.trim_end_matches('/'), urlencoding::encode(artist))
}

fn plus_encode(text: &str) -> String {
    text.split(' ')
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

/// Turn a link found on a wiki page into an absolute URL
///
/// Returns `None` when neither the href nor the base can be parsed.
pub fn resolve_href(base_url: &str, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Url::parse(href).ok().map(|u| u.to_string());
    }
    let base = Url::parse(base_url).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

/// Find the first result link on a search page
pub fn parse_search_result(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let result = document.select(&SEARCH_RESULT).next()?;
    let link = result.select(&SEARCH_RESULT_LINK).next()?;
    link.value().attr("href").map(str::to_string)
}

/// Extract the lyrics text from a song page
///
/// Line breaks inside the lyrics box become newlines; the rest is the plain
/// text of the box, trimmed.
pub fn parse_lyrics(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let lyric_box = document.select(&LYRIC_BOX).next()?;

    let mut text = String::new();
    for node in lyric_box.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }

    let text = text.trim();
    if text.is_empty() {
        debug!("Lyrics box found but empty");
        None
    } else {
        Some(text.to_string())
    }
}

/// Derive an album display name from a wiki page title
pub fn album_display_name(page_title: &str) -> String {
    match ALBUM_TITLE.captures(page_title).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().trim().to_string(),
        None => page_title.trim().to_string(),
    }
}

/// Scan an artist index page for album section headings
///
/// # Returns
/// * `Vec<(String, String)>` - (album name, href) for every heading that links to a page
pub fn parse_album_headings(html: &str) -> Vec<(String, String)> {
    let document = Html::parse_document(html);
    let mut albums = Vec::new();

    for headline in document.select(&HEADLINE) {
        let Some(link) = headline.select(&LINK).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let title = match link.value().attr("title") {
            Some(title) => title.to_string(),
            None => element_text(&link),
        };
        let name = album_display_name(&title);
        if name.is_empty() {
            debug!("Skipping album heading with empty title ({})", href);
            continue;
        }
        albums.push((name, href.to_string()));
    }
    albums
}

/// Read the ordered track list of an album page
///
/// # Returns
/// * `Vec<(String, String)>` - (song title, href) in track order; empty when the
///   page has no track list
pub fn parse_track_list(html: &str) -> Vec<(String, String)> {
    let document = Html::parse_document(html);
    let Some(content) = document.select(&CONTENT).next() else {
        debug!("Album page has no content section");
        return Vec::new();
    };
    let Some(track_list) = content.select(&ORDERED_LIST).next() else {
        debug!("Album page has no track list");
        return Vec::new();
    };

    track_list
        .select(&LIST_ITEM)
        .filter_map(|item| {
            let link = item.select(&LINK).next()?;
            let href = link.value().attr("href")?;
            let title = element_text(&link);
            if title.is_empty() {
                None
            } else {
                Some((title, href.to_string()))
            }
        })
        .collect()
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
