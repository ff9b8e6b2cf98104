// Common helpers for integration tests
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use lyricscorpora::helpers::billboard::{ChartEntry, ChartError, ChartProvider, ChartSnapshot};
use lyricscorpora::helpers::http_client::{HttpClient, HttpClientError};
use lyricscorpora::LyricWiki;

pub const WIKI: &str = "http://wiki.test";
pub const CHARTS: &str = "http://charts.test";

/// HTTP client answering from a URL -> page table and counting every request
///
/// Clones share the table and the counters. Unknown URLs answer 404, URLs
/// marked as failing answer with a transport error.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    pages: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, url: impl Into<String>, html: impl Into<String>) -> &Self {
        self.pages.lock().unwrap().insert(url.into(), html.into());
        self
    }

    pub fn fail(&self, url: impl Into<String>) -> &Self {
        self.failing.lock().unwrap().insert(url.into());
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }
}

impl HttpClient for MockHttpClient {
    fn get(&self, url: &str) -> Result<String, HttpClientError> {
        *self.hits.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
        if self.failing.lock().unwrap().contains(url) {
            return Err(HttpClientError::RequestError(format!("connection reset by {}", url)));
        }
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| HttpClientError::NotFound(url.to_string()))
    }

    fn clone_box(&self) -> Box<dyn HttpClient> {
        Box::new(self.clone())
    }
}

pub fn wiki(client: &MockHttpClient) -> LyricWiki {
    LyricWiki::new(Box::new(client.clone()), WIKI)
}

/// Chart history held in memory, newest week first
pub struct MemoryChartProvider {
    chart_id: String,
    weeks: Vec<Vec<(String, String)>>,
    pub requests: Mutex<Vec<String>>,
}

impl MemoryChartProvider {
    pub fn new(chart_id: &str, weeks: &[&[(&str, &str)]]) -> Self {
        Self {
            chart_id: chart_id.to_string(),
            weeks: weeks
                .iter()
                .map(|week| week.iter().map(|(a, t)| (a.to_string(), t.to_string())).collect())
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn latest() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 6, 1).unwrap()
    }

    fn snapshot(&self, index: usize) -> ChartSnapshot {
        ChartSnapshot {
            chart_id: self.chart_id.clone(),
            date: Some(Self::latest() - chrono::Duration::days(7 * index as i64)),
            entries: self.weeks[index]
                .iter()
                .enumerate()
                .map(|(rank, (artist, title))| ChartEntry::new(rank as u32 + 1, artist.as_str(), title.as_str()))
                .collect(),
        }
    }
}

impl ChartProvider for MemoryChartProvider {
    fn current(&self, chart_id: &str) -> Result<ChartSnapshot, ChartError> {
        self.requests.lock().unwrap().push(chart_id.to_string());
        if chart_id != self.chart_id || self.weeks.is_empty() {
            return Err(ChartError::Layout(format!("no chart '{}'", chart_id)));
        }
        Ok(self.snapshot(0))
    }

    fn previous(&self, snapshot: &ChartSnapshot) -> Result<Option<ChartSnapshot>, ChartError> {
        let Some(date) = snapshot.date else {
            return Ok(None);
        };
        let index = ((Self::latest() - date).num_days() / 7) as usize + 1;
        if index < self.weeks.len() {
            Ok(Some(self.snapshot(index)))
        } else {
            Ok(None)
        }
    }
}

pub fn artist_page(albums: &[(&str, &str)]) -> String {
    let sections: String = albums
        .iter()
        .map(|(title, href)| {
            format!(
                r#"<h2><span class="mw-headline" id="x"><a href="{}" title="{}">{}</a></span></h2>"#,
                href, title, title
            )
        })
        .collect();
    format!("<html><body><h2><span class=\"mw-headline\">Other Songs</span></h2>{}</body></html>", sections)
}

pub fn album_page(tracks: &[(&str, &str)]) -> String {
    let items: String = tracks
        .iter()
        .map(|(title, href)| format!(r#"<li><b><a href="{}" title="x">{}</a></b></li>"#, href, title))
        .collect();
    format!(r#"<html><body><div class="mw-content-text"><ol>{}</ol></div></body></html>"#, items)
}

pub fn song_page(lines: &[&str]) -> String {
    format!(
        r#"<html><body><div class="lyricbox">{}</div></body></html>"#,
        lines.join("<br>")
    )
}

pub fn search_page(href: &str) -> String {
    format!(
        r#"<html><body><ul><li class="result"><a class="result-link" href="{}">hit</a></li></ul></body></html>"#,
        href
    )
}

pub fn empty_search_page() -> String {
    "<html><body><p>No results</p></body></html>".to_string()
}
