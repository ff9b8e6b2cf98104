//! Weekly chart snapshots from billboard.com
//!
//! A chart is read one week at a time, newest first. Each snapshot knows its
//! week, so the week before is always `date - 7 days`; the walk ends when the
//! site has no page (or an empty page) for that week.

use chrono::{Duration, NaiveDate};
use log::{debug, info};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::helpers::http_client::{HttpClient, HttpClientError};

/// Default location of the chart site
pub const DEFAULT_CHART_BASE_URL: &str = "https://www.billboard.com";

/// Chart used when none is named
pub const DEFAULT_CHART: &str = "hot-100";

/// Error type for chart operations
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart request failed: {0}")]
    Http(#[from] HttpClientError),

    #[error("unexpected chart page layout: {0}")]
    Layout(String),
}

/// One ranked song on a chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    pub rank: u32,
    /// Artist credit as printed on the chart, possibly naming several artists
    pub artist: String,
    pub title: String,
}

impl ChartEntry {
    pub fn new(rank: u32, artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            rank,
            artist: artist.into(),
            title: title.into(),
        }
    }
}

/// A chart as published for one week
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    pub chart_id: String,
    /// Week of the chart; unknown dates end the walk
    pub date: Option<NaiveDate>,
    pub entries: Vec<ChartEntry>,
}

impl ChartSnapshot {
    /// Week before this one, if the week of this snapshot is known
    pub fn previous_date(&self) -> Option<NaiveDate> {
        self.date.map(|d| d - Duration::days(7))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source of weekly chart snapshots
pub trait ChartProvider {
    /// Most recent snapshot of a chart
    fn current(&self, chart_id: &str) -> Result<ChartSnapshot, ChartError>;

    /// Snapshot published the week before `snapshot`, or `None` when the history ends
    fn previous(&self, snapshot: &ChartSnapshot) -> Result<Option<ChartSnapshot>, ChartError>;
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("invalid built-in selector")
}

static ROW: Lazy<Selector> = Lazy::new(|| selector("ul.o-chart-results-list-row"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("#title-of-a-story"));
static ARTIST: Lazy<Selector> = Lazy::new(|| selector("#title-of-a-story + span.c-label"));
static RANK: Lazy<Selector> = Lazy::new(|| selector("span.c-label"));
static DATE: Lazy<Selector> = Lazy::new(|| selector("#chart-date-picker[data-date]"));

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parse a chart page into a snapshot
///
/// Rows missing a title or an artist are skipped. A row without a readable
/// rank gets its position on the page instead.
pub fn parse_chart_page(chart_id: &str, html: &str) -> Result<ChartSnapshot, ChartError> {
    let document = Html::parse_document(html);

    let date = match document.select(&DATE).next().and_then(|e| e.value().attr("data-date")) {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|e| ChartError::Layout(format!("bad chart date '{}': {}", raw, e)))?,
        ),
        None => None,
    };

    let mut entries = Vec::new();
    for (position, row) in document.select(&ROW).enumerate() {
        let title = row.select(&TITLE).next().map(text_of);
        let artist = row.select(&ARTIST).next().map(text_of);
        let (Some(title), Some(artist)) = (title, artist) else {
            debug!("Skipping chart row {} without title or artist", position + 1);
            continue;
        };
        let rank = row
            .select(&RANK)
            .next()
            .and_then(|e| text_of(e).parse::<u32>().ok())
            .unwrap_or(position as u32 + 1);
        entries.push(ChartEntry::new(rank, artist, title));
    }

    Ok(ChartSnapshot {
        chart_id: chart_id.to_string(),
        date,
        entries,
    })
}

/// Chart provider reading billboard.com chart pages
#[derive(Debug, Clone)]
pub struct BillboardChartProvider {
    client: Box<dyn HttpClient>,
    base_url: String,
}

impl BillboardChartProvider {
    pub fn new(client: Box<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of a chart page, for the latest week or a given one
    pub fn chart_url(&self, chart_id: &str, date: Option<NaiveDate>) -> String {
        match date {
            Some(date) => format!("{}/charts/{}/{}/", self.base_url, chart_id, date.format("%Y-%m-%d")),
            None => format!("{}/charts/{}/", self.base_url, chart_id),
        }
    }
}

impl ChartProvider for BillboardChartProvider {
    fn current(&self, chart_id: &str) -> Result<ChartSnapshot, ChartError> {
        let html = self.client.get(&self.chart_url(chart_id, None))?;
        let snapshot = parse_chart_page(chart_id, &html)?;
        if snapshot.is_empty() {
            return Err(ChartError::Layout(format!("no entries found on chart '{}'", chart_id)));
        }
        info!(
            "Loaded chart '{}' ({} entries, week of {})",
            chart_id,
            snapshot.len(),
            snapshot.date.map(|d| d.to_string()).unwrap_or_else(|| "unknown".to_string())
        );
        Ok(snapshot)
    }

    fn previous(&self, snapshot: &ChartSnapshot) -> Result<Option<ChartSnapshot>, ChartError> {
        let Some(date) = snapshot.previous_date() else {
            debug!("Chart '{}' has no known week, cannot step back", snapshot.chart_id);
            return Ok(None);
        };
        let html = match self.client.get(&self.chart_url(&snapshot.chart_id, Some(date))) {
            Ok(html) => html,
            Err(HttpClientError::NotFound(_)) => {
                debug!("Chart '{}' has no week {}", snapshot.chart_id, date);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let mut previous = parse_chart_page(&snapshot.chart_id, &html)?;
        if previous.is_empty() {
            debug!("Chart '{}' is empty for week {}", snapshot.chart_id, date);
            return Ok(None);
        }
        if previous.date.is_none() {
            previous.date = Some(date);
        }
        Ok(Some(previous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(rank: u32, title: &str, artist: &str) -> String {
        format!(
            r#"<ul class="o-chart-results-list-row">
                <li><span class="c-label">{}</span></li>
                <li><h3 id="title-of-a-story">{}</h3><span class="c-label">{}</span></li>
            </ul>"#,
            rank, title, artist
        )
    }

    fn page(date: &str, rows: &[String]) -> String {
        format!(
            r#"<html><body><div id="chart-date-picker" data-date="{}"></div>{}</body></html>"#,
            date,
            rows.join("\n")
        )
    }

    #[derive(Debug, Clone)]
    struct PageClient(HashMap<String, String>);

    impl HttpClient for PageClient {
        fn get(&self, url: &str) -> Result<String, HttpClientError> {
            self.0.get(url).cloned().ok_or_else(|| HttpClientError::NotFound(url.to_string()))
        }

        fn clone_box(&self) -> Box<dyn HttpClient> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn test_built_in_selectors_parse() {
        for sel in [&ROW, &TITLE, &ARTIST, &RANK, &DATE] {
            Lazy::force(sel);
        }
    }

    #[test]
    fn test_parse_chart_page() {
        let html = page(
            "2024-03-02",
            &[row(1, "Lovin On Me", "Jack Harlow"), row(2, "Texas Hold 'Em", "Beyonce")],
        );
        let snapshot = parse_chart_page("hot-100", &html).unwrap();
        assert_eq!(snapshot.date, NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(
            snapshot.entries,
            vec![
                ChartEntry::new(1, "Jack Harlow", "Lovin On Me"),
                ChartEntry::new(2, "Beyonce", "Texas Hold 'Em"),
            ]
        );
        assert_eq!(snapshot.previous_date(), NaiveDate::from_ymd_opt(2024, 2, 24));
    }

    #[test]
    fn test_parse_chart_page_rejects_bad_date() {
        let html = page("not-a-date", &[]);
        assert!(matches!(parse_chart_page("hot-100", &html), Err(ChartError::Layout(_))));
    }

    #[test]
    fn test_provider_walks_back_and_stops() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://b/charts/rock-songs/".to_string(),
            page("2024-03-02", &[row(1, "A", "X")]),
        );
        pages.insert(
            "https://b/charts/rock-songs/2024-02-24/".to_string(),
            page("2024-02-24", &[row(1, "B", "Y")]),
        );
        let provider = BillboardChartProvider::new(Box::new(PageClient(pages)), "https://b/");

        let current = provider.current("rock-songs").unwrap();
        assert_eq!(current.entries[0].title, "A");
        let previous = provider.previous(&current).unwrap().unwrap();
        assert_eq!(previous.entries[0].title, "B");
        assert!(provider.previous(&previous).unwrap().is_none());
    }

    #[test]
    fn test_empty_current_chart_is_an_error() {
        let mut pages = HashMap::new();
        pages.insert("https://b/charts/hot-100/".to_string(), page("2024-03-02", &[]));
        let provider = BillboardChartProvider::new(Box::new(PageClient(pages)), "https://b");
        assert!(provider.current("hot-100").is_err());
    }
}
