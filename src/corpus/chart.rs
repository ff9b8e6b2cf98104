//! Deduplicated song lists from weekly chart history

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::data::Song;
use crate::error::{CorporaError, Result};
use crate::helpers::artistsplitter::primary_artist;
use crate::helpers::billboard::{ChartProvider, ChartSnapshot};

/// Songs collected from a run of chart weeks
#[derive(Debug, Clone)]
pub struct ChartCollection {
    chart_id: String,
    weeks_walked: usize,
    songs: Vec<Song>,
}

impl ChartCollection {
    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    /// Number of weekly snapshots actually read; less than requested when the history ran out
    pub fn weeks_walked(&self) -> usize {
        self.weeks_walked
    }

    /// Songs in order of first appearance, newest week first
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn songs_mut(&mut self) -> &mut [Song] {
        &mut self.songs
    }

    pub fn into_songs(self) -> Vec<Song> {
        self.songs
    }

    /// Primary artists of the collected songs, each once, in order of first appearance
    pub fn artists(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.songs
            .iter()
            .filter(|song| seen.insert(song.artist()))
            .map(|song| song.artist().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// Walks a chart backwards in time and collects its songs
pub struct ChartCollector<'a> {
    provider: &'a dyn ChartProvider,
}

impl<'a> ChartCollector<'a> {
    pub fn new(provider: &'a dyn ChartProvider) -> Self {
        Self { provider }
    }

    /// Collect the songs of `total_weeks` weeks of a chart, starting with the latest
    ///
    /// Artist credits are reduced to the primary artist and each
    /// (artist, title) pair is kept once. The walk stops early when the chart
    /// has no earlier week, or when an earlier week cannot be fetched.
    ///
    /// # Arguments
    /// * `total_weeks` - Number of weeks to read, at least 1
    /// * `chart_id` - Chart name such as `hot-100`
    pub fn collect(&self, total_weeks: usize, chart_id: &str) -> Result<ChartCollection> {
        if total_weeks == 0 {
            return Err(CorporaError::InvalidArgument(
                "the number of chart weeks must be at least 1".to_string(),
            ));
        }

        let mut collection = ChartCollection {
            chart_id: chart_id.to_string(),
            weeks_walked: 0,
            songs: Vec::new(),
        };
        let mut seen: HashSet<Song> = HashSet::new();

        let mut snapshot = self.provider.current(chart_id)?;
        loop {
            let added = Self::add_week(&snapshot, &mut collection.songs, &mut seen);
            collection.weeks_walked += 1;
            debug!(
                "Chart '{}' week {}: {} entries, {} new songs",
                chart_id,
                collection.weeks_walked,
                snapshot.entries.len(),
                added
            );

            if collection.weeks_walked >= total_weeks {
                break;
            }
            snapshot = match self.provider.previous(&snapshot) {
                Ok(Some(previous)) => previous,
                Ok(None) => {
                    info!(
                        "Chart '{}' history ends after {} of {} weeks",
                        chart_id, collection.weeks_walked, total_weeks
                    );
                    break;
                }
                Err(e) => {
                    warn!(
                        "Stopping chart '{}' after {} of {} weeks: {}",
                        chart_id, collection.weeks_walked, total_weeks, e
                    );
                    break;
                }
            };
        }

        info!(
            "Collected {} songs from {} weeks of chart '{}'",
            collection.len(),
            collection.weeks_walked,
            chart_id
        );
        Ok(collection)
    }

    fn add_week(snapshot: &ChartSnapshot, songs: &mut Vec<Song>, seen: &mut HashSet<Song>) -> usize {
        let mut added = 0;
        for entry in &snapshot.entries {
            let song = Song::new(entry.title.as_str(), primary_artist(&entry.artist));
            if seen.insert(song.clone()) {
                songs.push(song);
                added += 1;
            }
        }
        added
    }
}
