use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{debug, error, info, warn};

use lyricscorpora::corpus::{ChartCollector, Genre, LyricsLibrary};
use lyricscorpora::error::{CorporaError, Result};
use lyricscorpora::helpers::billboard::{BillboardChartProvider, DEFAULT_CHART};
use lyricscorpora::helpers::CorpusStore;
use lyricscorpora::logging::initialize_logging;
use lyricscorpora::{CorporaConfig, LyricWiki};

fn command() -> Command {
    Command::new("lyricscorpora")
        .about("Builds lyrics corpora for artists, genres and charts")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("artist")
                .short('a')
                .long("artist")
                .value_name("NAME")
                .help("Artist whose lyrics corpus to build"),
        )
        .arg(
            Arg::new("title")
                .short('t')
                .long("title")
                .value_name("TITLE")
                .requires("artist")
                .help("Only print the lyrics of this song by --artist"),
        )
        .arg(
            Arg::new("genre")
                .short('g')
                .long("genre")
                .value_name("GENRE")
                .help("Genre whose chart songs make up the corpus (see --genrelist)"),
        )
        .arg(
            Arg::new("genrelist")
                .short('l')
                .long("genrelist")
                .action(ArgAction::SetTrue)
                .help("List the accepted genres"),
        )
        .arg(
            Arg::new("billboardchart")
                .short('b')
                .long("billboardchart")
                .value_name("WEEKS")
                .value_parser(value_parser!(usize))
                .help("Build a corpus from this many weeks of chart history"),
        )
        .arg(
            Arg::new("chart")
                .long("chart")
                .value_name("ID")
                .default_value(DEFAULT_CHART)
                .help("Chart read by --billboardchart"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("save")
                .long("save")
                .action(ArgAction::SetTrue)
                .help("Save the corpus to <corpus_dir>/<name>Text.txt"),
        )
        .arg(
            Arg::new("cached")
                .long("cached")
                .action(ArgAction::SetTrue)
                .help("Use a saved corpus instead of fetching when there is one"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
}

struct Run {
    config: CorporaConfig,
    store: CorpusStore,
    save: bool,
    cached: bool,
}

impl Run {
    fn library(&self) -> LyricsLibrary {
        let wiki = LyricWiki::new(self.config.http_client(), &self.config.lyricwiki_base_url());
        LyricsLibrary::new(wiki)
    }

    fn chart_provider(&self) -> BillboardChartProvider {
        BillboardChartProvider::new(self.config.http_client(), &self.config.billboard_base_url())
    }

    /// Corpus text under `name`, read from the store when allowed, otherwise built
    fn corpus<F>(&self, name: &str, build: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if self.cached && self.store.exists(name) {
            info!("Using saved corpus '{}'", name);
            return Ok(self.store.retrieve(name)?);
        }
        let text = build()?;
        if self.save {
            if let Err(e) = self.store.save(name, &text) {
                warn!("Could not save corpus '{}' to {}: {}", name, self.store.dir().display(), e);
            }
        }
        Ok(text)
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = CorporaConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Err(e) = initialize_logging(config.logging.as_ref(), matches.get_flag("verbose")) {
        eprintln!("Warning: {}", e);
    }
    debug!("Configuration: {:?}", config);

    let run = Run {
        store: CorpusStore::new(config.corpus_dir.clone()),
        config,
        save: matches.get_flag("save"),
        cached: matches.get_flag("cached"),
    };

    if let Some(artist) = matches.get_one::<String>("artist") {
        let mut library = run.library();
        if let Some(title) = matches.get_one::<String>("title") {
            let lyrics = library.song_lyrics(artist, title);
            if lyrics.is_empty() {
                warn!("No lyrics found for '{}' by {}", title, artist);
            }
            println!("{}", lyrics);
        } else {
            let text = run.corpus(artist, || Ok(library.artist_corpus(artist).into_text()))?;
            println!("{}", text);
        }
    } else if let Some(genre_id) = matches.get_one::<String>("genre") {
        Genre::validate(genre_id)?;
        let text = run.corpus(genre_id, || {
            let mut genre = Genre::resolve(genre_id, &run.chart_provider())?;
            info!("Genre '{}' has {} artists", genre.id(), genre.artists().len());
            Ok(run.library().songs_corpus(genre_id, genre.songs_mut()).into_text())
        })?;
        println!("{}", text);
    } else if matches.get_flag("genrelist") {
        for genre in Genre::genre_list() {
            println!("{}", genre);
        }
    } else if let Some(&weeks) = matches.get_one::<usize>("billboardchart") {
        let chart_id = matches
            .get_one::<String>("chart")
            .map(String::as_str)
            .unwrap_or(DEFAULT_CHART);
        let text = run.corpus(chart_id, || {
            let provider = run.chart_provider();
            let mut collection = ChartCollector::new(&provider).collect(weeks, chart_id)?;
            Ok(run.library().songs_corpus(chart_id, collection.songs_mut()).into_text())
        })?;
        println!("{}", text);
    } else {
        return Err(CorporaError::InvalidArgument(
            "nothing to do, use --artist, --genre, --genrelist or --billboardchart (see --help)".to_string(),
        ));
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = command().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn run_in(dir: &std::path::Path, save: bool, cached: bool) -> Run {
        Run {
            config: CorporaConfig::default(),
            store: CorpusStore::new(dir),
            save,
            cached,
        }
    }

    #[test]
    fn test_command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn test_chart_defaults_to_hot_100() {
        let matches = command().get_matches_from(["lyricscorpora", "-b", "3"]);
        assert_eq!(matches.get_one::<usize>("billboardchart"), Some(&3));
        assert_eq!(matches.get_one::<String>("chart").map(String::as_str), Some("hot-100"));
    }

    #[test]
    fn test_title_needs_artist() {
        assert!(command().try_get_matches_from(["lyricscorpora", "-t", "One Dance"]).is_err());
        assert!(command()
            .try_get_matches_from(["lyricscorpora", "-a", "Drake", "-t", "One Dance"])
            .is_ok());
    }

    #[test]
    fn test_weeks_must_be_a_number() {
        assert!(command().try_get_matches_from(["lyricscorpora", "-b", "many"]).is_err());
    }

    #[test]
    fn test_nothing_selected_is_an_error() {
        let matches = command().get_matches_from(["lyricscorpora", "-c", "/nonexistent/lyricscorpora.json"]);
        assert!(matches!(run(&matches), Err(CorporaError::InvalidArgument(_))));
    }

    #[test]
    fn test_unknown_genre_fails_before_fetching() {
        let matches = command().get_matches_from(["lyricscorpora", "-g", "polka"]);
        assert!(matches!(run(&matches), Err(CorporaError::InvalidGenre { .. })));
    }

    #[test]
    fn test_cached_corpus_skips_building() {
        let dir = TempDir::new().unwrap();
        let run = run_in(dir.path(), false, true);
        run.store.save("Drake", "stored lyrics").unwrap();

        let calls = Cell::new(0);
        let text = run
            .corpus("Drake", || {
                calls.set(calls.get() + 1);
                Ok("fresh lyrics".to_string())
            })
            .unwrap();
        assert_eq!(text, "stored lyrics");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_cached_without_saved_corpus_builds() {
        let dir = TempDir::new().unwrap();
        let run = run_in(dir.path(), false, true);
        let calls = Cell::new(0);
        let text = run
            .corpus("Adele", || {
                calls.set(calls.get() + 1);
                Ok("fresh lyrics".to_string())
            })
            .unwrap();
        assert_eq!(text, "fresh lyrics");
        assert_eq!(calls.get(), 1);
        assert!(!dir.path().join("AdeleText.txt").exists());
    }

    #[test]
    fn test_save_writes_corpus_file() {
        let dir = TempDir::new().unwrap();
        let run = run_in(dir.path(), true, false);
        let text = run.corpus("Drake", || Ok("fresh lyrics".to_string())).unwrap();
        assert_eq!(text, "fresh lyrics");
        let saved = std::fs::read_to_string(dir.path().join("DrakeText.txt")).unwrap();
        assert_eq!(saved, "fresh lyrics");
    }

    #[test]
    fn test_failed_save_still_returns_corpus() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let run = run_in(&blocker, true, false);
        let text = run.corpus("AC/DC", || Ok("Highway to hell".to_string())).unwrap();
        assert_eq!(text, "Highway to hell");
    }

    #[test]
    fn test_build_error_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let run = run_in(dir.path(), true, false);
        let result = run.corpus("Drake", || Err(CorporaError::InvalidArgument("no weeks".to_string())));
        assert!(matches!(result, Err(CorporaError::InvalidArgument(_))));
        assert!(!run.store.exists("Drake"));
    }
}
