use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use env_logger::fmt::Formatter;
use env_logger::{Builder, Target, WriteStyle};
use log::{debug, info, LevelFilter, Record};
use serde::{Deserialize, Serialize};

/// Parts of lyricscorpora whose log level can be set on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoggingSubsystem {
    /// Command line driver
    #[serde(rename = "main")]
    Main,
    /// HTTP client and retries
    #[serde(rename = "http")]
    Http,
    /// Lyrics wiki lookups and page parsing
    #[serde(rename = "lyrics")]
    Lyrics,
    /// Chart pages and the chart walk
    #[serde(rename = "chart")]
    Chart,
    /// Entities, corpus assembly and corpus files
    #[serde(rename = "corpus")]
    Corpus,
    /// Configuration loading
    #[serde(rename = "config")]
    Config,
    /// Third-party dependencies
    #[serde(rename = "deps")]
    Dependencies,
}

impl LoggingSubsystem {
    /// Get the module prefix for this subsystem
    pub fn module_prefix(&self) -> &'static str {
        match self {
            LoggingSubsystem::Main => "lyricscorpora",
            LoggingSubsystem::Http => "lyricscorpora::helpers::http_client,lyricscorpora::helpers::retry,ureq",
            LoggingSubsystem::Lyrics => "lyricscorpora::helpers::lyrics,lyricscorpora::helpers::wiki",
            LoggingSubsystem::Chart => {
                "lyricscorpora::helpers::billboard,lyricscorpora::helpers::artistsplitter,lyricscorpora::corpus::chart,lyricscorpora::corpus::genre"
            }
            LoggingSubsystem::Corpus => {
                "lyricscorpora::data,lyricscorpora::corpus::library,lyricscorpora::corpus::report,lyricscorpora::helpers::corpus_store"
            }
            LoggingSubsystem::Config => "lyricscorpora::config",
            LoggingSubsystem::Dependencies => "rustls,html5ever,selectors",
        }
    }

    pub fn all() -> Vec<LoggingSubsystem> {
        vec![
            LoggingSubsystem::Main,
            LoggingSubsystem::Http,
            LoggingSubsystem::Lyrics,
            LoggingSubsystem::Chart,
            LoggingSubsystem::Corpus,
            LoggingSubsystem::Config,
            LoggingSubsystem::Dependencies,
        ]
    }

    fn parse(name: &str) -> Option<LoggingSubsystem> {
        match name.to_lowercase().as_str() {
            "main" => Some(LoggingSubsystem::Main),
            "http" => Some(LoggingSubsystem::Http),
            "lyrics" => Some(LoggingSubsystem::Lyrics),
            "chart" => Some(LoggingSubsystem::Chart),
            "corpus" => Some(LoggingSubsystem::Corpus),
            "config" => Some(LoggingSubsystem::Config),
            "deps" | "dependencies" => Some(LoggingSubsystem::Dependencies),
            _ => None,
        }
    }
}

/// Where log records are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    Stdout,
    /// Default; stdout carries the corpus text
    #[default]
    Stderr,
    /// Append to `file_path`
    File,
}

/// Logging section of the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level (off, error, warn, info, debug, trace)
    pub level: String,
    pub target: LogTarget,
    pub file_path: Option<String>,
    pub timestamps: bool,
    pub colors: bool,
    /// Per-subsystem levels; names that are not subsystems are taken as module paths
    pub subsystems: HashMap<String, String>,
    pub include_module_path: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            target: LogTarget::default(),
            file_path: None,
            timestamps: true,
            colors: true,
            subsystems: HashMap::new(),
            include_module_path: false,
        }
    }
}

fn level_filter(level: &str) -> LevelFilter {
    level.parse().unwrap_or_else(|_| {
        eprintln!("Warning: Unknown log level '{}', using 'info'", level);
        LevelFilter::Info
    })
}

fn write_record(buf: &mut Formatter, record: &Record, timestamps: bool, module_path: bool) -> io::Result<()> {
    if timestamps {
        write!(buf, "[{}] ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    }
    write!(buf, "[{}] ", record.level())?;
    if let (true, Some(module)) = (module_path, record.module_path()) {
        write!(buf, "[{}] ", module)?;
    }
    writeln!(buf, "{}", record.args())
}

impl LoggingConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid logging configuration: {}", e))
    }

    /// (module, level) pairs for every configured subsystem, sorted
    fn module_levels(&self) -> Vec<(String, String)> {
        let mut levels: Vec<(String, String)> = self
            .subsystems
            .iter()
            .flat_map(|(name, level)| {
                let modules: Vec<String> = match LoggingSubsystem::parse(name) {
                    Some(subsystem) => subsystem.module_prefix().split(',').map(|m| m.trim().to_string()).collect(),
                    None => vec![name.clone()],
                };
                modules.into_iter().map(move |module| (module, level.clone()))
            })
            .collect();
        levels.sort();
        levels
    }

    /// The configured levels in `RUST_LOG` syntax
    pub fn build_filter_string(&self) -> String {
        std::iter::once(self.level.clone())
            .chain(self.module_levels().into_iter().map(|(module, level)| format!("{}={}", module, level)))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn open_log_file(&self) -> Result<File, String> {
        let path = self
            .file_path
            .as_deref()
            .ok_or_else(|| "Log target 'file' needs a file_path".to_string())?;
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| format!("Cannot create log directory {}: {}", parent.display(), e))?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("Cannot open log file {}: {}", path, e))
    }

    /// Install the global logger
    ///
    /// `RUST_LOG`, when set, overrides the configured levels.
    pub fn initialize_logger(&self) -> Result<(), String> {
        let mut builder = Builder::new();
        builder.filter_level(level_filter(&self.level));
        for (module, level) in self.module_levels() {
            builder.filter_module(&module, level_filter(&level));
        }
        builder.parse_env("RUST_LOG");
        builder.write_style(if self.colors { WriteStyle::Auto } else { WriteStyle::Never });

        match self.target {
            LogTarget::Stdout => {
                builder.target(Target::Stdout);
            }
            LogTarget::Stderr => {
                builder.target(Target::Stderr);
            }
            LogTarget::File => {
                builder.target(Target::Pipe(Box::new(self.open_log_file()?)));
                builder.write_style(WriteStyle::Never);
            }
        }

        let (timestamps, module_path) = (self.timestamps, self.include_module_path);
        builder.format(move |buf, record| write_record(buf, record, timestamps, module_path));
        builder.try_init().map_err(|e| format!("Logger already initialized: {}", e))?;

        debug!("Logging initialized with filter: {}", self.build_filter_string());
        Ok(())
    }
}

/// Initialize logging from an optional configuration, falling back to defaults
///
/// `verbose` raises the global level to debug.
pub fn initialize_logging(config: Option<&LoggingConfig>, verbose: bool) -> Result<(), String> {
    let mut config = config.cloned().unwrap_or_default();
    if verbose {
        config.level = "debug".to_string();
    }
    config.initialize_logger()?;
    if verbose {
        info!("Debug logging enabled from the command line");
    }
    Ok(())
}
