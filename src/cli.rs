use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use facet::output::OutputFormat;
use log::LevelFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Png,
    Ppm,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => OutputFormat::Png,
            Format::Ppm => OutputFormat::Ppm,
        }
    }
}

/// Renders every variant of a model described by a TOML file.
///
/// Options given here take precedence over the config file.
#[derive(Debug, Parser)]
#[command(name = "facet", version, about = "Flat-shaded mesh ray caster")]
pub struct Args {
    /// Render description; the built-in demo batch is used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// OBJ or STL model to render
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Directory receiving one image per variant
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Image file format
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info, help = "Set the logging level")]
    pub debug_level: LogLevel,
}
