use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate. Layout degeneracies (missing
/// fonts with a usable fallback, zero-width lines, overflowing names,
/// malformed data rows) are recovered from and logged instead.
#[derive(Error, Debug)]
pub enum BadgeError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error("can't read badge data from {}: {source}", path.display())]
    /// The badge data file could not be opened or read
    DataSource {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    /// The badge data could not be decoded
    Csv(#[from] csv::Error),

    #[error("invalid configuration file: {0}")]
    /// The configuration file is not valid JSON for [Config](crate::Config)
    Config(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    /// A configuration value is out of its allowed range
    InvalidConfig(String),

    #[error("no usable font for `{requested}` (tried fallbacks: {})", fallbacks.join(", "))]
    /// Neither the requested font nor any of its fallbacks are installed
    FontUnavailable {
        requested: String,
        fallbacks: Vec<String>,
    },

    #[error("a {badge_width}x{badge_height}pt badge does not fit on a {sheet_width}x{sheet_height}pt sheet with {margin}pt margins")]
    /// Not a single badge fits within the sheet margins
    SheetTooSmall {
        badge_width: f32,
        badge_height: f32,
        sheet_width: f32,
        sheet_height: f32,
        margin: f32,
    },

    #[error("invalid dimensions {width}x{height}pt")]
    /// A badge or page was requested with a non-positive size
    InvalidDimensions { width: f32, height: f32 },

    #[error("page is missing from the document")]
    /// A page id in the page order does not refer to a stored page
    PageMissing,
}
