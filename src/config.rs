//! Run configuration.
//!
//! Every knob the layout uses lives here and is passed down explicitly; nothing
//! reads global state. A [Config] deserializes from JSON with every field
//! optional, so a file only needs to mention what it changes:
//!
//! ```
//! let config: badge_gen::Config = serde_json::from_str(r##"{
//!     "sheet": { "size": "a4", "multiplicity": 1 },
//!     "palette": { "background": "#000000" }
//! }"##).expect("valid config");
//! assert_eq!(config.sheet.multiplicity, 1);
//! assert_eq!(config.fit.max_multiplier, 10.0);
//! ```
//!
//! The text-fitting defaults (descender set, descender ratio, trailing
//! padding, line spacing, reference line height) were tuned by eye for one particular display face.
//! They are starting points, not truths: retargeting to another typeface
//! usually means adjusting them.

use crate::colour::{colours, Colour};
use crate::pagesize::{self, PageOrientation};
use crate::units::Pt;
use crate::BadgeError;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub fonts: FontConfig,
    pub palette: Palette,
    pub badge: BadgeConfig,
    pub sheet: SheetConfig,
    pub frame: FrameConfig,
    pub fit: FitConfig,
    pub data: DataConfig,
}

/// Which typefaces to draw with, and where to look for them
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Font for attendee names: a full name, family, PostScript name, or a path to a font file
    pub name: String,
    /// Font for the company line
    pub company: String,
    /// Tried in order when `name` isn't installed
    pub name_fallbacks: Vec<String>,
    /// Tried in order when `company` isn't installed
    pub company_fallbacks: Vec<String>,
    /// Directories searched (recursively) for fonts, ahead of the system's
    pub dirs: Vec<PathBuf>,
    /// Also use the fonts installed on the system
    pub system: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            name: "StillaSHOP-Regular".into(),
            company: "StorkText-Regular".into(),
            name_fallbacks: vec![
                "Georgia-BoldItalic".into(),
                "DejaVuSerif-BoldItalic".into(),
                "LiberationSerif-BoldItalic".into(),
                "DejaVu Sans".into(),
            ],
            company_fallbacks: vec![
                "Georgia".into(),
                "DejaVuSerif".into(),
                "LiberationSerif-Regular".into(),
                "DejaVu Sans".into(),
            ],
            dirs: Vec::new(),
            system: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Attendee names
    pub text: Colour,
    /// Badge and sheet background; `null` leaves the paper bare
    pub background: Option<Colour>,
    /// The jagged frame behind the text
    pub frame: Colour,
    /// The company line; defaults to the background colour, knocked out of the frame
    pub company: Option<Colour>,
    pub crop_marks: Colour,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            text: colours::SIGNAL_RED,
            background: Some(colours::SKY_BLUE),
            frame: colours::SUNSHINE,
            company: None,
            crop_marks: colours::WHITE,
        }
    }
}

impl Palette {
    pub fn company_colour(&self) -> Colour {
        self.company.or(self.background).unwrap_or(self.text)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BadgeConfig {
    pub width: Pt,
    pub height: Pt,
    /// Paint the box the name is fitted into, for tuning layouts
    pub debug_boxes: bool,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        BadgeConfig {
            width: pagesize::BADGE.0,
            height: pagesize::BADGE.1,
            debug_boxes: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    pub width: Pt,
    pub height: Pt,
    /// A named paper size; overrides `width` and `height` when set
    pub size: Option<String>,
    pub landscape: bool,
    /// Space kept clear around the grid of badges; crop marks are drawn inside it
    pub margin: Pt,
    /// Copies of each badge placed side by side (2 folds into a double-sided badge)
    pub multiplicity: usize,
    pub crop_mark_width: Pt,
    /// Start the document with a single badge-sized sample page
    pub preview: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            width: pagesize::LETTER.0,
            height: pagesize::LETTER.1,
            size: None,
            landscape: false,
            margin: Pt(0.25 * 72.0),
            multiplicity: 2,
            crop_mark_width: Pt(1.0),
            preview: false,
        }
    }
}

impl SheetConfig {
    /// The sheet's (width, height) after resolving `size` and `landscape`
    pub fn dimensions(&self) -> Result<(Pt, Pt), BadgeError> {
        let size = match &self.size {
            Some(name) => pagesize::by_name(name)
                .ok_or_else(|| BadgeError::InvalidConfig(format!("unknown sheet size `{name}`")))?,
            None => (self.width, self.height),
        };
        Ok(if self.landscape {
            size.landscape()
        } else {
            size
        })
    }
}

/// Shape of the hand-drawn frame
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    /// Fewest segments per side (inclusive)
    pub segments_min: u32,
    /// Most segments per side (exclusive)
    pub segments_max: u32,
    /// How far vertices wander across each side
    pub perpendicular_jitter: Pt,
    /// How far vertices wander along each side
    pub parallel_jitter: Pt,
    /// Seed for reproducible frames; entropy when absent
    pub seed: Option<u64>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        FrameConfig {
            segments_min: 4,
            segments_max: 6,
            perpendicular_jitter: Pt(2.0),
            parallel_jitter: Pt(10.0),
            seed: None,
        }
    }
}

/// Knobs of the name fitting algorithm
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitConfig {
    /// Space added between consecutive lines of a name
    pub line_spacing: Pt,
    /// Size every line is first measured at
    pub reference_size: Pt,
    /// Height every line is taken to have at the reference size, whatever the
    /// face's own ascent
    pub reference_line_height: Pt,
    /// Upper bound on how much a line may be enlarged from the reference size
    pub max_multiplier: f32,
    /// Characters whose descenders need extra room below the line
    pub descenders: String,
    /// Extra room below a line with descenders, as a fraction of its point size
    pub descender_ratio: f32,
    /// Characters whose overhang needs padding when they end a line
    pub trailing_padding_chars: String,
    /// What gets appended after such a character
    pub trailing_padding: String,
}

impl Default for FitConfig {
    fn default() -> Self {
        FitConfig {
            line_spacing: Pt(9.0),
            reference_size: Pt(10.0),
            reference_line_height: Pt(6.5),
            max_multiplier: 10.0,
            descenders: "QJfgjpqyz".into(),
            descender_ratio: 0.175,
            trailing_padding_chars: "f".into(),
            trailing_padding: "  ".into(),
        }
    }
}

/// How the badge data file is delimited
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    pub delimiter: char,
    pub quote: char,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            delimiter: ',',
            quote: '"',
        }
    }
}

fn invalid(message: impl Into<String>) -> BadgeError {
    BadgeError::InvalidConfig(message.into())
}

impl Config {
    /// Load a configuration from a JSON file. Fields left out keep their defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config, BadgeError> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Check that every value is usable before any drawing starts
    pub fn validate(&self) -> Result<(), BadgeError> {
        if *self.badge.width <= 0.0 || *self.badge.height <= 0.0 {
            return Err(invalid("badge width and height must be positive"));
        }
        let (sheet_width, sheet_height) = self.sheet.dimensions()?;
        if *sheet_width <= 0.0 || *sheet_height <= 0.0 {
            return Err(invalid("sheet width and height must be positive"));
        }
        if *self.sheet.margin < 0.0 {
            return Err(invalid("sheet margin can't be negative"));
        }
        if self.sheet.multiplicity == 0 {
            return Err(invalid("multiplicity must be at least 1"));
        }
        if self.frame.segments_min < 2 {
            return Err(invalid("frames need at least 2 segments per side"));
        }
        if self.frame.segments_max < self.frame.segments_min {
            return Err(invalid("segments_max can't be below segments_min"));
        }
        if *self.frame.perpendicular_jitter < 0.0 || *self.frame.parallel_jitter < 0.0 {
            return Err(invalid("frame jitter can't be negative"));
        }
        if *self.fit.reference_size <= 0.0 || *self.fit.reference_line_height <= 0.0 {
            return Err(invalid("reference_size and reference_line_height must be positive"));
        }
        if self.fit.max_multiplier <= 0.0 {
            return Err(invalid("max_multiplier must be positive"));
        }
        if self.fit.descender_ratio < 0.0 || *self.fit.line_spacing < 0.0 {
            return Err(invalid("descender_ratio and line_spacing can't be negative"));
        }
        if !self.data.delimiter.is_ascii() || !self.data.quote.is_ascii() {
            return Err(invalid("delimiter and quote must be ASCII characters"));
        }
        Ok(())
    }
}
