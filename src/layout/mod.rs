//! Fitting names into boxes.
//!
//! A name is broken into one line per word (and per hyphenated fragment), every
//! line is scaled independently so it spans the box width, and the resulting
//! block is centred vertically, or shrunk as a whole when it is too tall.
//!
//! ```
//! use badge_gen::layout::{split_lines, TextFitter};
//! use badge_gen::{FitConfig, MonoFont, Pt, RecordingCanvas};
//!
//! assert_eq!(split_lines("Mary-Kate Olsen"), ["Mary-", "Kate", "Olsen"]);
//!
//! let config = FitConfig::default();
//! let canvas = RecordingCanvas::default();
//! let layout = TextFitter::new(&config).fit(&canvas, MonoFont::default(), "Ada Lovelace", Pt(200.0), Pt(120.0));
//! assert_eq!(layout.lines.len(), 2);
//! assert!(layout.total_text_height > Pt(0.0));
//! ```

mod fit;
mod margins;

pub use fit::*;
pub use margins::*;
