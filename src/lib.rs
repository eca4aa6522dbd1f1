//! Name badges with names scaled to fill their box, a jagged hand-drawn frame,
//! and sheets of them tiled for printing with crop marks.
//!
//! The pieces, from the bottom up:
//!
//! - [`layout::TextFitter`] breaks a name into lines and scales each to span the box
//! - [`Frame`] generates the jittered outline drawn behind the text
//! - [`Badge`] composes background, frame, company and name onto a [`Canvas`]
//! - [`SheetTiler`] lays badges out in a grid over as many sheets as needed
//! - [`render_document`] resolves fonts and produces a PDF [`Document`]
//!
//! ```
//! use badge_gen::{render, BadgeStyle, Config, Entry, MonoFont, RecordingCanvas};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let config = Config::default();
//! let style = BadgeStyle::new(&config, MonoFont::default(), MonoFont::default());
//! let entries = vec![Entry::new("Jane Q. Public", Some("Acme"))];
//!
//! let mut canvas = RecordingCanvas::default();
//! let report = render(&mut canvas, &entries, &style, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert_eq!((report.pages, report.badges), (1, 2));
//! ```

mod badge;
pub use badge::*;

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod content;

mod data;
pub use data::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod font_book;
pub use font_book::*;

mod frame;
pub use frame::*;

mod info;
pub use info::*;

/// Fitting names into boxes
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod render;
pub use render::*;

mod sheet;
pub use sheet::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
