//! The drawing surface badges are composed onto.
//!
//! Layout code never talks to a PDF directly. It draws against a [`Canvas`]:
//! a page-at-a-time surface with a transform stack, where every translation or
//! scale is relative to whatever the caller set up. Nesting is always done
//! through [`SavedState`], so a sibling never inherits a transform left behind
//! by the badge drawn before it, even when drawing bails out early with an error.
//!
//! Two canvases ship with the crate:
//!
//! - [`PdfCanvas`](crate::PdfCanvas) collects finished sheets into a
//!   [`Document`](crate::Document) using embedded fonts
//! - [`RecordingCanvas`](crate::RecordingCanvas) records what would be drawn, in
//!   absolute page coordinates, measuring text with a monospaced model

mod pdf;
mod recording;

pub use pdf::*;
pub use recording::*;

use crate::colour::Colour;
use crate::rect::{Point, Rect};
use crate::units::Pt;
use std::ops::{Deref, DerefMut};

/// A page-oriented drawing backend with a transform stack
pub trait Canvas {
    /// How the backend refers to a resolved typeface
    type Font: Copy;

    /// Measure a single line of text, returning its advance width and its
    /// height above the baseline
    fn measure_text(&self, text: &str, font: Self::Font, size: Pt) -> (Pt, Pt);

    /// Start a new, empty page. Any page in progress is abandoned.
    fn begin_page(&mut self, width: Pt, height: Pt);

    /// Finish the page in progress, making it part of the output
    fn finish_page(&mut self);

    fn fill_rect(&mut self, rect: Rect, colour: Colour);

    /// Fill a closed polygon
    fn fill_polygon(&mut self, points: &[Point], colour: Colour);

    fn stroke_line(&mut self, from: Point, to: Point, width: Pt, colour: Colour);

    /// Draw a line of text with its baseline starting at `origin`
    fn draw_text(&mut self, text: &str, origin: Point, font: Self::Font, size: Pt, colour: Colour);

    fn push_transform(&mut self);

    fn pop_transform(&mut self);

    /// Move the origin of the current coordinate system
    fn translate(&mut self, dx: Pt, dy: Pt);

    /// Uniformly scale the current coordinate system
    fn scale(&mut self, factor: f32);
}

/// A pushed transform that is popped again when dropped.
///
/// The guard dereferences to the canvas, so nested drawing goes through it:
///
/// ```
/// use badge_gen::{Canvas, RecordingCanvas, SavedState, Pt};
///
/// let mut canvas = RecordingCanvas::default();
/// canvas.begin_page(Pt(100.0), Pt(100.0));
/// {
///     let mut inner = SavedState::new(&mut canvas);
///     inner.translate(Pt(10.0), Pt(10.0));
/// }
/// assert_eq!(canvas.depth(), 0);
/// ```
pub struct SavedState<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
}

impl<'a, C: Canvas + ?Sized> SavedState<'a, C> {
    pub fn new(canvas: &'a mut C) -> Self {
        canvas.push_transform();
        SavedState { canvas }
    }
}

impl<C: Canvas + ?Sized> Deref for SavedState<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for SavedState<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for SavedState<'_, C> {
    fn drop(&mut self) {
        self.canvas.pop_transform();
    }
}
