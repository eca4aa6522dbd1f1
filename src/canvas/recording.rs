use super::Canvas;
use crate::colour::Colour;
use crate::rect::{Point, Rect};
use crate::transform::Transform;
use crate::units::Pt;
use tracing::warn;

/// A font for the [RecordingCanvas]: every character has the same advance,
/// and the whole line is scaled uniformly with the point size
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MonoFont {
    /// Advance width of one character, as a fraction of the point size
    pub advance: f32,
    /// Height above the baseline, as a fraction of the point size
    pub ascent: f32,
}

impl Default for MonoFont {
    fn default() -> Self {
        MonoFont {
            advance: 0.6,
            ascent: 0.75,
        }
    }
}

/// A drawing operation as it lands on the page, in absolute page coordinates
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        /// The rectangle's corners, mapped to page space
        rect: Rect,
        colour: Colour,
    },
    FillPolygon {
        points: Vec<Point>,
        colour: Colour,
    },
    StrokeLine {
        from: Point,
        to: Point,
        width: Pt,
        colour: Colour,
    },
    Text {
        text: String,
        origin: Point,
        font: MonoFont,
        /// The point size after every enclosing scale is applied
        size: Pt,
        colour: Colour,
    },
}

/// One finished page of a [RecordingCanvas]
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedPage {
    pub width: Pt,
    pub height: Pt,
    pub ops: Vec<DrawOp>,
}

impl RecordedPage {
    /// The text drawn on this page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, Pt)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text {
                text, origin, size, ..
            } => Some((text.as_str(), *origin, *size)),
            _ => None,
        })
    }

    /// Every polygon drawn on this page
    pub fn polygons(&self) -> impl Iterator<Item = &[Point]> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillPolygon { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    /// Every stroked line on this page
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::StrokeLine { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }
}

/// A [Canvas] that writes nothing, recording each operation with the
/// transform stack already resolved. Handy for dry runs and for checking
/// where things land without parsing a PDF back.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pages: Vec<RecordedPage>,
    current: Option<RecordedPage>,
    ctm: Transform,
    stack: Vec<Transform>,
    abandoned: usize,
}

impl RecordingCanvas {
    /// Pages that were finished, in order
    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    /// Number of pages started but never finished
    pub fn abandoned_pages(&self) -> usize {
        self.abandoned
    }

    /// Number of transforms currently pushed
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn record(&mut self, op: DrawOp) {
        match self.current.as_mut() {
            Some(page) => page.ops.push(op),
            None => warn!("drawing outside of a page is ignored: {op:?}"),
        }
    }
}

impl Canvas for RecordingCanvas {
    type Font = MonoFont;

    fn measure_text(&self, text: &str, font: MonoFont, size: Pt) -> (Pt, Pt) {
        let chars = text.chars().count() as f32;
        (size * (chars * font.advance), size * font.ascent)
    }

    fn begin_page(&mut self, width: Pt, height: Pt) {
        if self.current.is_some() {
            self.abandoned += 1;
        }
        self.current = Some(RecordedPage {
            width,
            height,
            ops: Vec::new(),
        });
        self.ctm = Transform::identity();
        self.stack.clear();
    }

    fn finish_page(&mut self) {
        match self.current.take() {
            Some(page) => self.pages.push(page),
            None => warn!("finish_page called with no page in progress"),
        }
    }

    fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        let (x1, y1) = self.ctm.apply((rect.x1, rect.y1));
        let (x2, y2) = self.ctm.apply((rect.x2, rect.y2));
        self.record(DrawOp::FillRect {
            rect: Rect { x1, y1, x2, y2 },
            colour,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], colour: Colour) {
        let points = points.iter().map(|&p| self.ctm.apply(p)).collect();
        self.record(DrawOp::FillPolygon { points, colour });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: Pt, colour: Colour) {
        let op = DrawOp::StrokeLine {
            from: self.ctm.apply(from),
            to: self.ctm.apply(to),
            width: width * self.ctm.length_scale(),
            colour,
        };
        self.record(op);
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: MonoFont, size: Pt, colour: Colour) {
        let op = DrawOp::Text {
            text: text.to_string(),
            origin: self.ctm.apply(origin),
            font,
            size: size * self.ctm.length_scale(),
            colour,
        };
        self.record(op);
    }

    fn push_transform(&mut self) {
        self.stack.push(self.ctm);
    }

    fn pop_transform(&mut self) {
        match self.stack.pop() {
            Some(ctm) => self.ctm = ctm,
            None => warn!("pop_transform without a matching push_transform"),
        }
    }

    fn translate(&mut self, dx: Pt, dy: Pt) {
        self.ctm = Transform::translate(dx, dy).then(self.ctm);
    }

    fn scale(&mut self, factor: f32) {
        self.ctm = Transform::scale(factor).then(self.ctm);
    }
}
