use super::Canvas;
use crate::colour::Colour;
use crate::document::Document;
use crate::font::Font;
use crate::page::{Page, PageContents, SpanFont, SpanLayout};
use crate::rect::{Point, Rect};
use crate::transform::Transform;
use crate::units::Pt;
use id_arena::Id;
use tracing::warn;

/// A [Canvas] that paints into a [Document].
///
/// The page in progress lives on the canvas until [Canvas::finish_page] is
/// called, and only then joins the document; a page that is abandoned halfway
/// (because composing one of its badges failed) never reaches the output.
/// The transform stack maps directly onto PDF graphics state: a push is `q`,
/// a pop is `Q`, and translations and scales are `cm` operators.
pub struct PdfCanvas {
    document: Document,
    page: Option<Page>,
    depth: usize,
}

impl PdfCanvas {
    pub fn new(document: Document) -> PdfCanvas {
        PdfCanvas {
            document,
            page: None,
            depth: 0,
        }
    }

    /// Register a font with the underlying document, returning the handle to draw with
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.document.add_font(font)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Hand back the document with every finished page
    pub fn into_document(self) -> Document {
        if self.page.is_some() {
            warn!("discarding a page that was never finished");
        }
        self.document
    }

    fn push(&mut self, content: PageContents) {
        match self.page.as_mut() {
            Some(page) => page.push(content),
            None => warn!("drawing outside of a page is ignored: {content:?}"),
        }
    }
}

impl Canvas for PdfCanvas {
    type Font = Id<Font>;

    fn measure_text(&self, text: &str, font: Id<Font>, size: Pt) -> (Pt, Pt) {
        match self.document.fonts.get(font) {
            Some(font) => (font.text_width(text, size), font.ascent(size)),
            None => {
                warn!("measuring with a font that isn't part of the document");
                (Pt::ZERO, Pt::ZERO)
            }
        }
    }

    fn begin_page(&mut self, width: Pt, height: Pt) {
        if self.page.is_some() {
            warn!("starting a new page before the previous one was finished");
        }
        self.page = Some(Page::new(width, height));
        self.depth = 0;
    }

    fn finish_page(&mut self) {
        let Some(mut page) = self.page.take() else {
            warn!("finish_page called with no page in progress");
            return;
        };
        if self.depth > 0 {
            warn!("closing {} unbalanced transform(s) at the end of a page", self.depth);
            for _ in 0..self.depth {
                page.push(PageContents::RestoreState);
            }
            self.depth = 0;
        }
        self.document.add_page(page);
    }

    fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        self.push(PageContents::FillRect { rect, colour });
    }

    fn fill_polygon(&mut self, points: &[Point], colour: Colour) {
        self.push(PageContents::FillPolygon {
            points: points.to_vec(),
            colour,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: Pt, colour: Colour) {
        self.push(PageContents::StrokeLine {
            from,
            to,
            width,
            colour,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: Id<Font>, size: Pt, colour: Colour) {
        self.push(PageContents::Text(SpanLayout {
            text: text.to_string(),
            font: SpanFont { id: font, size },
            colour,
            coords: origin,
        }));
    }

    fn push_transform(&mut self) {
        self.depth += 1;
        self.push(PageContents::SaveState);
    }

    fn pop_transform(&mut self) {
        if self.depth == 0 {
            warn!("pop_transform without a matching push_transform");
            return;
        }
        self.depth -= 1;
        self.push(PageContents::RestoreState);
    }

    fn translate(&mut self, dx: Pt, dy: Pt) {
        self.push(PageContents::Transform(Transform::translate(dx, dy)));
    }

    fn scale(&mut self, factor: f32) {
        self.push(PageContents::Transform(Transform::scale(factor)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SavedState;
    use crate::colours;

    #[test]
    fn pages_join_the_document_only_when_finished() {
        let mut canvas = PdfCanvas::new(Document::default());
        canvas.begin_page(Pt(612.0), Pt(792.0));
        canvas.fill_rect(Rect::from_size(Pt(612.0), Pt(792.0)), colours::WHITE);
        assert_eq!(canvas.document().page_count(), 0);
        canvas.finish_page();
        assert_eq!(canvas.document().page_count(), 1);

        canvas.begin_page(Pt(612.0), Pt(792.0));
        let doc = canvas.into_document();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn guards_emit_balanced_graphics_state() {
        let mut canvas = PdfCanvas::new(Document::default());
        canvas.begin_page(Pt(288.0), Pt(216.0));
        {
            let mut outer = SavedState::new(&mut canvas);
            outer.translate(Pt(16.0), Pt(16.0));
            let mut inner = SavedState::new(&mut *outer);
            inner.scale(0.5);
        }
        canvas.finish_page();

        let doc = canvas.into_document();
        let page = doc.ordered_pages().next().expect("one page");
        let saves = page
            .contents
            .iter()
            .filter(|c| matches!(c, PageContents::SaveState))
            .count();
        let restores = page
            .contents
            .iter()
            .filter(|c| matches!(c, PageContents::RestoreState))
            .count();
        assert_eq!((saves, restores), (2, 2));
        assert_eq!(page.contents.last(), Some(&PageContents::RestoreState));
    }

    #[test]
    fn unbalanced_pushes_are_closed_at_the_end_of_a_page() {
        let mut canvas = PdfCanvas::new(Document::default());
        canvas.begin_page(Pt(288.0), Pt(216.0));
        canvas.push_transform();
        canvas.translate(Pt(1.0), Pt(1.0));
        canvas.finish_page();
        let doc = canvas.into_document();
        let page = doc.ordered_pages().next().expect("one page");
        assert_eq!(page.contents.last(), Some(&PageContents::RestoreState));
    }
}
