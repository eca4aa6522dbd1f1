use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::rect::{Point, Rect};
use crate::refs::{ObjectReferences, RefType};
use crate::transform::Transform;
use crate::units::*;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single run of text, positioned by its baseline origin
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: Point,
}

/// One drawing operation on a page, in the order it is painted
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    /// Push the graphics state (`q`)
    SaveState,
    /// Pop the graphics state (`Q`)
    RestoreState,
    /// Concatenate a matrix onto the current transform (`cm`)
    Transform(Transform),
    FillRect {
        rect: Rect,
        colour: Colour,
    },
    /// A closed, filled polygon
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
    Text(SpanLayout),
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// The drawing operations, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(width: Pt, height: Pt) -> Page {
        Page {
            media_box: Rect::from_size(width, height),
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn push(&mut self, content: PageContents) {
        self.contents.push(content);
    }

    /// Every text span on the page
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().filter_map(|content| match content {
            PageContents::Text(span) => Some(span),
            _ => None,
        })
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) {
        let id = refs.gen(RefType::Page(page_index));
        let content_id = refs.gen(RefType::ContentForPage(page_index));
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.trim_box(self.media_box.into());
        page.parent(page_tree_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            // fonts that were never drawn are never written
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);
    }
}
