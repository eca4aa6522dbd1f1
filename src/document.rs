use crate::{
    font::Font,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    BadgeError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

#[derive(Default)]
/// A document stores every finished sheet plus the fonts they draw with,
/// then renders it all out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Pages in document order
    pub fn ordered_pages(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().filter_map(|id| self.pages.get(*id))
    }

    /// Add a font to the document structure. Fonts are stored "globally" within the
    /// document; pages refer to them by the returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// The characters drawn with each font, across every page
    fn characters_by_font(&self) -> BTreeMap<usize, BTreeSet<char>> {
        let mut used: BTreeMap<usize, BTreeSet<char>> = BTreeMap::new();
        for page in self.ordered_pages() {
            for span in page.spans() {
                used.entry(span.font.id.index())
                    .or_default()
                    .extend(span.text.chars());
            }
        }
        used
    }

    /// Write the entire document to the writer. The whole document is rendered
    /// in memory first, which is a limitation of the underlying pdf-writer.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), BadgeError> {
        let used = self.characters_by_font();
        let Document {
            info,
            pages,
            page_order,
            fonts,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        // page refs are keyed by position in the document, not arena index
        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            if let Some(chars) = used.get(&id.index()) {
                font.write(&mut refs, id, chars, &mut writer);
            }
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(BadgeError::PageMissing)?;
            page.write(&mut refs, page_index, &fonts, &mut writer);
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}
