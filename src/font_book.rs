use crate::config::FontConfig;
use crate::font::{face_name, Font};
use crate::BadgeError;
use owned_ttf_parser::{name_id, Face};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use usvg::fontdb::{Database, Family, Query, ID};

/// The fonts a run can draw with, looked up by name.
///
/// Faces are found by PostScript name ("Georgia-BoldItalic"), family name
/// ("Georgia") or full name ("Georgia Bold Italic"), all compared
/// case-insensitively. When several faces answer to a name, the one loaded
/// first wins. A face is only parsed for drawing once it is resolved.
#[derive(Clone)]
pub struct FontBook {
    db: Database,
}

impl Default for FontBook {
    fn default() -> Self {
        FontBook { db: Database::new() }
    }
}

impl fmt::Debug for FontBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.len())
            .finish()
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
}

impl FontBook {
    /// An empty book
    pub fn new() -> FontBook {
        FontBook::default()
    }

    /// The fonts under `config.dirs`, followed by the system's own when
    /// `config.system` is set
    pub fn from_config(config: &FontConfig) -> FontBook {
        let mut book = FontBook::scan(config.dirs.as_slice());
        if config.system {
            let added = book.add_system_fonts();
            debug!("{added} system font faces");
        }
        book
    }

    /// Build a book from every font found under `dirs`. Directories that don't
    /// exist are skipped.
    pub fn scan<P: AsRef<Path>>(dirs: &[P]) -> FontBook {
        let mut book = FontBook::new();
        for dir in dirs {
            let added = book.add_dir(dir.as_ref());
            debug!("{added} font faces under {}", dir.as_ref().display());
        }
        book
    }

    /// Load the fonts installed on this system, returning how many faces were added
    pub fn add_system_fonts(&mut self) -> usize {
        let before = self.db.len();
        self.db.load_system_fonts();
        self.db.len() - before
    }

    /// Recursively load the fonts in `dir`, returning how many faces were added.
    /// Files that fail to parse are passed over.
    pub fn add_dir(&mut self, dir: &Path) -> usize {
        let before = self.db.len();
        self.db.load_fonts_dir(dir);
        self.db.len() - before
    }

    /// Number of faces available
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Whether `name` refers to a known face or to a font file on disk
    pub fn contains(&self, name: &str) -> bool {
        let path = Path::new(name);
        (is_font_file(path) && path.is_file()) || self.locate(name).is_some()
    }

    fn locate(&self, name: &str) -> Option<ID> {
        let wanted = name.trim();
        if wanted.is_empty() {
            return None;
        }
        self.by_postscript_name(wanted)
            .or_else(|| self.by_family(wanted))
            .or_else(|| self.by_full_name(wanted))
    }

    fn by_postscript_name(&self, wanted: &str) -> Option<ID> {
        self.db
            .faces()
            .find(|face| face.post_script_name.eq_ignore_ascii_case(wanted))
            .map(|face| face.id)
    }

    /// The regular face of a family, or whichever comes closest
    fn by_family(&self, wanted: &str) -> Option<ID> {
        let family = self
            .db
            .faces()
            .flat_map(|face| face.families.iter())
            .find(|(family, _)| family.eq_ignore_ascii_case(wanted))
            .map(|(family, _)| family.as_str())?;
        self.db.query(&Query {
            families: &[Family::Name(family)],
            ..Query::default()
        })
    }

    /// Full names aren't indexed, so only faces of a family the name starts
    /// with are opened to check
    fn by_full_name(&self, wanted: &str) -> Option<ID> {
        let lowered = wanted.to_lowercase();
        self.db
            .faces()
            .filter(|face| {
                face.families
                    .iter()
                    .any(|(family, _)| lowered.starts_with(&family.to_lowercase()))
            })
            .find(|face| {
                self.db
                    .with_face_data(face.id, |data, index| {
                        Face::parse(data, index)
                            .ok()
                            .and_then(|face| face_name(&face, name_id::FULL_NAME))
                    })
                    .flatten()
                    .is_some_and(|full| full.eq_ignore_ascii_case(wanted))
            })
            .map(|face| face.id)
    }

    fn load_face(&self, id: ID) -> Result<Font, BadgeError> {
        match self
            .db
            .with_face_data(id, |data, index| Font::load_indexed(data.to_vec(), index))
        {
            Some(font) => font,
            None => Err(io::Error::from(io::ErrorKind::NotFound).into()),
        }
    }

    fn load(&self, name: &str) -> Option<Font> {
        let path = Path::new(name);
        let loaded = if is_font_file(path) && path.is_file() {
            fs::read(path).map_err(BadgeError::from).and_then(Font::load)
        } else {
            self.load_face(self.locate(name)?)
        };
        match loaded {
            Ok(font) => Some(font),
            Err(e) => {
                warn!("font `{name}` can't be loaded: {e}");
                None
            }
        }
    }

    /// Load the requested face, or the first of `fallbacks` that is available.
    ///
    /// Falling back is not an error, only a warning; failing to find anything at
    /// all is.
    pub fn resolve<S: AsRef<str>>(&self, requested: &str, fallbacks: &[S]) -> Result<Font, BadgeError> {
        if let Some(font) = self.load(requested) {
            debug!("resolved font `{requested}`");
            return Ok(font);
        }
        for fallback in fallbacks.iter().map(AsRef::as_ref) {
            if let Some(font) = self.load(fallback) {
                warn!("font `{requested}` isn't installed, substituting `{fallback}`");
                return Ok(font);
            }
        }
        Err(BadgeError::FontUnavailable {
            requested: requested.to_string(),
            fallbacks: fallbacks.iter().map(|f| f.as_ref().to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// PostScript and family name of some face installed here, if there is one
    fn installed_face(book: &FontBook) -> Option<(String, String)> {
        book.db.faces().find_map(|face| {
            let family = face.families.first()?.0.clone();
            (!face.post_script_name.is_empty()).then(|| (face.post_script_name.clone(), family))
        })
    }

    #[test]
    fn missing_directories_are_skipped() {
        let book = FontBook::scan(&["/definitely/not/a/font/dir"]);
        assert!(book.is_empty());
        assert!(!book.contains("Georgia"));
    }

    #[test]
    fn files_that_are_not_fonts_are_not_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("broken.ttf"), b"not a font").expect("write");
        fs::write(dir.path().join("notes.txt"), b"hello").expect("write");
        let mut book = FontBook::new();
        assert_eq!(book.add_dir(dir.path()), 0);
        assert!(book.is_empty());
    }

    #[test]
    fn without_system_fonts_only_the_listed_dirs_count() {
        let config = FontConfig {
            dirs: vec!["/definitely/not/a/font/dir".into()],
            system: false,
            ..FontConfig::default()
        };
        assert!(FontBook::from_config(&config).is_empty());
    }

    #[test]
    fn installed_faces_resolve_by_any_name() {
        let mut book = FontBook::new();
        book.add_system_fonts();
        let Some((postscript, family)) = installed_face(&book) else {
            return;
        };
        assert!(book.contains(&postscript));
        assert!(book.contains(&postscript.to_uppercase()));
        assert!(book.contains(&format!("  {family} ")));

        let font = book.resolve(&postscript, &[] as &[&str]).expect("installed");
        assert!(font
            .postscript_name()
            .map_or(true, |name| name.eq_ignore_ascii_case(&postscript)));
        assert!(book.resolve(&family, &[] as &[&str]).is_ok());
    }

    #[test]
    fn missing_faces_fall_back_in_order() {
        let mut book = FontBook::new();
        book.add_system_fonts();
        let Some((postscript, _)) = installed_face(&book) else {
            return;
        };
        let font = book
            .resolve("StillaSHOP-Regular", &["No Such Face", postscript.as_str()])
            .expect("falls back");
        assert!(font
            .postscript_name()
            .map_or(true, |name| name.eq_ignore_ascii_case(&postscript)));
    }

    #[test]
    fn nothing_available_is_an_error_naming_every_candidate() {
        let book = FontBook::new();
        let err = book
            .resolve("StillaSHOP-Regular", &["Georgia-BoldItalic"])
            .err()
            .expect("nothing installed");
        match err {
            BadgeError::FontUnavailable {
                requested,
                fallbacks,
            } => {
                assert_eq!(requested, "StillaSHOP-Regular");
                assert_eq!(fallbacks, vec!["Georgia-BoldItalic".to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
