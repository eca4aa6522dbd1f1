//! Pre-defined sheet sizes for the paper stock badges are printed on.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to convert between
//! portrait and landscape, and [`by_name`](crate::pagesize::by_name) to look a size up
//! the way configuration files and the command line spell it.
//!
//! ```
//! use badge_gen::pagesize::{self, PageOrientation};
//!
//! let sheet = pagesize::by_name("Letter").expect("letter is known");
//! assert_eq!(sheet, pagesize::LETTER);
//! let (width, _) = pagesize::A4.landscape();
//! assert!(width > pagesize::A4.0);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));
pub const TABLOID: PageSize = (Pt(11.0 * 72.0), Pt(17.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));
pub const A6: PageSize = (Pt(105.0 * 72.0 / 25.4), Pt(148.0 * 72.0 / 25.4));

/// The classic 4 × 3 inch conference badge, as (width, height)
pub const BADGE: PageSize = (Pt(4.0 * 72.0), Pt(3.0 * 72.0));

/// Look up a named sheet size, ignoring case, spaces, dashes and underscores
pub fn by_name(name: &str) -> Option<PageSize> {
    let key: String = name
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect();
    match key.as_str() {
        "letter" | "usletter" | "ansia" => Some(LETTER),
        "legal" | "uslegal" => Some(LEGAL),
        "tabloid" | "ansib" => Some(TABLOID),
        "a3" => Some(A3),
        "a4" => Some(A4),
        "a5" => Some(A5),
        "a6" => Some(A6),
        _ => None,
    }
}

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_forgiving() {
        assert_eq!(by_name("US-Letter"), Some(LETTER));
        assert_eq!(by_name(" a4 "), Some(A4));
        assert_eq!(by_name("ansi_b"), Some(TABLOID));
        assert_eq!(by_name("folio"), None);
    }

    #[test]
    fn orientation_swaps_only_when_needed() {
        assert_eq!(LETTER.landscape(), (Pt(792.0), Pt(612.0)));
        assert_eq!(LETTER.portrait(), LETTER);
        assert_eq!(BADGE.landscape(), BADGE);
    }
}
