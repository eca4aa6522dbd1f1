use crate::rect::Rect;
use crate::units::Pt;

/// Space kept clear inside a rectangle. Margins are plain guidelines; nothing
/// stops drawing from spilling past them.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// The same margins with `extra` added to the bottom
    pub fn with_extra_bottom(&self, extra: Pt) -> Margins {
        Margins {
            bottom: self.bottom + extra,
            ..*self
        }
    }

    /// The part of `rect` left over inside these margins
    pub fn apply(&self, rect: Rect) -> Rect {
        Rect {
            x1: rect.x1 + self.left,
            y1: rect.y1 + self.bottom,
            x2: rect.x2 - self.right,
            y2: rect.y2 - self.top,
        }
    }
}
