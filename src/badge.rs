use crate::canvas::{Canvas, SavedState};
use crate::colour::colours;
use crate::config::Config;
use crate::data::Entry;
use crate::frame::Frame;
use crate::layout::{Margins, NameLayout, TextFitter};
use crate::rect::Rect;
use crate::units::Pt;
use crate::BadgeError;
use rand::Rng;
use tracing::{debug, warn};

/// Fonts and settings shared by every badge of a run
#[derive(Debug, Clone, Copy)]
pub struct BadgeStyle<'c, F> {
    pub name_font: F,
    pub company_font: F,
    pub config: &'c Config,
}

impl<'c, F: Copy> BadgeStyle<'c, F> {
    pub fn new(config: &'c Config, name_font: F, company_font: F) -> Self {
        BadgeStyle {
            name_font,
            company_font,
            config,
        }
    }
}

/// One badge to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Badge<'a> {
    pub name: &'a str,
    pub company: Option<&'a str>,
    pub width: Pt,
    pub height: Pt,
}

/// Where the parts of a badge go. The frame is relative to the badge; the
/// company band and the name box are relative to the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeGeometry {
    pub outside_margin: Pt,
    pub frame: Rect,
    pub company_band: Option<Rect>,
    pub company_size: Pt,
    pub name_box: Rect,
}

impl<'a> Badge<'a> {
    pub fn new(name: &'a str, company: Option<&'a str>, width: Pt, height: Pt) -> Badge<'a> {
        Badge {
            name,
            company: company.filter(|company| !company.trim().is_empty()),
            width,
            height,
        }
    }

    pub fn for_entry(entry: &'a Entry, width: Pt, height: Pt) -> Badge<'a> {
        Badge::new(&entry.name, entry.company.as_deref(), width, height)
    }

    /// Lay out the badge's regions from its size alone
    pub fn geometry(&self) -> BadgeGeometry {
        let (w, h) = (self.width, self.height);
        let outside_margin = w / 18.0;
        let frame = Rect::from_size(w, h).inset(outside_margin);
        let inner = Rect::from_size(frame.width(), frame.height());

        let band = h / 7.5;
        let (margins, company_band) = match self.company {
            Some(_) => (
                Margins::all(w / 24.0).with_extra_bottom(band),
                Some(Rect::from_size(frame.width(), band)),
            ),
            // keep the name a little above centre even with nothing below it
            None => (Margins::all(w / 24.0).with_extra_bottom(band / 3.0), None),
        };

        BadgeGeometry {
            outside_margin,
            frame,
            company_band,
            company_size: h / 18.0,
            name_box: margins.apply(inner),
        }
    }

    /// Draw the badge with its bottom left corner at the canvas origin.
    ///
    /// Returns the name's layout; when the name box has no room left the name
    /// is skipped and the layout is empty.
    pub fn compose<C, R>(&self, canvas: &mut C, style: &BadgeStyle<'_, C::Font>, rng: &mut R) -> Result<NameLayout, BadgeError>
    where
        C: Canvas + ?Sized,
        R: Rng + ?Sized,
    {
        if !(self.width.0 > 0.0 && self.height.0 > 0.0) {
            return Err(BadgeError::InvalidDimensions {
                width: self.width.0,
                height: self.height.0,
            });
        }
        let config = style.config;
        let palette = &config.palette;
        let geometry = self.geometry();

        let mut badge = SavedState::new(canvas);
        if let Some(background) = palette.background {
            badge.fill_rect(Rect::from_size(self.width, self.height), background);
        }

        badge.translate(geometry.frame.x1, geometry.frame.y1);
        Frame::generate(geometry.frame.width(), geometry.frame.height(), &config.frame, rng)
            .draw(&mut *badge, palette.frame);

        if let (Some(company), Some(band)) = (self.company, geometry.company_band) {
            let size = geometry.company_size;
            let (width, height) = badge.measure_text(company, style.company_font, size);
            if width > band.width() {
                debug!("company {company:?} is wider than its band");
            }
            let origin = ((band.width() - width) / 2.0, band.y2 - height);
            badge.draw_text(company, origin, style.company_font, size, palette.company_colour());
        }

        let name_box = geometry.name_box;
        let mut area = SavedState::new(&mut *badge);
        area.translate(name_box.x1, name_box.y1);
        if config.badge.debug_boxes {
            area.fill_rect(Rect::from_size(name_box.width(), name_box.height()), colours::LIGHT_GREY);
        }
        if name_box.width() <= Pt::ZERO || name_box.height() <= Pt::ZERO {
            warn!(
                "no room for the name on a {}x{} badge, leaving {:?} blank",
                self.width, self.height, self.name
            );
            return Ok(TextFitter::new(&config.fit).fit(&*area, style.name_font, "", Pt::ZERO, Pt::ZERO));
        }
        let layout = TextFitter::new(&config.fit).fit(
            &*area,
            style.name_font,
            self.name,
            name_box.width(),
            name_box.height(),
        );
        layout.draw(&mut *area, style.name_font, palette.text);
        Ok(layout)
    }
}
