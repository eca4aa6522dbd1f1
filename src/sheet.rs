use crate::badge::{Badge, BadgeStyle};
use crate::canvas::{Canvas, SavedState};
use crate::colour::Colour;
use crate::config::{Config, Palette, SheetConfig};
use crate::data::Entry;
use crate::rect::{Point, Rect};
use crate::units::Pt;
use crate::BadgeError;
use rand::Rng;
use tracing::{debug, info};

/// How badges are arranged on every sheet of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGrid {
    pub rows: usize,
    pub cols: usize,
    /// Width of the grid itself: `cols` badges, leftovers excluded
    pub usable_width: Pt,
    pub usable_height: Pt,
    pub margin: Pt,
    pub sheet_width: Pt,
    pub sheet_height: Pt,
    pub badge_width: Pt,
    pub badge_height: Pt,
}

impl SheetGrid {
    /// Fit as many whole badges as possible inside the sheet margins. Space left
    /// over to the right and bottom of the grid stays blank.
    pub fn new(sheet_width: Pt, sheet_height: Pt, badge_width: Pt, badge_height: Pt, margin: Pt) -> Result<SheetGrid, BadgeError> {
        if !(badge_width.0 > 0.0 && badge_height.0 > 0.0) {
            return Err(BadgeError::InvalidDimensions {
                width: badge_width.0,
                height: badge_height.0,
            });
        }
        let cols = ((sheet_width - margin * 2.0) / badge_width).floor().max(0.0) as usize;
        let rows = ((sheet_height - margin * 2.0) / badge_height).floor().max(0.0) as usize;
        if rows == 0 || cols == 0 {
            return Err(BadgeError::SheetTooSmall {
                badge_width: badge_width.0,
                badge_height: badge_height.0,
                sheet_width: sheet_width.0,
                sheet_height: sheet_height.0,
                margin: margin.0,
            });
        }

        Ok(SheetGrid {
            rows,
            cols,
            usable_width: badge_width * cols as f32,
            usable_height: badge_height * rows as f32,
            margin,
            sheet_width,
            sheet_height,
            badge_width,
            badge_height,
        })
    }

    pub fn per_page(&self) -> usize {
        self.rows * self.cols
    }

    /// Page coordinates of the bottom left corner of the `slot`th badge on a
    /// sheet, counting left to right and then top to bottom
    pub fn slot_origin(&self, slot: usize) -> Point {
        let row = (slot / self.cols) as f32;
        let col = (slot % self.cols) as f32;
        (
            self.margin + self.badge_width * col,
            self.sheet_height - self.margin - self.badge_height * (row + 1.0),
        )
    }

    /// Draw trim guides where every grid line meets the margin. Each mark covers
    /// the outer half of the margin so it never touches a badge.
    pub fn draw_crop_marks<C: Canvas + ?Sized>(&self, canvas: &mut C, colour: Colour, width: Pt) {
        let m = self.margin;
        let mut marks = SavedState::new(canvas);
        // top left corner of the grid
        marks.translate(m, self.sheet_height - m);
        for row in 0..=self.rows {
            let y = -(self.badge_height * row as f32);
            marks.stroke_line((-m, y), (-m / 2.0, y), width, colour);
            marks.stroke_line((self.usable_width + m, y), (self.usable_width + m / 2.0, y), width, colour);
        }
        for col in 0..=self.cols {
            let x = self.badge_width * col as f32;
            marks.stroke_line((x, m), (x, m / 2.0), width, colour);
            marks.stroke_line((x, -self.usable_height - m / 2.0), (x, -self.usable_height - m), width, colour);
        }
    }
}

/// What a tiling run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileReport {
    pub pages: usize,
    pub badges: usize,
    pub rows: usize,
    pub cols: usize,
}

/// Places badges onto as many sheets as they need
#[derive(Debug, Clone)]
pub struct SheetTiler {
    pub grid: SheetGrid,
    /// Copies of each badge, placed one after another
    pub multiplicity: usize,
    /// Full bleed fill behind every sheet
    pub background: Option<Colour>,
    pub crop_marks: Colour,
    pub crop_mark_width: Pt,
}

impl SheetTiler {
    /// A tiler with bare sheets and the default crop marks
    pub fn new(grid: SheetGrid, multiplicity: usize) -> SheetTiler {
        SheetTiler {
            grid,
            multiplicity,
            background: None,
            crop_marks: Palette::default().crop_marks,
            crop_mark_width: SheetConfig::default().crop_mark_width,
        }
    }

    pub fn from_config(config: &Config) -> Result<SheetTiler, BadgeError> {
        let (sheet_width, sheet_height) = config.sheet.dimensions()?;
        let grid = SheetGrid::new(
            sheet_width,
            sheet_height,
            config.badge.width,
            config.badge.height,
            config.sheet.margin,
        )?;
        Ok(SheetTiler {
            grid,
            multiplicity: config.sheet.multiplicity,
            background: config.palette.background,
            crop_marks: config.palette.crop_marks,
            crop_mark_width: config.sheet.crop_mark_width,
        })
    }

    fn begin_sheet<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let grid = &self.grid;
        canvas.begin_page(grid.sheet_width, grid.sheet_height);
        if let Some(background) = self.background {
            canvas.fill_rect(Rect::from_size(grid.sheet_width, grid.sheet_height), background);
        }
        grid.draw_crop_marks(canvas, self.crop_marks, self.crop_mark_width);
    }

    /// Draw every entry `multiplicity` times, row by row, starting a new sheet
    /// whenever the current one is full.
    ///
    /// A sheet only becomes part of the output once it is finished; if a badge
    /// fails to compose, the sheet it was on is dropped and the error returned.
    pub fn tile<C, R>(&self, canvas: &mut C, entries: &[Entry], style: &BadgeStyle<'_, C::Font>, rng: &mut R) -> Result<TileReport, BadgeError>
    where
        C: Canvas + ?Sized,
        R: Rng + ?Sized,
    {
        let grid = &self.grid;
        let per_page = grid.per_page();
        let mut report = TileReport {
            rows: grid.rows,
            cols: grid.cols,
            ..TileReport::default()
        };
        let mut slot = 0;
        let mut sheet_open = false;

        for entry in entries {
            let badge = Badge::for_entry(entry, grid.badge_width, grid.badge_height);
            for _ in 0..self.multiplicity {
                if !sheet_open {
                    self.begin_sheet(canvas);
                    sheet_open = true;
                    slot = 0;
                }
                let (x, y) = grid.slot_origin(slot);
                {
                    let mut placed = SavedState::new(canvas);
                    placed.translate(x, y);
                    badge.compose(&mut *placed, style, rng)?;
                }
                report.badges += 1;
                slot += 1;

                if slot == per_page {
                    canvas.finish_page();
                    sheet_open = false;
                    report.pages += 1;
                    debug!("finished sheet {}", report.pages);
                }
            }
        }
        if sheet_open {
            canvas.finish_page();
            report.pages += 1;
            debug!("finished sheet {} with {slot} of {per_page} badges", report.pages);
        }

        info!(
            "placed {} badges on {} sheets ({} x {} per sheet)",
            report.badges, report.pages, report.cols, report.rows
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{MonoFont, RecordingCanvas};
    use crate::colour::colours;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn letter_grid() -> SheetGrid {
        SheetGrid::new(Pt(612.0), Pt(792.0), Pt(288.0), Pt(216.0), Pt(18.0)).expect("fits")
    }

    #[test]
    fn letter_sheet_holds_six_badges() {
        let grid = letter_grid();
        assert_eq!((grid.cols, grid.rows), (2, 3));
        assert_eq!((grid.usable_width, grid.usable_height), (Pt(576.0), Pt(648.0)));
        assert_eq!(grid.per_page(), 6);
    }

    #[test]
    fn slots_fill_rows_from_the_top() {
        let grid = letter_grid();
        assert_eq!(grid.slot_origin(0), (Pt(18.0), Pt(558.0)));
        assert_eq!(grid.slot_origin(1), (Pt(306.0), Pt(558.0)));
        assert_eq!(grid.slot_origin(2), (Pt(18.0), Pt(342.0)));
        assert_eq!(grid.slot_origin(5), (Pt(306.0), Pt(126.0)));
    }

    #[test]
    fn badges_bigger_than_the_sheet_are_an_error() {
        let err = SheetGrid::new(Pt(300.0), Pt(300.0), Pt(288.0), Pt(216.0), Pt(18.0));
        assert!(matches!(err, Err(BadgeError::SheetTooSmall { .. })));
        let err = SheetGrid::new(Pt(612.0), Pt(792.0), Pt(0.0), Pt(216.0), Pt(18.0));
        assert!(matches!(err, Err(BadgeError::InvalidDimensions { .. })));
    }

    #[test]
    fn crop_marks_stay_in_the_outer_half_of_the_margin() {
        let grid = letter_grid();
        let mut canvas = RecordingCanvas::default();
        canvas.begin_page(grid.sheet_width, grid.sheet_height);
        grid.draw_crop_marks(&mut canvas, colours::WHITE, Pt(1.0));
        canvas.finish_page();

        let lines: Vec<_> = canvas.pages()[0].lines().collect();
        assert_eq!(lines.len(), 2 * (grid.rows + 1) + 2 * (grid.cols + 1));
        let half = Pt(9.0);
        for (from, to) in lines {
            for (x, y) in [from, to] {
                let in_left = x <= half;
                // the grid spans 18..594 across and 126..774 up
                let in_right = x >= Pt(594.0) + half;
                let in_top = y >= Pt(774.0) + half;
                let in_bottom = y <= Pt(126.0) - half;
                assert!(in_left || in_right || in_top || in_bottom, "mark at {x}, {y} touches the grid");
            }
        }
        // the first horizontal mark lines up with the top of the grid
        assert!(canvas.pages()[0]
            .lines()
            .any(|line| line == ((Pt(0.0), Pt(774.0)), (Pt(9.0), Pt(774.0)))));
    }

    #[test]
    fn both_constructors_agree_on_crop_marks() {
        let grid = letter_grid();
        let bare = SheetTiler::new(grid, 2);
        let configured = SheetTiler::from_config(&Config::default()).expect("letter fits");
        assert_eq!(bare.crop_marks, configured.crop_marks);
        assert_eq!(bare.crop_marks, colours::WHITE);
        assert_eq!(bare.crop_mark_width, configured.crop_mark_width);
    }

    #[test]
    fn seven_entries_twice_each_take_three_sheets() {
        let config = Config::default();
        let style = BadgeStyle::new(&config, MonoFont::default(), MonoFont::default());
        let tiler = SheetTiler::from_config(&config).expect("letter fits");
        let entries: Vec<Entry> = (1..=7)
            .map(|i| Entry::new(format!("Person {i}"), Some("Company")))
            .collect();
        let mut canvas = RecordingCanvas::default();
        let report = tiler
            .tile(&mut canvas, &entries, &style, &mut StdRng::seed_from_u64(11))
            .expect("tiles");

        assert_eq!(
            report,
            TileReport {
                pages: 3,
                badges: 14,
                rows: 3,
                cols: 2
            }
        );
        let frames: Vec<usize> = canvas.pages().iter().map(|p| p.polygons().count()).collect();
        assert_eq!(frames, [6, 6, 2]);
        assert_eq!(canvas.depth(), 0);
        assert_eq!(canvas.abandoned_pages(), 0);
    }

    #[test]
    fn copies_sit_side_by_side() {
        let config = Config::default();
        let style = BadgeStyle::new(&config, MonoFont::default(), MonoFont::default());
        let tiler = SheetTiler::from_config(&config).expect("letter fits");
        let entries = [Entry::new("Left Right", None)];
        let mut canvas = RecordingCanvas::default();
        tiler
            .tile(&mut canvas, &entries, &style, &mut StdRng::seed_from_u64(1))
            .expect("tiles");
        let starts: Vec<_> = canvas.pages()[0].polygons().map(|frame| frame[0]).collect();
        assert_eq!(starts, [(Pt(34.0), Pt(574.0)), (Pt(322.0), Pt(574.0))]);
    }

    #[test]
    fn a_full_last_sheet_does_not_open_another() {
        let config = Config::default();
        let style = BadgeStyle::new(&config, MonoFont::default(), MonoFont::default());
        let tiler = SheetTiler::from_config(&config).expect("letter fits");
        let entries: Vec<Entry> = (0..6).map(|i| Entry::new(format!("N{i}"), None)).collect();
        let mut canvas = RecordingCanvas::default();
        let report = tiler
            .tile(&mut canvas, &entries, &style, &mut StdRng::seed_from_u64(1))
            .expect("tiles");
        assert_eq!(report.pages, 2);
        assert_eq!(canvas.pages().len(), 2);
        assert_eq!(canvas.abandoned_pages(), 0);
    }

    #[test]
    fn nothing_to_tile_means_no_sheets() {
        let config = Config::default();
        let style = BadgeStyle::new(&config, MonoFont::default(), MonoFont::default());
        let tiler = SheetTiler::from_config(&config).expect("letter fits");
        let mut canvas = RecordingCanvas::default();
        let report = tiler
            .tile(&mut canvas, &[], &style, &mut StdRng::seed_from_u64(1))
            .expect("tiles");
        assert_eq!(report.pages, 0);
        assert!(canvas.pages().is_empty());
    }
}
