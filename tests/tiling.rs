use badge_gen::{
    render, BadgeStyle, Config, Entry, MonoFont, Pt, RecordingCanvas, SheetGrid, SheetTiler,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn entries(n: usize) -> Vec<Entry> {
    (0..n)
        .map(|i| Entry::new(format!("Attendee Number-{i}"), Some("Somewhere")))
        .collect()
}

fn tile(config: &Config, entries: &[Entry]) -> RecordingCanvas {
    let style = BadgeStyle::new(config, MonoFont::default(), MonoFont::default());
    let mut canvas = RecordingCanvas::default();
    render(&mut canvas, entries, &style, &mut StdRng::seed_from_u64(2024)).expect("renders");
    canvas
}

#[test]
fn seven_entries_on_letter_paper() {
    let config = Config::default();
    let canvas = tile(&config, &entries(7));

    let badges_per_page: Vec<usize> = canvas.pages().iter().map(|p| p.polygons().count()).collect();
    assert_eq!(badges_per_page, [6, 6, 2]);
    for page in canvas.pages() {
        assert_eq!((page.width, page.height), (Pt(612.0), Pt(792.0)));
        // (3 + 1) rows and (2 + 1) columns of grid lines, marked on both sides
        assert_eq!(page.lines().count(), 14);
    }
    assert_eq!(canvas.depth(), 0);
}

#[test]
fn page_count_is_the_ceiling_of_badges_over_slots() {
    for multiplicity in 1..=3 {
        for n in [1, 2, 5, 6, 12, 13, 20] {
            let mut config = Config::default();
            config.sheet.multiplicity = multiplicity;
            let style = BadgeStyle::new(&config, MonoFont::default(), MonoFont::default());
            let tiler = SheetTiler::from_config(&config).expect("fits");
            let mut canvas = RecordingCanvas::default();
            let report = tiler
                .tile(&mut canvas, &entries(n), &style, &mut StdRng::seed_from_u64(n as u64))
                .expect("tiles");

            let badges = n * multiplicity;
            assert_eq!(report.badges, badges);
            assert_eq!(report.pages, badges.div_ceil(6), "{n} x {multiplicity}");
            assert_eq!(canvas.pages().len(), report.pages);
            let (last, full) = canvas.pages().split_last().expect("at least one page");
            assert!(full.iter().all(|page| page.polygons().count() == 6));
            assert!(last.polygons().count() >= 1);
        }
    }
}

#[test]
fn every_badge_stays_inside_its_slot() {
    let config = Config::default();
    let grid = SheetGrid::new(Pt(612.0), Pt(792.0), Pt(288.0), Pt(216.0), Pt(18.0)).expect("fits");
    let canvas = tile(&config, &entries(3));
    let page = &canvas.pages()[0];

    for (slot, frame) in page.polygons().enumerate() {
        let (x, y) = grid.slot_origin(slot);
        let outer = badge_gen::Rect {
            x1: x,
            y1: y,
            x2: x + Pt(288.0),
            y2: y + Pt(216.0),
        };
        // frames wander at most 10pt along a side and 2pt across it, inside a 16pt margin
        for &point in frame {
            assert!(outer.contains(point), "{point:?} escapes slot {slot}");
        }
    }
    for (text, (x, y), _) in page.texts() {
        assert!(x >= Pt(18.0) && y >= Pt(126.0) && y <= Pt(774.0), "{text} is outside the grid");
    }
}

#[test]
fn landscape_tabloid_fits_more() {
    let mut config = Config::default();
    config.sheet.size = Some("tabloid".into());
    config.sheet.landscape = true;
    config.sheet.multiplicity = 1;
    let tiler = SheetTiler::from_config(&config).expect("fits");
    // 1188 / 288 and 756 / 216
    assert_eq!((tiler.grid.cols, tiler.grid.rows), (4, 3));

    let canvas = tile(&config, &entries(13));
    assert_eq!(canvas.pages().len(), 2);
    assert_eq!((canvas.pages()[0].width, canvas.pages()[0].height), (Pt(1224.0), Pt(792.0)));
}

#[test]
fn sheets_without_a_background_only_get_marks_and_badges() {
    let mut config = Config::default();
    config.palette.background = None;
    let grid = SheetGrid::new(Pt(612.0), Pt(792.0), Pt(288.0), Pt(216.0), Pt(18.0)).expect("fits");
    let style = BadgeStyle::new(&config, MonoFont::default(), MonoFont::default());
    let mut canvas = RecordingCanvas::default();
    SheetTiler::new(grid, 1)
        .tile(&mut canvas, &entries(1), &style, &mut StdRng::seed_from_u64(3))
        .expect("tiles");
    let page = &canvas.pages()[0];
    assert!(!page
        .ops
        .iter()
        .any(|op| matches!(op, badge_gen::DrawOp::FillRect { .. })));
    assert_eq!(page.polygons().count(), 1);
}
