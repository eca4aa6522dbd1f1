//! From entries and configuration to a finished document.

use crate::badge::{Badge, BadgeStyle};
use crate::canvas::{Canvas, PdfCanvas};
use crate::config::{Config, FrameConfig};
use crate::data::Entry;
use crate::document::Document;
use crate::font_book::FontBook;
use crate::info::Info;
use crate::sheet::{SheetTiler, TileReport};
use crate::BadgeError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Placeholder text for the sample page
pub const PREVIEW_NAME: &str = "First Name Last Name";
pub const PREVIEW_COMPANY: &str = "Company";

/// The random source frames are drawn from: seeded when a seed is configured,
/// from system entropy otherwise
pub fn frame_rng(config: &FrameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw a single badge on a page of its own, using placeholder text
pub fn draw_preview<C, R>(canvas: &mut C, style: &BadgeStyle<'_, C::Font>, rng: &mut R) -> Result<(), BadgeError>
where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    let badge = &style.config.badge;
    let preview = Badge::new(PREVIEW_NAME, Some(PREVIEW_COMPANY), badge.width, badge.height);
    canvas.begin_page(badge.width, badge.height);
    preview.compose(canvas, style, rng)?;
    canvas.finish_page();
    Ok(())
}

/// Lay every entry out onto `canvas`, after the preview page if one is configured
pub fn render<C, R>(canvas: &mut C, entries: &[Entry], style: &BadgeStyle<'_, C::Font>, rng: &mut R) -> Result<TileReport, BadgeError>
where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    let config = style.config;
    config.validate()?;
    let tiler = SheetTiler::from_config(config)?;
    if config.sheet.preview {
        draw_preview(canvas, style, rng)?;
    }
    tiler.tile(canvas, entries, style, rng)
}

/// Resolve fonts and render every entry into a PDF document.
///
/// Nothing is drawn until the configuration is known to be valid and both
/// fonts are resolved.
pub fn render_document(entries: &[Entry], config: &Config, fonts: &FontBook) -> Result<(Document, TileReport), BadgeError> {
    config.validate()?;
    let name_font = fonts.resolve(&config.fonts.name, &config.fonts.name_fallbacks)?;
    let company_font = fonts.resolve(&config.fonts.company, &config.fonts.company_fallbacks)?;

    let mut canvas = PdfCanvas::new(Document::default());
    let name_font = canvas.add_font(name_font);
    let company_font = canvas.add_font(company_font);
    let style = BadgeStyle::new(config, name_font, company_font);

    let report = render(&mut canvas, entries, &style, &mut frame_rng(&config.frame))?;

    let mut document = canvas.into_document();
    document.set_info(Info::for_run(report.badges, entries.len(), report.pages));
    info!(
        "rendered {} pages ({} sheets of badges)",
        document.page_count(),
        report.pages
    );
    Ok((document, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{MonoFont, RecordingCanvas};
    use crate::units::Pt;

    fn style(config: &Config) -> BadgeStyle<'_, MonoFont> {
        BadgeStyle::new(config, MonoFont::default(), MonoFont::default())
    }

    #[test]
    fn seeded_frames_repeat() {
        let config = FrameConfig {
            seed: Some(42),
            ..FrameConfig::default()
        };
        let a: u64 = frame_rng(&config).gen();
        let b: u64 = frame_rng(&config).gen();
        assert_eq!(a, b);
    }

    #[test]
    fn the_preview_comes_first_at_badge_size() {
        let mut config = Config::default();
        config.sheet.preview = true;
        let mut canvas = RecordingCanvas::default();
        let entries = [Entry::new("Ada Lovelace", None)];
        let report = render(&mut canvas, &entries, &style(&config), &mut frame_rng(&config.frame))
            .expect("renders");

        assert_eq!(report.pages, 1);
        let pages = canvas.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!((pages[0].width, pages[0].height), (Pt(288.0), Pt(216.0)));
        let texts: Vec<_> = pages[0].texts().map(|(t, ..)| t).collect();
        assert_eq!(texts, ["Company", "First", "Name", "Last", "Name"]);
        assert_eq!((pages[1].width, pages[1].height), (Pt(612.0), Pt(792.0)));
    }

    #[test]
    fn invalid_configuration_draws_nothing() {
        let mut config = Config::default();
        config.sheet.multiplicity = 0;
        let mut canvas = RecordingCanvas::default();
        let result = render(
            &mut canvas,
            &[Entry::new("A", None)],
            &style(&config),
            &mut frame_rng(&config.frame),
        );
        assert!(matches!(result, Err(BadgeError::InvalidConfig(_))));
        assert!(canvas.pages().is_empty());
    }

    #[test]
    fn missing_fonts_stop_the_run_before_drawing() {
        let mut config = Config::default();
        config.fonts.dirs.clear();
        config.fonts.name = "No Such Face".into();
        config.fonts.name_fallbacks.clear();
        let result = render_document(&[Entry::new("A", None)], &config, &FontBook::new());
        assert!(matches!(result, Err(BadgeError::FontUnavailable { .. })));
    }
}
