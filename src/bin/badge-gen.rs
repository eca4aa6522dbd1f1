use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use badge_gen::{
    frame_rng, read_entries, render, render_document, BadgeStyle, Config, FontBook, MonoFont, Pt,
    RecordingCanvas,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "badge-gen", version, about = "Lay out name badges onto printable PDF sheets")]
struct Args {
    /// Delimited file with one badge per row: name, then optional company
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE", default_value = "badges.pdf")]
    output: PathBuf,

    /// JSON configuration file; command line flags override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extra directory to search for fonts (repeatable), searched before the system fonts
    #[arg(long, value_name = "DIR")]
    font_dir: Vec<PathBuf>,

    /// Only use fonts from the configured directories
    #[arg(long, action = clap::ArgAction::SetTrue)]
    no_system_fonts: bool,

    /// Font for names: a font name or a path to a .ttf/.otf file
    #[arg(long, value_name = "NAME")]
    name_font: Option<String>,

    /// Font for companies: a font name or a path to a .ttf/.otf file
    #[arg(long, value_name = "NAME")]
    company_font: Option<String>,

    /// Named sheet size, e.g. letter, legal, a4
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    #[arg(long, action = clap::ArgAction::SetTrue)]
    landscape: bool,

    /// Badge width in points
    #[arg(long, value_name = "PT")]
    badge_width: Option<f32>,

    /// Badge height in points
    #[arg(long, value_name = "PT")]
    badge_height: Option<f32>,

    /// Sheet margin in points
    #[arg(long, value_name = "PT")]
    margin: Option<f32>,

    /// Copies of each badge, side by side
    #[arg(short, long, value_name = "N")]
    multiplicity: Option<usize>,

    #[arg(short, long, value_name = "CHAR")]
    delimiter: Option<char>,

    /// Seed for reproducible frames
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Start with a single sample badge
    #[arg(long, action = clap::ArgAction::SetTrue)]
    preview: bool,

    /// Shade the box each name is fitted into
    #[arg(long, action = clap::ArgAction::SetTrue)]
    debug_boxes: bool,

    /// Lay everything out and report, without fonts or output
    #[arg(long, action = clap::ArgAction::SetTrue)]
    dry_run: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if !self.font_dir.is_empty() {
            let mut dirs = self.font_dir.clone();
            dirs.append(&mut config.fonts.dirs);
            config.fonts.dirs = dirs;
        }
        config.fonts.system &= !self.no_system_fonts;
        if let Some(name) = &self.name_font {
            config.fonts.name = name.clone();
        }
        if let Some(company) = &self.company_font {
            config.fonts.company = company.clone();
        }
        if let Some(sheet) = &self.sheet {
            config.sheet.size = Some(sheet.clone());
        }
        config.sheet.landscape |= self.landscape;
        if let Some(width) = self.badge_width {
            config.badge.width = Pt(width);
        }
        if let Some(height) = self.badge_height {
            config.badge.height = Pt(height);
        }
        if let Some(margin) = self.margin {
            config.sheet.margin = Pt(margin);
        }
        if let Some(multiplicity) = self.multiplicity {
            config.sheet.multiplicity = multiplicity;
        }
        if let Some(delimiter) = self.delimiter {
            config.data.delimiter = delimiter;
        }
        if self.seed.is_some() {
            config.frame.seed = self.seed;
        }
        config.sheet.preview |= self.preview;
        config.badge.debug_boxes |= self.debug_boxes;
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("badge_gen={level}"))
        }))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    let entries = read_entries(&args.input, &config.data)?;
    if entries.is_empty() {
        bail!("no badges to make: {} has no rows with a name", args.input.display());
    }
    info!("read {} entries from {}", entries.len(), args.input.display());

    if args.dry_run {
        let style = BadgeStyle::new(&config, MonoFont::default(), MonoFont::default());
        let mut canvas = RecordingCanvas::default();
        let report = render(&mut canvas, &entries, &style, &mut frame_rng(&config.frame))?;
        println!(
            "{} badges on {} sheets ({} columns x {} rows), {} pages in total",
            report.badges,
            report.pages,
            report.cols,
            report.rows,
            canvas.pages().len()
        );
        return Ok(());
    }

    let fonts = FontBook::from_config(&config.fonts);
    info!("{} font faces available", fonts.len());
    let (document, report) = render_document(&entries, &config, &fonts)?;

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    document
        .write(BufWriter::new(file))
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(
        "wrote {} badges on {} sheets to {}",
        report.badges,
        report.pages,
        args.output.display()
    );
    Ok(())
}
