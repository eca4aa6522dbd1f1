use crate::canvas::{Canvas, SavedState};
use crate::colour::Colour;
use crate::config::FitConfig;
use crate::units::Pt;
use tracing::{debug, warn};

/// Break a name into the lines it will be drawn on: one per space separated word,
/// with hyphenated words broken after each hyphen.
///
/// ```
/// # use badge_gen::layout::split_lines;
/// assert_eq!(split_lines("Jean-Luc  Picard"), ["Jean-", "Luc", "Picard"]);
/// ```
pub fn split_lines(name: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for word in name.split(' ').filter(|word| !word.is_empty()) {
        let mut fragments = word.split('-').peekable();
        while let Some(fragment) = fragments.next() {
            if fragments.peek().is_some() {
                lines.push(format!("{fragment}-"));
            } else {
                lines.push(fragment.to_string());
            }
        }
    }
    lines
}

/// One line of a name, measured and scaled to span its box
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    /// What gets drawn, including any trailing padding
    pub text: String,
    pub width: Pt,
    /// Height above the baseline
    pub height: Pt,
    pub point_size: Pt,
    /// How much the line was enlarged from the reference size
    pub multiplier: f32,
    /// Room left below the line for descenders
    pub extra_space: Pt,
}

/// Where one line lands, in the coordinates of the box the name was fitted into
#[derive(Debug, Clone, PartialEq)]
pub struct DrawInstruction {
    pub text: String,
    /// Left end of the baseline
    pub x: Pt,
    pub y: Pt,
    pub point_size: Pt,
}

/// A name fitted into a box, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct NameLayout {
    pub lines: Vec<LineLayout>,
    /// Height of the whole block before any shrinking
    pub total_text_height: Pt,
    /// 1 when the block fits, otherwise the factor it is shrunk by
    pub scale_value: f32,
    /// Gap above (and below) a block that fits
    pub vertical_offset: Pt,
    /// Gap left of a block that had to be shrunk
    pub horizontal_offset: Pt,
    pub box_width: Pt,
    pub box_height: Pt,
    pub line_spacing: Pt,
}

/// Lays names out to fill a box as tightly as possible
#[derive(Debug, Clone, Copy)]
pub struct TextFitter<'c> {
    config: &'c FitConfig,
}

impl<'c> TextFitter<'c> {
    pub fn new(config: &'c FitConfig) -> TextFitter<'c> {
        TextFitter { config }
    }

    fn padded(&self, line: String) -> String {
        match line.chars().last() {
            Some(last) if self.config.trailing_padding_chars.contains(last) => {
                line + &self.config.trailing_padding
            }
            _ => line,
        }
    }

    fn has_descender(&self, line: &str) -> bool {
        line.chars().any(|ch| self.config.descenders.contains(ch))
    }

    /// Measure and scale one line. Lines with nothing to measure come back as `None`.
    fn fit_line<C: Canvas + ?Sized>(&self, canvas: &C, font: C::Font, line: String, box_width: Pt) -> Option<LineLayout> {
        let text = self.padded(line);
        let reference = self.config.reference_size;
        let ref_height = self.config.reference_line_height;
        let (ref_width, _) = canvas.measure_text(&text, font, reference);
        if *ref_width <= 0.0 || *box_width <= 0.0 {
            warn!("line {text:?} has no width to scale, leaving it out");
            return None;
        }

        let ideal = box_width / ref_width;
        let multiplier = ideal.min(self.config.max_multiplier);
        if multiplier < ideal {
            debug!("line {text:?} capped at {multiplier}x (would fill the box at {ideal:.2}x)");
        }

        let width = ref_width * multiplier;
        if *width > *box_width + 0.01 {
            warn!("line {text:?} overflows its box: {width} > {box_width}");
        }
        let point_size = reference * multiplier;
        let extra_space = if self.has_descender(&text) {
            point_size * self.config.descender_ratio
        } else {
            Pt::ZERO
        };

        Some(LineLayout {
            text,
            width,
            height: ref_height * multiplier,
            point_size,
            multiplier,
            extra_space,
        })
    }

    /// Fit `name` into a `box_width` by `box_height` box, measuring with `canvas`
    pub fn fit<C: Canvas + ?Sized>(
        &self,
        canvas: &C,
        font: C::Font,
        name: &str,
        box_width: Pt,
        box_height: Pt,
    ) -> NameLayout {
        let spacing = self.config.line_spacing;
        let lines: Vec<LineLayout> = split_lines(name)
            .into_iter()
            .filter_map(|line| self.fit_line(canvas, font, line, box_width))
            .collect();

        let mut total_text_height: Pt = lines.iter().map(|l| l.height + l.extra_space).sum();
        if lines.len() > 1 {
            total_text_height += spacing * (lines.len() - 1) as f32;
        }

        let (scale_value, vertical_offset, horizontal_offset) = if box_height >= total_text_height {
            (1.0, (box_height - total_text_height) / 2.0, Pt::ZERO)
        } else {
            let scale = (box_height / total_text_height).max(0.0);
            (scale, Pt::ZERO, box_width * (1.0 - scale) / 2.0)
        };
        debug!(
            "fitted {name:?} as {} lines, {total_text_height} tall, scaled by {scale_value}",
            lines.len()
        );

        NameLayout {
            lines,
            total_text_height,
            scale_value,
            vertical_offset,
            horizontal_offset,
            box_width,
            box_height,
            line_spacing: spacing,
        }
    }
}

impl NameLayout {
    /// Where each line's baseline starts, and at which size, once the block is placed
    pub fn instructions(&self) -> Vec<DrawInstruction> {
        let scale = self.scale_value;
        let top = self.box_height - self.vertical_offset;
        let mut down = Pt::ZERO;
        let mut instructions = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            down += line.height;
            instructions.push(DrawInstruction {
                text: line.text.clone(),
                x: self.horizontal_offset + (self.box_width - line.width) / 2.0 * scale,
                y: top - down * scale,
                point_size: line.point_size * scale,
            });
            down += self.line_spacing + line.extra_space;
        }
        instructions
    }

    /// Draw the lines onto `canvas`, whose origin is the bottom left of the box
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, font: C::Font, colour: Colour) {
        let mut block = SavedState::new(canvas);
        block.translate(Pt::ZERO, self.box_height);
        if self.scale_value < 1.0 {
            block.translate(self.horizontal_offset, Pt::ZERO);
            block.scale(self.scale_value);
        } else {
            block.translate(Pt::ZERO, -self.vertical_offset);
        }

        let last = self.lines.len().saturating_sub(1);
        for (i, line) in self.lines.iter().enumerate() {
            block.translate(Pt::ZERO, -line.height);
            {
                let mut centred = SavedState::new(&mut *block);
                centred.translate((self.box_width - line.width) / 2.0, Pt::ZERO);
                centred.draw_text(&line.text, (Pt::ZERO, Pt::ZERO), font, line.point_size, colour);
            }
            if i < last {
                block.translate(Pt::ZERO, -(self.line_spacing + line.extra_space));
            }
        }
    }
}
