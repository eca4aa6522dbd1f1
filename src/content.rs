//! Content stream rendering for badge pages.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, SpanLayout};
use id_arena::Arena;
use pdf_writer::{Content, Name, Str};

/// Renders page contents to a PDF content stream, converting each high-level
/// drawing operation into low-level PDF operators.
pub(crate) fn render_contents(contents: &[PageContents], fonts: &Arena<Font>) -> Vec<u8> {
    let mut content = Content::new();

    for page_content in contents.iter() {
        match page_content {
            PageContents::SaveState => {
                content.save_state();
            }
            PageContents::RestoreState => {
                content.restore_state();
            }
            PageContents::Transform(transform) => {
                content.transform(transform.as_array());
            }
            PageContents::FillRect { rect, colour } => {
                set_fill(&mut content, *colour);
                content.rect(*rect.x1, *rect.y1, *rect.width(), *rect.height());
                content.fill_nonzero();
            }
            PageContents::FillPolygon { points, colour } => {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                set_fill(&mut content, *colour);
                content.move_to(*first.0, *first.1);
                for point in rest {
                    content.line_to(*point.0, *point.1);
                }
                content.close_path();
                content.fill_nonzero();
            }
            PageContents::StrokeLine {
                from,
                to,
                width,
                colour,
            } => {
                set_stroke(&mut content, *colour);
                content.set_line_width(**width);
                content.move_to(*from.0, *from.1);
                content.line_to(*to.0, *to.1);
                content.stroke();
            }
            PageContents::Text(span) => {
                render_text_span(&mut content, span, fonts);
            }
        }
    }

    content.finish()
}

fn render_text_span(content: &mut Content, span: &SpanLayout, fonts: &Arena<Font>) {
    let Some(font) = fonts.get(span.font.id) else {
        tracing::warn!("text `{}` refers to a font missing from the document", span.text);
        return;
    };

    // Identity-H: every character is its two-byte big-endian glyph id
    let glyphs: Vec<u8> = span
        .text
        .chars()
        .flat_map(|ch| font.glyph_id_or_replacement(ch).to_be_bytes())
        .collect();

    set_fill(content, span.colour);
    content.begin_text();
    content.set_font(
        Name(format!("F{}", span.font.id.index()).as_bytes()),
        *span.font.size,
    );
    content.next_line(*span.coords.0, *span.coords.1);
    content.show(Str(&glyphs));
    content.end_text();
}

fn set_fill(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_fill_gray(g),
    };
}

fn set_stroke(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_stroke_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_stroke_gray(g),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::rect::Rect;
    use crate::transform::Transform;
    use crate::units::Pt;

    fn rendered(contents: &[PageContents]) -> String {
        String::from_utf8(render_contents(contents, &Arena::new())).expect("content is ascii")
    }

    #[test]
    fn state_and_transforms_become_q_and_cm() {
        let out = rendered(&[
            PageContents::SaveState,
            PageContents::Transform(Transform::translate(Pt(18.0), Pt(36.0))),
            PageContents::RestoreState,
        ]);
        assert_eq!(out.lines().collect::<Vec<_>>(), ["q", "1 0 0 1 18 36 cm", "Q"]);
    }

    #[test]
    fn polygons_are_closed_and_filled() {
        let out = rendered(&[PageContents::FillPolygon {
            points: vec![
                (Pt(0.0), Pt(0.0)),
                (Pt(0.0), Pt(10.0)),
                (Pt(10.0), Pt(10.0)),
            ],
            colour: colours::WHITE,
        }]);
        assert!(out.contains("0 0 m"));
        assert!(out.contains("10 10 l"));
        assert!(out.contains("h"));
        assert!(out.trim_end().ends_with('f'));
    }

    #[test]
    fn empty_polygons_draw_nothing() {
        let out = rendered(&[
            PageContents::FillPolygon {
                points: Vec::new(),
                colour: colours::WHITE,
            },
            PageContents::FillRect {
                rect: Rect::from_size(Pt(612.0), Pt(792.0)),
                colour: colours::BLACK,
            },
        ]);
        assert!(!out.contains(" m"));
        assert!(out.contains("0 0 612 792 re"));
    }
}
