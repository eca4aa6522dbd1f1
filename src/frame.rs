use crate::canvas::Canvas;
use crate::colour::Colour;
use crate::config::FrameConfig;
use crate::rect::Point;
use crate::units::Pt;
use rand::Rng;

/// A jagged, hand-drawn looking rectangle.
///
/// The outline starts at the origin and runs up the left side, right along the
/// top, down the right side and back along the bottom. Its four corners are
/// exact; every vertex between them is nudged at random.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub points: Vec<Point>,
    /// How many segments the left and top sides were split into
    pub segments: u32,
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: Pt) -> Pt {
    if *amount > 0.0 {
        Pt(rng.gen_range(-*amount..=*amount))
    } else {
        Pt::ZERO
    }
}

impl Frame {
    /// Generate a `width` by `height` frame, drawing every random choice from `rng`
    pub fn generate<R: Rng + ?Sized>(width: Pt, height: Pt, config: &FrameConfig, rng: &mut R) -> Frame {
        let min = config.segments_min.max(2);
        let segments = if config.segments_max > min {
            rng.gen_range(min..config.segments_max)
        } else {
            min
        };
        let across = config.perpendicular_jitter;
        let along = config.parallel_jitter;
        let step_x = width / segments as f32;
        let step_y = height / segments as f32;

        let mut points = Vec::with_capacity(4 * segments as usize);
        points.push((Pt::ZERO, Pt::ZERO));
        for i in 1..segments {
            let y = step_y * i as f32;
            points.push((jitter(rng, across), y + jitter(rng, along)));
        }
        points.push((Pt::ZERO, height));
        for i in 1..segments {
            let x = step_x * i as f32;
            points.push((x + jitter(rng, along), height + jitter(rng, across)));
        }
        points.push((width, height));
        // the way back visits one vertex fewer per side, skipping the one nearest the origin
        for i in (2..segments).rev() {
            let y = step_y * i as f32;
            points.push((width + jitter(rng, across), y + jitter(rng, along)));
        }
        points.push((width, Pt::ZERO));
        for i in (2..segments).rev() {
            let x = step_x * i as f32;
            points.push((x + jitter(rng, along), jitter(rng, across)));
        }

        Frame { points, segments }
    }

    /// Fill the frame with its origin at the canvas origin
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, colour: Colour) {
        canvas.fill_polygon(&self.points, colour);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> FrameConfig {
        FrameConfig {
            seed: Some(7),
            ..FrameConfig::default()
        }
    }

    #[test]
    fn corners_are_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let frame = Frame::generate(Pt(256.0), Pt(184.0), &config(), &mut rng);
            for corner in [
                (Pt(0.0), Pt(0.0)),
                (Pt(0.0), Pt(184.0)),
                (Pt(256.0), Pt(184.0)),
                (Pt(256.0), Pt(0.0)),
            ] {
                assert!(frame.points.contains(&corner), "missing {corner:?}");
            }
            assert_eq!(frame.points[0], (Pt(0.0), Pt(0.0)));
        }
    }

    #[test]
    fn segment_count_stays_in_range_and_sets_the_vertex_count() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let frame = Frame::generate(Pt(100.0), Pt(80.0), &config(), &mut rng);
            assert!((4..6).contains(&frame.segments));
            let s = frame.segments as usize;
            assert_eq!(frame.points.len(), 4 + 2 * (s - 1) + 2 * (s - 2));
        }
    }

    #[test]
    fn without_jitter_the_frame_is_a_subdivided_rectangle() {
        let config = FrameConfig {
            segments_min: 4,
            segments_max: 4,
            perpendicular_jitter: Pt(0.0),
            parallel_jitter: Pt(0.0),
            seed: None,
        };
        let frame = Frame::generate(Pt(40.0), Pt(20.0), &config, &mut StdRng::seed_from_u64(3));
        assert_eq!(frame.segments, 4);
        assert_eq!(
            frame.points,
            vec![
                (Pt(0.0), Pt(0.0)),
                (Pt(0.0), Pt(5.0)),
                (Pt(0.0), Pt(10.0)),
                (Pt(0.0), Pt(15.0)),
                (Pt(0.0), Pt(20.0)),
                (Pt(10.0), Pt(20.0)),
                (Pt(20.0), Pt(20.0)),
                (Pt(30.0), Pt(20.0)),
                (Pt(40.0), Pt(20.0)),
                (Pt(40.0), Pt(15.0)),
                (Pt(40.0), Pt(10.0)),
                (Pt(40.0), Pt(0.0)),
                (Pt(30.0), Pt(0.0)),
                (Pt(20.0), Pt(0.0)),
            ]
        );
    }

    #[test]
    fn same_seed_same_frame() {
        let a = Frame::generate(Pt(256.0), Pt(184.0), &config(), &mut StdRng::seed_from_u64(9));
        let b = Frame::generate(Pt(256.0), Pt(184.0), &config(), &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
