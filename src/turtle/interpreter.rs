//! Walks a produced sequence with a turtle and turns every `F` into draw calls.
//!
//! The interpreter is a resumable step function: [`Interpreter::step`] consumes one
//! symbol, so a caller can spread a long render over several frames. [`render`] runs it
//! to completion in one go.

use geo_types::{coord, Line};
use log::debug;
use rand::Rng;

use super::{Hsba, TurtleState};
use crate::l_system::Symbol;
use crate::params::RenderParams;
use crate::shapes;
use crate::surface::{Paint, ShapeKind, Surface};

/// Counters collected over one render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Symbols read from the sequence, at most the complexity budget.
    pub symbols_consulted: usize,
    /// Draw calls handed to the surface. A cube counts as three.
    pub primitives: usize,
    pub unknown_symbols: usize,
    /// `]` seen with nothing saved. Each one was ignored.
    pub unbalanced_pops: usize,
    /// `[` still saved when the render stopped. Discarded.
    pub unmatched_pushes: usize,
}

pub struct Interpreter<'a, R: Rng + ?Sized> {
    sequence: &'a [Symbol],
    params: &'a RenderParams,
    rng: &'a mut R,
    turtle: TurtleState,
    stack: Vec<TurtleState>,
    repeat: u32,
    theta: f64,
    cursor: usize,
    budget: usize,
    report: RenderReport,
}

impl<'a, R: Rng + ?Sized> Interpreter<'a, R> {
    /// Places the turtle at the canvas center, heading along +x, in the start color.
    /// Parameters are taken as given; validate them first.
    pub fn new(sequence: &'a [Symbol], params: &'a RenderParams, rng: &'a mut R) -> Self {
        let color = Hsba::new(params.start_hue, params.start_sat, params.start_bri, 1.0);
        let center = coord! {x: params.canvas.width / 2.0, y: params.canvas.height / 2.0};
        Interpreter {
            sequence,
            params,
            rng,
            turtle: TurtleState::new(center, color),
            stack: vec![],
            repeat: 1,
            theta: params.theta(),
            cursor: 0,
            budget: sequence.len().min(params.complexity as usize),
            report: RenderReport::default(),
        }
    }

    pub fn turtle(&self) -> &TurtleState {
        &self.turtle
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// The pending repeat count for the next instruction.
    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.budget
    }

    /// Interprets the next symbol. Returns `false`, without doing anything, once the
    /// budget is spent.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.is_done() {
            return false;
        }
        let symbol = self.sequence[self.cursor];
        self.cursor += 1;
        self.report.symbols_consulted = self.cursor;

        match symbol {
            Symbol::Repeat(count) => self.repeat = u32::from(count.min(9)),
            Symbol::TurnRight => self.rotate(1.0),
            Symbol::TurnLeft => self.rotate(-1.0),
            Symbol::RotateDouble => self.rotate(2.0),
            Symbol::RotateHalf => self.rotate(0.5),
            Symbol::RotateSquared => self.rotate(self.theta),
            Symbol::RotateCubed => self.rotate(self.theta * self.theta),
            Symbol::Push => self.stack.push(self.turtle.clone()),
            Symbol::Pop => match self.stack.pop() {
                Some(saved) => self.turtle = saved,
                None => {
                    self.report.unbalanced_pops += 1;
                    debug!("ignoring unbalanced pop at symbol {}", self.cursor - 1);
                }
            },
            Symbol::Forward => self.forward(surface),
            Symbol::W | Symbol::X | Symbol::Y | Symbol::Z => {}
            Symbol::Unknown(_) => self.report.unknown_symbols += 1,
        }
        true
    }

    /// Runs the remaining budget and reports.
    pub fn run<S: Surface + ?Sized>(mut self, surface: &mut S) -> RenderReport {
        while self.step(surface) {}
        self.finish()
    }

    /// Stops where the interpreter is, discarding any saved states still on the stack.
    pub fn finish(mut self) -> RenderReport {
        self.report.unmatched_pushes = self.stack.len();
        if !self.stack.is_empty() {
            debug!("discarding {} unmatched pushes", self.stack.len());
            self.stack.clear();
        }
        self.report
    }

    fn rotate(&mut self, factor: f64) {
        self.turtle.turn(self.theta * factor * f64::from(self.repeat));
        self.repeat = 1;
    }

    /// Width and height of the shape box for one repetition.
    fn shape_size(&mut self) -> (f64, f64) {
        let p = self.params;
        if p.toggle_flags.fixed_length {
            let length = fixed_length(p);
            return (-length, -length);
        }
        let base = p.canvas.height;
        // The multipliers may come in either order.
        let (a, b) = (base * p.min_size_multiplier, base * p.max_size_multiplier);
        let (low, high) = (a.min(b), a.max(b));
        let w = self.rng.gen_range(low..=high) * p.size;
        let h = if p.toggle_flags.ratio_link && p.height_ratio >= 0.0 && p.width_ratio > 0.0 {
            w * p.height_ratio / p.width_ratio
        } else {
            self.rng.gen_range(low..=high) * p.size
        };
        (w, h)
    }

    fn forward<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let flags = self.params.toggle_flags;
        for _ in 0..self.repeat {
            let (w, h) = self.shape_size();
            self.turtle
                .color
                .jitter(self.params.lerp_frequency, &mut *self.rng);
            let frame = self.turtle.frame();
            for kind in ShapeKind::ALL {
                if !flags.enabled(kind) {
                    continue;
                }
                let paint = self.paint(flags.filled(kind));
                surface.begin_shape(kind);
                match kind {
                    ShapeKind::Line => {
                        let line = if flags.fixed_length {
                            Line::new(coord! {x: 0.0, y: 0.0}, coord! {x: 0.0, y: h})
                        } else {
                            shapes::line(w, h)
                        };
                        surface.line(&line, &frame, &paint);
                        self.report.primitives += 1;
                    }
                    ShapeKind::Square => {
                        surface.rect(&shapes::square(w, h), &frame, &paint);
                        self.report.primitives += 1;
                    }
                    ShapeKind::Circle => {
                        let (center, radii) = shapes::ellipse(w, h);
                        surface.ellipse(center, radii, &frame, &paint);
                        self.report.primitives += 1;
                    }
                    ShapeKind::Triangle => {
                        surface.polygon(&shapes::triangle(w, h), &frame, &paint);
                        self.report.primitives += 1;
                    }
                    ShapeKind::Hexagon => {
                        surface.polygon(&shapes::hexagon(w, h), &frame, &paint);
                        self.report.primitives += 1;
                    }
                    ShapeKind::Cube => {
                        for face in shapes::cube(w, h) {
                            surface.polygon(&face, &frame, &paint);
                            self.report.primitives += 1;
                        }
                    }
                }
            }
        }
        self.turtle.scatter(self.params.scatter);
        self.repeat = 1;
    }

    fn paint(&self, filled: bool) -> Paint {
        let color = &self.turtle.color;
        Paint {
            stroke: color.to_rgba(self.params.alpha / 255.0),
            stroke_weight: self.params.stroke_weight,
            fill: if filled {
                Some(color.to_rgba(self.params.opacity / 255.0))
            } else {
                None
            },
        }
    }
}

/// Segment length of fixed-length mode: `startLength * size^gens`.
pub fn fixed_length(params: &RenderParams) -> f64 {
    params.start_length * params.size.powi(params.gens as i32)
}

/// Interprets `sequence` onto `surface` until the sequence or the complexity budget runs out.
pub fn render<R, S>(
    sequence: &[Symbol],
    params: &RenderParams,
    rng: &mut R,
    surface: &mut S,
) -> RenderReport
where
    R: Rng + ?Sized,
    S: Surface + ?Sized,
{
    Interpreter::new(sequence, params, rng).run(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l_system::parse_sequence;
    use crate::params::ToggleFlags;
    use crate::surface::{Primitive, Recorder};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(kinds: &[ShapeKind]) -> RenderParams {
        RenderParams {
            complexity: 2000,
            toggle_flags: ToggleFlags::only(kinds),
            ..RenderParams::default()
        }
    }

    fn run(text: &str, params: &RenderParams, seed: u64) -> (Recorder, RenderReport) {
        let sequence = parse_sequence(text);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut recorder = Recorder::new();
        let report = render(&sequence, params, &mut rng, &mut recorder);
        (recorder, report)
    }

    #[test]
    fn test_complexity_caps_symbols() {
        let sequence = vec![Symbol::Forward; 500_000];
        let params = RenderParams {
            complexity: 50,
            ..params(&[ShapeKind::Line])
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut recorder = Recorder::new();
        let report = render(&sequence, &params, &mut rng, &mut recorder);
        assert_eq!(report.symbols_consulted, 50);
        assert_eq!(report.primitives, 50);
        assert_eq!(recorder.len(), 50);
    }

    #[test]
    fn test_short_sequence_ends_early() {
        let (_, report) = run("F+F", &params(&[ShapeKind::Line]), 1);
        assert_eq!(report.symbols_consulted, 3);
        assert_eq!(report.primitives, 2);
    }

    #[test]
    fn test_step_stops_at_budget() {
        let sequence = parse_sequence("FF");
        let params = params(&[ShapeKind::Line]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut recorder = Recorder::new();
        let mut interpreter = Interpreter::new(&sequence, &params, &mut rng);
        assert!(interpreter.step(&mut recorder));
        assert!(interpreter.step(&mut recorder));
        assert!(interpreter.is_done());
        assert!(!interpreter.step(&mut recorder));
        assert_eq!(interpreter.finish().symbols_consulted, 2);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_unbalanced_brackets_are_safe() {
        let (recorder, report) = run("]]F[[", &params(&[ShapeKind::Line]), 9);
        assert_eq!(report.unbalanced_pops, 2);
        assert_eq!(report.unmatched_pushes, 2);
        assert_eq!(report.primitives, 1);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_push_pop_restores_state() {
        let sequence = parse_sequence("[++F]");
        let params = RenderParams {
            scatter: 10.0,
            ..params(&[ShapeKind::Line])
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut recorder = Recorder::new();
        let mut interpreter = Interpreter::new(&sequence, &params, &mut rng);
        let start = interpreter.turtle().clone();
        for _ in 0..4 {
            interpreter.step(&mut recorder);
        }
        assert_eq!(interpreter.stack_depth(), 1);
        assert_ne!(interpreter.turtle().position, start.position);
        interpreter.step(&mut recorder);
        assert_eq!(interpreter.stack_depth(), 0);
        assert_eq!(interpreter.turtle(), &start);
    }

    #[test]
    fn test_rotation_factors() {
        let theta = RenderParams::default().theta();
        for (text, expected) in [
            ("+", theta),
            ("-", -theta),
            ("*", 2.0 * theta),
            ("/", 0.5 * theta),
            ("^", theta * theta),
            ("$", theta * theta * theta),
            ("3+", 3.0 * theta),
            ("3-+", -3.0 * theta + theta),
            ("0+", 0.0),
        ] {
            let sequence = parse_sequence(text);
            let params = params(&[]);
            let mut rng = StdRng::seed_from_u64(1);
            let mut recorder = Recorder::new();
            let mut interpreter = Interpreter::new(&sequence, &params, &mut rng);
            while interpreter.step(&mut recorder) {}
            assert!(
                (interpreter.turtle().heading - expected).abs() < 1e-12,
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_repeat_counts() {
        let line = params(&[ShapeKind::Line]);
        assert_eq!(run("3F", &line, 1).1.primitives, 3);
        assert_eq!(run("0F", &line, 1).1.primitives, 0);
        assert_eq!(run("3+F", &line, 1).1.primitives, 1);
        assert_eq!(run("3FF", &line, 1).1.primitives, 4);
        // Variables, unknowns and brackets leave the pending count alone.
        assert_eq!(run("3XF", &line, 1).1.primitives, 3);
        assert_eq!(run("3?F", &line, 1).1.primitives, 3);
        assert_eq!(run("3[F", &line, 1).1.primitives, 3);
        assert_eq!(run("92F", &line, 1).1.primitives, 2);
    }

    #[test]
    fn test_oversized_repeat_acts_as_nine() {
        let sequence = vec![Symbol::Repeat(12), Symbol::Forward];
        let params = params(&[ShapeKind::Line]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut recorder = Recorder::new();
        let report = render(&sequence, &params, &mut rng, &mut recorder);
        assert_eq!(report.primitives, 9);
        assert_eq!(
            report.primitives,
            run(&crate::l_system::format_sequence(&sequence), &params, 1).1.primitives
        );
    }

    #[test]
    fn test_unknown_symbols_are_counted() {
        let (recorder, report) = run("F?!F", &params(&[ShapeKind::Line]), 1);
        assert_eq!(report.unknown_symbols, 2);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_shape_order_and_cube_faces() {
        let (recorder, report) = run("F", &params(&ShapeKind::ALL), 5);
        assert_eq!(report.primitives, 8);
        let kinds: Vec<ShapeKind> = recorder.calls().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ShapeKind::Line,
                ShapeKind::Square,
                ShapeKind::Circle,
                ShapeKind::Triangle,
                ShapeKind::Hexagon,
                ShapeKind::Cube,
                ShapeKind::Cube,
                ShapeKind::Cube,
            ]
        );
    }

    #[test]
    fn test_no_shapes_enabled_draws_nothing() {
        let (recorder, report) = run("FFFF", &params(&[]), 5);
        assert!(recorder.is_empty());
        assert_eq!(report.primitives, 0);
        assert_eq!(report.symbols_consulted, 4);
    }

    #[test]
    fn test_same_seed_same_calls() {
        let params = params(&ShapeKind::ALL);
        let text = "F+F[-F*F]3F/F^F$F";
        let (a, _) = run(text, &params, 42);
        let (b, _) = run(text, &params, 42);
        let (c, _) = run(text, &params, 43);
        assert_eq!(a.calls(), b.calls());
        assert_ne!(a.calls(), c.calls());
    }

    #[test]
    fn test_scatter_moves_diagonally() {
        let params = RenderParams {
            scatter: 10.0,
            ..params(&[ShapeKind::Line])
        };
        let (recorder, _) = run("FF", &params, 1);
        let origin = |i: usize| {
            let m = recorder.calls()[i].transform.matrix();
            (m[(0, 2)], m[(1, 2)])
        };
        assert_eq!(origin(0), (500.0, 500.0));
        assert_eq!(origin(1), (510.0, 510.0));
    }

    #[test]
    fn test_sizes_within_multiplier_range() {
        let params = RenderParams {
            min_size_multiplier: 0.2,
            max_size_multiplier: 0.4,
            size: 0.5,
            ..params(&[ShapeKind::Square])
        };
        let (recorder, _) = run("9F9F9F", &params, 11);
        assert_eq!(recorder.len(), 27);
        for call in recorder.calls() {
            match &call.primitive {
                Primitive::Rect(rect) => {
                    assert!(rect.width() >= 100.0 - 1e-9 && rect.width() <= 200.0 + 1e-9);
                    assert!((rect.height() - rect.width()).abs() < 1e-9);
                }
                other => panic!("unexpected primitive {:?}", other),
            }
        }
    }

    #[test]
    fn test_inverted_multipliers_sample_between_bounds() {
        let mut params = RenderParams {
            min_size_multiplier: 0.4,
            max_size_multiplier: 0.2,
            ..params(&[ShapeKind::Square])
        };
        params.toggle_flags.ratio_link = false;
        let (recorder, report) = run("9F9F", &params, 21);
        assert_eq!(report.primitives, 18);
        for call in recorder.calls() {
            match &call.primitive {
                Primitive::Rect(rect) => {
                    for side in [rect.width(), rect.height()] {
                        assert!(side >= 200.0 - 1e-9 && side <= 400.0 + 1e-9);
                    }
                }
                other => panic!("unexpected primitive {:?}", other),
            }
        }
    }

    #[test]
    fn test_ratio_link_and_unlinked_heights() {
        let mut params = RenderParams {
            width_ratio: 1.0,
            height_ratio: 2.0,
            ..params(&[ShapeKind::Square])
        };
        let (recorder, _) = run("5F", &params, 2);
        for call in recorder.calls() {
            if let Primitive::Rect(rect) = &call.primitive {
                assert!((rect.height() - 2.0 * rect.width()).abs() < 1e-9);
            }
        }

        params.toggle_flags.ratio_link = false;
        let (recorder, _) = run("5F", &params, 2);
        assert!(recorder.calls().iter().any(|call| match &call.primitive {
            Primitive::Rect(rect) => (rect.height() - 2.0 * rect.width()).abs() > 1e-6,
            _ => false,
        }));
    }

    #[test]
    fn test_zero_width_ratio_draws_height() {
        let params = RenderParams {
            width_ratio: 0.0,
            ..params(&[ShapeKind::Square])
        };
        let (recorder, _) = run("5F", &params, 4);
        for call in recorder.calls() {
            if let Primitive::Rect(rect) = &call.primitive {
                assert!(rect.height().is_finite());
            }
        }
    }

    #[test]
    fn test_fixed_length_line() {
        let mut params = RenderParams {
            gens: 2,
            start_length: 100.0,
            size: 0.5,
            ..params(&[ShapeKind::Line, ShapeKind::Square])
        };
        params.toggle_flags.fixed_length = true;
        assert_eq!(fixed_length(&params), 25.0);
        let (recorder, _) = run("FF", &params, 8);
        assert_eq!(recorder.len(), 4);
        assert_eq!(
            recorder.calls()[0].primitive,
            Primitive::Line(Line::new(
                coord! {x: 0.0, y: 0.0},
                coord! {x: 0.0, y: -25.0}
            ))
        );
        match &recorder.calls()[1].primitive {
            Primitive::Rect(rect) => {
                assert_eq!(rect.width(), 25.0);
                assert_eq!(rect.min(), coord! {x: -25.0, y: -25.0});
            }
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn test_paint_uses_alpha_and_fill_toggles() {
        let mut params = RenderParams {
            lerp_frequency: 0.0,
            alpha: 255.0,
            opacity: 51.0,
            start_hue: 0.0,
            start_sat: 100.0,
            start_bri: 100.0,
            ..params(&[ShapeKind::Line, ShapeKind::Circle])
        };
        params.toggle_flags.circle_fill = true;
        let (recorder, _) = run("F", &params, 1);
        let line = &recorder.calls()[0].paint;
        let circle = &recorder.calls()[1].paint;
        assert_eq!(line.stroke.to_rgba8(), [255, 0, 0, 255]);
        assert!(line.fill.is_none());
        assert_eq!(
            circle.fill.as_ref().map(|c| c.to_rgba8()),
            Some([255, 0, 0, 51])
        );
        assert_eq!(circle.stroke_weight, 1.0);
    }

    #[test]
    fn test_color_walk_stays_in_range() {
        let params = RenderParams {
            lerp_frequency: 20.0,
            ..params(&[ShapeKind::Line])
        };
        let sequence = vec![Symbol::Forward; 2000];
        let mut rng = StdRng::seed_from_u64(12);
        let mut recorder = Recorder::new();
        let mut interpreter = Interpreter::new(&sequence, &params, &mut rng);
        while interpreter.step(&mut recorder) {
            let color = interpreter.turtle().color;
            assert!(color.hue >= 0.0 && color.hue < 360.0);
            assert!(color.saturation >= 0.0 && color.saturation <= 100.0);
            assert!(color.brightness >= 0.0 && color.brightness <= 100.0);
        }
    }
}
