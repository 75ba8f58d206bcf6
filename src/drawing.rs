use crate::computing::Bounds;
use crate::computing::Couple;
use crate::computing::CurveResult;
use crate::computing::Float;
use crate::computing::GeometryResult;
use crate::computing::DEGENERACY_EPSILON;
use crate::computing::bounds_center;
use crate::computing::get_curve_within;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use alloc::vec::Vec;

/// Arc on the ellipse inscribed in `bounds`.
///
/// Angles are in degrees, 0° at 3 o'clock; a positive sweep turns
/// clockwise on screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcStep {
    pub bounds: Bounds,
    pub start_angle: Float,
    pub sweep_angle: Float,
}

impl ArcStep {
    pub fn point_at(&self, degrees: Float) -> Couple {
        let center = bounds_center(&self.bounds);
        let rx = (self.bounds.max.x - self.bounds.min.x) * 0.5;
        let ry = (self.bounds.max.y - self.bounds.min.y) * 0.5;
        let (sin, cos) = degrees.to_radians().sin_cos();
        Couple::new(center.x + rx * cos, center.y + ry * sin)
    }

    pub fn start_point(&self) -> Couple {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Couple {
        self.point_at(self.start_angle + self.sweep_angle)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathStep {
    MoveTo(Couple),
    LineTo(Couple),
    Arc(ArcStep),
}

pub type Path = Vec<PathStep>;

/// Whatever receives path commands: a recorded [`Path`], a
/// [`Flattener`](crate::rendering::Flattener), or a host surface.
pub trait PathSink {
    fn move_to(&mut self, point: Couple);
    fn line_to(&mut self, point: Couple);
    fn add_arc(&mut self, bounds: Bounds, start_angle: Float, sweep_angle: Float);
}

impl PathSink for Path {
    fn move_to(&mut self, point: Couple) {
        self.push(PathStep::MoveTo(point));
    }

    fn line_to(&mut self, point: Couple) {
        self.push(PathStep::LineTo(point));
    }

    fn add_arc(&mut self, bounds: Bounds, start_angle: Float, sweep_angle: Float) {
        self.push(PathStep::Arc(ArcStep {
            bounds,
            start_angle,
            sweep_angle,
        }));
    }
}

/// Replays recorded steps into another sink.
pub fn replay<S: PathSink + ?Sized>(steps: &[PathStep], sink: &mut S) {
    for step in steps {
        match *step {
            PathStep::MoveTo(p) => sink.move_to(p),
            PathStep::LineTo(p) => sink.line_to(p),
            PathStep::Arc(arc) => sink.add_arc(arc.bounds, arc.start_angle, arc.sweep_angle),
        }
    }
}

/// How the Arc Director picks which of the two arcs to draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SweepRule {
    /// Always clockwise from start to end, ignoring the control point.
    Ordering,
    /// The arc that contains the control point; may sweep counter-clockwise.
    ThroughControl,
}

impl SweepRule {
    /// Sweep in degrees from `start` to `end`, clockwise when positive.
    pub fn sweep(self, start: f64, end: f64, control: f64) -> f64 {
        let clockwise = match start > end {
            true => 360.0 - start + end,
            false => end - start,
        };

        match self {
            SweepRule::Ordering => clockwise,
            SweepRule::ThroughControl => {
                let mut offset = control - start;
                if offset < 0.0 {
                    offset += 360.0;
                }
                match offset <= clockwise {
                    true => clockwise,
                    false => clockwise - 360.0,
                }
            }
        }
    }
}

impl Default for SweepRule {
    fn default() -> Self {
        SweepRule::Ordering
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CurveConfig {
    pub sweep_rule: SweepRule,
    /// Threshold on the bisector determinant under which input is degenerate.
    pub epsilon: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            sweep_rule: SweepRule::default(),
            epsilon: DEGENERACY_EPSILON,
        }
    }
}

/// Appends an arc from `start` to `end` on the circle through all
/// three points, using the default [`CurveConfig`].
///
/// With [`SweepRule::Ordering`] the arc is not guaranteed to pass
/// through `control`.
pub fn build_curve<S: PathSink + ?Sized>(
    start: Couple,
    control: Couple,
    end: Couple,
    path: &mut S,
) -> GeometryResult<CurveResult> {
    build_curve_with(&CurveConfig::default(), start, control, end, path)
}

/// On error, nothing is appended to `path`.
pub fn build_curve_with<S: PathSink + ?Sized>(
    config: &CurveConfig,
    start: Couple,
    control: Couple,
    end: Couple,
    path: &mut S,
) -> GeometryResult<CurveResult> {
    let curve = get_curve_within(start, control, end, config.epsilon)?;
    let sweep = config.sweep_rule.sweep(curve.start_angle, curve.end_angle, curve.center_angle);

    log::debug!(
        "curve: start {:.3}° end {:.3}° control {:.3}° sweep {:.3}° ({:?})",
        curve.start_angle,
        curve.end_angle,
        curve.center_angle,
        sweep,
        config.sweep_rule,
    );

    path.move_to(start);
    path.add_arc(curve.bounds, curve.start_angle as Float, sweep as Float);

    Ok(curve)
}

/// Straight segments through `points`; does nothing for an empty slice.
pub fn push_polyline<S: PathSink + ?Sized>(points: &[Couple], path: &mut S) {
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }
    }
}

/// Circle of radius `size` around `center`, crossed by a horizontal
/// and a vertical line of the same half-length.
pub fn push_crosshair<S: PathSink + ?Sized>(center: Couple, size: Float, path: &mut S) {
    let d = Couple::new(size, size);
    let bounds = Bounds {
        min: center - d,
        max: center + d,
    };

    path.move_to(Couple::new(center.x + size, center.y));
    path.add_arc(bounds, 0.0, 360.0);

    path.move_to(Couple::new(center.x - size, center.y));
    path.line_to(Couple::new(center.x + size, center.y));
    path.move_to(Couple::new(center.x, center.y - size));
    path.line_to(Couple::new(center.x, center.y + size));
}
