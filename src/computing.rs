use core::fmt;
use core::f64::consts::PI;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

pub type Float = f32;
pub type Couple = vek::vec::repr_c::vec2::Vec2<Float>;
pub type Bounds = vek::geom::repr_c::Aabr<Float>;
pub const C_ZERO: Couple = Couple::new(0.0, 0.0);

/// Below this, the bisector system is considered singular.
pub const DEGENERACY_EPSILON: f64 = 1e-9;

use GeometryError::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The three points are collinear or two of them coincide.
    DegenerateGeometry,
    /// An angle was requested for a point sitting on the center.
    ZeroDistance,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DegenerateGeometry => write!(f, "points are collinear or coincide"),
            ZeroDistance => write!(f, "point coincides with the circle center"),
        }
    }
}

pub type GeometryResult<T> = Result<T, GeometryError>;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: Couple,
    pub radius: Float,
}

impl Circle {
    /// Axis-aligned box the circle is inscribed in.
    pub fn bounds(&self) -> Bounds {
        let r = Couple::new(self.radius, self.radius);
        Bounds {
            min: self.center - r,
            max: self.center + r,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.center.x.is_finite() && self.center.y.is_finite() && self.radius.is_finite()
    }
}

/// Center of a bounding box, the way a canvas rectangle reports it.
pub fn bounds_center(bounds: &Bounds) -> Couple {
    Couple::new(
        (bounds.min.x + bounds.max.x) * 0.5,
        (bounds.min.y + bounds.max.y) * 0.5,
    )
}

struct Bisectors {
    x: f64,
    y: f64,
    r: f64,
    det: f64,
}

fn bisectors(p1: Couple, p2: Couple, p3: Couple) -> Bisectors {
    let (x1, y1) = (p1.x as f64, p1.y as f64);
    let (x2, y2) = (p2.x as f64, p2.y as f64);
    let (x3, y3) = (p3.x as f64, p3.y as f64);

    // e·X + f·Y = g (p1, p2) and a·X + b·Y = c (p2, p3)
    let e = 2.0 * (x2 - x1);
    let f = 2.0 * (y2 - y1);
    let g = x2 * x2 - x1 * x1 + y2 * y2 - y1 * y1;
    let a = 2.0 * (x3 - x2);
    let b = 2.0 * (y3 - y2);
    let c = x3 * x3 - x2 * x2 + y3 * y3 - y2 * y2;

    let det = e * b - a * f;
    let x = (g * b - c * f) / det;
    let y = (a * g - c * e) / (a * f - b * e);
    let r = ((x - x1) * (x - x1) + (y - y1) * (y - y1)).sqrt();

    Bisectors { x, y, r, det }
}

/// Circle through three points.
///
/// Collinear or duplicate points are not detected: the center and
/// radius come out infinite or NaN. Use [`solve_circle`] to reject them.
pub fn circumscribe(p1: Couple, p2: Couple, p3: Couple) -> Circle {
    let Bisectors { x, y, r, .. } = bisectors(p1, p2, p3);
    Circle {
        center: Couple::new(x as Float, y as Float),
        radius: r as Float,
    }
}

/// Checked version of [`circumscribe`].
pub fn solve_circle(p1: Couple, p2: Couple, p3: Couple) -> GeometryResult<Circle> {
    solve_circle_within(p1, p2, p3, DEGENERACY_EPSILON)
}

pub fn solve_circle_within(p1: Couple, p2: Couple, p3: Couple, epsilon: f64) -> GeometryResult<Circle> {
    if p1 == p2 || p2 == p3 || p1 == p3 {
        return Err(DegenerateGeometry);
    }

    let Bisectors { x, y, r, det } = bisectors(p1, p2, p3);
    if det.abs() <= epsilon {
        return Err(DegenerateGeometry);
    }

    let circle = Circle {
        center: Couple::new(x as Float, y as Float),
        radius: r as Float,
    };

    match circle.is_finite() {
        true => Ok(circle),
        false => Err(DegenerateGeometry),
    }
}

pub fn distance(a: Couple, b: Couple) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Quadrant {
    First,
    Second,
    Third,
    Fourth,
}

impl Quadrant {
    pub fn number(self) -> u32 {
        match self {
            Quadrant::First => 1,
            Quadrant::Second => 2,
            Quadrant::Third => 3,
            Quadrant::Fourth => 4,
        }
    }
}

/// Quadrant of `point` around `center`, with y pointing up.
///
/// Points on an axis go to the first or third quadrant.
pub fn quadrant(center: Couple, point: Couple) -> Quadrant {
    let x = point.x - center.x;
    let y = -(point.y - center.y);

    if x >= 0.0 && y >= 0.0 {
        Quadrant::First
    } else if x < 0.0 && y > 0.0 {
        Quadrant::Second
    } else if x <= 0.0 && y <= 0.0 {
        Quadrant::Third
    } else {
        Quadrant::Fourth
    }
}

/// Canvas angle of `point` seen from `center`, in degrees.
///
/// 0° is at 3 o'clock and angles grow clockwise on screen. The result
/// is in `[0, 360)`; it is NaN when `point == center`.
pub fn angle_of(center: Couple, point: Couple) -> f64 {
    let dy = ((point.y - center.y) as f64).abs();
    let acute = (dy / distance(center, point)).asin() * 180.0 / PI;

    let angle = match quadrant(center, point) {
        Quadrant::First => 360.0 - acute,
        Quadrant::Second => 180.0 + acute,
        Quadrant::Third => 180.0 - acute,
        Quadrant::Fourth => acute,
    };

    // the positive x axis belongs to the first quadrant
    match angle >= 360.0 {
        true => angle - 360.0,
        false => angle,
    }
}

pub fn try_angle_of(center: Couple, point: Couple) -> GeometryResult<f64> {
    match distance(center, point) > 0.0 {
        true => Ok(angle_of(center, point)),
        false => Err(ZeroDistance),
    }
}

/// Geometry of the arc through three points, before anything is drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CurveResult {
    pub bounds: Bounds,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Angle of the control point, not of the circle center.
    pub center_angle: f64,
}

impl CurveResult {
    pub fn center(&self) -> Couple {
        bounds_center(&self.bounds)
    }

    pub fn radius(&self) -> Float {
        (self.bounds.max.x - self.bounds.min.x) * 0.5
    }

    pub fn log(&self) {
        let c = self.center();
        log::info!(    "|   CENTER   |   X   |   Y   | RADIUS |");
        log::info!("|            | {:^5} | {:^5} | {:^6} |", c.x, c.y, self.radius());
        log::info!(    "|   POINT    | ANGLE |");
        log::info!("|   start    | {:^5.1} |", self.start_angle);
        log::info!("|  control   | {:^5.1} |", self.center_angle);
        log::info!("|    end     | {:^5.1} |", self.end_angle);
    }
}

pub fn get_curve(start: Couple, control: Couple, end: Couple) -> GeometryResult<CurveResult> {
    get_curve_within(start, control, end, DEGENERACY_EPSILON)
}

pub fn get_curve_within(start: Couple, control: Couple, end: Couple, epsilon: f64) -> GeometryResult<CurveResult> {
    let circle = solve_circle_within(start, control, end, epsilon).map_err(|e| {
        log::warn!("no circle through {:?}, {:?}, {:?}", start, control, end);
        e
    })?;

    let bounds = circle.bounds();
    let center = bounds_center(&bounds);

    Ok(CurveResult {
        bounds,
        start_angle: try_angle_of(center, start)?,
        end_angle: try_angle_of(center, end)?,
        center_angle: try_angle_of(center, control)?,
    })
}

/// Quadratic Bezier control point making the curve from `start` to `end`
/// reach the height of `through` halfway (t = 0.5).
pub fn control_point(start: Couple, end: Couple, through: Couple) -> Couple {
    Couple::new(through.x, (through.y * 4.0 - (start.y + end.y)) * 0.5)
}
