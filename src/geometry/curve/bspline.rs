use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A clamped, non-rational B-spline curve in 3D space.
///
/// Defined by a degree, an ordered sequence of control points, and a
/// non-decreasing knot vector with `control_points.len() + degree + 1`
/// entries. With a clamped knot vector (end knots repeated `degree + 1`
/// times) the curve interpolates its first and last control points.
#[derive(Debug, Clone)]
pub struct BSpline {
    degree: usize,
    control_points: Vec<Point3>,
    knots: Vec<f64>,
}

impl BSpline {
    /// Creates a new B-spline from an explicit knot vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the degree is zero, there are not at least
    /// `degree + 1` control points, the knot count does not equal
    /// `control_points.len() + degree + 1`, or the knots decrease anywhere.
    pub fn new(degree: usize, control_points: Vec<Point3>, knots: Vec<f64>) -> Result<Self> {
        if degree == 0 {
            return Err(GeometryError::Degenerate("degree must be at least 1".into()).into());
        }
        if control_points.len() <= degree {
            return Err(GeometryError::Degenerate(
                "need at least degree + 1 control points".into(),
            )
            .into());
        }

        let expected = control_points.len() + degree + 1;
        if knots.len() != expected {
            return Err(GeometryError::KnotCountMismatch {
                expected,
                actual: knots.len(),
            }
            .into());
        }

        for i in 1..knots.len() {
            if knots[i] < knots[i - 1] {
                return Err(GeometryError::DecreasingKnots { index: i }.into());
            }
        }

        Ok(Self {
            degree,
            control_points,
            knots,
        })
    }

    /// Creates a clamped B-spline with a uniform interior knot vector.
    ///
    /// The end knots are repeated `degree + 1` times so the curve hits the
    /// first and last control points.
    ///
    /// # Errors
    ///
    /// Returns an error if the degree is zero or there are not at least
    /// `degree + 1` control points.
    pub fn clamped(degree: usize, control_points: Vec<Point3>) -> Result<Self> {
        if degree == 0 {
            return Err(GeometryError::Degenerate("degree must be at least 1".into()).into());
        }
        if control_points.len() <= degree {
            return Err(GeometryError::Degenerate(
                "need at least degree + 1 control points".into(),
            )
            .into());
        }

        let n = control_points.len();
        let interior = n - degree - 1;
        let mut knots = Vec::with_capacity(n + degree + 1);
        knots.extend(std::iter::repeat(0.0).take(degree + 1));
        for i in 1..=interior {
            knots.push(i as f64);
        }
        knots.extend(std::iter::repeat((interior + 1) as f64).take(degree + 1));

        Self::new(degree, control_points, knots)
    }

    /// Returns the degree of the curve.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the order of the curve (`degree + 1`).
    #[must_use]
    pub fn order(&self) -> usize {
        self.degree + 1
    }

    /// Returns the control points.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Returns the knot vector.
    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Returns the control point at `index`, if it exists.
    #[must_use]
    pub fn control_point(&self, index: usize) -> Option<&Point3> {
        self.control_points.get(index)
    }

    /// Overwrites the control point at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of bounds.
    pub fn set_control_point(&mut self, index: usize, point: Point3) -> Result<()> {
        let count = self.control_points.len();
        let slot = self
            .control_points
            .get_mut(index)
            .ok_or(GeometryError::ControlPointIndex { index, count })?;
        *slot = point;
        Ok(())
    }

    /// Inserts the parametric value `t` into the knot vector `multiplicity`
    /// times, returning the refined curve and the knot span index of `t`.
    ///
    /// Insertion does not change the shape of the curve; the control-point
    /// and knot counts each grow by `multiplicity`. The returned span is the
    /// index of the inserted value in the refined knot vector; the control
    /// points at indices `span - degree ..= span - 1` of the returned curve
    /// are the ones recomputed by the last insertion.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` lies outside the curve's domain or
    /// `multiplicity` is zero or exceeds the degree.
    pub fn insert_knot(&self, t: f64, multiplicity: usize) -> Result<(Self, usize)> {
        if multiplicity == 0 || multiplicity > self.degree {
            return Err(GeometryError::Degenerate(
                "knot multiplicity must be between 1 and the degree".into(),
            )
            .into());
        }

        let domain = self.domain();
        if t < domain.t_min || t > domain.t_max {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: domain.t_min,
                max: domain.t_max,
            }
            .into());
        }

        let mut curve = self.insert_single(t);
        for _ in 1..multiplicity {
            curve = curve.insert_single(t);
        }
        let span = find_span(&curve.knots, curve.control_points.len(), curve.degree, t);
        Ok((curve, span))
    }

    /// Boehm's single-knot insertion. The caller has validated `t`.
    fn insert_single(&self, t: f64) -> Self {
        let p = self.degree;
        let n = self.control_points.len();
        let k = find_span(&self.knots, n, p, t);

        let mut knots = Vec::with_capacity(self.knots.len() + 1);
        knots.extend_from_slice(&self.knots[..=k]);
        knots.push(t);
        knots.extend_from_slice(&self.knots[k + 1..]);

        let mut control_points = Vec::with_capacity(n + 1);
        for i in 0..=n {
            if i <= k - p {
                control_points.push(self.control_points[i]);
            } else if i > k {
                control_points.push(self.control_points[i - 1]);
            } else {
                let denom = self.knots[i + p] - self.knots[i];
                let alpha = if denom.abs() < TOLERANCE {
                    0.0
                } else {
                    (t - self.knots[i]) / denom
                };
                let prev = self.control_points[i - 1];
                let next = self.control_points[i];
                control_points.push(prev + (next - prev) * alpha);
            }
        }

        Self {
            degree: p,
            control_points,
            knots,
        }
    }

    /// Clamps `t` into the domain, rejecting values clearly outside it.
    fn checked_parameter(&self, t: f64) -> Result<f64> {
        let domain = self.domain();
        if t < domain.t_min - TOLERANCE || t > domain.t_max + TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: domain.t_min,
                max: domain.t_max,
            }
            .into());
        }
        Ok(t.clamp(domain.t_min, domain.t_max))
    }

    /// Control points of the derivative curve (the hodograph).
    fn derivative_control_points(&self) -> Vec<Vector3> {
        let p = self.degree;
        let n = self.control_points.len();
        let mut points = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let denom = self.knots[i + p + 1] - self.knots[i + 1];
            if denom.abs() < TOLERANCE {
                points.push(Vector3::zeros());
            } else {
                let diff = self.control_points[i + 1] - self.control_points[i];
                points.push(diff * (p as f64 / denom));
            }
        }
        points
    }
}

impl Curve for BSpline {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let t = self.checked_parameter(t)?;
        let span = find_span(&self.knots, self.control_points.len(), self.degree, t);
        let coords: Vec<Vector3> = self.control_points.iter().map(|p| p.coords).collect();
        Ok(Point3::from(de_boor(
            &coords,
            &self.knots,
            self.degree,
            span,
            t,
        )))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let t = self.checked_parameter(t)?;
        let points = self.derivative_control_points();
        let knots = &self.knots[1..self.knots.len() - 1];
        let span = find_span(knots, points.len(), self.degree - 1, t);
        let derivative = de_boor(&points, knots, self.degree - 1, span, t);

        let len = derivative.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(derivative / len)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(
            self.knots[self.degree],
            self.knots[self.control_points.len()],
        )
    }

    fn is_closed(&self) -> bool {
        let first = self.control_points[0];
        let last = self.control_points[self.control_points.len() - 1];
        (last - first).norm() < TOLERANCE
    }
}

/// Finds the knot span index for parameter `t`: the largest `i` with
/// `knots[i] <= t`, capped at `point_count - 1` for the domain's end.
fn find_span(knots: &[f64], point_count: usize, degree: usize, t: f64) -> usize {
    if t >= knots[point_count] {
        return point_count - 1;
    }

    let mut low = degree;
    let mut high = point_count;
    while low < high {
        let mid = usize::midpoint(low, high);
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    low - 1
}

/// De Boor's algorithm over the window of `degree + 1` points ending at `span`.
fn de_boor(points: &[Vector3], knots: &[f64], degree: usize, span: usize, t: f64) -> Vector3 {
    let p = degree;
    let mut d: Vec<Vector3> = (0..=p).map(|j| points[span - p + j]).collect();

    for r in 1..=p {
        for j in (r..=p).rev() {
            let i = span - p + j;
            let denom = knots[i + p - r + 1] - knots[i];
            let alpha = if denom.abs() < TOLERANCE {
                0.0
            } else {
                (t - knots[i]) / denom
            };
            d[j] = d[j - 1] * (1.0 - alpha) + d[j] * alpha;
        }
    }
    d[p]
}
