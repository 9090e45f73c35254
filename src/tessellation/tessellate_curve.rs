use crate::error::{Result, TessellationError};
use crate::geometry::curve::Curve;
use crate::math::Point3;

use super::{Polyline, TessellationParams};

/// Tessellates a curve into a polyline.
///
/// Seeds the polyline with `min_segments` uniform spans, then bisects each
/// span until the curve's deviation from the chord is within `tolerance`,
/// bounded by `max_segments`.
pub struct TessellateCurve {
    params: TessellationParams,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(params: TessellationParams) -> Self {
        Self { params }
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or curve evaluation
    /// fails.
    pub fn execute(&self, curve: &dyn Curve) -> Result<Polyline> {
        if self.params.tolerance <= 0.0 {
            return Err(
                TessellationError::InvalidParameters("tolerance must be positive".into()).into(),
            );
        }
        if self.params.min_segments == 0 {
            return Err(TessellationError::InvalidParameters(
                "min_segments must be at least 1".into(),
            )
            .into());
        }
        if self.params.max_segments < self.params.min_segments {
            return Err(TessellationError::InvalidParameters(
                "max_segments must be at least min_segments".into(),
            )
            .into());
        }

        let domain = curve.domain();
        let span = (domain.t_max - domain.t_min) / self.params.min_segments as f64;
        // Each seed span may bisect until the total segment count reaches
        // max_segments.
        let max_depth = (self.params.max_segments / self.params.min_segments).ilog2();

        let mut points = vec![curve.evaluate(domain.t_min)?];
        for i in 0..self.params.min_segments {
            let t0 = domain.t_min + span * i as f64;
            let t1 = if i + 1 == self.params.min_segments {
                domain.t_max
            } else {
                domain.t_min + span * (i + 1) as f64
            };
            let p0 = points[points.len() - 1];
            let p1 = curve.evaluate(t1)?;
            self.refine(curve, t0, p0, t1, p1, 0, max_depth, &mut points)?;
        }

        Ok(Polyline { points })
    }

    #[allow(clippy::too_many_arguments)]
    fn refine(
        &self,
        curve: &dyn Curve,
        t0: f64,
        p0: Point3,
        t1: f64,
        p1: Point3,
        depth: u32,
        max_depth: u32,
        points: &mut Vec<Point3>,
    ) -> Result<()> {
        let t_mid = (t0 + t1) / 2.0;
        let p_mid = curve.evaluate(t_mid)?;
        let chord_mid = nalgebra::center(&p0, &p1);

        if depth >= max_depth || (p_mid - chord_mid).norm() <= self.params.tolerance {
            points.push(p1);
        } else {
            self.refine(curve, t0, p0, t_mid, p_mid, depth + 1, max_depth, points)?;
            self.refine(curve, t_mid, p_mid, t1, p1, depth + 1, max_depth, points)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::BSpline;
    use crate::math::TOLERANCE;

    fn bent_curve() -> BSpline {
        BSpline::clamped(
            2,
            vec![
                Point3::new(-1.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn endpoints_are_preserved() {
        let curve = bent_curve();
        let polyline = TessellateCurve::new(TessellationParams::default())
            .execute(&curve)
            .unwrap();

        let first = polyline.points[0];
        let last = polyline.points[polyline.points.len() - 1];
        assert!((first - Point3::new(-1.0, 1.0, 0.0)).norm() < TOLERANCE);
        assert!((last - Point3::new(1.0, -1.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn straight_curve_needs_no_refinement() {
        let curve = BSpline::clamped(
            2,
            vec![
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ],
        )
        .unwrap();
        let polyline = TessellateCurve::new(TessellationParams::default())
            .execute(&curve)
            .unwrap();
        assert_eq!(polyline.points.len(), 5);
    }

    #[test]
    fn tighter_tolerance_adds_points() {
        let curve = bent_curve();
        let coarse = TessellateCurve::new(TessellationParams {
            tolerance: 0.1,
            ..TessellationParams::default()
        })
        .execute(&curve)
        .unwrap();
        let fine = TessellateCurve::new(TessellationParams {
            tolerance: 1e-6,
            ..TessellationParams::default()
        })
        .execute(&curve)
        .unwrap();
        assert!(fine.points.len() > coarse.points.len());
    }

    #[test]
    fn segment_count_is_bounded() {
        let curve = bent_curve();
        let params = TessellationParams {
            tolerance: 1e-12,
            min_segments: 4,
            max_segments: 64,
        };
        let polyline = TessellateCurve::new(params).execute(&curve).unwrap();
        assert!(polyline.points.len() - 1 <= params.max_segments);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let curve = bent_curve();
        let bad_tolerance = TessellationParams {
            tolerance: 0.0,
            ..TessellationParams::default()
        };
        assert!(TessellateCurve::new(bad_tolerance).execute(&curve).is_err());

        let bad_segments = TessellationParams {
            min_segments: 8,
            max_segments: 4,
            ..TessellationParams::default()
        };
        assert!(TessellateCurve::new(bad_segments).execute(&curve).is_err());
    }
}
