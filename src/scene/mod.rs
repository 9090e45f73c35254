mod animation;

pub use animation::AnimationParam;

use crate::error::Result;
use crate::geometry::curve::{BSpline, Curve};
use crate::math::{Point3, Vector3};

/// Per-frame step of the animation parameter.
const PARAMETER_STEP: f64 = 0.001;

/// The knot-insertion animation scene.
///
/// Holds a clamped quadratic curve that has had one knot inserted at its
/// mid-parameter, plus the state needed to animate the two control points
/// created by the insertion: copies of their fixed neighbors, the original
/// middle control point saved from before the insertion, and the constant
/// direction vectors toward it.
///
/// Each frame the two inserted points are overwritten with
/// `start + t * start_dir` and `end + t * end_dir`, sliding them from the
/// post-insertion polygon onto the saved middle point as `t` runs 0 to 1.
#[derive(Debug, Clone)]
pub struct InsertionScene {
    curve: BSpline,
    /// Original middle control point, saved before the insertion.
    reference: Point3,
    /// Fixed neighbor before the first animated point.
    start: Point3,
    /// Fixed neighbor after the second animated point.
    end: Point3,
    start_dir: Vector3,
    end_dir: Vector3,
    /// Indices of the two control points recomputed by the insertion.
    animated: (usize, usize),
    param: AnimationParam,
}

impl InsertionScene {
    /// Builds the demo scene.
    ///
    /// Constructs the fixed quadratic over (-1,1,0), (1,1,0), (1,-1,0),
    /// saves the middle point, and inserts one knot at the arithmetic mean
    /// of the first and last knot values.
    ///
    /// # Errors
    ///
    /// Returns an error if curve construction or knot insertion fails.
    pub fn new() -> Result<Self> {
        let base = BSpline::clamped(
            2,
            vec![
                Point3::new(-1.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
            ],
        )?;
        let reference = base.control_points()[1];

        let mid = base.domain().midpoint();
        let (curve, span) = base.insert_knot(mid, 1)?;

        let animated = (span - curve.degree(), span - 1);
        let start = curve.control_points()[animated.0 - 1];
        let end = curve.control_points()[animated.1 + 1];

        Ok(Self {
            reference,
            start,
            end,
            start_dir: reference - start,
            end_dir: reference - end,
            animated,
            param: AnimationParam::new(PARAMETER_STEP),
            curve,
        })
    }

    /// Overwrites the two animated control points for the current parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if a control-point index is out of bounds.
    pub fn update(&mut self) -> Result<()> {
        self.apply(self.param.value())
    }

    fn apply(&mut self, t: f64) -> Result<()> {
        self.curve
            .set_control_point(self.animated.0, self.start + self.start_dir * t)?;
        self.curve
            .set_control_point(self.animated.1, self.end + self.end_dir * t)?;
        Ok(())
    }

    /// Advances the animation parameter by one frame.
    pub fn advance(&mut self) {
        self.param.advance();
    }

    /// Returns the curve in its current animation state.
    #[must_use]
    pub fn curve(&self) -> &BSpline {
        &self.curve
    }

    /// Returns the saved original middle control point.
    #[must_use]
    pub fn reference(&self) -> &Point3 {
        &self.reference
    }

    /// Returns the current animation parameter value.
    #[must_use]
    pub fn parameter(&self) -> f64 {
        self.param.value()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn setup_counts() {
        let scene = InsertionScene::new().unwrap();
        assert_eq!(scene.curve().control_points().len(), 4);
        assert_eq!(scene.curve().knots().len(), 7);
        assert_eq!(scene.animated, (1, 2));
    }

    #[test]
    fn direction_vectors() {
        let scene = InsertionScene::new().unwrap();
        assert!((scene.start_dir - Vector3::new(2.0, 0.0, 0.0)).norm() < TOLERANCE);
        assert!((scene.end_dir - Vector3::new(0.0, 2.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn directions_survive_updates() {
        let mut scene = InsertionScene::new().unwrap();
        let (v, w) = (scene.start_dir, scene.end_dir);
        for _ in 0..100 {
            scene.update().unwrap();
            scene.advance();
        }
        assert_eq!(scene.start_dir, v);
        assert_eq!(scene.end_dir, w);
    }

    #[test]
    fn animated_points_start_at_neighbors() {
        let mut scene = InsertionScene::new().unwrap();
        scene.apply(0.0).unwrap();
        let points = scene.curve().control_points();
        assert!((points[1] - scene.start).norm() < TOLERANCE);
        assert!((points[2] - scene.end).norm() < TOLERANCE);
    }

    #[test]
    fn animated_points_meet_at_reference() {
        let mut scene = InsertionScene::new().unwrap();
        scene.apply(1.0).unwrap();
        let points = scene.curve().control_points();
        assert!((points[1] - scene.reference).norm() < TOLERANCE);
        assert!((points[2] - scene.reference).norm() < TOLERANCE);
    }

    #[test]
    fn fixed_points_never_move() {
        let mut scene = InsertionScene::new().unwrap();
        for _ in 0..50 {
            scene.update().unwrap();
            scene.advance();
        }
        let points = scene.curve().control_points();
        assert!((points[0] - Point3::new(-1.0, 1.0, 0.0)).norm() < TOLERANCE);
        assert!((points[3] - Point3::new(1.0, -1.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn parameter_advances_by_step() {
        let mut scene = InsertionScene::new().unwrap();
        scene.advance();
        scene.advance();
        assert!((scene.parameter() - 2.0 * PARAMETER_STEP).abs() < TOLERANCE);
    }
}
