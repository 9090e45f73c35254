mod svg;

pub use svg::{Document, Element};

use crate::error::Result;
use crate::math::{Point2, Point3};
use crate::scene::InsertionScene;
use crate::tessellation::{TessellateCurve, TessellationParams};

/// Half-extent of the square viewport in world units.
const VIEW_HALF_EXTENT: f64 = 2.2;

/// Stroke width of the curve, in world units.
const CURVE_WIDTH: f64 = 0.03;

/// Radius of control-point dots, in world units.
const POINT_RADIUS: f64 = 0.04;

/// Font size of the parameter readout, in world units.
const LABEL_SIZE: f64 = 0.2;

/// Renders scene frames as SVG documents.
///
/// One frame draws, in order: the background, the tessellated curve in
/// white, every control point as a red dot, the saved middle point as a
/// blue dot, and a green readout of the animation parameter.
pub struct FrameRenderer {
    tessellation: TessellationParams,
}

impl FrameRenderer {
    /// Creates a renderer with the given tessellation quality.
    #[must_use]
    pub fn new(tessellation: TessellationParams) -> Self {
        Self { tessellation }
    }

    /// Renders one frame of the scene, returning the SVG text.
    ///
    /// # Errors
    ///
    /// Returns an error if tessellating the scene's curve fails.
    pub fn render(&self, scene: &InsertionScene) -> Result<String> {
        let polyline = TessellateCurve::new(self.tessellation).execute(scene.curve())?;

        let e = VIEW_HALF_EXTENT;
        let mut doc = Document::new((-e, -e, 2.0 * e, 2.0 * e));

        doc.push(Element::Rect {
            x: -e,
            y: -e,
            width: 2.0 * e,
            height: 2.0 * e,
            fill: "black",
        });

        doc.push(Element::Path {
            points: polyline.points.iter().map(project).collect(),
            stroke: "white",
            width: CURVE_WIDTH,
        });

        for point in scene.curve().control_points() {
            doc.push(Element::Dot {
                center: project(point),
                radius: POINT_RADIUS,
                fill: "red",
            });
        }

        doc.push(Element::Dot {
            center: project(scene.reference()),
            radius: POINT_RADIUS,
            fill: "blue",
        });

        doc.push(Element::Label {
            position: project(&Point3::new(-0.2, 1.2, 0.0)),
            size: LABEL_SIZE,
            fill: "green",
            text: format!("t: {:.2}", scene.parameter()),
        });

        Ok(doc.to_string())
    }
}

/// Orthographic projection onto the viewport; SVG's y axis points down.
fn project(point: &Point3) -> Point2 {
    Point2::new(point.x, -point.y)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn frame_has_all_layers() {
        let mut scene = InsertionScene::new().unwrap();
        scene.update().unwrap();

        let frame = FrameRenderer::new(TessellationParams::default())
            .render(&scene)
            .unwrap();

        assert!(frame.contains("fill=\"black\""));
        assert!(frame.contains("stroke=\"white\""));
        // Four control points in red plus the reference point in blue.
        assert_eq!(frame.matches("fill=\"red\"").count(), 4);
        assert_eq!(frame.matches("fill=\"blue\"").count(), 1);
        assert!(frame.contains(">t: 0.00</text>"));
    }

    #[test]
    fn readout_tracks_parameter() {
        let mut scene = InsertionScene::new().unwrap();
        for _ in 0..500 {
            scene.advance();
        }
        scene.update().unwrap();

        let frame = FrameRenderer::new(TessellationParams::default())
            .render(&scene)
            .unwrap();
        assert!(frame.contains(">t: 0.50</text>"));
    }

    #[test]
    fn invalid_tessellation_fails_the_frame() {
        let scene = InsertionScene::new().unwrap();
        let renderer = FrameRenderer::new(TessellationParams {
            tolerance: -1.0,
            ..TessellationParams::default()
        });
        assert!(renderer.render(&scene).is_err());
    }
}
