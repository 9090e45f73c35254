//! Minimal SVG assembly for frame output.
//!
//! Only the handful of primitives the demo draws.

use std::fmt::{self, Display, Formatter};

use crate::math::Point2;

/// An SVG document with a fixed view box.
#[derive(Debug, Default)]
pub struct Document {
    view_box: (f64, f64, f64, f64),
    elements: Vec<Element>,
}

impl Document {
    /// Creates an empty document with the given `(x, y, width, height)` view box.
    #[must_use]
    pub fn new(view_box: (f64, f64, f64, f64)) -> Self {
        Self {
            view_box,
            elements: Vec::new(),
        }
    }

    /// Appends an element; elements are painted in insertion order.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (x, y, w, h) = self.view_box;
        writeln!(
            f,
            "<svg viewBox=\"{x} {y} {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">"
        )?;
        for element in &self.elements {
            element.fmt(f)?;
        }
        writeln!(f, "</svg>")
    }
}

/// A drawable SVG element.
#[derive(Debug)]
pub enum Element {
    /// A filled rectangle.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: &'static str,
    },
    /// An unfilled polyline path.
    Path {
        points: Vec<Point2>,
        stroke: &'static str,
        width: f64,
    },
    /// A filled dot.
    Dot {
        center: Point2,
        radius: f64,
        fill: &'static str,
    },
    /// A text label.
    Label {
        position: Point2,
        size: f64,
        fill: &'static str,
        text: String,
    },
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => writeln!(
                f,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"{fill}\"/>"
            ),
            Self::Path {
                points,
                stroke,
                width,
            } => {
                write!(f, "<path fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{width}\" d=\"")?;
                for (i, p) in points.iter().enumerate() {
                    let command = if i == 0 { "M" } else { "L" };
                    write!(f, "{command} {} {} ", p.x, p.y)?;
                }
                writeln!(f, "\"/>")
            }
            Self::Dot {
                center,
                radius,
                fill,
            } => writeln!(
                f,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{radius}\" fill=\"{fill}\"/>",
                center.x, center.y
            ),
            Self::Label {
                position,
                size,
                fill,
                text,
            } => writeln!(
                f,
                "<text x=\"{}\" y=\"{}\" font-size=\"{size}\" fill=\"{fill}\">{text}</text>",
                position.x, position.y
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_wraps_elements() {
        let mut doc = Document::new((-1.0, -1.0, 2.0, 2.0));
        doc.push(Element::Dot {
            center: Point2::new(0.5, -0.5),
            radius: 0.1,
            fill: "red",
        });
        let text = doc.to_string();
        assert!(text.starts_with("<svg viewBox=\"-1 -1 2 2\""));
        assert!(text.contains("<circle cx=\"0.5\" cy=\"-0.5\" r=\"0.1\" fill=\"red\"/>"));
        assert!(text.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn path_commands() {
        let path = Element::Path {
            points: vec![Point2::new(0.0, 0.0), Point2::new(1.0, 2.0)],
            stroke: "white",
            width: 0.03,
        };
        assert_eq!(
            path.to_string(),
            "<path fill=\"none\" stroke=\"white\" stroke-width=\"0.03\" d=\"M 0 0 L 1 2 \"/>\n"
        );
    }
}
