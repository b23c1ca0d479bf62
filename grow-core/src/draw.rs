use glam::Vec2;

use crate::types::Rgb;

/// What a filled ellipse stands for on the plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Leaf,
    Bud,
}

/// A single drawing instruction in world space (y up).
///
/// Primitives are produced in paint order: later ones are drawn on top
/// of earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Segment {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgb,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: Rgb,
        kind: MarkerKind,
    },
    Label {
        pos: Vec2,
        text: String,
        color: Rgb,
    },
}

impl Primitive {
    pub fn is_segment(&self) -> bool {
        matches!(self, Primitive::Segment { .. })
    }

    pub fn is_marker(&self, of: MarkerKind) -> bool {
        matches!(self, Primitive::Ellipse { kind, .. } if *kind == of)
    }
}

/// Consumer of an ordered primitive stream.
pub trait DrawSink {
    fn draw(&mut self, primitive: Primitive);
}

impl DrawSink for Vec<Primitive> {
    fn draw(&mut self, primitive: Primitive) {
        self.push(primitive);
    }
}
