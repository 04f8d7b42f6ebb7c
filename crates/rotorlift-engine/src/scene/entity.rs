use crate::coords::Vec2;
use crate::math::Mat3;
use crate::paint::Colour;

use super::shapes::Shape;

/// Index of an entity inside its owning `Scene`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Shape plus the flat colour it is filled with.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub shape: Shape,
    pub colour: Colour,
}

/// A positioned, optionally drawable scene node.
///
/// Transform fields are plain state: mutate them freely between frames. They
/// are interpreted in the parent's local space, where the parent's unit shape
/// spans one unit, so a translation of `1` moves a full parent width/height.
///
/// The parent/child links are owned by the `Scene`; use `Scene::set_parent` to
/// change them.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub translation: Vec2,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
    pub scale: Vec2,
    pub visual: Option<Visual>,

    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            translation: Vec2::zero(),
            rotation: 0.0,
            scale: Vec2::one(),
            visual: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

impl Entity {
    /// A node with no visual payload; only its transform is inherited.
    pub fn group() -> Self {
        Self::default()
    }

    pub fn with_shape(shape: Shape, colour: Colour) -> Self {
        Self {
            visual: Some(Visual { shape, colour }),
            ..Self::default()
        }
    }

    pub fn rectangle(colour: Colour) -> Self {
        Self::with_shape(Shape::rectangle(), colour)
    }

    pub fn circle(colour: Colour, sides: u32) -> Self {
        Self::with_shape(Shape::circle(sides), colour)
    }

    pub fn triangle(colour: Colour) -> Self {
        Self::with_shape(Shape::triangle(), colour)
    }

    // ── builder-style setters ────────────────────────────────────────────

    #[inline]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.translation = Vec2::new(x, y);
        self
    }

    #[inline]
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    #[inline]
    pub fn scaled(mut self, sx: f32, sy: f32) -> Self {
        self.scale = Vec2::new(sx, sy);
        self
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Children in the order they were attached.
    #[inline]
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    #[inline]
    pub fn colour(&self) -> Option<Colour> {
        self.visual.as_ref().map(|v| v.colour)
    }

    /// Recolours the visual payload. No-op on group nodes.
    #[inline]
    pub fn set_colour(&mut self, colour: Colour) {
        if let Some(visual) = self.visual.as_mut() {
            visual.colour = colour;
        }
    }

    /// Local TRS matrix built from the current field values.
    #[inline]
    pub fn local_matrix(&self) -> Mat3 {
        Mat3::trs(
            self.translation.x,
            self.translation.y,
            self.rotation,
            self.scale.x,
            self.scale.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_neutral() {
        let e = Entity::group();
        assert_eq!(e.translation, Vec2::zero());
        assert_eq!(e.rotation, 0.0);
        assert_eq!(e.scale, Vec2::one());
        assert_eq!(e.local_matrix(), Mat3::IDENTITY);
        assert!(e.colour().is_none());
    }

    #[test]
    fn builder_sets_transform_fields() {
        let e = Entity::rectangle(Colour::white()).at(-0.5, -0.6).rotated(45.0).scaled(0.1, 1.2);
        assert_eq!(e.translation, Vec2::new(-0.5, -0.6));
        assert_eq!(e.rotation, 45.0);
        assert_eq!(e.scale, Vec2::new(0.1, 1.2));
        assert_eq!(e.local_matrix(), Mat3::trs(-0.5, -0.6, 45.0, 0.1, 1.2));
    }

    #[test]
    fn set_colour_only_touches_visual_entities() {
        let mut shape = Entity::circle(Colour::black(), 8);
        shape.set_colour(Colour::white());
        assert_eq!(shape.colour(), Some(Colour::white()));

        let mut group = Entity::group();
        group.set_colour(Colour::white());
        assert!(group.colour().is_none());
    }

    #[test]
    fn negative_scale_mirrors() {
        let e = Entity::triangle(Colour::white()).scaled(-0.7, 0.4);
        let p = e.local_matrix().transform_point(Vec2::new(1.0, 0.5));
        assert!((p.x + 0.7).abs() < 1e-6 && (p.y - 0.2).abs() < 1e-6, "{p:?}");
    }
}
