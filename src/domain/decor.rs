//! Generated decoration entities (not part of the input document).

use crate::core::math::Vec2;

/// Tree with a size scale and one of three canopy tints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tree {
    pub pos: Vec2,
    pub scale: f64,
    pub tint: u8,
}

/// Rotated elliptical pond; solid for collision, drawn below grade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pond {
    pub pos: Vec2,
    pub rx: f64,
    pub ry: f64,
    pub rot: f64,
}

/// Solid circular well with a little roof.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Well {
    pub pos: Vec2,
    pub r: f64,
    pub roof: f64,
}

/// Purely visual flower cluster; `pattern` keys the sway animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowerPatch {
    pub pos: Vec2,
    pub r: f64,
    pub pattern: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BirdKind {
    Bird,
    Butterfly,
}

/// Fluttering critter drawn on the fly layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bird {
    pub pos: Vec2,
    pub scale: f64,
    pub phase: f64,
    pub kind: BirdKind,
}
