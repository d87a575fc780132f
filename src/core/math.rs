//! Geometry primitives for the village world.
//!
//! Proximity checks compare squared distances; square roots only appear
//! where an actual magnitude is needed (normalization, well collision).

/// 2D vector in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector, or zero for (near-)zero input.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 1e-4 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::zero()
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Squared distance between two points.
pub fn dist2(a: Vec2, b: Vec2) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Axis-aligned rectangle (top-left origin).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Half-open overlap test on both axes.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Rect grown by `m` on every side.
    pub fn inflated(&self, m: f64) -> Self {
        Self {
            x: self.x - m,
            y: self.y - m,
            w: self.w + m * 2.0,
            h: self.h + m * 2.0,
        }
    }
}

/// Point containment in a rotated ellipse, with `pad` inflating both
/// radii. Radii are floored at 8 after padding so a degenerate ellipse
/// still has area.
pub fn point_in_rotated_ellipse(
    p: Vec2,
    center: Vec2,
    rx: f64,
    ry: f64,
    rot: f64,
    pad: f64,
) -> bool {
    let dx = p.x - center.x;
    let dy = p.y - center.y;

    // Rotate the point into the ellipse-local frame.
    let c = (-rot).cos();
    let s = (-rot).sin();
    let lx = dx * c - dy * s;
    let ly = dx * s + dy * c;

    let rx = (rx + pad).max(8.0);
    let ry = (ry + pad).max(8.0);

    (lx * lx) / (rx * rx) + (ly * ly) / (ry * ry) <= 1.0
}
