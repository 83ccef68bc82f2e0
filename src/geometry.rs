use core::ops::{Add, Div, Mul, Sub};

/// A 3D vector with f64 components. Meshes of lower dimensionality leave
/// the trailing components at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Vector3d(pub f64, pub f64, pub f64);

// ============================================================================
impl Vector3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3d(x, y, z)
    }

    pub fn zeros() -> Self {
        Vector3d(0.0, 0.0, 0.0)
    }

    /// Return the component on the given axis (0, 1, or 2).
    pub fn component(self, axis: usize) -> f64 {
        match axis {
            0 => self.0,
            1 => self.1,
            2 => self.2,
            _ => panic!("vector component index {} out of range", axis),
        }
    }

    pub fn dot(self, other: Vector3d) -> f64 {
        self.0 * other.0 + self.1 * other.1 + self.2 * other.2
    }

    /// Euclidean norm.
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }
}

// ============================================================================
impl Add for Vector3d {
    type Output = Vector3d;

    fn add(self, other: Vector3d) -> Self::Output {
        Vector3d(self.0 + other.0, self.1 + other.1, self.2 + other.2)
    }
}

impl Sub for Vector3d {
    type Output = Vector3d;

    fn sub(self, other: Vector3d) -> Self::Output {
        Vector3d(self.0 - other.0, self.1 - other.1, self.2 - other.2)
    }
}

impl Mul<f64> for Vector3d {
    type Output = Vector3d;

    fn mul(self, a: f64) -> Self::Output {
        Vector3d(self.0 * a, self.1 * a, self.2 * a)
    }
}

impl Div<f64> for Vector3d {
    type Output = Vector3d;

    fn div(self, a: f64) -> Self::Output {
        Vector3d(self.0 / a, self.1 / a, self.2 / a)
    }
}
