//! The differential operator set: pure functions of a field's cell values
//! and the mesh geometry. Each operator has two complete realizations —
//! `vectorized` (whole-array pipelines, no explicit per-element indexing)
//! and `looped` (explicitly indexed loops driven by `kernel` descriptors) —
//! and the functions here dispatch between them through the process-wide
//! execution path.
//!
//! Operators never validate mesh well-formedness: a degenerate mesh (zero
//! volume, zero distance) surfaces as inf or nan in the result, on both
//! paths alike.

pub mod looped;
pub mod vectorized;

use crate::geometry::Vector3d;
use crate::mesh::Mesh;
use crate::select;

/// Interpolate cell values onto faces, weighted by the inverse-distance
/// ratio `alpha = face_to_cell_distance / cell_distance`: the result at an
/// interior face is `alpha * v[owner] + (1 - alpha) * v[neighbor]`. A
/// boundary face reads back its owner cell's value, the collapsed form the
/// interpolation takes when both adjacent cells are the owner.
pub fn face_value<M: Mesh>(values: &[f64], mesh: &M) -> Vec<f64> {
    select::run(
        || looped::face_value(values, mesh),
        || vectorized::face_value(values, mesh),
    )
}

/// The discrete Gauss gradient: per cell, the sum over its bounding faces
/// of the signed outward area vector times the interpolated face value,
/// divided by the cell volume. Exact for constant fields.
pub fn grad<M: Mesh>(values: &[f64], mesh: &M) -> Vec<Vector3d> {
    select::run(
        || looped::grad(values, mesh),
        || vectorized::grad(values, mesh),
    )
}

/// Euclidean norm of the Gauss gradient, per cell.
pub fn grad_mag<M: Mesh>(values: &[f64], mesh: &M) -> Vec<f64> {
    select::run(
        || looped::grad_mag(values, mesh),
        || vectorized::grad_mag(values, mesh),
    )
}

/// The face gradient: the finite-difference component
/// `(v[neighbor] - v[owner]) / cell_distance` along the face normal, plus
/// the face-averaged tangential projections of the two adjacent cell
/// gradients. The tangential terms are the standard non-orthogonal-mesh
/// correction: when the line between cell centers is not parallel to the
/// face normal, the pure difference term alone misestimates the surface
/// gradient.
pub fn face_grad<M: Mesh>(values: &[f64], mesh: &M) -> Vec<Vector3d> {
    select::run(
        || looped::face_grad(values, mesh),
        || vectorized::face_grad(values, mesh),
    )
}
