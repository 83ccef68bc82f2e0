//! Explicitly indexed realizations of the operator set, driven by the
//! `kernel` loop-nest descriptors. Results must match the vectorized path
//! to floating-point rounding tolerance.

use crate::geometry::Vector3d;
use crate::kernel::{ElementNest, LoopNest};
use crate::mesh::Mesh;

pub fn face_value<M: Mesh>(values: &[f64], mesh: &M) -> Vec<f64> {
    let mut result = vec![0.0; mesh.num_faces()];

    LoopNest::rank1(mesh.num_faces()).run(|face, _, _| {
        let (owner, neighbor) = mesh.adjacent_cells(face);
        result[face] = match neighbor {
            Some(neighbor) => {
                let alpha = mesh.face_to_cell_distance(face) / mesh.cell_distance(face);
                values[owner] * alpha + values[neighbor] * (1.0 - alpha)
            }
            None => values[owner],
        }
    });
    result
}

pub fn grad<M: Mesh>(values: &[f64], mesh: &M) -> Vec<Vector3d> {
    let face_values = face_value(values, mesh);
    let mut result = vec![Vector3d::zeros(); mesh.num_cells()];

    LoopNest::rank1(mesh.num_cells()).run(|cell, _, _| {
        let mut sum = Vector3d::zeros();
        for &face in mesh.cell_faces(cell) {
            let signed_area = mesh.face_orientation(face, cell) * mesh.face_area(face);
            sum = sum + mesh.face_normal(face) * (signed_area * face_values[face]);
        }
        result[cell] = sum / mesh.cell_volume(cell)
    });
    result
}

pub fn grad_mag<M: Mesh>(values: &[f64], mesh: &M) -> Vec<f64> {
    let cell_grad = grad(values, mesh);
    let num_cells = cell_grad.len();

    // Flatten the per-cell vectors, then accumulate the dot products by
    // walking the trailing axis with the element traversal.
    let mut components = vec![0.0; num_cells * 3];
    LoopNest::rank2(num_cells, 3).run(|cell, axis, _| {
        components[cell * 3 + axis] = cell_grad[cell].component(axis)
    });

    let mut sums = vec![0.0; num_cells];
    ElementNest::vector(num_cells, 3).run(|cell, offset| {
        sums[cell] += components[offset] * components[offset]
    });

    let mut result = vec![0.0; num_cells];
    LoopNest::rank1(num_cells).run(|cell, _, _| result[cell] = sums[cell].sqrt());
    result
}

pub fn face_grad<M: Mesh>(values: &[f64], mesh: &M) -> Vec<Vector3d> {
    let cell_grad = grad(values, mesh);
    let mut result = vec![Vector3d::zeros(); mesh.num_faces()];

    LoopNest::rank1(mesh.num_faces()).run(|face, _, _| {
        let (owner, neighbor) = mesh.adjacent_cells(face);
        let far = neighbor.unwrap_or(owner);
        let normal = (values[far] - values[owner]) / mesh.cell_distance(face);
        let (t1, t2) = mesh.face_tangents(face);
        let tangential1 = 0.5 * (t1.dot(cell_grad[owner]) + t1.dot(cell_grad[far]));
        let tangential2 = 0.5 * (t2.dot(cell_grad[owner]) + t2.dot(cell_grad[far]));
        result[face] = mesh.face_normal(face) * normal + t1 * tangential1 + t2 * tangential2
    });
    result
}
