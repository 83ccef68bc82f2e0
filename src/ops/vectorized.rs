//! Whole-array realizations of the operator set, written as iterator
//! pipelines with no explicit per-element indexing.

use crate::geometry::Vector3d;
use crate::mesh::Mesh;

pub fn face_value<M: Mesh>(values: &[f64], mesh: &M) -> Vec<f64> {
    (0..mesh.num_faces())
        .map(|face| match mesh.adjacent_cells(face) {
            (owner, Some(neighbor)) => {
                let alpha = mesh.face_to_cell_distance(face) / mesh.cell_distance(face);
                values[owner] * alpha + values[neighbor] * (1.0 - alpha)
            }
            (owner, None) => values[owner],
        })
        .collect()
}

pub fn grad<M: Mesh>(values: &[f64], mesh: &M) -> Vec<Vector3d> {
    let face_values = face_value(values, mesh);

    (0..mesh.num_cells())
        .map(|cell| {
            mesh.cell_faces(cell)
                .iter()
                .map(|&face| {
                    let signed_area = mesh.face_orientation(face, cell) * mesh.face_area(face);
                    mesh.face_normal(face) * (signed_area * face_values[face])
                })
                .fold(Vector3d::zeros(), |sum, term| sum + term)
                / mesh.cell_volume(cell)
        })
        .collect()
}

pub fn grad_mag<M: Mesh>(values: &[f64], mesh: &M) -> Vec<f64> {
    grad(values, mesh).into_iter().map(Vector3d::norm).collect()
}

pub fn face_grad<M: Mesh>(values: &[f64], mesh: &M) -> Vec<Vector3d> {
    let cell_grad = grad(values, mesh);

    (0..mesh.num_faces())
        .map(|face| {
            let (owner, neighbor) = mesh.adjacent_cells(face);
            let far = neighbor.unwrap_or(owner);
            let normal = (values[far] - values[owner]) / mesh.cell_distance(face);
            let (t1, t2) = mesh.face_tangents(face);
            let tangential1 = 0.5 * (t1.dot(cell_grad[owner]) + t1.dot(cell_grad[far]));
            let tangential2 = 0.5 * (t2.dot(cell_grad[owner]) + t2.dot(cell_grad[far]));
            mesh.face_normal(face) * normal + t1 * tangential1 + t2 * tangential2
        })
        .collect()
}
