use std::sync::Arc;

use fivol::field::CellField;
use fivol::mesh::{CartesianMesh, Mesh};
use fivol::ops::{looped, vectorized};

/// A smoothly varying test field evaluated at the cell centers.
fn wavy_values(mesh: &CartesianMesh) -> Vec<f64> {
    (0..mesh.num_cells())
        .map(|cell| {
            let (x, y) = mesh.cell_center(cell);
            x * x + 3.0 * y + (x * y).sin()
        })
        .collect()
}

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{} and {} differ by more than {}", a, b, tol);
}

#[test]
fn face_values_of_linear_1d_field_interpolate_midpoints() {
    let mesh = Arc::new(CartesianMesh::line(3, 1.0));
    let field = CellField::new(mesh.clone(), "phi", vec![0.0, 1.0, 2.0].into(), false).unwrap();

    let face_values = field.face_value();
    assert_eq!(face_values.len(), mesh.num_faces());

    let interior: Vec<f64> = (0..mesh.num_faces())
        .filter(|&f| mesh.adjacent_cells(f).1.is_some())
        .map(|f| face_values[f])
        .collect();
    assert_eq!(interior, vec![0.5, 1.5]);
}

#[test]
fn gradient_of_linear_1d_field_is_exact_at_interior_cells() {
    let mesh = Arc::new(CartesianMesh::line(3, 1.0));
    let field = CellField::new(mesh.clone(), "phi", vec![0.0, 1.0, 2.0].into(), false).unwrap();

    let grad = field.grad();
    assert_eq!(grad.len(), 3);
    assert_close(grad[1].0, 1.0, 1e-12);
    assert_close(grad[1].1, 0.0, 1e-12);
    assert_close(grad[1].2, 0.0, 1e-12);
}

#[test]
fn gradient_of_constant_field_vanishes_at_every_cell() {
    let mesh = Arc::new(CartesianMesh::new((5, 4), (0.2, 0.3)));
    let field = CellField::constant(mesh.clone(), "phi", 7.25, false);

    for path in &[vectorized::grad(field.values(), &*mesh), looped::grad(field.values(), &*mesh)] {
        for g in path.iter() {
            assert_close(g.norm(), 0.0, 1e-12);
        }
    }
}

#[test]
fn face_gradient_of_constant_field_vanishes_at_every_face() {
    let mesh = Arc::new(CartesianMesh::new((4, 4), (0.25, 0.25)));
    let field = CellField::constant(mesh.clone(), "phi", -3.0, false);

    for g in field.face_grad() {
        assert_close(g.norm(), 0.0, 1e-12);
    }
}

#[test]
fn face_gradient_of_linear_1d_field_points_along_the_normal() {
    let mesh = Arc::new(CartesianMesh::line(3, 1.0));
    let field = CellField::new(mesh.clone(), "phi", vec![0.0, 1.0, 2.0].into(), false).unwrap();

    let face_grad = field.face_grad();
    for face in (0..mesh.num_faces()).filter(|&f| mesh.adjacent_cells(f).1.is_some()) {
        let g = face_grad[face];
        assert_close(g.0, 1.0, 1e-12);
        assert_close(g.1, 0.0, 1e-12);
        assert_close(g.2, 0.0, 1e-12);
    }
}

#[test]
fn gradient_magnitude_is_the_pointwise_norm_of_the_gradient() {
    let mesh = CartesianMesh::new((6, 5), (0.17, 0.29));
    let values = wavy_values(&mesh);

    let grad = vectorized::grad(&values, &mesh);
    let mag = vectorized::grad_mag(&values, &mesh);
    for (g, m) in grad.iter().zip(&mag) {
        let scale = g.norm().max(1.0);
        assert_close(g.norm() / scale, m / scale, 1e-12);
    }

    let mag_looped = looped::grad_mag(&values, &mesh);
    for (g, m) in grad.iter().zip(&mag_looped) {
        let scale = g.norm().max(1.0);
        assert_close(g.norm() / scale, m / scale, 1e-12);
    }
}

#[test]
fn interpolation_weights_of_the_test_meshes_stay_in_unit_interval() {
    for mesh in &[CartesianMesh::line(7, 0.3), CartesianMesh::new((3, 8), (1.5, 0.01))] {
        for face in 0..mesh.num_faces() {
            let alpha = mesh.face_to_cell_distance(face) / mesh.cell_distance(face);
            assert!(alpha >= 0.0 && alpha <= 1.0);
        }
    }
}

#[test]
fn looped_and_vectorized_paths_agree_on_every_element() {
    let mesh = CartesianMesh::new((5, 4), (0.25, 0.5));
    let values = wavy_values(&mesh);

    let fv_v = vectorized::face_value(&values, &mesh);
    let fv_l = looped::face_value(&values, &mesh);
    assert_eq!(fv_v.len(), fv_l.len());
    for (a, b) in fv_v.iter().zip(&fv_l) {
        assert_close(*a, *b, 1e-10);
    }

    let g_v = vectorized::grad(&values, &mesh);
    let g_l = looped::grad(&values, &mesh);
    for (a, b) in g_v.iter().zip(&g_l) {
        assert_close((*a - *b).norm(), 0.0, 1e-10);
    }

    let m_v = vectorized::grad_mag(&values, &mesh);
    let m_l = looped::grad_mag(&values, &mesh);
    for (a, b) in m_v.iter().zip(&m_l) {
        assert_close(*a, *b, 1e-10);
    }

    let fg_v = vectorized::face_grad(&values, &mesh);
    let fg_l = looped::face_grad(&values, &mesh);
    for (a, b) in fg_v.iter().zip(&fg_l) {
        assert_close((*a - *b).norm(), 0.0, 1e-10);
    }
}

#[test]
fn degenerate_geometry_fails_loudly_as_nan_or_inf() {
    // Zero spacing produces zero distances and volumes; operators must
    // propagate the resulting non-finite values instead of clamping.
    let mesh = CartesianMesh::line(3, 0.0);
    let values = vec![0.0, 1.0, 2.0];

    let grad = vectorized::grad(&values, &mesh);
    assert!(grad.iter().any(|g| !g.0.is_finite()));

    let face_grad = looped::face_grad(&values, &mesh);
    assert!(face_grad.iter().any(|g| !g.norm().is_finite()));
}

#[test]
fn operator_outputs_are_sized_by_the_mesh() {
    let mesh = Arc::new(CartesianMesh::new((4, 3), (0.5, 0.5)));
    let field = CellField::new(mesh.clone(), "phi", wavy_values(&mesh).into(), false).unwrap();

    assert_eq!(field.face_value().len(), mesh.num_faces());
    assert_eq!(field.grad().len(), mesh.num_cells());
    assert_eq!(field.grad_mag().len(), mesh.num_cells());
    assert_eq!(field.face_grad().len(), mesh.num_faces());

    // A 2D mesh has no out-of-plane gradient component.
    assert!(field.grad().iter().all(|g| g.2 == 0.0));
}
