use crate::geometry::Vector3d;

/// The geometric and topological queries the field core needs from a mesh.
/// Meshes are built elsewhere (importers, generators) and consumed read-only
/// here; a mesh is immutable for the lifetime of the fields referencing it.
///
/// Conventions: every face has an owner cell, and the face normal points
/// from the owner toward the neighbor (outward of the domain at boundary
/// faces, where the neighbor is `None`). Nothing in this trait is expected
/// to validate well-formedness; degenerate geometry surfaces downstream as
/// inf or nan.
pub trait Mesh {
    fn num_cells(&self) -> usize;

    fn num_faces(&self) -> usize;

    /// Spatial dimensionality (1, 2, or 3).
    fn dim(&self) -> usize;

    /// The cells adjacent to a face: the owner first, then the neighbor,
    /// which is `None` on a boundary face.
    fn adjacent_cells(&self, face: usize) -> (usize, Option<usize>);

    /// The faces bounding a cell.
    fn cell_faces(&self, cell: usize) -> &[usize];

    fn face_area(&self, face: usize) -> f64;

    /// Unit normal, pointing from the owner cell toward the neighbor.
    fn face_normal(&self, face: usize) -> Vector3d;

    /// A pair of unit tangents spanning the face plane.
    fn face_tangents(&self, face: usize) -> (Vector3d, Vector3d);

    fn cell_volume(&self, cell: usize) -> f64;

    /// Distance between the two adjacent cell centers; at a boundary face,
    /// the distance from the owner center to the face.
    fn cell_distance(&self, face: usize) -> f64;

    /// Distance from the face to the far cell, the numerator of the
    /// face-value interpolation weight.
    fn face_to_cell_distance(&self, face: usize) -> f64;

    /// +1 if the face normal points out of the given cell, -1 otherwise.
    fn face_orientation(&self, face: usize, cell: usize) -> f64 {
        if self.adjacent_cells(face).0 == cell {
            1.0
        } else {
            -1.0
        }
    }
}

/// One face of a `CartesianMesh`, fully precomputed.
struct Face {
    owner: usize,
    neighbor: Option<usize>,
    area: f64,
    normal: Vector3d,
    tangents: (Vector3d, Vector3d),
    cell_distance: f64,
    face_to_cell_distance: f64,
}

/// A uniform rectilinear mesh, the reference `Mesh` implementation used by
/// the demo programs and the test suite. Cells are indexed row-major as
/// `i * nj + j`.
pub struct CartesianMesh {
    shape: (usize, usize),
    spacing: (f64, f64),
    faces: Vec<Face>,
    cell_face_ids: Vec<Vec<usize>>,
}

// ============================================================================
impl CartesianMesh {
    pub fn new(shape: (usize, usize), spacing: (f64, f64)) -> Self {
        let (ni, nj) = shape;
        let (dx, dy) = spacing;
        let cell = |i: usize, j: usize| i * nj + j;

        let mut faces = Vec::with_capacity((ni + 1) * nj + ni * (nj + 1));
        let mut cell_face_ids: Vec<Vec<usize>> =
            (0..ni * nj).map(|_| Vec::with_capacity(4)).collect();

        // Faces with a normal on the x axis, then faces with a normal on
        // the y axis. Boundary normals point outward of the owner.
        for fi in 0..=ni {
            for j in 0..nj {
                let id = faces.len();
                let (owner, neighbor, normal) = if fi == 0 {
                    (cell(0, j), None, Vector3d::new(-1.0, 0.0, 0.0))
                } else if fi == ni {
                    (cell(ni - 1, j), None, Vector3d::new(1.0, 0.0, 0.0))
                } else {
                    (cell(fi - 1, j), Some(cell(fi, j)), Vector3d::new(1.0, 0.0, 0.0))
                };
                let boundary = neighbor.is_none();
                faces.push(Face {
                    owner,
                    neighbor,
                    area: dy,
                    normal,
                    tangents: (Vector3d::new(0.0, 1.0, 0.0), Vector3d::new(0.0, 0.0, 1.0)),
                    cell_distance: if boundary { 0.5 * dx } else { dx },
                    face_to_cell_distance: 0.5 * dx,
                });
                cell_face_ids[owner].push(id);
                if let Some(n) = neighbor {
                    cell_face_ids[n].push(id);
                }
            }
        }
        for i in 0..ni {
            for fj in 0..=nj {
                let id = faces.len();
                let (owner, neighbor, normal) = if fj == 0 {
                    (cell(i, 0), None, Vector3d::new(0.0, -1.0, 0.0))
                } else if fj == nj {
                    (cell(i, nj - 1), None, Vector3d::new(0.0, 1.0, 0.0))
                } else {
                    (cell(i, fj - 1), Some(cell(i, fj)), Vector3d::new(0.0, 1.0, 0.0))
                };
                let boundary = neighbor.is_none();
                faces.push(Face {
                    owner,
                    neighbor,
                    area: dx,
                    normal,
                    tangents: (Vector3d::new(1.0, 0.0, 0.0), Vector3d::new(0.0, 0.0, 1.0)),
                    cell_distance: if boundary { 0.5 * dy } else { dy },
                    face_to_cell_distance: 0.5 * dy,
                });
                cell_face_ids[owner].push(id);
                if let Some(n) = neighbor {
                    cell_face_ids[n].push(id);
                }
            }
        }

        Self {
            shape,
            spacing,
            faces,
            cell_face_ids,
        }
    }

    /// A 1D mesh of `num_cells` cells with uniform spacing `dx`.
    pub fn line(num_cells: usize, dx: f64) -> Self {
        Self::new((num_cells, 1), (dx, 1.0))
    }

    pub fn cell_center(&self, cell: usize) -> (f64, f64) {
        let (_, nj) = self.shape;
        let (dx, dy) = self.spacing;
        let (i, j) = (cell / nj, cell % nj);
        (dx * (i as f64 + 0.5), dy * (j as f64 + 0.5))
    }
}

// ============================================================================
impl Mesh for CartesianMesh {
    fn num_cells(&self) -> usize {
        self.shape.0 * self.shape.1
    }

    fn num_faces(&self) -> usize {
        self.faces.len()
    }

    fn dim(&self) -> usize {
        if self.shape.1 > 1 {
            2
        } else {
            1
        }
    }

    fn adjacent_cells(&self, face: usize) -> (usize, Option<usize>) {
        (self.faces[face].owner, self.faces[face].neighbor)
    }

    fn cell_faces(&self, cell: usize) -> &[usize] {
        &self.cell_face_ids[cell]
    }

    fn face_area(&self, face: usize) -> f64 {
        self.faces[face].area
    }

    fn face_normal(&self, face: usize) -> Vector3d {
        self.faces[face].normal
    }

    fn face_tangents(&self, face: usize) -> (Vector3d, Vector3d) {
        self.faces[face].tangents
    }

    fn cell_volume(&self, _cell: usize) -> f64 {
        self.spacing.0 * self.spacing.1
    }

    fn cell_distance(&self, face: usize) -> f64 {
        self.faces[face].cell_distance
    }

    fn face_to_cell_distance(&self, face: usize) -> f64 {
        self.faces[face].face_to_cell_distance
    }
}

// ============================================================================
#[cfg(test)]
mod test {
    use super::{CartesianMesh, Mesh};

    #[test]
    fn line_mesh_has_expected_topology() {
        let mesh = CartesianMesh::line(3, 1.0);
        assert_eq!(mesh.num_cells(), 3);
        assert_eq!(mesh.dim(), 1);
        assert_eq!(mesh.num_faces(), 4 + 6);

        let interior: Vec<_> = (0..mesh.num_faces())
            .filter(|&f| mesh.adjacent_cells(f).1.is_some())
            .collect();
        assert_eq!(interior.len(), 2);

        for cell in 0..mesh.num_cells() {
            assert_eq!(mesh.cell_faces(cell).len(), 4);
        }
    }

    #[test]
    fn interpolation_weights_lie_in_unit_interval() {
        let mesh = CartesianMesh::new((4, 3), (0.25, 0.5));
        for face in 0..mesh.num_faces() {
            let alpha = mesh.face_to_cell_distance(face) / mesh.cell_distance(face);
            assert!(alpha >= 0.0 && alpha <= 1.0);
        }
    }

    #[test]
    fn face_orientation_is_signed_by_ownership() {
        let mesh = CartesianMesh::line(2, 1.0);
        let face = (0..mesh.num_faces())
            .find(|&f| mesh.adjacent_cells(f).1.is_some())
            .unwrap();
        let (owner, neighbor) = mesh.adjacent_cells(face);
        assert_eq!(mesh.face_orientation(face, owner), 1.0);
        assert_eq!(mesh.face_orientation(face, neighbor.unwrap()), -1.0);
    }

    #[test]
    fn cell_centers_are_uniformly_spaced() {
        let mesh = CartesianMesh::line(3, 2.0);
        assert_eq!(mesh.cell_center(0), (1.0, 0.5));
        assert_eq!(mesh.cell_center(1), (3.0, 0.5));
        assert_eq!(mesh.cell_center(2), (5.0, 0.5));
    }
}
