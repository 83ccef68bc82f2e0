use std::sync::Arc;

use crate::error::Error;
use crate::geometry::Vector3d;
use crate::mesh::Mesh;
use crate::ops;

/// An initializer or assignment for a field: either a scalar broadcast to
/// every addressed cell, or one value per addressed cell. This is the
/// explicit tag checked at the assignment boundary; anything that cannot be
/// converted into one of these two forms is rejected before it reaches the
/// value storage.
#[derive(Clone, Debug)]
pub enum FieldValue {
    Scalar(f64),
    Array(Vec<f64>),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(values: Vec<f64>) -> Self {
        FieldValue::Array(values)
    }
}

impl From<&[f64]> for FieldValue {
    fn from(values: &[f64]) -> Self {
        FieldValue::Array(values.to_vec())
    }
}

/// A cell-centered field over a finite-volume mesh: one value per cell,
/// index-aligned with the mesh cell ordering, plus an optional lagged
/// snapshot of the values at the last commit point, for time-stepping
/// schemes that need both the current and the previous state.
///
/// The mesh is shared read-only through an `Arc`; the old snapshot holds
/// the same mesh handle, never a copy. Derived quantities (face values,
/// gradients) are recomputed from the current values on every call and are
/// never cached, so there is no staleness to invalidate.
#[derive(serde::Serialize)]
#[serde(bound(serialize = ""))]
pub struct CellField<M: Mesh> {
    #[serde(skip)]
    mesh: Arc<M>,
    name: String,
    values: Vec<f64>,
    old: Option<Box<CellField<M>>>,
}

// ============================================================================
impl<M: Mesh> CellField<M> {
    /// Create a field from a scalar (broadcast to all cells) or a full
    /// array. An array initializer whose length disagrees with the mesh
    /// cell count is a `DimensionMismatch`. With `track_history`, the
    /// construction-time values are also stored as the old snapshot.
    pub fn new(
        mesh: Arc<M>,
        name: &str,
        value: FieldValue,
        track_history: bool,
    ) -> Result<Self, Error> {
        let values = match value {
            FieldValue::Scalar(v) => vec![v; mesh.num_cells()],
            FieldValue::Array(array) => {
                if array.len() != mesh.num_cells() {
                    return Err(Error::DimensionMismatch {
                        expected: mesh.num_cells(),
                        got: array.len(),
                    });
                }
                array
            }
        };
        let mut field = Self {
            mesh,
            name: name.to_string(),
            values,
            old: None,
        };
        if track_history {
            field.old = Some(Box::new(field.copy()));
        }
        Ok(field)
    }

    /// A field holding the same scalar in every cell.
    pub fn constant(mesh: Arc<M>, name: &str, value: f64, track_history: bool) -> Self {
        let values = vec![value; mesh.num_cells()];
        let mut field = Self {
            mesh,
            name: name.to_string(),
            values,
            old: None,
        };
        if track_history {
            field.old = Some(Box::new(field.copy()));
        }
        field
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    /// Read-only snapshot of the current values, one per cell. This is the
    /// accessor viewer collaborators receive; nothing handed out here can
    /// mutate the field.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Assign a value to the addressed cells; an empty `cells` list
    /// addresses every cell. An array whose length disagrees with the
    /// addressed cells is a `TypeMismatch`.
    pub fn set_value<V: Into<FieldValue>>(&mut self, value: V, cells: &[usize]) -> Result<(), Error> {
        match (value.into(), cells.is_empty()) {
            (FieldValue::Scalar(v), true) => {
                for x in &mut self.values {
                    *x = v
                }
            }
            (FieldValue::Scalar(v), false) => {
                for &cell in cells {
                    self.values[cell] = v
                }
            }
            (FieldValue::Array(array), true) => {
                if array.len() != self.values.len() {
                    return Err(Error::TypeMismatch {
                        expected: self.values.len(),
                        got: array.len(),
                    });
                }
                self.values.copy_from_slice(&array)
            }
            (FieldValue::Array(array), false) => {
                if array.len() != cells.len() {
                    return Err(Error::TypeMismatch {
                        expected: cells.len(),
                        got: array.len(),
                    });
                }
                for (&cell, &v) in cells.iter().zip(&array) {
                    self.values[cell] = v
                }
            }
        }
        Ok(())
    }

    /// A value snapshot: same mesh handle, equal values, no history of its
    /// own. Snapshots never track history, so snapshot chains cannot grow
    /// without bound.
    pub fn copy(&self) -> Self {
        Self {
            mesh: self.mesh.clone(),
            name: self.name.clone(),
            values: self.values.clone(),
            old: None,
        }
    }

    /// Commit the current values as the previous time level. Nothing else
    /// ever touches the old snapshot: a time-stepping driver must call this
    /// exactly once per step, as a documented precondition. No-op when
    /// history tracking is disabled.
    pub fn commit_old(&mut self) {
        if let Some(old) = self.old.as_mut() {
            old.values.copy_from_slice(&self.values)
        }
    }

    /// The previous time level: the old snapshot if history is tracked,
    /// else the field itself, so callers can reference "the previous step"
    /// uniformly even for fields that never change across time.
    pub fn old(&self) -> &Self {
        match &self.old {
            Some(old) => old,
            None => self,
        }
    }

    pub fn face_value(&self) -> Vec<f64> {
        ops::face_value(&self.values, &*self.mesh)
    }

    pub fn grad(&self) -> Vec<Vector3d> {
        ops::grad(&self.values, &*self.mesh)
    }

    pub fn grad_mag(&self) -> Vec<f64> {
        ops::grad_mag(&self.values, &*self.mesh)
    }

    pub fn face_grad(&self) -> Vec<Vector3d> {
        ops::face_grad(&self.values, &*self.mesh)
    }
}

// ============================================================================
#[cfg(test)]
mod test {
    use super::{CellField, FieldValue};
    use crate::error::Error;
    use crate::mesh::CartesianMesh;
    use std::sync::Arc;

    fn line3() -> Arc<CartesianMesh> {
        Arc::new(CartesianMesh::line(3, 1.0))
    }

    #[test]
    fn array_initializer_must_match_cell_count() {
        let result = CellField::new(line3(), "phi", FieldValue::Array(vec![1.0, 2.0]), false);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn scalar_initializer_broadcasts() {
        let field = CellField::constant(line3(), "phi", 4.0, false);
        assert_eq!(field.values(), &[4.0, 4.0, 4.0]);
    }

    #[test]
    fn set_value_addresses_all_or_listed_cells() {
        let mut field = CellField::constant(line3(), "phi", 0.0, false);

        field.set_value(2.0, &[]).unwrap();
        assert_eq!(field.values(), &[2.0, 2.0, 2.0]);

        field.set_value(7.0, &[1]).unwrap();
        assert_eq!(field.values(), &[2.0, 7.0, 2.0]);

        field.set_value(vec![5.0, 6.0], &[0, 2]).unwrap();
        assert_eq!(field.values(), &[5.0, 7.0, 6.0]);
    }

    #[test]
    fn mismatched_assignment_is_a_type_error() {
        let mut field = CellField::constant(line3(), "phi", 0.0, false);
        assert!(matches!(
            field.set_value(vec![1.0, 2.0], &[]),
            Err(Error::TypeMismatch { expected: 3, got: 2 })
        ));
        assert!(matches!(
            field.set_value(vec![1.0], &[0, 2]),
            Err(Error::TypeMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn old_snapshot_only_moves_on_commit() {
        let mut field = CellField::constant(line3(), "phi", 1.0, true);

        field.set_value(2.0, &[]).unwrap();
        assert_eq!(field.old().values(), &[1.0, 1.0, 1.0]);

        field.commit_old();
        field.set_value(3.0, &[]).unwrap();
        assert_eq!(field.values(), &[3.0, 3.0, 3.0]);
        assert_eq!(field.old().values(), &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn field_without_history_is_its_own_previous_state() {
        let mut field = CellField::constant(line3(), "phi", 1.5, false);
        field.commit_old();
        assert_eq!(field.old().values(), field.values());
    }

    #[test]
    fn copies_do_not_alias_the_source() {
        let mut field = CellField::constant(line3(), "phi", 1.0, true);
        let copy = field.copy();

        field.set_value(9.0, &[]).unwrap();
        assert_eq!(copy.values(), &[1.0, 1.0, 1.0]);

        // The copy is a snapshot, not itself history-tracked.
        assert_eq!(copy.old().values(), copy.values());
    }
}
