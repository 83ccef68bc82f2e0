//! Fivol is the field core of a finite-volume PDE framework. It provides a
//! cell-centered field abstraction (`CellField`) over an unstructured mesh,
//! with old-value tracking for time-stepping schemes, and the derived
//! differential operators used by equation assembly: face-value
//! interpolation, the Gauss cell gradient, the gradient magnitude, and the
//! face gradient with non-orthogonal tangential correction.
//!
//! Every operator has two complete realizations which must agree to
//! floating-point tolerance: a vectorized whole-array path, and an
//! explicitly indexed loop path driven by statically compiled kernel
//! descriptors. A single process-wide flag, read once from the invocation
//! arguments, selects the path for the whole run.
//!
//! Mesh construction, boundary conditions, equation assembly, solvers, and
//! visualization are external collaborators; the mesh is consumed through
//! the `mesh::Mesh` trait and results are handed out as plain arrays
//! indexed by cell or face id.

pub mod error;
pub mod field;
pub mod geometry;
pub mod kernel;
pub mod mesh;
pub mod ops;
pub mod select;
