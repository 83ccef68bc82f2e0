use crate::error::Error;

/// A loop-nest descriptor for explicitly indexed kernels over arrays of
/// rank 1 to 3. The descriptor holds one extent per dimension (`ni`,
/// optionally `nj`, `nk`); `run` executes a caller-supplied body at the
/// innermost level with the explicit indices, the last index varying
/// fastest. This is the statically compiled counterpart of synthesizing a
/// C loop nest from shape metadata at run time: the body is monomorphized
/// and compiled ahead of use, and a shape outside the supported ranks is a
/// hard `UnsupportedKernelShape` error rather than a silent fallback.
///
/// The descriptor is a pure shape transform: it performs no I/O and knows
/// nothing about fields or meshes.
#[derive(Clone, Copy, Debug)]
pub struct LoopNest {
    ni: usize,
    nj: usize,
    nk: usize,
    rank: usize,
}

// ============================================================================
impl LoopNest {
    pub fn rank1(ni: usize) -> Self {
        Self { ni, nj: 1, nk: 1, rank: 1 }
    }

    pub fn rank2(ni: usize, nj: usize) -> Self {
        Self { ni, nj, nk: 1, rank: 2 }
    }

    pub fn rank3(ni: usize, nj: usize, nk: usize) -> Self {
        Self { ni, nj, nk, rank: 3 }
    }

    /// Build a descriptor from an array shape, one extent per dimension.
    pub fn from_shape(shape: &[usize]) -> Result<Self, Error> {
        match *shape {
            [ni] => Ok(Self::rank1(ni)),
            [ni, nj] => Ok(Self::rank2(ni, nj)),
            [ni, nj, nk] => Ok(Self::rank3(ni, nj, nk)),
            _ => Err(Error::UnsupportedKernelShape(shape.len())),
        }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The number of times `run` executes its body.
    pub fn len(&self) -> usize {
        self.ni * self.nj * self.nk
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Execute the body once per index tuple. Indexes on axes beyond the
    /// declared rank stay at zero.
    pub fn run<F>(&self, mut body: F)
    where
        F: FnMut(usize, usize, usize),
    {
        match self.rank {
            1 => {
                for i in 0..self.ni {
                    body(i, 0, 0)
                }
            }
            2 => {
                for i in 0..self.ni {
                    for j in 0..self.nj {
                        body(i, j, 0)
                    }
                }
            }
            _ => {
                for i in 0..self.ni {
                    for j in 0..self.nj {
                        for k in 0..self.nk {
                            body(i, j, k)
                        }
                    }
                }
            }
        }
    }
}

/// Traversal of a tensor-valued-per-cell array: the leading index selects
/// the cell, and the trailing axes address an element of the tensor stored
/// there. `run` holds the cell index fixed while iterating the tensor
/// elements, handing the body the flat row-major buffer offset computed
/// from the declared strides, so element-wise kernels on per-cell vectors
/// or tensors (gradients, for instance) need no intermediate arrays.
#[derive(Clone, Copy, Debug)]
pub struct ElementNest {
    count: usize,
    shape: [usize; 2],
    strides: [usize; 3],
    rank: usize,
}

// ============================================================================
impl ElementNest {
    /// Build a traversal from the full array shape: `shape[0]` is the cell
    /// count, the remaining entries are the tensor extents. Total rank must
    /// be 1 to 3.
    pub fn from_shape(shape: &[usize]) -> Result<Self, Error> {
        match *shape {
            [n] => Ok(Self {
                count: n,
                shape: [1, 1],
                strides: [1, 0, 0],
                rank: 0,
            }),
            [n, d0] => Ok(Self {
                count: n,
                shape: [d0, 1],
                strides: [d0, 1, 0],
                rank: 1,
            }),
            [n, d0, d1] => Ok(Self {
                count: n,
                shape: [d0, d1],
                strides: [d0 * d1, d1, 1],
                rank: 2,
            }),
            _ => Err(Error::UnsupportedKernelShape(shape.len())),
        }
    }

    /// A traversal over `count` cells each holding a `dim`-vector; the
    /// shape `[count, dim]` is always supported.
    pub fn vector(count: usize, dim: usize) -> Self {
        Self {
            count,
            shape: [dim, 1],
            strides: [dim, 1, 0],
            rank: 1,
        }
    }

    /// Flat buffer offset of one tensor element of one cell.
    pub fn offset(&self, cell: usize, element: &[usize]) -> usize {
        let mut offset = cell * self.strides[0];
        for (axis, &e) in element.iter().enumerate() {
            offset += e * self.strides[axis + 1]
        }
        offset
    }

    /// Execute the body once per tensor element of every cell, passing the
    /// cell index and the element's flat buffer offset.
    pub fn run<F>(&self, mut body: F)
    where
        F: FnMut(usize, usize),
    {
        match self.rank {
            0 => {
                for i in 0..self.count {
                    body(i, i)
                }
            }
            1 => {
                for i in 0..self.count {
                    for a in 0..self.shape[0] {
                        body(i, i * self.strides[0] + a)
                    }
                }
            }
            _ => {
                for i in 0..self.count {
                    for a in 0..self.shape[0] {
                        for b in 0..self.shape[1] {
                            body(i, i * self.strides[0] + a * self.strides[1] + b)
                        }
                    }
                }
            }
        }
    }
}

/// Widen a boolean array to one byte per element. Bit-packed boolean
/// storage is not element-addressable by pointer arithmetic, so kernel
/// inputs are coerced through this before traversal; the vectorized path
/// consumes booleans directly and never needs it.
pub fn widen_bool(values: &[bool]) -> Vec<u8> {
    values.iter().map(|&b| b as u8).collect()
}
