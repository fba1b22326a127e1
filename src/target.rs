use crate::math::{Point3, Vector3};

/// Output vertex buffer parallel to the soft mesh's base vertices.
///
/// Starts as a copy of the base positions and is the only thing the
/// pipeline writes to. Hand it to the host with [`into_positions`] to apply
/// as a morph target or write back to mesh data.
///
/// [`into_positions`]: DeformationTarget::into_positions
#[derive(Debug, Clone, PartialEq)]
pub struct DeformationTarget {
    positions: Vec<Point3>,
}

impl DeformationTarget {
    /// Creates a target initialised with a copy of `base`.
    #[must_use]
    pub fn from_base(base: &[Point3]) -> Self {
        Self {
            positions: base.to_vec(),
        }
    }

    /// Current position of vertex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn position(&self, index: usize) -> Point3 {
        self.positions[index]
    }

    /// Overwrites the position of vertex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_position(&mut self, index: usize, position: Point3) {
        self.positions[index] = position;
    }

    /// Motion of vertex `index` relative to its base position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for either buffer.
    #[must_use]
    pub fn displacement(&self, index: usize, base: &[Point3]) -> Vector3 {
        self.positions[index] - base[index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Point3] {
        &self.positions
    }

    #[must_use]
    pub fn into_positions(self) -> Vec<Point3> {
        self.positions
    }
}
