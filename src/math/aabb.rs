use super::{Point3, Vector3, TOLERANCE};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// An inverted box that any `expand` call will overwrite.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::MAX, f64::MAX, f64::MAX),
            max: Point3::new(f64::MIN, f64::MIN, f64::MIN),
        }
    }

    /// Smallest box containing all `points`. Empty input yields [`Aabb::empty`].
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_point(point);
        }
        aabb
    }

    /// Returns `true` if no point has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand_point(&mut self, point: &Point3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn expand(&mut self, other: &Aabb) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    /// Overlap test with a tolerance band around both boxes.
    #[must_use]
    pub fn intersects(&self, other: &Aabb, tolerance: f64) -> bool {
        !(self.max.x + tolerance < other.min.x
            || other.max.x + tolerance < self.min.x
            || self.max.y + tolerance < other.min.y
            || other.max.y + tolerance < self.min.y
            || self.max.z + tolerance < other.min.z
            || other.max.z + tolerance < self.min.z)
    }

    /// Returns `true` if `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Index of the longest axis (0 = X, 1 = Y, 2 = Z).
    #[must_use]
    pub fn longest_axis(&self) -> usize {
        let extent = self.max - self.min;
        if extent.x >= extent.y && extent.x >= extent.z {
            0
        } else if extent.y >= extent.z {
            1
        } else {
            2
        }
    }

    /// Slab test for the ray `origin + t * dir`, `t >= 0`.
    ///
    /// Returns the parameter at which the ray enters the box (clamped to 0
    /// when the origin is inside), or `None` if the ray misses.
    #[must_use]
    pub fn ray_entry(&self, origin: &Point3, dir: &Vector3) -> Option<f64> {
        let mut t_near = 0.0_f64;
        let mut t_far = f64::INFINITY;

        for axis in 0..3 {
            let lo = self.min[axis] - TOLERANCE;
            let hi = self.max[axis] + TOLERANCE;
            if dir[axis].abs() < TOLERANCE {
                // Parallel to this slab: must already be between its planes.
                if origin[axis] < lo || origin[axis] > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir[axis];
            let mut t0 = (lo - origin[axis]) * inv;
            let mut t1 = (hi - origin[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        Some(t_near)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_box() -> Aabb {
        Aabb::from_points(&[p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)])
    }

    #[test]
    fn from_points_spans_input() {
        let aabb = Aabb::from_points(&[p(1.0, -2.0, 3.0), p(-1.0, 2.0, 0.0), p(0.0, 0.0, 5.0)]);
        assert_eq!(aabb.min, p(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, p(1.0, 2.0, 5.0));
        assert!(!aabb.is_empty());
    }

    #[test]
    fn empty_box_reports_empty() {
        assert!(Aabb::empty().is_empty());
        assert!(Aabb::from_points(std::iter::empty()).is_empty());
    }

    #[test]
    fn disjoint_boxes_do_not_intersect() {
        let a = unit_box();
        let b = Aabb::from_points(&[p(2.0, 2.0, 2.0), p(3.0, 3.0, 3.0)]);
        assert!(!a.intersects(&b, 0.0));
        assert!(a.intersects(&b, 1.5));
    }

    #[test]
    fn touching_boxes_intersect() {
        let a = unit_box();
        let b = Aabb::from_points(&[p(1.0, 0.0, 0.0), p(2.0, 1.0, 1.0)]);
        assert!(a.intersects(&b, 0.0));
    }

    #[test]
    fn longest_axis_picks_largest_extent() {
        let aabb = Aabb::from_points(&[p(0.0, 0.0, 0.0), p(1.0, 5.0, 2.0)]);
        assert_eq!(aabb.longest_axis(), 1);
    }

    #[test]
    fn ray_from_outside_enters_box() {
        let t = unit_box().ray_entry(&p(-1.0, 0.5, 0.5), &Vector3::x()).unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ray_from_inside_enters_at_zero() {
        let t = unit_box().ray_entry(&p(0.5, 0.5, 0.5), &Vector3::z()).unwrap();
        assert!(t.abs() < f64::EPSILON);
    }

    #[test]
    fn ray_pointing_away_misses() {
        assert!(unit_box().ray_entry(&p(-1.0, 0.5, 0.5), &-Vector3::x()).is_none());
        assert!(unit_box().ray_entry(&p(-1.0, 5.0, 0.5), &Vector3::x()).is_none());
    }

    #[test]
    fn contains_checks_all_axes() {
        let aabb = unit_box();
        assert!(aabb.contains(&p(0.5, 0.5, 0.5)));
        assert!(aabb.contains(&p(1.0, 0.0, 1.0)));
        assert!(!aabb.contains(&p(0.5, 1.5, 0.5)));
    }
}
