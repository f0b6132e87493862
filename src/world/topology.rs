//! Map topology: distances between land positions.
//!
//! Map generation lives in the host. The engine only needs to answer
//! "which lands lie within N steps of here", so it takes the metric as a
//! trait and ships the hex metric the host uses.

use crate::core::LandPosition;

/// Distance metric over land positions.
pub trait Topology {
    /// Number of steps between two positions.
    fn distance(&self, a: LandPosition, b: LandPosition) -> u32;

    /// Check whether `b` lies within `radius` steps of `a` (inclusive).
    fn within(&self, a: LandPosition, b: LandPosition, radius: u32) -> bool {
        self.distance(a, b) <= radius
    }
}

/// Hex grid in "odd-r" offset layout: odd rows are shoved right by half a
/// tile.
///
/// ```
/// use realm_magic::core::LandPosition;
/// use realm_magic::world::{HexTopology, Topology};
///
/// let hex = HexTopology;
/// let center = LandPosition::new(2, 2);
/// assert_eq!(hex.distance(center, LandPosition::new(1, 2)), 1);
/// assert_eq!(hex.distance(center, LandPosition::new(2, 4)), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HexTopology;

impl HexTopology {
    fn to_cube(pos: LandPosition) -> (i32, i32, i32) {
        let x = pos.col - (pos.row - (pos.row & 1)) / 2;
        let z = pos.row;
        (x, -x - z, z)
    }
}

impl Topology for HexTopology {
    fn distance(&self, a: LandPosition, b: LandPosition) -> u32 {
        let (ax, ay, az) = Self::to_cube(a);
        let (bx, by, bz) = Self::to_cube(b);
        let dx = (ax - bx).unsigned_abs();
        let dy = (ay - by).unsigned_abs();
        let dz = (az - bz).unsigned_abs();
        dx.max(dy).max(dz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbours(center: LandPosition) -> Vec<LandPosition> {
        let mut out = Vec::new();
        for row in center.row - 2..=center.row + 2 {
            for col in center.col - 2..=center.col + 2 {
                let pos = LandPosition::new(row, col);
                if pos != center && HexTopology.distance(center, pos) == 1 {
                    out.push(pos);
                }
            }
        }
        out
    }

    #[test]
    fn test_distance_to_self() {
        let pos = LandPosition::new(3, 3);
        assert_eq!(HexTopology.distance(pos, pos), 0);
    }

    #[test]
    fn test_six_neighbours_even_row() {
        let n = neighbours(LandPosition::new(2, 2));
        assert_eq!(n.len(), 6);
        assert!(n.contains(&LandPosition::new(1, 1)));
        assert!(n.contains(&LandPosition::new(1, 2)));
        assert!(!n.contains(&LandPosition::new(1, 3)));
    }

    #[test]
    fn test_six_neighbours_odd_row() {
        let n = neighbours(LandPosition::new(3, 2));
        assert_eq!(n.len(), 6);
        assert!(n.contains(&LandPosition::new(2, 3)));
        assert!(n.contains(&LandPosition::new(4, 3)));
        assert!(!n.contains(&LandPosition::new(2, 1)));
    }

    #[test]
    fn test_symmetric() {
        let a = LandPosition::new(-1, 4);
        let b = LandPosition::new(5, -2);
        assert_eq!(HexTopology.distance(a, b), HexTopology.distance(b, a));
    }

    #[test]
    fn test_within() {
        let a = LandPosition::new(0, 0);
        assert!(HexTopology.within(a, LandPosition::new(0, 1), 1));
        assert!(!HexTopology.within(a, LandPosition::new(0, 2), 1));
    }
}
