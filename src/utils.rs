use crate::types::{Point, Value};

/// Corner indices and outward normal of each cube face.
///
/// Corners are listed counter-clockwise when seen from outside the cube, so the
/// quad splits into triangles `(0, 1, 2)` and `(0, 2, 3)` with the correct winding.
pub const CUBE_FACES: [([usize; 4], [Value; 3]); 6] = [
    ([0, 3, 2, 1], [0.0, 0.0, -1.0]),
    ([4, 5, 6, 7], [0.0, 0.0, 1.0]),
    ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
    ([3, 7, 6, 2], [0.0, 1.0, 0.0]),
    ([0, 4, 7, 3], [-1.0, 0.0, 0.0]),
    ([1, 2, 6, 5], [1.0, 0.0, 0.0]),
];

/// Returns the 8 corner positions of an axis-aligned cube of edge `size` centred on `center`.
///
/// ```text
///     7----6          Y
///    /|   /|          |
///   3----2 |          *-- X
///   | 4--|-5         /
///   |/   |/         Z
///   0----1
///
///  0 = (-, -, -)    4 = (-, -, +)
///  1 = (+, -, -)    5 = (+, -, +)
///  2 = (+, +, -)    6 = (+, +, +)
///  3 = (-, +, -)    7 = (-, +, +)
/// ```
#[inline]
pub fn get_corner_positions(center: Point, size: Value) -> [Point; 8] {
    let h = size / 2.0;
    let (x0, y0, z0) = (center.x - h, center.y - h, center.z - h);
    let (x1, y1, z1) = (center.x + h, center.y + h, center.z + h);

    [
        Point::new(x0, y0, z0),
        Point::new(x1, y0, z0),
        Point::new(x1, y1, z0),
        Point::new(x0, y1, z0),
        Point::new(x0, y0, z1),
        Point::new(x1, y0, z1),
        Point::new(x1, y1, z1),
        Point::new(x0, y1, z1),
    ]
}

/// Centre of the unit voxel at grid index `(a, b, c)`, which spans `[a, a + 1]` per axis.
#[inline]
pub fn voxel_center(index: [usize; 3]) -> Point {
    Point::new(
        index[0] as Value + 0.5,
        index[1] as Value + 0.5,
        index[2] as Value + 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector;

    #[test]
    fn face_windings_match_normals() {
        let corners = get_corner_positions(Point::origin(), 1.0);
        for (quad, normal) in CUBE_FACES {
            let a = corners[quad[0]];
            let b = corners[quad[1]];
            let c = corners[quad[2]];
            let n = (b - a).cross(&(c - a)).normalize();
            assert_eq!(n, Vector::new(normal[0], normal[1], normal[2]));
        }
    }

    #[test]
    fn corners_span_the_cube() {
        let corners = get_corner_positions(Point::new(1.0, 1.0, 1.0), 2.0);
        assert_eq!(corners[0], Point::new(0.0, 0.0, 0.0));
        assert_eq!(corners[6], Point::new(2.0, 2.0, 2.0));
        assert_eq!(voxel_center([0, 1, 2]), Point::new(0.5, 1.5, 2.5));
    }
}
