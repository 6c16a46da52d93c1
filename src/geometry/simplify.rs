use geo::{Coord, LineString, Simplify};

/// Tolerance used when cleaning rings produced by offsetting
pub const RING_EPSILON: f64 = 1e-6;

/// Drop consecutive duplicates and a repeated closing vertex
pub fn dedup_ring(points: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
    let mut clean: Vec<Coord<f64>> = Vec::with_capacity(points.len());

    for &p in points {
        match clean.last() {
            Some(last) if distance(*last, p) <= tolerance => {}
            _ => clean.push(p),
        }
    }

    while clean.len() > 1 {
        let first = clean[0];
        match clean.last() {
            Some(&last) if distance(first, last) <= tolerance => {
                clean.pop();
            }
            _ => break,
        }
    }

    clean
}

/// Remove collinear and near-duplicate vertices from an implicitly closed ring
///
/// Falls back to the deduplicated input when simplification would leave
/// fewer than 3 vertices.
pub fn simplify_ring(points: &[Coord<f64>], epsilon: f64) -> Vec<Coord<f64>> {
    let ring = dedup_ring(points, epsilon);
    if ring.len() < 4 {
        return ring;
    }

    let mut closed = ring.clone();
    closed.push(ring[0]);
    let line = LineString::from(closed);

    let mut simplified = line.simplify(&epsilon).0;
    simplified.pop();

    if simplified.len() < 3 {
        return ring;
    }

    simplified
}

fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn test_dedup_ring_drops_closing_vertex() {
        let square = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 0.0, y: 1.0 },
            coord! { x: 0.0, y: 0.0 },
        ];
        let result = dedup_ring(&square, 1e-9);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_simplify_ring_removes_collinear() {
        let square = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 5.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 10.0, y: 10.0 },
            coord! { x: 0.0, y: 10.0 },
        ];
        let result = simplify_ring(&square, RING_EPSILON);
        assert_eq!(result.len(), 4);
        assert!(!result.contains(&coord! { x: 5.0, y: 0.0 }));
    }

    #[test]
    fn test_simplify_ring_preserves_minimum() {
        let triangle = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 0.0, y: 1.0 },
        ];
        let result = simplify_ring(&triangle, 0.1);
        assert_eq!(result.len(), 3);
    }
}
