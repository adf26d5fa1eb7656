//! Integer scan conversion (Bresenham lines and midpoint circles)
//!
//! These functions only enumerate grid cells. Writing them into a canvas is
//! the caller's job, so all writes go through the canvas's dirty tracking.

/// Minor-axis offsets for a first-octant line of `major` steps rising `minor`.
/// Returns `major + 1` offsets, inclusive of both endpoints.
fn octant_offsets(major: i32, minor: i32) -> Vec<i32> {
    let mut offsets = Vec::with_capacity(major as usize + 1);
    let mut err = -(major >> 1);
    let mut offset = 0;
    for _ in 0..=major {
        offsets.push(offset);
        err += minor;
        if err >= 0 {
            offset += 1;
            err -= major;
        }
    }
    offsets
}

/// Cells of the line from (x1, y1) to (x2, y2), endpoints included, in order.
///
/// Iterates along whichever axis has the larger delta (x wins ties).
pub fn bresenham_line(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
    let (dx, dy) = (x2 - x1, y2 - y1);
    let sx = if dx < 0 { -1 } else { 1 };
    let sy = if dy < 0 { -1 } else { 1 };
    let (dx, dy) = (dx.abs(), dy.abs());

    if dx >= dy {
        octant_offsets(dx, dy)
            .into_iter()
            .enumerate()
            .map(|(i, off)| (x1 + sx * i as i32, y1 + sy * off))
            .collect()
    } else {
        octant_offsets(dy, dx)
            .into_iter()
            .enumerate()
            .map(|(i, off)| (x1 + sx * off, y1 + sy * i as i32))
            .collect()
    }
}

/// The eight reflections of octant offset (dx, dy) around (cx, cy).
/// Saturates instead of wrapping at the edge of the i32 range.
fn mirror8(cx: i32, cy: i32, dx: i32, dy: i32) -> [(i32, i32); 8] {
    let at = |a: i32, b: i32| (cx.saturating_add(a), cy.saturating_add(b));
    [
        at(dx, dy),
        at(-dx, dy),
        at(dx, -dy),
        at(-dx, -dy),
        at(dy, dx),
        at(-dy, dx),
        at(dy, -dx),
        at(-dy, -dx),
    ]
}

/// Offsets (x, y) of the second octant of a circle of radius `r`, x from 0
/// up to the diagonal. The error term is i64 so any i32 radius is safe.
fn circle_octant(r: i32) -> impl Iterator<Item = (i32, i32)> {
    let (mut x, mut y, mut err) = (0i32, r, -i64::from(r));
    std::iter::from_fn(move || {
        if x > y {
            return None;
        }
        let cell = (x, y);
        err += 2 * i64::from(x) + 1;
        x += 1;
        if err >= 0 {
            err -= 2 * i64::from(y) - 2;
            y -= 1;
        }
        Some(cell)
    })
}

/// Cells of the circle of radius `r` around (cx, cy).
///
/// One octant is traced and mirrored into the other seven, so cells on the
/// octant boundaries appear more than once. The result holds roughly
/// `5.7 * r` cells; callers drawing into a bounded canvas should bound `r`.
pub fn bresenham_circle(cx: i32, cy: i32, r: i32) -> Vec<(i32, i32)> {
    circle_octant(r)
        .flat_map(|(x, y)| mirror8(cx, cy, x, y))
        .collect()
}

/// Outline of a triangle: its three edges p1-p2, p2-p3, p3-p1
pub fn triangle_outline(p1: (i32, i32), p2: (i32, i32), p3: (i32, i32)) -> Vec<(i32, i32)> {
    let mut cells = bresenham_line(p1.0, p1.1, p2.0, p2.1);
    cells.extend(bresenham_line(p2.0, p2.1, p3.0, p3.1));
    cells.extend(bresenham_line(p3.0, p3.1, p1.0, p1.1));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_horizontal_line() {
        let cells = bresenham_line(0, 0, 5, 0);
        assert_eq!(cells, (0..=5).map(|x| (x, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn test_steep_line() {
        let cells = bresenham_line(0, 0, 3, 4);
        assert_eq!(cells, vec![(0, 0), (1, 1), (2, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn test_reversed_line_runs_backwards() {
        let cells = bresenham_line(5, 2, 0, 2);
        assert_eq!(cells.first(), Some(&(5, 2)));
        assert_eq!(cells.last(), Some(&(0, 2)));
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn test_negative_slopes_hit_endpoints() {
        for &(x2, y2) in &[(-4, 7), (7, -4), (-7, -4), (-3, -3)] {
            let cells = bresenham_line(1, 1, x2, y2);
            assert_eq!(cells[0], (1, 1));
            assert_eq!(*cells.last().unwrap(), (x2, y2));
        }
    }

    #[test]
    fn test_degenerate_line() {
        assert_eq!(bresenham_line(3, 3, 3, 3), vec![(3, 3)]);
    }

    #[test]
    fn test_circle_symmetry() {
        let cells: HashSet<_> = bresenham_circle(10, 10, 5).into_iter().collect();
        assert!(cells.contains(&(10, 15)));
        assert!(cells.contains(&(15, 10)));
        for &(x, y) in &cells {
            assert!(cells.contains(&(20 - x, y)));
            assert!(cells.contains(&(x, 20 - y)));
            assert!(cells.contains(&(20 - x, 20 - y)));
            assert!(cells.contains(&(y, x)));
        }
    }

    #[test]
    fn test_circle_zero_radius() {
        let cells: HashSet<_> = bresenham_circle(2, 3, 0).into_iter().collect();
        assert_eq!(cells.len(), 1);
        assert!(cells.contains(&(2, 3)));
    }

    #[test]
    fn test_circle_huge_radius_error_term() {
        let r = i32::MAX / 2 + 10;
        // far enough along the octant that y has stepped down several times
        let (x, y) = circle_octant(r).take(200_000).last().unwrap();
        assert_eq!(x, 199_999);
        assert!(y < r && y > r - 100);
        assert_eq!(mirror8(i32::MAX, 0, 5, 1)[0], (i32::MAX, 1));
    }

    #[test]
    fn test_triangle_outline_edges() {
        let cells = triangle_outline((0, 0), (4, 0), (0, 4));
        let set: HashSet<_> = cells.iter().copied().collect();
        for x in 0..=4 {
            assert!(set.contains(&(x, 0)));
        }
        for y in 0..=4 {
            assert!(set.contains(&(0, y)));
        }
        assert!(set.contains(&(2, 2)));
        // no interior fill
        assert!(!set.contains(&(1, 1)));
    }
}
