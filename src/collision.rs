use glam::Vec2;

/// Overlap test for two boxes given as left/top/right/bottom edges.
///
/// Edges that merely touch do not overlap, whichever box comes first.
#[allow(clippy::too_many_arguments)]
pub fn collides(x: f32, y: f32, r: f32, b: f32, x2: f32, y2: f32, r2: f32, b2: f32) -> bool {
    !(r <= x2 || x >= r2 || b <= y2 || y >= b2)
}

/// Axis-aligned bounding box overlap for boxes given as position and size
pub fn box_collides(pos: Vec2, size: Vec2, pos2: Vec2, size2: Vec2) -> bool {
    collides(
        pos.x,
        pos.y,
        pos.x + size.x,
        pos.y + size.y,
        pos2.x,
        pos2.y,
        pos2.x + size2.x,
        pos2.y + size2.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes() {
        let enemy = Vec2::new(100.0, 100.0);
        let bullet = Vec2::new(105.0, 105.0);
        assert!(box_collides(
            enemy,
            Vec2::new(80.0, 39.0),
            bullet,
            Vec2::new(18.0, 8.0)
        ));
    }

    #[test]
    fn test_separated_boxes() {
        assert!(!box_collides(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(10.0, 10.0)
        ));
        // Overlapping on x only
        assert!(!box_collides(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(5.0, 20.0),
            Vec2::new(10.0, 10.0)
        ));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let size = Vec2::new(10.0, 10.0);
        let a = Vec2::new(0.0, 0.0);
        let right = Vec2::new(10.0, 0.0);
        let below = Vec2::new(0.0, 10.0);

        assert!(!box_collides(a, size, right, size));
        assert!(!box_collides(right, size, a, size));
        assert!(!box_collides(a, size, below, size));
        assert!(!box_collides(below, size, a, size));
    }

    #[test]
    fn test_containment() {
        assert!(box_collides(
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(40.0, 40.0),
            Vec2::new(2.0, 2.0)
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn boxes() -> impl Strategy<Value = (Vec2, Vec2)> {
            (
                -600i32..600,
                -600i32..600,
                1i32..120,
                1i32..120,
            )
                .prop_map(|(x, y, w, h)| {
                    (
                        Vec2::new(x as f32, y as f32),
                        Vec2::new(w as f32, h as f32),
                    )
                })
        }

        proptest! {
            #[test]
            fn test_box_collides_is_symmetric(a in boxes(), b in boxes()) {
                prop_assert_eq!(
                    box_collides(a.0, a.1, b.0, b.1),
                    box_collides(b.0, b.1, a.0, a.1)
                );
            }

            #[test]
            fn test_box_collides_with_itself(a in boxes()) {
                prop_assert!(box_collides(a.0, a.1, a.0, a.1));
            }
        }
    }
}
