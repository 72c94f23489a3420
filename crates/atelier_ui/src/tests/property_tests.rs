//! Invariants checked over deterministic operation sequences.

use crate::constants::{SCALE_MAX, SCALE_MIN};
use crate::{NavigationController, Point, ViewportController};

/// Small deterministic generator so sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn delta(&mut self) -> f32 {
        const DELTAS: [f32; 6] = [0.05, -0.05, 0.1, -0.1, 0.5, -0.5];
        DELTAS[(self.next() % DELTAS.len() as u64) as usize]
    }
}

#[test]
fn test_scale_stays_in_bounds() {
    for seed in 0..20 {
        let mut rng = Lcg(seed);
        let mut viewport = ViewportController::new();
        for _ in 0..200 {
            viewport.zoom(rng.delta());
            let scale = viewport.scale();
            assert!((SCALE_MIN..=SCALE_MAX).contains(&scale), "scale {scale} out of bounds");
        }
    }
}

#[test]
fn test_returning_to_one_recenters() {
    for seed in 0..20 {
        let mut rng = Lcg(seed);
        let mut viewport = ViewportController::new();
        for _ in 0..200 {
            if rng.next() % 3 == 0 {
                viewport.begin_drag(Point::new(10.0, 10.0));
                viewport.continue_drag(Point::new(50.0, -20.0));
                viewport.end_drag();
            }
            viewport.zoom(rng.delta());
            if viewport.scale() == 1.0 {
                assert_eq!(viewport.offset(), Point::zero());
            }
        }
    }
}

#[test]
fn test_drag_state_is_consistent() {
    let mut rng = Lcg(7);
    let mut viewport = ViewportController::new();
    for _ in 0..300 {
        match rng.next() % 4 {
            0 => viewport.begin_drag(Point::new(1.0, 2.0)),
            1 => viewport.continue_drag(Point::new(5.0, 5.0)),
            2 => viewport.end_drag(),
            _ => viewport.zoom(rng.delta()),
        }
        assert_eq!(viewport.is_dragging(), viewport.drag_origin().is_some());
    }
}

#[test]
fn test_moves_after_release_are_inert() {
    let mut viewport = ViewportController::new();
    viewport.begin_drag(Point::new(0.0, 0.0));
    viewport.continue_drag(Point::new(30.0, 30.0));
    viewport.end_drag();
    let offset = viewport.offset();
    for i in 0..10 {
        viewport.continue_drag(Point::new(i as f32 * 17.0, -(i as f32)));
        assert_eq!(viewport.offset(), offset);
    }
}

#[test]
fn test_double_toggle_restores_default_view() {
    let mut viewport = ViewportController::new();
    viewport.zoom(0.35);
    viewport.toggle_reference_zoom();
    assert_eq!(viewport.scale(), 1.5);
    assert_eq!(viewport.offset(), Point::zero());
    viewport.toggle_reference_zoom();
    assert_eq!(viewport.scale(), 1.0);
}

#[test]
fn test_index_stays_in_range() {
    let len = 5;
    let mut rng = Lcg(42);
    let mut nav = NavigationController::new();
    assert!(nav.open(2, len));
    for _ in 0..200 {
        if rng.next() % 2 == 0 {
            nav.next(len);
        } else {
            nav.previous();
        }
        let index = nav.current().expect("stays open");
        assert!(index < len);
    }
}
