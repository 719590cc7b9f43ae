use approx::relative_eq;
use proptest::prelude::*;
use umplot::core::{Bounds, CoordinateTransform, GridPlanner, Point, ScreenPoint, ScreenRect};
use umplot::interaction::{ViewportController, ZoomOutcome};

fn close(a: f64, b: f64) -> bool {
    relative_eq!(a, b, epsilon = 1e-6, max_relative = 1e-9)
}

/// Graph-space tolerance: 1e-9 relative, with an absolute floor scaled to the data span.
fn close_in_graph(a: f64, b: f64, span: f64) -> bool {
    relative_eq!(a, b, epsilon = 1e-9 * span.max(1.0), max_relative = 1e-9)
}

prop_compose! {
    fn client_rect()(
        x in 0.0f64..300.0,
        y in 0.0f64..200.0,
        width in 50.0f64..2_000.0,
        height in 50.0f64..1_500.0
    ) -> ScreenRect {
        ScreenRect::new(x, y, width, height)
    }
}

prop_compose! {
    fn data_bounds()(
        min_x in -1e3f64..1e3,
        min_y in -1e3f64..1e3,
        width in 1.0f64..1e4,
        height in 1.0f64..1e4
    ) -> Bounds {
        Bounds::new(min_x, min_y, min_x + width, min_y + height)
    }
}

proptest! {
    #[test]
    fn screen_graph_round_trip(
        rect in client_rect(),
        bounds in data_bounds(),
        px in -500.0f64..2_500.0,
        py in -500.0f64..2_000.0
    ) {
        let transform = CoordinateTransform::fitted(rect, bounds);
        let back = transform.to_screen(transform.to_graph(ScreenPoint::new(px, py)));
        prop_assert!(close(back.x, px));
        prop_assert!(close(back.y, py));
    }

    #[test]
    fn graph_screen_graph_round_trip(
        rect in client_rect(),
        bounds in data_bounds(),
        tx in -1.0f64..2.0,
        ty in -1.0f64..2.0
    ) {
        let transform = CoordinateTransform::fitted(rect, bounds);
        let point = Point::new(
            bounds.min_x + tx * bounds.width(),
            bounds.min_y + ty * bounds.height(),
        );
        let back = transform.to_graph(transform.to_screen(point));
        prop_assert!(close_in_graph(back.x, point.x, bounds.width()));
        prop_assert!(close_in_graph(back.y, point.y, bounds.height()));
    }

    #[test]
    fn fit_maps_bounds_corners_to_client_corners(rect in client_rect(), bounds in data_bounds()) {
        let transform = CoordinateTransform::fitted(rect, bounds);
        let min = transform.to_screen(bounds.min_corner());
        let max = transform.to_screen(bounds.max_corner());
        prop_assert!(close(min.x, rect.left()));
        prop_assert!(close(min.y, rect.bottom()));
        prop_assert!(close(max.x, rect.right()));
        prop_assert!(close(max.y, rect.top()));
    }

    #[test]
    fn resize_preserves_visible_window(
        rect in client_rect(),
        next in client_rect(),
        bounds in data_bounds()
    ) {
        let mut controller = ViewportController::new(rect, bounds);
        let before = controller.visible_graph_rect();
        controller.on_resize(next);
        let after = controller.visible_graph_rect();
        prop_assert!(close(after.min_x, before.min_x));
        prop_assert!(close(after.max_x, before.max_x));
        prop_assert!(close(after.min_y, before.min_y));
        prop_assert!(close(after.max_y, before.max_y));
    }

    #[test]
    fn zoom_in_shows_dragged_region(
        rect in client_rect(),
        bounds in data_bounds(),
        fx in 0.0f64..0.9,
        fy in 0.0f64..0.9,
        fw in 0.05f64..0.1,
        fh in 0.05f64..0.1
    ) {
        let mut controller = ViewportController::new(rect, bounds);
        let drag = ScreenRect::new(
            rect.x + fx * rect.width,
            rect.y + fy * rect.height,
            fw * rect.width,
            fh * rect.height,
        );
        let expected = controller.transform().visible_graph_rect(drag);

        let outcome = controller.apply_zoom_rect(drag, bounds);
        prop_assert_eq!(outcome, ZoomOutcome::ZoomedIn);

        let visible = controller.visible_graph_rect();
        prop_assert!(close(visible.min_x, expected.min_x));
        prop_assert!(close(visible.max_x, expected.max_x));
        prop_assert!(close(visible.min_y, expected.min_y));
        prop_assert!(close(visible.max_y, expected.max_y));
    }

    #[test]
    fn grid_step_density_stays_within_bounds(
        span in 1e-6f64..1e9,
        lines in 1i64..40,
        min_visible in -1e6f64..1e6
    ) {
        let plan = GridPlanner::plan_axis(span, lines, min_visible).expect("plan");
        let n = lines as f64;
        let density = span / plan.step;
        prop_assert!(density >= n * (1.0 - 1e-9));
        prop_assert!(density <= 2.0 * n * (1.0 + 1e-9));
        let slack = 1e-9 * (plan.step + min_visible.abs());
        prop_assert!(plan.first_tick >= min_visible - slack);
        prop_assert!(plan.first_tick < min_visible + plan.step + slack);
    }
}
