use approx::assert_relative_eq;
use umplot::core::{Bounds, CoordinateTransform, GridPlanner, Point, ScreenRect, format_tick_label};

#[test]
fn step_is_power_of_ten_times_power_of_two() {
    for (span, lines, expected) in [
        (237.0, 5, 40.0),
        (100.0, 10, 10.0),
        (1.0, 5, 0.1),
        (0.03, 5, 0.004),
        (5_000.0, 3, 1_000.0),
    ] {
        let plan = GridPlanner::plan_axis(span, lines, 0.0).expect("plan");
        assert_relative_eq!(plan.step, expected, max_relative = 1e-12);
        let density = span / plan.step;
        assert!(density >= lines as f64 && density <= 2.0 * lines as f64);
    }
}

#[test]
fn ticks_start_at_first_step_multiple_at_or_above_visible_minimum() {
    let rect = ScreenRect::new(0.0, 0.0, 500.0, 400.0);
    let transform = CoordinateTransform::fitted(rect, Bounds::new(-7.0, -0.5, 13.0, 1.5));
    let layout = GridPlanner::new(4, 4).layout(&transform, rect).expect("layout");
    let x = layout.x.expect("x axis");
    let y = layout.y.expect("y axis");

    assert_relative_eq!(x.plan.step, 4.0);
    assert_relative_eq!(x.plan.first_tick, -4.0);
    assert_relative_eq!(y.plan.step, 0.4);
    assert_relative_eq!(y.plan.first_tick, -0.4, epsilon = 1e-12);

    let first = x.ticks.first().expect("x tick");
    assert_relative_eq!(first.pixel, transform.to_screen(Point::new(-4.0, 0.0)).x, epsilon = 1e-9);
}

#[test]
fn tick_pixels_step_evenly_and_stay_inside_client_rect() {
    let rect = ScreenRect::new(96.0, 24.0, 512.0, 384.0);
    let transform = CoordinateTransform::fitted(rect, Bounds::new(0.0, 0.0, 20.0, 5.0));
    let layout = GridPlanner::new(5, 5).layout(&transform, rect).expect("layout");
    let x = layout.x.expect("x axis");
    let y = layout.y.expect("y axis");

    assert!(!x.ticks.is_empty());
    assert!(!y.ticks.is_empty());
    for pair in x.ticks.windows(2) {
        assert_relative_eq!(
            pair[1].pixel - pair[0].pixel,
            x.plan.step * transform.x_scale,
            epsilon = 1e-9
        );
    }
    assert!(x.ticks.iter().all(|tick| tick.pixel < rect.right()));
    // y ticks grow upward on screen from the bottom edge.
    for pair in y.ticks.windows(2) {
        assert!(pair[1].pixel < pair[0].pixel);
    }
    assert!(y.ticks.iter().all(|tick| tick.pixel > rect.top()));
}

#[test]
fn thousand_line_grid_covers_the_whole_client_rect() {
    let rect = ScreenRect::new(0.0, 0.0, 2000.0, 400.0);
    let transform = CoordinateTransform::fitted(rect, Bounds::new(0.0, 0.0, 1000.0, 1.0));
    let layout = GridPlanner::new(1000, 5).layout(&transform, rect).expect("layout");
    let x = layout.x.expect("x axis");

    assert_relative_eq!(x.plan.step, 1.0);
    // 0..=999; the tick at 1000 lands on the excluded right edge.
    assert_eq!(x.ticks.len(), 1000);
    assert_relative_eq!(x.ticks[0].value, 0.0);
    assert_relative_eq!(x.ticks[999].value, 999.0);
    assert_relative_eq!(x.ticks[999].pixel, 1998.0, epsilon = 1e-9);
}

#[test]
fn degenerate_axis_drops_only_its_own_grid() {
    let rect = ScreenRect::new(0.0, 0.0, 400.0, 300.0);
    // Constant y: the fallback scale is positive, so the visible y span comes out negative.
    let transform = CoordinateTransform::fitted(rect, Bounds::new(0.0, 2.0, 10.0, 2.0));
    let layout = GridPlanner::new(5, 5).layout(&transform, rect).expect("layout");

    assert!(layout.y.is_none());
    let x = layout.x.expect("x axis");
    assert_relative_eq!(x.plan.step, 1.0);
    // 0..=9 at 40 px each; the tick at 10 sits on the excluded right edge.
    assert_eq!(x.ticks.len(), 10);
}

#[test]
fn negative_counts_suppress_grid() {
    let rect = ScreenRect::new(0.0, 0.0, 400.0, 300.0);
    let transform = CoordinateTransform::fitted(rect, Bounds::new(0.0, 0.0, 10.0, 10.0));
    assert!(GridPlanner::new(-1, 5).layout(&transform, rect).is_none());
    assert!(GridPlanner::new(5, -1).layout(&transform, rect).is_none());
}

#[test]
fn labels_switch_to_four_decimals_for_fine_steps() {
    assert_eq!(format_tick_label(40.0, 40.0), "40.00");
    assert_eq!(format_tick_label(-0.4, 0.2), "-0.40");
    assert_eq!(format_tick_label(0.02, 0.01), "0.0200");
    assert_eq!(format_tick_label(0.008, 0.002), "0.0080");
    assert_eq!(format_tick_label(-0.0, 0.002), "0.0000");
}
