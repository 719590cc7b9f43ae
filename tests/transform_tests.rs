use approx::assert_relative_eq;
use umplot::core::{
    Bounds, CoordinateTransform, DEGENERATE_AXIS_SCALE, Point, ScreenPoint, ScreenRect,
    ScreenVector,
};

fn three_point_bounds() -> Bounds {
    Bounds::from_point_sets([[
        Point::new(0.0, 0.0),
        Point::new(10.0, 5.0),
        Point::new(20.0, 0.0),
    ]
    .as_slice()])
}

#[test]
fn fit_maps_data_extremes_to_client_corners() {
    let rect = ScreenRect::new(0.0, 0.0, 800.0, 600.0);
    let transform = CoordinateTransform::fitted(rect, three_point_bounds());

    assert_relative_eq!(transform.x_scale, 40.0);
    assert_relative_eq!(transform.y_scale, -120.0);
    assert_relative_eq!(transform.dx, 0.0);
    assert_relative_eq!(transform.dy, 5.0);

    let peak = transform.to_screen(Point::new(10.0, 5.0));
    assert_relative_eq!(peak.x, 400.0);
    assert_relative_eq!(peak.y, 0.0);

    let origin = transform.to_screen(Point::new(0.0, 0.0));
    assert_relative_eq!(origin.x, 0.0);
    assert_relative_eq!(origin.y, 600.0);
}

#[test]
fn fit_honours_client_rect_offset() {
    let rect = ScreenRect::new(96.0, 24.0, 512.0, 384.0);
    let bounds = Bounds::new(-3.0, 2.0, 5.0, 10.0);
    let transform = CoordinateTransform::fitted(rect, bounds);

    let min = transform.to_screen(Point::new(-3.0, 2.0));
    let max = transform.to_screen(Point::new(5.0, 10.0));
    assert_relative_eq!(min.x, rect.left(), epsilon = 1e-9);
    assert_relative_eq!(min.y, rect.bottom(), epsilon = 1e-9);
    assert_relative_eq!(max.x, rect.right(), epsilon = 1e-9);
    assert_relative_eq!(max.y, rect.top(), epsilon = 1e-9);
}

#[test]
fn degenerate_axis_falls_back_to_unit_scale() {
    let rect = ScreenRect::new(0.0, 0.0, 800.0, 600.0);
    let bounds = Bounds::new(1.0, 3.0, 9.0, 3.0);
    let transform = CoordinateTransform::fitted(rect, bounds);

    assert_relative_eq!(transform.x_scale, 100.0);
    assert_eq!(transform.y_scale, DEGENERATE_AXIS_SCALE);
    assert!(transform.is_valid());

    let single = CoordinateTransform::fitted(rect, Bounds::new(2.0, 2.0, 2.0, 2.0));
    assert_eq!(single.x_scale, DEGENERATE_AXIS_SCALE);
    assert_eq!(single.y_scale, DEGENERATE_AXIS_SCALE);
    let screen = single.to_screen(Point::new(2.0, 2.0));
    assert_relative_eq!(screen.x, 0.0);
    assert_relative_eq!(screen.y, 0.0);
}

#[test]
fn empty_bounds_still_produce_a_valid_transform() {
    let rect = ScreenRect::new(10.0, 10.0, 100.0, 100.0);
    let transform = CoordinateTransform::fitted(rect, Bounds::EMPTY);
    assert!(transform.is_valid());
    assert_eq!(transform.x_scale, DEGENERATE_AXIS_SCALE);
    assert_eq!(transform.y_scale, DEGENERATE_AXIS_SCALE);
}

#[test]
fn pan_moves_content_with_the_pointer() {
    let rect = ScreenRect::new(0.0, 0.0, 800.0, 600.0);
    let mut transform = CoordinateTransform::fitted(rect, three_point_bounds());
    let before = transform.to_screen(Point::new(10.0, 2.5));

    transform.pan(ScreenVector::new(40.0, -30.0));
    let after = transform.to_screen(Point::new(10.0, 2.5));

    assert_relative_eq!(after.x - before.x, 40.0, epsilon = 1e-9);
    assert_relative_eq!(after.y - before.y, -30.0, epsilon = 1e-9);
    assert_relative_eq!(transform.dx, -1.0, epsilon = 1e-12);
    assert_relative_eq!(transform.dy, 4.75, epsilon = 1e-12);
}

#[test]
fn visible_rect_takes_min_from_bottom_left_and_max_from_top_right() {
    let rect = ScreenRect::new(0.0, 0.0, 800.0, 600.0);
    let transform = CoordinateTransform::fitted(rect, three_point_bounds());

    let visible = transform.visible_graph_rect(rect);
    assert_relative_eq!(visible.min_x, 0.0);
    assert_relative_eq!(visible.min_y, 0.0);
    assert_relative_eq!(visible.max_x, 20.0);
    assert_relative_eq!(visible.max_y, 5.0);

    // A rect given with negative extents covers the same pixels.
    let flipped = ScreenRect::new(800.0, 600.0, -800.0, -600.0);
    assert_eq!(transform.visible_graph_rect(flipped), visible);
}

#[test]
fn screen_graph_round_trip_is_stable() {
    let rect = ScreenRect::new(96.0, 24.0, 512.0, 384.0);
    let transform = CoordinateTransform::fitted(rect, Bounds::new(-1e3, -2.5, 4e3, 7.5));
    let pixel = ScreenPoint::new(321.5, 200.25);
    let back = transform.to_screen(transform.to_graph(pixel));
    assert_relative_eq!(back.x, pixel.x, epsilon = 1e-9);
    assert_relative_eq!(back.y, pixel.y, epsilon = 1e-9);
}

#[test]
fn graph_screen_graph_round_trip_is_stable() {
    let rect = ScreenRect::new(96.0, 24.0, 512.0, 384.0);
    let bounds = Bounds::new(-1e3, -2.5, 4e3, 7.5);
    let transform = CoordinateTransform::fitted(rect, bounds);
    for point in [
        Point::new(-1e3, -2.5),
        Point::new(1234.5678, 3.3),
        Point::new(4e3, 7.5),
        Point::new(-6e3, 17.5),
    ] {
        let back = transform.to_graph(transform.to_screen(point));
        assert_relative_eq!(back.x, point.x, epsilon = 1e-9 * bounds.width(), max_relative = 1e-9);
        assert_relative_eq!(back.y, point.y, epsilon = 1e-9 * bounds.height(), max_relative = 1e-9);
    }
}

#[test]
fn transform_serializes_with_plain_field_names() {
    let transform = CoordinateTransform {
        dx: 0.0,
        dy: 5.0,
        x_scale: 40.0,
        y_scale: -120.0,
    };
    let json = serde_json::to_string(&transform).expect("serialize");
    assert!(json.contains("\"x_scale\":40.0"));
    let parsed: CoordinateTransform = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed, transform);
}
