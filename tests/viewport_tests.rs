use approx::assert_relative_eq;
use graph_view::ChartError;
use graph_view::core::{DataBounds, Viewport, ViewportController};

#[test]
fn centered_zoom_halves_size_around_center() {
    let bounds = Some(DataBounds::new(0.0, 10.0));
    let mut controller = ViewportController::new(true, true);
    controller.set_viewport(0.0, 10.0, bounds).expect("viewport");

    assert!(controller.zoom(2.0, None, bounds).expect("zoom"));
    let viewport = controller.viewport();
    assert_relative_eq!(viewport.start, 2.5);
    assert_relative_eq!(viewport.size, 5.0);
    assert!(viewport.start >= 0.0);
    assert!(viewport.end() <= 10.0);
}

#[test]
fn negative_size_is_rejected_and_state_kept() {
    let bounds = Some(DataBounds::new(0.0, 10.0));
    let mut controller = ViewportController::new(true, false);
    controller.set_viewport(1.0, 2.0, bounds).expect("viewport");

    let err = controller
        .set_viewport(0.0, -1.0, bounds)
        .expect_err("negative size");
    assert!(matches!(err, ChartError::InvalidArgument(_)));
    assert_eq!(controller.viewport(), Viewport { start: 1.0, size: 2.0 });
}

#[test]
fn explicit_zero_size_returns_to_unconstrained() {
    let bounds = Some(DataBounds::new(0.0, 10.0));
    let mut controller = ViewportController::new(true, false);
    controller.set_viewport(1.0, 2.0, bounds).expect("viewport");
    controller.set_viewport(4.0, 0.0, bounds).expect("viewport");

    assert_eq!(controller.viewport(), Viewport::unconstrained());
    assert_eq!(controller.visible_x_range(bounds), Some((0.0, 10.0)));
}

#[test]
fn oversized_viewport_is_clamped_to_full_span() {
    let bounds = Some(DataBounds::new(2.0, 6.0));
    let mut controller = ViewportController::new(true, false);
    controller.set_viewport(-5.0, 100.0, bounds).expect("viewport");
    assert_eq!(controller.viewport(), Viewport { start: 2.0, size: 4.0 });
}

#[test]
fn zoom_is_noop_when_scaling_disabled() {
    let bounds = Some(DataBounds::new(0.0, 10.0));
    let mut controller = ViewportController::new(true, false);
    controller.set_viewport(0.0, 10.0, bounds).expect("viewport");
    assert!(!controller.zoom(2.0, None, bounds).expect("no-op"));
    assert_eq!(controller.viewport(), Viewport { start: 0.0, size: 10.0 });
}

#[test]
fn scroll_to_end_aligns_window_with_last_x() {
    let bounds = Some(DataBounds::new(0.0, 50.0));
    let mut controller = ViewportController::new(true, false);
    controller.set_viewport(0.0, 10.0, bounds).expect("viewport");
    controller.scroll_to_end(bounds).expect("scroll");
    assert_eq!(controller.viewport(), Viewport { start: 40.0, size: 10.0 });
}

#[test]
fn global_bounds_union_per_series_extents() {
    let bounds =
        DataBounds::from_extents([(3.0, 9.0), (-1.0, 4.0), (5.0, 12.0)]).expect("bounds");
    assert_eq!(bounds, DataBounds::new(-1.0, 12.0));
    assert_eq!(DataBounds::from_extents(std::iter::empty()), None);
}
