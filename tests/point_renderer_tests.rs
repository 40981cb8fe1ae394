use approx::assert_relative_eq;
use chart_motion::axis::LinearAxis;
use chart_motion::core::{Datum, Series};
use chart_motion::render::{
    CollectingSink, Color, NullSink, Point, PointRenderer, PointRendererConfig, Rect,
};

fn domain_axis() -> LinearAxis {
    LinearAxis::new(0.0, 10.0, 0.0, 500.0).expect("domain axis")
}

fn measure_axis() -> LinearAxis {
    LinearAxis::new(0.0, 100.0, 400.0, 0.0).expect("measure axis")
}

fn marker(domain: f64, measure: f64) -> Datum {
    Datum::new(domain, Some(measure), Color::rgb(0.9, 0.3, 0.1))
}

fn renderer_with(list: &[Series]) -> PointRenderer {
    let mut renderer = PointRenderer::new(PointRendererConfig::default()).expect("renderer");
    renderer.set_draw_bounds(Rect::new(0.0, 0.0, 500.0, 400.0));
    renderer.preprocess(list).expect("preprocess");
    renderer
        .update(list, &domain_axis(), &measure_axis())
        .expect("update");
    renderer
}

#[test]
fn markers_project_through_both_axes() {
    let list = vec![Series::new(
        "points",
        vec![marker(2.0, 30.0), marker(5.0, 60.0), marker(8.0, 90.0)],
    )];
    let mut renderer = renderer_with(&list);

    let mut sink = CollectingSink::default();
    renderer.paint(&mut sink, 1.0).expect("paint");

    assert_eq!(sink.points.len(), 3);
    assert_relative_eq!(sink.points[0].center.x, 100.0, epsilon = 1e-9);
    assert_relative_eq!(sink.points[0].center.y, 280.0, epsilon = 1e-9);
    assert_relative_eq!(sink.points[2].center.x, 400.0, epsilon = 1e-9);
    assert_relative_eq!(sink.points[2].center.y, 40.0, epsilon = 1e-9);
}

#[test]
fn range_markers_paint_a_bounds_line() {
    let list = vec![Series::new(
        "points",
        vec![marker(2.0, 30.0).with_measure_bounds(20.0, 40.0)],
    )];
    let mut renderer = renderer_with(&list);

    let mut sink = CollectingSink::default();
    renderer.paint(&mut sink, 1.0).expect("paint");

    assert_eq!(sink.points.len(), 1);
    assert_eq!(sink.lines.len(), 1);
    let line = &sink.lines[0];
    assert!((line.from.x - 100.0).abs() <= 1e-9);
    assert!((line.from.y - 320.0).abs() <= 1e-9);
    assert!((line.to.y - 240.0).abs() <= 1e-9);
}

#[test]
fn gained_bounds_lines_grow_out_of_the_marker() {
    let plain = vec![Series::new("points", vec![marker(2.0, 30.0)])];
    let mut renderer = renderer_with(&plain);
    let mut sink = CollectingSink::default();
    renderer.paint(&mut sink, 1.0).expect("settle without bounds");
    assert!(sink.lines.is_empty());

    let ranged = vec![Series::new(
        "points",
        vec![marker(2.0, 30.0).with_measure_bounds(20.0, 40.0)],
    )];
    renderer.preprocess(&ranged).expect("preprocess");
    renderer
        .update(&ranged, &domain_axis(), &measure_axis())
        .expect("update");

    // At the start of the transition the line is still collapsed onto the
    // marker center rather than appearing at full extent.
    sink.clear();
    renderer.paint(&mut sink, 0.0).expect("paint at start");
    let line = &sink.lines[0];
    assert_relative_eq!(line.from.y, 280.0, epsilon = 1e-9);
    assert_relative_eq!(line.to.y, 280.0, epsilon = 1e-9);

    sink.clear();
    renderer.paint(&mut sink, 0.5).expect("paint midway");
    let line = &sink.lines[0];
    assert_relative_eq!(line.from.y, 300.0, epsilon = 1e-9);
    assert_relative_eq!(line.to.y, 260.0, epsilon = 1e-9);
}

#[test]
fn markers_without_bounds_omit_the_line() {
    let list = vec![Series::new("points", vec![marker(2.0, 30.0)])];
    let mut renderer = renderer_with(&list);

    let mut sink = CollectingSink::default();
    renderer.paint(&mut sink, 1.0).expect("paint");
    assert!(sink.lines.is_empty());
}

#[test]
fn unknown_symbol_id_fails_preprocessing() {
    let list = vec![Series::new(
        "points",
        vec![marker(2.0, 30.0).with_symbol_id("sparkle")],
    )];
    let mut renderer = PointRenderer::new(PointRendererConfig::default()).expect("renderer");

    let err = renderer
        .preprocess(&list)
        .expect_err("unregistered symbol id must fail");
    assert!(format!("{err}").contains("unknown symbol renderer id `sparkle`"));
}

#[test]
fn line_symbol_markers_draw_as_lines() {
    let list = vec![Series::new(
        "points",
        vec![marker(2.0, 30.0).with_symbol_id("line")],
    )];
    let mut renderer = renderer_with(&list);

    let mut sink = CollectingSink::default();
    renderer.paint(&mut sink, 1.0).expect("paint");
    assert!(sink.points.is_empty());
    assert_eq!(sink.lines.len(), 1);
}

#[test]
fn entering_markers_rise_from_the_baseline() {
    let list = vec![Series::new("points", vec![marker(5.0, 80.0)])];
    let mut renderer = renderer_with(&list);

    let mut sink = CollectingSink::default();
    renderer.paint(&mut sink, 0.0).expect("paint at start");
    assert!((sink.points[0].center.y - 400.0).abs() <= 1e-9);
    assert!((sink.points[0].radius_px - 0.0).abs() <= 1e-9);

    sink.clear();
    renderer.paint(&mut sink, 1.0).expect("paint at rest");
    assert!((sink.points[0].center.y - 80.0).abs() <= 1e-9);
    assert!((sink.points[0].radius_px - 3.5).abs() <= 1e-9);
}

#[test]
fn removed_markers_animate_out_then_sweep() {
    let full = vec![Series::new("points", vec![marker(5.0, 80.0)])];
    let mut renderer = renderer_with(&full);
    let mut sink = NullSink::default();
    renderer.paint(&mut sink, 1.0).expect("settle");

    let empty = vec![Series::new("points", Vec::new())];
    renderer.preprocess(&empty).expect("preprocess empty");
    renderer
        .update(&empty, &domain_axis(), &measure_axis())
        .expect("update empty");

    sink.reset();
    renderer.paint(&mut sink, 0.5).expect("mid-exit paint");
    assert_eq!(sink.last_point_count, 1);

    sink.reset();
    renderer.paint(&mut sink, 1.0).expect("settled paint");
    assert_eq!(sink.last_point_count, 0);
}

#[test]
fn hit_testing_reports_inside_point_within_the_radius() {
    let list = vec![Series::new("points", vec![marker(2.0, 30.0), marker(5.0, 60.0)])];
    let mut renderer = renderer_with(&list);
    let mut sink = NullSink::default();
    renderer.paint(&mut sink, 1.0).expect("settle");

    let details = renderer.nearest_datum_detail(Point::new(101.0, 281.0));
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].datum_index, 0);
    assert!(details[0].inside_point);
    assert!(details[0].distance <= 2.0);
    assert!(!details[1].inside_point);
}

#[test]
fn bounds_line_distance_counts_towards_inside_point() {
    let list = vec![Series::new(
        "points",
        vec![marker(2.0, 30.0).with_measure_bounds(0.0, 60.0)],
    )];
    let mut renderer = renderer_with(&list);
    let mut sink = NullSink::default();
    renderer.paint(&mut sink, 1.0).expect("settle");

    // Far from the marker center (y 280) but within the bounds-line radius
    // of the segment spanning y 160..400 at x 100.
    let details = renderer.nearest_datum_detail(Point::new(102.0, 380.0));
    assert_eq!(details.len(), 1);
    let detail = &details[0];
    assert!(detail.distance > detail.relative_distance);
    assert!((detail.bounds_distance.expect("bounds distance") - 2.0).abs() <= 1e-9);
    assert!(detail.inside_point);
}

#[test]
fn markers_outside_the_draw_area_are_rejected_cheaply() {
    let list = vec![Series::new(
        "points",
        vec![marker(-1.0, 30.0), marker(5.0, 60.0)],
    )];
    let mut renderer = renderer_with(&list);
    let mut sink = NullSink::default();
    renderer.paint(&mut sink, 1.0).expect("settle");

    // domain -1 maps to x = -50, left of the draw area.
    let details = renderer.nearest_datum_detail(Point::new(0.0, 300.0));
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].datum_index, 1);
}

#[test]
fn overlay_point_series_never_match_hits() {
    let list = vec![
        Series::new("points", vec![marker(5.0, 60.0)]),
        Series::new("halo", vec![marker(5.0, 60.0)]).as_overlay(),
    ];
    let mut renderer = renderer_with(&list);
    let mut sink = NullSink::default();
    renderer.paint(&mut sink, 1.0).expect("settle");

    let details = renderer.nearest_datum_detail(Point::new(250.0, 160.0));
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].series_index, 0);
}
