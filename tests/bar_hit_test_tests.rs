use chart_motion::axis::{LinearAxis, OrdinalAxis};
use chart_motion::core::{Datum, Series};
use chart_motion::render::{BarRenderer, BarRendererConfig, Color, Point, Rect};

fn measure_axis() -> LinearAxis {
    LinearAxis::new(0.0, 100.0, 400.0, 0.0).expect("measure axis")
}

fn series(id: &str, measures: &[f64]) -> Series {
    let data = measures
        .iter()
        .enumerate()
        .map(|(index, &measure)| {
            Datum::new(index as f64, Some(measure), Color::rgb(0.5, 0.5, 0.5))
        })
        .collect();
    Series::new(id, data)
}

fn grouped_two_series() -> (BarRenderer, OrdinalAxis) {
    let domain_axis = OrdinalAxis::new(3, 0.0, 300.0).expect("domain axis");
    let list = vec![series("a", &[50.0, 30.0, 70.0]), series("b", &[20.0, 60.0, 40.0])];

    let mut renderer = BarRenderer::new(BarRendererConfig::default()).expect("renderer");
    renderer.set_draw_bounds(Rect::new(0.0, 0.0, 300.0, 400.0));
    renderer.preprocess(&list).expect("preprocess");
    renderer
        .update(&list, &domain_axis, &measure_axis())
        .expect("update");
    (renderer, domain_axis)
}

#[test]
fn ordinal_hit_resolves_the_category_under_the_cursor() {
    let (renderer, domain_axis) = grouped_two_series();

    // x=25 falls in band 0, inside series a's bar span (0..49); y=300 is
    // inside its measure span (200..400).
    let details = renderer.nearest_datum_detail(Point::new(25.0, 300.0), &domain_axis);

    assert_eq!(details.len(), 2);
    assert_eq!(details[0].series_index, 0);
    assert_eq!(details[0].datum_index, 0);
    assert!((details[0].domain_distance - 0.0).abs() <= 1e-9);
    assert!((details[0].measure_distance - 0.0).abs() <= 1e-9);
    assert!((details[0].relative_distance - 0.0).abs() <= 1e-9);
    assert!(details[1].domain_distance > 0.0);
}

#[test]
fn gap_distances_measure_to_the_nearest_bar_edge() {
    let (renderer, domain_axis) = grouped_two_series();

    // Band 0, x=50: 1 px right of series a's bar (0..49), 1 px left of
    // series b's bar (51..100).
    let details = renderer.nearest_datum_detail(Point::new(50.0, 300.0), &domain_axis);
    assert_eq!(details.len(), 2);
    for detail in &details {
        assert!((detail.domain_distance - 1.0).abs() <= 1e-9);
    }
}

#[test]
fn hit_outside_draw_bounds_returns_nothing() {
    let (renderer, domain_axis) = grouped_two_series();
    let details = renderer.nearest_datum_detail(Point::new(-10.0, 300.0), &domain_axis);
    assert!(details.is_empty());
}

#[test]
fn overlay_series_are_excluded_from_hit_testing() {
    let domain_axis = OrdinalAxis::new(3, 0.0, 300.0).expect("domain axis");
    let list = vec![
        series("a", &[50.0, 30.0, 70.0]),
        series("b", &[20.0, 60.0, 40.0]).as_overlay(),
    ];

    let mut renderer = BarRenderer::new(BarRendererConfig::default()).expect("renderer");
    renderer.set_draw_bounds(Rect::new(0.0, 0.0, 300.0, 400.0));
    renderer.preprocess(&list).expect("preprocess");
    renderer
        .update(&list, &domain_axis, &measure_axis())
        .expect("update");

    let details = renderer.nearest_datum_detail(Point::new(25.0, 300.0), &domain_axis);
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].series_index, 0);
}

#[test]
fn exiting_bars_do_not_match_hit_queries() {
    let domain_axis = OrdinalAxis::new(3, 0.0, 300.0).expect("domain axis");
    let full = vec![series("a", &[50.0, 30.0, 70.0])];
    let shorter = vec![series("a", &[50.0, 30.0])];

    let mut renderer = BarRenderer::new(BarRendererConfig::default()).expect("renderer");
    renderer.set_draw_bounds(Rect::new(0.0, 0.0, 300.0, 400.0));
    renderer.preprocess(&full).expect("preprocess");
    renderer
        .update(&full, &domain_axis, &measure_axis())
        .expect("update");

    renderer.preprocess(&shorter).expect("preprocess shorter");
    renderer
        .update(&shorter, &domain_axis, &measure_axis())
        .expect("update shorter");

    // Band 2 held the removed datum; it is mid-exit, not hit-testable.
    let details = renderer.nearest_datum_detail(Point::new(250.0, 300.0), &domain_axis);
    assert!(details.is_empty());
}

#[test]
fn continuous_domain_hits_filter_to_the_nearest_domain() {
    let domain_axis = LinearAxis::new(0.0, 2.0, 0.0, 300.0)
        .expect("domain axis")
        .with_range_band(40.0);
    let list = vec![series("a", &[50.0, 30.0, 70.0]), series("b", &[20.0, 60.0, 40.0])];

    let mut renderer = BarRenderer::new(BarRendererConfig::default()).expect("renderer");
    renderer.preprocess(&list).expect("preprocess");
    renderer
        .update(&list, &domain_axis, &measure_axis())
        .expect("update");

    // x=160 sits nearest domain 1 (centered at 150).
    let details = renderer.nearest_datum_detail(Point::new(160.0, 300.0), &domain_axis);
    assert!(!details.is_empty());
    for detail in &details {
        assert!((detail.domain - 1.0).abs() <= 1e-9);
    }
}

#[test]
fn results_are_sorted_by_domain_gap_first() {
    let (renderer, domain_axis) = grouped_two_series();
    // x=75 is inside series b's bar span but far from its measure span.
    let details = renderer.nearest_datum_detail(Point::new(75.0, 100.0), &domain_axis);
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].series_index, 1);
    for pair in details.windows(2) {
        assert!(pair[0].domain_distance <= pair[1].domain_distance + 1e-9);
    }
}
