use chart_motion::axis::{Axis, LinearAxis, OrdinalAxis};
use chart_motion::core::{
    bar_rectangle, BarGroupSlot, BarGrouping, Datum, Series, StackAccumulator, DEFAULT_STACK_KEY,
};
use chart_motion::render::{BarRenderer, BarRendererConfig, Color, NullSink, Rect};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_bar_rectangle_10k(c: &mut Criterion) {
    let domain_axis = OrdinalAxis::new(10_000, 0.0, 100_000.0).expect("valid domain axis");
    let measure_axis = LinearAxis::new(0.0, 2_500.0, 1080.0, 0.0).expect("valid measure axis");
    let band = domain_axis.range_band_width();

    c.bench_function("bar_rectangle_10k", |b| {
        b.iter(|| {
            for i in 0..10_000usize {
                let measure = 100.0 + (i % 50) as f64;
                let _ = bar_rectangle(
                    black_box(i as f64),
                    black_box(band),
                    black_box(Some(measure)),
                    black_box(0.0),
                    BarGroupSlot::equal_split(i % 3, 3),
                    &domain_axis,
                    &measure_axis,
                    true,
                    false,
                );
            }
        })
    });
}

fn bench_stack_accumulation_10k(c: &mut Criterion) {
    c.bench_function("stack_accumulation_10k", |b| {
        b.iter(|| {
            let mut accumulator = StackAccumulator::new();
            for i in 0..10_000usize {
                let domain = (i / 4) as f64;
                let measure = if i % 7 == 0 { -25.0 } else { 40.0 };
                let _ = accumulator.accumulate(
                    black_box(domain),
                    black_box(DEFAULT_STACK_KEY),
                    black_box(Some(measure)),
                    black_box(0.0),
                );
            }
        })
    });
}

fn bench_stacked_render_cycle_2k(c: &mut Criterion) {
    let series_list: Vec<Series> = (0..4)
        .map(|series_index| {
            let data = (0..500)
                .map(|i| {
                    let measure = 10.0 + ((series_index * 500 + i) % 90) as f64;
                    Datum::new(i as f64, Some(measure), Color::rgb(0.2, 0.5, 0.8))
                })
                .collect();
            Series::new(format!("series-{series_index}"), data)
        })
        .collect();

    let domain_axis = OrdinalAxis::new(500, 0.0, 5_000.0).expect("valid domain axis");
    let measure_axis = LinearAxis::new(0.0, 500.0, 1080.0, 0.0).expect("valid measure axis");

    let config = BarRendererConfig {
        grouping: BarGrouping::Stacked,
        ..BarRendererConfig::default()
    };

    c.bench_function("stacked_render_cycle_2k", |b| {
        b.iter(|| {
            let mut renderer = BarRenderer::new(config.clone()).expect("renderer init");
            renderer.set_draw_bounds(Rect::new(0.0, 0.0, 5_000.0, 1080.0));
            renderer
                .preprocess(black_box(&series_list))
                .expect("preprocess should succeed");
            renderer
                .update(&series_list, &domain_axis, &measure_axis)
                .expect("update should succeed");
            let mut sink = NullSink::default();
            renderer
                .paint(&mut sink, black_box(1.0))
                .expect("paint should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_bar_rectangle_10k,
    bench_stack_accumulation_10k,
    bench_stacked_render_cycle_2k
);
criterion_main!(benches);
