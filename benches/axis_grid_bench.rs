use chart_axis::api::{AxisFactory, AxisRequest};
use chart_axis::core::{AxisScale, AxisSettings, DateTimeAxis, Direction, LogAxis, parse_datetime};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_calculated_axis_build_and_grid(c: &mut Criterion) {
    let factory = AxisFactory::new();
    let request = AxisRequest::new(1920.0, -1_234.5, 98_765.4).with_min_space(20.0);

    c.bench_function("calculated_axis_build_and_grid", |b| {
        b.iter(|| {
            let axis = factory.get(black_box(&request)).expect("valid axis");
            let points = axis.grid_points(Some(0.0));
            let minors = axis.grid_subdivisions(4.0, 0.0, 0.0, None);
            black_box((points.len(), minors.len()))
        })
    });
}

fn bench_log_axis_subdivisions(c: &mut Criterion) {
    let settings = AxisSettings::new(1080.0, 1e-3, 1e6).with_min_space(15.0);
    let axis = LogAxis::calculated(&settings, 10.0, None, Direction::Forward).expect("valid axis");

    c.bench_function("log_axis_subdivisions", |b| {
        b.iter(|| {
            let points = axis.grid_points(Some(black_box(0.0)));
            let minors = axis.grid_subdivisions(black_box(3.0), 0.0, 0.0, None);
            black_box((points.len(), minors.len()))
        })
    });
}

fn bench_datetime_axis_year_of_days(c: &mut Criterion) {
    let min = parse_datetime("2024-01-01").expect("date");
    let max = parse_datetime("2024-12-31").expect("date");
    let settings = AxisSettings::new(1920.0, min, max).with_min_space(40.0);

    c.bench_function("datetime_axis_year_of_days", |b| {
        b.iter(|| {
            let axis =
                DateTimeAxis::calculated(black_box(&settings), 2, Direction::Forward).expect("valid axis");
            black_box(axis.grid_points(Some(0.0)).len())
        })
    });
}

criterion_group!(
    benches,
    bench_calculated_axis_build_and_grid,
    bench_log_axis_subdivisions,
    bench_datetime_axis_year_of_days
);
criterion_main!(benches);
