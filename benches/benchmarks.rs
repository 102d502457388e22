use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wallet_fx::carbon::estimate_footprint;
use wallet_fx::currency::Currency;
use wallet_fx::fx::{convert, convert_input, DerivedRates, MissingRatePolicy, RateTable};
use wallet_fx::seed;
use wallet_fx::view::dashboard;

fn benchmark_convert(c: &mut Criterion) {
    let table = RateTable::default_rates();

    c.bench_function("convert_direct", |b| {
        b.iter(|| {
            convert(
                black_box(100.0),
                Currency::USD,
                Currency::EUR,
                &table,
                MissingRatePolicy::Identity,
            )
        })
    });

    c.bench_function("convert_input_text", |b| {
        b.iter(|| {
            convert_input(
                black_box("1234.56"),
                Currency::AUD,
                Currency::USD,
                &table,
                MissingRatePolicy::Identity,
            )
        })
    });
}

fn benchmark_derived_rates(c: &mut Criterion) {
    let table = RateTable::new()
        .with_rate(Currency::USD, Currency::AUD, 1.52)
        .and_then(|t| t.with_rate(Currency::EUR, Currency::AUD, 1.66))
        .unwrap();
    let rates = DerivedRates::with_pivot(&table, Currency::AUD);

    c.bench_function("convert_cross_rate", |b| {
        b.iter(|| {
            convert(
                black_box(100.0),
                Currency::USD,
                Currency::EUR,
                &rates,
                MissingRatePolicy::Strict,
            )
        })
    });
}

fn benchmark_carbon(c: &mut Criterion) {
    c.bench_function("estimate_footprint_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let _ = estimate_footprint(black_box(i as f64 * 1.5));
            }
        })
    });
}

fn benchmark_dashboard(c: &mut Criterion) {
    let table = RateTable::default_rates();
    let wallet = seed::wallet();
    let history = seed::transactions();

    c.bench_function("dashboard_render", |b| {
        b.iter(|| {
            dashboard(
                black_box(&wallet),
                &history,
                Currency::USD,
                &table,
                MissingRatePolicy::Identity,
            )
        })
    });
}

criterion_group!(
    benches,
    benchmark_convert,
    benchmark_derived_rates,
    benchmark_carbon,
    benchmark_dashboard
);
criterion_main!(benches);
