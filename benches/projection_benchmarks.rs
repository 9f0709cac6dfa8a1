//! Performance benchmarks for the Compensation Projection Engine.
//!
//! Covers the pure projection on its own and the full HTTP round trip:
//! - Starter inputs through `build_compensation_summary`
//! - A heavy profile (many grants, plans and raises)
//! - `POST /project` through the router
//! - Scaling with the number of RSU grants
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use compensation_engine::api::{create_router, AppState, ProjectionRequest};
use compensation_engine::calculation::{
    build_compensation_summary, project_compensation, ProjectionContext,
};
use compensation_engine::config::SettingsLoader;
use compensation_engine::models::{
    CompensationInputs, CurrencyCode, EsppPlan, ExchangeRateTable, MonetaryField, Raise, RsuGrant,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const REFERENCE_YEAR: i32 = 2026;

/// Creates a test state with loaded settings.
fn create_test_state() -> AppState {
    let settings = SettingsLoader::load("./config/settings.yaml").expect("Failed to load settings");
    AppState::new(settings)
}

fn starter_inputs() -> CompensationInputs {
    CompensationInputs::starter(NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 1).unwrap())
}

/// Creates inputs with the given number of grants, plus ESPP windows and raises.
fn create_inputs_with_grants(grant_count: usize) -> CompensationInputs {
    let currencies = [CurrencyCode::Usd, CurrencyCode::Eur, CurrencyCode::Ils, CurrencyCode::Gbp];
    let mut inputs = starter_inputs();

    inputs.rsu_grants = (0..grant_count)
        .map(|i| RsuGrant {
            name: format!("Grant {}", i + 1),
            start_date: format!("{}-{:02}-01", REFERENCE_YEAR - 2 + (i % 6) as i32, i % 12 + 1),
            vesting_years: 4,
            total_value: MonetaryField::new(
                10_000.0 * (i + 1) as f64,
                currencies[i % currencies.len()],
            ),
        })
        .collect();

    inputs.espp_plans = (0..4)
        .map(|i| EsppPlan {
            name: format!("Window {}", i + 1),
            start_date: format!(
                "{}-{:02}-01",
                REFERENCE_YEAR + i / 2,
                if i % 2 == 0 { 3 } else { 9 }
            ),
            duration_months: 6,
            contribution_percentage: 10.0,
            growth_percentage: 15.0,
            purchase_currency: CurrencyCode::Usd,
            override_rate: None,
        })
        .collect();

    inputs.raises = (1..6)
        .map(|year_offset| Raise {
            year_offset,
            percentage: 3.0,
        })
        .collect();

    inputs
}

/// Benchmark: Pure projection of the starter inputs.
fn bench_starter_summary(c: &mut Criterion) {
    let inputs = starter_inputs();
    let rates = ExchangeRateTable::default_rates();

    c.bench_function("starter_summary", |b| {
        b.iter(|| {
            black_box(build_compensation_summary(
                black_box(&inputs),
                CurrencyCode::Usd,
                &rates,
                REFERENCE_YEAR,
            ))
        })
    });
}

/// Benchmark: Projection with audit trail for a heavy profile.
fn bench_heavy_profile(c: &mut Criterion) {
    let inputs = create_inputs_with_grants(20);
    let rates = ExchangeRateTable::default_rates();
    let ctx = ProjectionContext::new(CurrencyCode::Eur, &rates, REFERENCE_YEAR);

    c.bench_function("heavy_profile", |b| {
        b.iter(|| black_box(project_compensation(black_box(&inputs), &ctx)))
    });
}

/// Benchmark: Full HTTP round trip.
fn bench_http_round_trip(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let mut request = ProjectionRequest::new(create_inputs_with_grants(4));
    request.reference_year = Some(REFERENCE_YEAR);
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("http_round_trip", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/project")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Various grant counts to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let rates = ExchangeRateTable::default_rates();
    let mut group = c.benchmark_group("scaling");

    for grant_count in [1, 5, 20, 100].iter() {
        let inputs = create_inputs_with_grants(*grant_count);

        group.throughput(Throughput::Elements(*grant_count as u64));
        group.bench_with_input(
            BenchmarkId::new("grants", grant_count),
            grant_count,
            |b, _| {
                b.iter(|| {
                    black_box(build_compensation_summary(
                        &inputs,
                        CurrencyCode::Usd,
                        &rates,
                        REFERENCE_YEAR,
                    ))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_starter_summary,
    bench_heavy_profile,
    bench_http_round_trip,
    bench_scaling,
);
criterion_main!(benches);
