//! Benchmarks for the per-request hot path: encoding and the cached
//! versus uncached explanation modes.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use salient_core::{Encoder, PredictionEngine, SalesRecord};
use salient_model::{AdditiveExplainer, RegressionModel, TrainingSchema};

fn schema(products: usize) -> Arc<TrainingSchema> {
    let mut columns = vec!["mes".to_string()];
    columns.extend((1..=products).map(|i| format!("produto_Produto_{}", i)));
    Arc::new(TrainingSchema::new(columns).unwrap())
}

fn engine(products: usize) -> PredictionEngine {
    let width = products + 1;
    let coefficients: Vec<f64> = (0..width).map(|i| (i as f64) * 0.25 - 1.0).collect();
    let baseline = vec![0.1; width];
    let model = RegressionModel::new(coefficients.clone(), 100.0);
    let explainer = AdditiveExplainer::new(101.0, baseline, coefficients).unwrap();
    PredictionEngine::new(schema(products), Arc::new(model), Arc::new(explainer), 1024)
}

fn bench_encode(c: &mut Criterion) {
    let encoder = Encoder::new(schema(1000));
    let record = SalesRecord {
        product: "Produto_500".to_string(),
        month: 6,
    };
    c.bench_function("encode_1000_columns", |b| {
        b.iter(|| black_box(encoder.encode(black_box(&record))))
    });
}

fn bench_explained_modes(c: &mut Criterion) {
    let engine = engine(1000);
    let record = SalesRecord {
        product: "Produto_500".to_string(),
        month: 6,
    };
    // Warm the cache so the cached bench measures hits only.
    engine.predict_with_shap(&record).unwrap();

    c.bench_function("predict_with_shap_cached", |b| {
        b.iter(|| black_box(engine.predict_with_shap(black_box(&record))).unwrap())
    });
    c.bench_function("predict_with_shap_uncached", |b| {
        b.iter(|| black_box(engine.predict_with_shap_uncached(black_box(&record))).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_explained_modes);
criterion_main!(benches);
