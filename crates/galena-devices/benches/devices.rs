//! Benchmarks for device model evaluation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use galena_devices::bjt::{BjtModel, BjtParams};

fn bench_bjt_sweep(c: &mut Criterion) {
    let params = BjtParams {
        ise: 1e-14,
        ikf: 0.3,
        vaf: 100.0,
        ..BjtParams::default()
    };
    let q = BjtModel::npn(params).unwrap();

    c.bench_function("bjt_dc_sweep_1000_points", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for i in 0..1000 {
                let vbe = 0.4 + 0.4 * (i as f64) / 1000.0;
                total += q.collector_current(black_box(vbe), -5.0, 300.0);
                total += q.base_current(black_box(vbe), -5.0, 300.0);
            }
            total
        });
    });
}

fn bench_bjt_capacitance(c: &mut Criterion) {
    let params = BjtParams {
        cje: 2.5e-11,
        tf: 4e-10,
        ..BjtParams::default()
    };
    let q = BjtModel::npn(params).unwrap();

    c.bench_function("bjt_be_capacitance", |b| {
        b.iter(|| q.base_emitter_capacitance(black_box(0.65), black_box(-5.0), 300.0));
    });
}

criterion_group!(benches, bench_bjt_sweep, bench_bjt_capacitance);
criterion_main!(benches);
