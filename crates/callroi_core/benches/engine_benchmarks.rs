//! Criterion benchmarks for callroi_core
//!
//! Run with: cargo bench -p callroi_core

use std::collections::BTreeMap;

use callroi_core::analysis::tornado;
use callroi_core::calculate;
use callroi_core::config::calculator_template;
use callroi_core::formula::{Value, evaluate, resolve};
use callroi_core::model::{DealInputs, VerticalTemplate};
use callroi_core::projection::project_years;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn vertical_inputs(vertical: VerticalTemplate) -> DealInputs {
    vertical
        .inputs()
        .unwrap_or_else(|e| panic!("{} preset should validate: {e}", vertical.id()))
}

fn bench_projection(c: &mut Criterion) {
    let inputs = vertical_inputs(VerticalTemplate::Utilities);

    c.bench_function("project_years_utilities", |b| {
        b.iter(|| project_years(black_box(&inputs)))
    });
}

fn bench_tornado(c: &mut Criterion) {
    let inputs = vertical_inputs(VerticalTemplate::Utilities);

    c.bench_function("tornado_utilities", |b| b.iter(|| tornado(black_box(&inputs))));
}

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");

    for vertical in VerticalTemplate::ALL {
        let inputs = vertical_inputs(vertical);
        group.bench_with_input(
            BenchmarkId::new("vertical", vertical.id()),
            &inputs,
            |b, inputs| b.iter(|| calculate(black_box(inputs))),
        );
    }

    group.finish();
}

fn bench_formula(c: &mut Criterion) {
    let mut group = c.benchmark_group("formula");

    let vars = BTreeMap::from([
        ("rate".to_string(), Value::Number(0.08)),
        ("flows".to_string(), Value::List(vec![-1000.0, 300.0, 400.0, 500.0])),
    ]);
    group.bench_function("evaluate_npv", |b| {
        b.iter(|| evaluate(black_box("round(npv(rate, flows), 2)"), black_box(&vars)))
    });

    let calc = calculator_template("saas-roi").unwrap_or_else(|e| panic!("{e}"));
    let inputs: BTreeMap<String, Value> = calc
        .inputs
        .iter()
        .filter_map(|i| i.default.map(|d| (i.id.clone(), Value::Number(d))))
        .collect();
    group.bench_function("resolve_saas_roi", |b| {
        b.iter(|| resolve(black_box(&calc.formulas), black_box(&inputs)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_projection,
    bench_tornado,
    bench_calculate,
    bench_formula,
);
criterion_main!(benches);
