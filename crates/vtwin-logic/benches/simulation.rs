use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use vtwin_logic::drug::Drug;
use vtwin_logic::patient::Patient;
use vtwin_logic::ranking::rank_treatments;
use vtwin_logic::simulation::run_simulation;

fn drugs() -> Vec<Drug> {
    vec![
        Drug::named("Remdesivir"),
        Drug {
            name: "Molnupiravir".to_string(),
            efficacy: 0.7,
            half_life: 6.0,
            toxicity: 0.2,
            dose: 2.0,
        },
        Drug::named("Experimental Drug A"),
    ]
}

fn bench_simulation(c: &mut Criterion) {
    let patient = Patient::default();
    let drugs = drugs();

    c.bench_function("run_simulation_60_days_3_drugs", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| {
            run_simulation(
                black_box(&patient),
                "COVID-19",
                black_box(&drugs),
                black_box(60),
                &mut rng,
            )
        })
    });

    c.bench_function("rank_treatments_60_days_3_drugs", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| rank_treatments(black_box(60), black_box(&drugs), &patient, &mut rng))
    });
}

criterion_group!(benches, bench_simulation);
criterion_main!(benches);
