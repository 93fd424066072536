use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use polyfold::{
    polyomino::test_utils::{ShapeConfig, ShapeGenerator},
    ContractionConfig, Contractor, Neighborhood,
};

#[derive(Debug, Default)]
struct AggregateStats {
    improvements: Vec<f64>,
    steps: Vec<usize>,
}

impl AggregateStats {
    fn shapes(&self) -> usize {
        self.steps.len()
    }

    fn average_improvement(&self) -> f64 {
        if self.shapes() == 0 {
            return 0.0;
        }
        self.improvements.iter().sum::<f64>() / self.shapes() as f64
    }

    fn average_steps(&self) -> f64 {
        if self.shapes() == 0 {
            return 0.0;
        }
        self.steps.iter().sum::<usize>() as f64 / self.shapes() as f64
    }
}

fn benchmark_contraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Contraction");

    let line: Array2<u8> = Array2::ones((27, 1));
    group.bench_function("Line of 27", |b| {
        let contractor = Contractor::default();
        b.iter(|| criterion::black_box(contractor.contract_grid(line.view()).unwrap()));
    });

    let neighborhoods = [
        (Neighborhood::Moore, "Moore"),
        (Neighborhood::VonNeumann, "Von Neumann"),
    ];

    for tiles in [8, 16, 24] {
        for (neighborhood, name) in neighborhoods {
            let contractor = Contractor::new(ContractionConfig {
                neighborhood,
                ..ContractionConfig::default()
            });
            let mut generator = ShapeGenerator::with_seed(ShapeConfig { tiles }, 42);

            group.bench_function(format!("{} {} tiles", name, tiles), |b| {
                b.iter_with_setup(
                    || generator.generate(),
                    |grid| criterion::black_box(contractor.contract_grid(grid.view()).unwrap()),
                );
            });

            // Effectiveness stats (50 shapes)
            let mut aggregate = AggregateStats::default();
            for grid in generator.generate_batch(50) {
                let contraction = contractor.contract_grid(grid.view()).unwrap();
                aggregate.improvements.push(contraction.improvement());
                aggregate.steps.push(contraction.steps);
            }

            println!("\n{} with {} tiles:", name, tiles);
            println!(
                "Average mean distance reduction: {:.1}%",
                aggregate.average_improvement()
            );
            println!("Average folds per shape: {:.1}", aggregate.average_steps());
            println!("Shapes contracted: {}", aggregate.shapes());
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_contraction);
criterion_main!(benches);
