use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use genswarm::{
    genome::Genome,
    operators::{Crossover, Mutation, Perturb, Splice},
    rng::RandomNumberGenerator,
};

fn genomes(len: usize) -> (Genome, Genome) {
    let mother: Vec<f64> = (0..len).map(|i| i as f64).collect();
    let father: Vec<f64> = (0..len).map(|i| -(i as f64)).collect();
    (Genome::from_values(&mother), Genome::from_values(&father))
}

fn bench_splice(c: &mut Criterion) {
    let mut group = c.benchmark_group("splice");
    let mut rng = RandomNumberGenerator::from_seed(1);

    for len in [16, 256, 4096].iter() {
        let (mother, father) = genomes(*len);
        let splice = Splice::new(len / 3);

        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            b.iter(|| {
                splice
                    .crossover(black_box(&mother), black_box(&father), &mut rng)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_perturb(c: &mut Criterion) {
    let mut group = c.benchmark_group("perturb");
    let mut rng = RandomNumberGenerator::from_seed(2);
    let perturb = Perturb::new(0.1).unwrap();

    for len in [16, 256, 4096].iter() {
        let (genome, _) = genomes(*len);

        // Includes the copy-on-write clone a shared genome pays on its first write.
        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            b.iter(|| {
                let mut child = genome.clone();
                perturb.mutate(&mut child, &mut rng);
                black_box(child)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_splice, bench_perturb);
criterion_main!(benches);
