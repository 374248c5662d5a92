mod common;

use common::Line;
use genswarm::{
    error::GeneticError,
    genome::{Gene, Genome},
    model::Model,
    operators::{Crossover, Mutation, Perturb, Splice},
    phenotype,
    rng::RandomNumberGenerator,
};

fn distinct_parents(len: usize) -> (Genome, Genome) {
    let mother: Vec<f64> = (0..len).map(|i| i as f64).collect();
    let father: Vec<f64> = (0..len).map(|i| -(i as f64) - 100.0).collect();
    (Genome::from_values(&mother), Genome::from_values(&father))
}

#[test]
fn test_splice_children_partition_the_parents() {
    let len = 10;
    let (mother, father) = distinct_parents(len);

    for cut in 1..len {
        for seed in 0..20 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let (a, b) = Splice::new(cut).crossover(&mother, &father, &mut rng).unwrap();

            let mut window = Vec::new();
            for i in 0..len {
                let (m, f) = (mother.values()[i], father.values()[i]);
                let (x, y) = (a.values()[i], b.values()[i]);
                if x == m {
                    assert_eq!(y, f, "gene {} kept by one child but not the other", i);
                } else {
                    assert_eq!((x, y), (f, m), "gene {} is not a swap", i);
                    window.push(i);
                }
            }

            // The swapped genes form one window of cut + 1 genes, clipped at the end.
            let first = window[0];
            let last = *window.last().unwrap();
            assert_eq!(last - first + 1, window.len());
            assert!(first <= len - cut);
            assert_eq!(window.len(), (cut + 1).min(len - first));
        }
    }
}

#[test]
fn test_splice_single_gene_swap() {
    let mut rng = RandomNumberGenerator::from_seed(99);
    let (a, b) = Splice::new(1)
        .crossover(&Genome::from_values(&[1.0]), &Genome::from_values(&[2.0]), &mut rng)
        .unwrap();

    assert_eq!(a.values(), vec![2.0]);
    assert_eq!(b.values(), vec![1.0]);
}

#[test]
fn test_splice_leaves_parents_untouched() {
    let (mother, father) = distinct_parents(6);
    let (mother_before, father_before) = (mother.clone(), father.clone());
    let mut rng = RandomNumberGenerator::from_seed(5);

    let _ = Splice::new(2).crossover(&mother, &father, &mut rng).unwrap();

    assert_eq!(mother, mother_before);
    assert_eq!(father, father_before);
}

#[test]
fn test_splice_refuses_mixed_gene_kinds() {
    let mut rng = RandomNumberGenerator::from_seed(5);
    let mother = Genome::new(vec![Gene::Integer(1), Gene::Integer(2)]);
    let father = Genome::new(vec![Gene::Scalar(1.0), Gene::Scalar(2.0)]);

    let result = Splice::new(2).crossover(&mother, &father, &mut rng);
    assert!(matches!(result, Err(GeneticError::GeneKindMismatch { .. })));
}

#[test]
fn test_perturb_bound_on_encoded_model() {
    let line = Line::new(0.75, -4.0);
    let original = phenotype::encode(&line);
    let perturb = Perturb::new(0.1).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(17);

    for _ in 0..200 {
        let mut genome = original.clone();
        perturb.mutate(&mut genome, &mut rng);
        for (before, after) in original.values().iter().zip(genome.values()) {
            assert!(after >= before - 0.1 - 1e-12 && after <= before + 0.1 + 1e-12);
        }
    }
}

#[test]
fn test_encode_decode_round_trip() {
    let source = Line::new(1.5, -0.25);
    let genome = phenotype::encode(&source);
    assert_eq!(genome.values(), source.parameters().to_vec());

    let mut target = Line::new(0.0, 0.0);
    phenotype::decode(&genome, &mut target).unwrap();
    assert_eq!(target.weights, source.weights);
    assert_eq!(target.refreshed, 1);

    // Decoding the same genome again changes nothing but the refresh count.
    phenotype::decode(&genome, &mut target).unwrap();
    assert_eq!(target.weights, source.weights);
    assert_eq!(target.refreshed, 2);
}

#[test]
fn test_decode_length_mismatch() {
    let mut target = Line::new(0.0, 0.0);
    let result = phenotype::decode(&Genome::from_values(&[1.0, 2.0, 3.0]), &mut target);

    assert!(matches!(
        result,
        Err(GeneticError::LengthMismatch {
            expected: 2,
            actual: 3
        })
    ));
    assert_eq!(target.weights, vec![0.0, 0.0]);
}
