//! Variation and selection operators (§4.5): ordered crossover, swap
//! mutation, and tournament selection with optional fitness sharing.

use crate::genome::{distance, Individual};
use crate::types::{AlgorithmParams, ClassroomSpecialization};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

const SPECIALIZATIONS: [ClassroomSpecialization; 3] = [
    ClassroomSpecialization::Default,
    ClassroomSpecialization::Computers,
    ClassroomSpecialization::Sportsroom,
];

/// Ordered crossover (OX1) between two equal-length permutations: a random
/// slice `[a, b]` is kept in place in each child, and the remaining
/// positions are filled, in the donor's relative order, with the genes the
/// slice doesn't already contain.
pub fn ordered_crossover(ind1: &mut [u32], ind2: &mut [u32], rng: &mut impl Rng) {
    let size = ind1.len().min(ind2.len());
    if size < 2 {
        return;
    }
    let i = rng.random_range(0..size);
    let mut j = rng.random_range(0..size - 1);
    if j >= i {
        j += 1;
    }
    let (a, b) = if i < j { (i, j) } else { (j, i) };

    let mut holes1 = vec![true; size];
    let mut holes2 = vec![true; size];
    for k in 0..size {
        if k < a || k > b {
            holes1[ind2[k] as usize] = false;
            holes2[ind1[k] as usize] = false;
        }
    }

    let temp1 = ind1.to_vec();
    let temp2 = ind2.to_vec();
    let mut k1 = b + 1;
    let mut k2 = b + 1;
    for n in 0..size {
        let v1 = temp1[(n + b + 1) % size];
        if !holes1[v1 as usize] {
            ind1[k1 % size] = v1;
            k1 += 1;
        }
        let v2 = temp2[(n + b + 1) % size];
        if !holes2[v2 as usize] {
            ind2[k2 % size] = v2;
            k2 += 1;
        }
    }

    for k in a..=b {
        std::mem::swap(&mut ind1[k], &mut ind2[k]);
    }
}

/// Swap mutation (`mutShuffleIndexes`): each position is, independently
/// with probability `10 / len`, swapped with a different random position
/// (§4.5).
pub fn shuffle_mutation(ind: &mut [u32], rng: &mut impl Rng) {
    let size = ind.len();
    if size < 2 {
        return;
    }
    let indpb = (10.0 / size as f64).min(1.0);
    for i in 0..size {
        if rng.random::<f64>() < indpb {
            let mut swap_idx = rng.random_range(0..size - 1);
            if swap_idx >= i {
                swap_idx += 1;
            }
            ind.swap(i, swap_idx);
        }
    }
}

/// Applies crossover (probability `p_crossover`) to consecutive pairs of
/// the offspring pool, then mutation (probability `p_mutation`) to every
/// individual, per specialization key. The Rust analogue of DEAP's
/// `varAnd`.
pub fn vary(offspring: &mut [Individual], params: &AlgorithmParams, rng: &mut impl Rng) {
    let mut i = 1;
    while i < offspring.len() {
        if rng.random::<f64>() < params.p_crossover {
            let (left, right) = offspring.split_at_mut(i);
            let ind1 = left.last_mut().expect("i >= 1");
            let ind2 = &mut right[0];
            for spec in SPECIALIZATIONS {
                if ind1.genes(spec).is_empty() || ind2.genes(spec).is_empty() {
                    continue;
                }
                let mut g1 = ind1.genes(spec).to_vec();
                let mut g2 = ind2.genes(spec).to_vec();
                ordered_crossover(&mut g1, &mut g2, rng);
                *ind1.genes_mut(spec) = g1;
                *ind2.genes_mut(spec) = g2;
            }
        }
        i += 2;
    }

    for ind in offspring.iter_mut() {
        if rng.random::<f64>() < params.p_mutation {
            for spec in SPECIALIZATIONS {
                if ind.genes(spec).is_empty() {
                    continue;
                }
                let mut g = ind.genes(spec).to_vec();
                shuffle_mutation(&mut g, rng);
                *ind.genes_mut(spec) = g;
            }
        }
    }
}

fn tournament_winner(fitnesses: &[f64], tour_size: usize, rng: &mut impl Rng) -> usize {
    (0..tour_size)
        .map(|_| rng.random_range(0..fitnesses.len()))
        .min_by(|&a, &b| fitnesses[a].partial_cmp(&fitnesses[b]).unwrap())
        .expect("tour_size > 0")
}

/// Picks `k` individuals by repeated tournaments of size `tour_size`, each
/// won by the lowest-scoring aspirant (lower score is better, §4.5).
/// Aspirants are drawn with replacement, matching `tools.selRandom`.
pub fn tournament_select(
    population: &[Individual],
    k: usize,
    tour_size: usize,
    rng: &mut impl Rng,
) -> Vec<Individual> {
    let fitnesses: Vec<f64> = population
        .iter()
        .map(|ind| ind.fitness.unwrap_or(f64::INFINITY))
        .collect();
    (0..k)
        .map(|_| population[tournament_winner(&fitnesses, tour_size, rng)].clone())
        .collect()
}

/// Tournament selection with fitness sharing (§4.5): individuals closer
/// than `distance_threshold` to one another are treated as scoring worse
/// (since lower is better here, sharing multiplies the score up) for the
/// purposes of the tournament only. The individuals returned still carry
/// their true fitness.
pub fn tournament_select_with_sharing(
    population: &[Individual],
    k: usize,
    tour_size: usize,
    distance_threshold: u32,
    sharing_extent: f64,
    class_counts: &HashMap<ClassroomSpecialization, usize>,
    rng: &mut impl Rng,
) -> Vec<Individual> {
    let shared_fitness = shared_fitness(population, distance_threshold, sharing_extent, class_counts);
    (0..k)
        .map(|_| population[tournament_winner(&shared_fitness, tour_size, rng)].clone())
        .collect()
}

/// Effective fitness used by the tournament under fitness sharing (§4.5):
/// `score_i * (1 + sum_{j != i} max(0, 1 - d(i,j) / (sharing_extent *
/// distance_threshold)))`, computed here as `score_i * sharing_sum` with
/// `sharing_sum` starting at 1 (the `+1` term). Lower is better, so
/// sharing deflates nothing and only ever scales a score up, penalizing
/// individuals with close neighbors.
fn shared_fitness(
    population: &[Individual],
    distance_threshold: u32,
    sharing_extent: f64,
    class_counts: &HashMap<ClassroomSpecialization, usize>,
) -> Vec<f64> {
    let n = population.len();
    let mut shared = vec![0.0; n];
    for i in 0..n {
        let mut sharing_sum = 1.0;
        for j in 0..n {
            if i == j {
                continue;
            }
            let d = distance(&population[i], &population[j], class_counts) as f64;
            if d < distance_threshold as f64 {
                sharing_sum += 1.0 - d / (sharing_extent * distance_threshold as f64);
            }
        }
        shared[i] = population[i].fitness.unwrap_or(f64::INFINITY) * sharing_sum;
    }
    shared
}
