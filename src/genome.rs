//! The genome (`Individual`): one permutation per classroom specialization.

use crate::task::ALL_SPECIALIZATIONS;
use crate::types::ClassroomSpecialization;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A candidate schedule, encoded as one permutation of slot positions per
/// specialization.
///
/// Position `pos` in `genes[S]` holds a `class_num`: if `class_num <
/// M_S` (the number of non-fixed classes for `S`), position `pos` is
/// materialized as a real placement; otherwise it is padding (§3). The
/// permutation invariant, that `genes[S]` is always a permutation of
/// `[0, N_S)`, must hold after every operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual {
    genes: HashMap<ClassroomSpecialization, Vec<u32>>,
    /// Cached fitness; `None` until evaluated, invalidated by any mutation.
    pub fitness: Option<f64>,
}

impl Individual {
    /// Builds an individual from already-valid permutations. Panics in
    /// debug builds if any array is not a permutation of `[0, len)`.
    pub fn new(genes: HashMap<ClassroomSpecialization, Vec<u32>>) -> Self {
        #[cfg(debug_assertions)]
        for (spec, perm) in &genes {
            debug_assert!(
                is_permutation(perm),
                "genome for {spec:?} is not a permutation: {perm:?}"
            );
        }
        Individual {
            genes,
            fitness: None,
        }
    }

    pub fn genes(&self, spec: ClassroomSpecialization) -> &[u32] {
        self.genes
            .get(&spec)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn genes_mut(&mut self, spec: ClassroomSpecialization) -> &mut Vec<u32> {
        self.fitness = None;
        self.genes.entry(spec).or_default()
    }

    pub fn specializations(&self) -> impl Iterator<Item = ClassroomSpecialization> + '_ {
        ALL_SPECIALIZATIONS.into_iter()
    }

    /// Checks that every specialization's array is a permutation of
    /// `[0, len)`. Used by tests and by the driver's debug-mode invariant
    /// checks (§8).
    pub fn is_valid(&self) -> bool {
        self.genes.values().all(|perm| is_permutation(perm))
    }
}

fn is_permutation(perm: &[u32]) -> bool {
    let n = perm.len();
    let mut seen = vec![false; n];
    for &g in perm {
        let idx = g as usize;
        if idx >= n || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// Number of non-padding positions where two genomes disagree, summed
/// across specializations. This is the distance used by fitness sharing
/// (§4.5).
///
/// `d(g, g) == 0`; `d(g1, g2) == d(g2, g1)`.
pub fn distance(a: &Individual, b: &Individual, class_counts: &HashMap<ClassroomSpecialization, usize>) -> u32 {
    let mut total = 0u32;
    for spec in ALL_SPECIALIZATIONS {
        let m = *class_counts.get(&spec).unwrap_or(&0) as u32;
        let ga = a.genes(spec);
        let gb = b.genes(spec);
        total += m;
        for (&x, &y) in ga.iter().zip(gb.iter()) {
            if x == y && x < m {
                total -= 1;
            }
        }
    }
    total
}
