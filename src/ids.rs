//
// ids.rs
// dicom-anonymizer
//
// Deterministic surrogate-id assignment. A dense integer sequence far
// larger than the patient count is shuffled with a fixed-seed RNG and
// patients take ids by rank, so one run is fully reproducible while the
// ids themselves carry no relation to patient identity.
//

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::model::Patient;

const ID_POOL_SEED: u64 = 0;
const ID_POOL_MULTIPLIER: usize = 10;
const ID_POOL_MINIMUM: usize = 1000;

/// Shuffle `0..length` with `length * 100` random pairwise swaps.
pub fn generate_ids(seed: u64, length: usize) -> Vec<u32> {
    let mut ids: Vec<u32> = (0..length as u32).collect();
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..length * 100 {
        let x = rng.gen_range(0..length);
        let y = rng.gen_range(0..length);
        ids.swap(x, y);
    }
    ids
}

/// Assign each patient a surrogate id by its position in `patients`.
/// Ids within one run are pairwise distinct; the same patient ordering
/// always yields the same assignment. Note the assignment is positional:
/// a different discovery order gives each patient a different id.
pub fn assign(patients: &mut [Patient]) {
    let length = (patients.len() * ID_POOL_MULTIPLIER).max(ID_POOL_MINIMUM);
    let ids = generate_ids(ID_POOL_SEED, length);
    for (i, patient) in patients.iter_mut().enumerate() {
        patient.anonymized_id = ids[i].to_string();
    }
}
