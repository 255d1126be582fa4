//! Seed mutation operator.
//!
//! A seed is rebuilt from a donor seed cell by cell: each cell may flip,
//! a live donor cell may move to a position that is dead in the donor, and
//! everything else is copied. Occasionally the rates are escalated ("big"
//! mutation) or the donor is ignored and the seed refilled at random
//! ("complete" mutation).

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::compute::grid::percent_chance;
use crate::compute::{Grid, LifeError};
use crate::schema::MutationConfig;

/// Factor applied to the per-cell rates on a big mutation.
pub const BIG_MUTATION_FACTOR: f32 = 5.0;

/// Random positions tried when looking for a dead donor cell to relocate into.
pub const RELOCATE_ATTEMPTS: usize = 20;

/// Which branch of the operator produced the new seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationKind {
    /// Donor discarded, seed refilled at random.
    Complete,
    /// Donor copied with escalated change/relocate rates.
    Big,
    /// Donor copied with the configured rates.
    Normal,
}

/// Rebuild `seed` from `donor` according to `params`.
///
/// The copy pass repeats until at least one flip or relocation fired. A later
/// copy may overwrite a relocated cell, but the vacated source position (or
/// the flipped cell) still differs from the donor, so the result is never a
/// plain clone of it. With every per-cell rate at zero that loop only ends
/// through `params.max_passes`.
pub fn mutate_seed<R: Rng + ?Sized>(
    seed: &mut Grid,
    donor: &Grid,
    params: &MutationConfig,
    rng: &mut R,
) -> Result<MutationKind, LifeError> {
    if seed.dims() != donor.dims() {
        return Err(LifeError::SizeMismatch {
            expected: seed.dims(),
            found: donor.dims(),
        });
    }

    if percent_chance(rng, params.complete_mutation) {
        seed.random_fill(params.random_fill_percent, rng);
        return Ok(MutationKind::Complete);
    }

    let (kind, change_state, relocate) = if percent_chance(rng, params.big_mutation) {
        (
            MutationKind::Big,
            params.change_state * BIG_MUTATION_FACTOR,
            params.relocate * BIG_MUTATION_FACTOR,
        )
    } else {
        (MutationKind::Normal, params.change_state, params.relocate)
    };

    let mut passes = 0usize;
    loop {
        passes += 1;
        if copy_pass(seed, donor, change_state, relocate, rng) {
            break;
        }
        if params.max_passes.is_some_and(|max| passes >= max) {
            warn!("Mutation produced a donor clone after {passes} passes");
            break;
        }
    }

    Ok(kind)
}

/// One rebuild of `seed` from `donor`. Returns whether anything mutated.
fn copy_pass<R: Rng + ?Sized>(
    seed: &mut Grid,
    donor: &Grid,
    change_state: f32,
    relocate: f32,
    rng: &mut R,
) -> bool {
    let (width, height) = donor.dims();
    let mut mutated = false;

    seed.clear();
    for y in 0..height {
        for x in 0..width {
            let donor_alive = donor.at(x, y);
            let idx = seed.idx(x, y);

            if percent_chance(rng, change_state) {
                set(seed, idx, !donor_alive);
                mutated = true;
            } else if donor_alive && percent_chance(rng, relocate) {
                match find_dead_cell(donor, rng) {
                    Some(target) => {
                        set(seed, target, true);
                        mutated = true;
                    }
                    None => set(seed, idx, donor_alive),
                }
            } else {
                set(seed, idx, donor_alive);
            }
        }
    }

    mutated
}

/// Random index that is dead in `donor`, or `None` after `RELOCATE_ATTEMPTS` misses.
fn find_dead_cell<R: Rng + ?Sized>(donor: &Grid, rng: &mut R) -> Option<usize> {
    let (width, height) = donor.dims();
    (0..RELOCATE_ATTEMPTS)
        .map(|_| (rng.gen_range(0..width), rng.gen_range(0..height)))
        .find(|&(x, y)| !donor.at(x, y))
        .map(|(x, y)| donor.idx(x, y))
}

#[inline]
fn set(seed: &mut Grid, idx: usize, state: bool) {
    match (seed.cells[idx], state) {
        (true, false) => seed.live_count -= 1,
        (false, true) => seed.live_count += 1,
        _ => {}
    }
    seed.cells[idx] = state;
}
