//! Random identifier allocation shared by products and carts.
//!
//! Candidates are drawn uniformly from `[0, ID_SPACE)` and redrawn while they
//! collide with a live id. There is no retry bound: as the live set approaches
//! `ID_SPACE` the expected number of draws grows without limit.

use rand::Rng;

use crate::domain::EntityId;
use crate::errors::{EntityKind, ServiceError};
use crate::observability;

pub const ID_SPACE: EntityId = 1000;

/// Uniform draw from the id space using the thread-local RNG.
pub fn random_candidate() -> EntityId {
    rand::thread_rng().gen_range(0..ID_SPACE)
}

/// Draw candidates until one is not `taken`.
///
/// `live_count` is only used to refuse allocation once every slot is used,
/// since the loop could never finish in that case.
pub fn allocate_id<T, D>(
    kind: EntityKind,
    live_count: usize,
    taken: T,
    mut draw: D,
) -> Result<EntityId, ServiceError>
where
    T: Fn(EntityId) -> bool,
    D: FnMut() -> EntityId,
{
    if live_count >= ID_SPACE as usize {
        return Err(ServiceError::IdSpaceExhausted(kind));
    }
    let mut candidate = draw();
    while taken(candidate) {
        observability::ID_REDRAWS_TOTAL.with_label_values(&[kind.as_str()]).inc();
        candidate = draw();
    }
    observability::ID_ALLOCATIONS_TOTAL.with_label_values(&[kind.as_str()]).inc();
    Ok(candidate)
}
