use rand::Rng;

use crate::api::config::SimConfig;
use crate::core::pool::ParticlePool;
use crate::core::ring::RingList;
use crate::error::SimError;

/// Particles added to every ring per spawn event, before the per-index bonus.
pub const PARTICLES_PER_RING: usize = 4;
/// Every this many rings outward, one more particle is added per spawn event.
pub const RING_INDEX_DIVISOR: usize = 4;

/// How many particles ring `index` (0 = newest) receives per spawn event.
pub fn particles_for_ring(index: usize) -> usize {
    index / RING_INDEX_DIVISOR + PARTICLES_PER_RING
}

/// The ring-spawn event: push a new ring, evict past `ringsMaximum`, then
/// feed every ring its batch of new particles.
///
/// Each new particle is stacked on the ring's current front particle by adding
/// that particle's height to its own, so a batch chains outward.
/// Returns the number of rings evicted.
pub fn spawn_ring(
    rings: &mut RingList,
    pool: &mut ParticlePool,
    rng: &mut impl Rng,
    config: &SimConfig,
) -> Result<usize, SimError> {
    rings.push_new_ring()?;
    let evicted = rings.evict_if_over_capacity(config.rings_maximum.max(0) as usize, pool);

    for (index, ring) in rings.iter_mut().enumerate() {
        for _ in 0..particles_for_ring(index) {
            let id = pool.acquire(rng, config)?;
            if let Some(head) = ring.front() {
                let offset = pool.get(head).height();
                pool.get_mut(id).add_height(offset);
            }
            ring.push_front(id)?;
        }
    }

    Ok(evicted)
}
