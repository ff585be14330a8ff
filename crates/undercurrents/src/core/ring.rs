use std::collections::VecDeque;

use crate::api::types::ParticleId;
use crate::core::pool::ParticlePool;
use crate::error::SimError;

/// A group of particles that only connect with each other.
/// The most recently spawned particle is at the front.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Ring {
    particles: VecDeque<ParticleId>,
}

impl Ring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a particle ahead of every existing one.
    pub fn push_front(&mut self, id: ParticleId) -> Result<(), SimError> {
        self.particles
            .try_reserve(1)
            .map_err(|source| SimError::OutOfMemory { what: "ring particle slot", source })?;
        self.particles.push_front(id);
        Ok(())
    }

    /// The newest particle, if any.
    pub fn front(&self) -> Option<ParticleId> {
        self.particles.front().copied()
    }

    /// Particle ids in sequence order (newest first).
    pub fn iter(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.particles.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub(crate) fn into_ids(self) -> VecDeque<ParticleId> {
        self.particles
    }
}

/// Rings ordered newest (index 0, front) to oldest (back).
#[derive(Debug, Default)]
pub struct RingList {
    rings: VecDeque<Ring>,
}

impl RingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an empty ring at the front.
    pub fn push_new_ring(&mut self) -> Result<(), SimError> {
        self.rings
            .try_reserve(1)
            .map_err(|source| SimError::OutOfMemory { what: "ring", source })?;
        self.rings.push_front(Ring::new());
        Ok(())
    }

    /// Remove the oldest ring and hand its particles to the pool.
    /// Returns how many particles were pooled, or `None` when there was no ring.
    pub fn evict_oldest(&mut self, pool: &mut ParticlePool) -> Option<usize> {
        match self.rings.pop_back() {
            Some(ring) => Some(pool.release(ring)),
            None => {
                log::warn!("nothing to recycle");
                None
            }
        }
    }

    /// Evict from the back until at most `max` rings remain.
    /// Returns the number of rings evicted.
    pub fn evict_if_over_capacity(&mut self, max: usize, pool: &mut ParticlePool) -> usize {
        let mut evicted = 0;
        while self.rings.len() > max {
            if self.evict_oldest(pool).is_none() {
                break;
            }
            evicted += 1;
        }
        evicted
    }

    /// Evict every ring, oldest first. Returns the number of rings evicted.
    pub fn clear_all(&mut self, pool: &mut ParticlePool) -> usize {
        self.evict_if_over_capacity(0, pool)
    }

    pub fn get(&self, index: usize) -> Option<&Ring> {
        self.rings.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Ring> {
        self.rings.get_mut(index)
    }

    /// Rings from newest to oldest; the position is the ring index.
    pub fn iter(&self) -> impl Iterator<Item = &Ring> {
        self.rings.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ring> {
        self.rings.iter_mut()
    }

    /// Total particles owned by all rings.
    pub fn particle_count(&self) -> usize {
        self.rings.iter().map(Ring::len).sum()
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SimConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    /// Build `sizes.len()` rings; `sizes[0]` is the oldest.
    fn build(sizes: &[usize]) -> (RingList, ParticlePool) {
        let config = SimConfig::default();
        let mut rng = ChaChaRng::seed_from_u64(9);
        let mut rings = RingList::new();
        let mut pool = ParticlePool::new();
        for &n in sizes {
            rings.push_new_ring().unwrap();
            let ring = rings.get_mut(0).unwrap();
            for _ in 0..n {
                ring.push_front(pool.acquire(&mut rng, &config).unwrap()).unwrap();
            }
        }
        (rings, pool)
    }

    #[test]
    fn push_new_ring_goes_to_front() {
        let (mut rings, _) = build(&[3]);
        rings.push_new_ring().unwrap();
        assert_eq!(rings.len(), 2);
        assert!(rings.get(0).unwrap().is_empty());
        assert_eq!(rings.get(1).unwrap().len(), 3);
    }

    #[test]
    fn ring_front_is_newest() {
        let mut ring = Ring::new();
        ring.push_front(ParticleId(1)).unwrap();
        ring.push_front(ParticleId(2)).unwrap();
        assert_eq!(ring.front(), Some(ParticleId(2)));
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![ParticleId(2), ParticleId(1)]);
    }

    #[test]
    fn eviction_removes_oldest_first() {
        let (mut rings, mut pool) = build(&[1, 2, 3, 4]);
        assert_eq!(rings.evict_oldest(&mut pool), Some(1));
        assert_eq!(rings.evict_oldest(&mut pool), Some(2));
        assert_eq!(rings.len(), 2);
        assert_eq!(rings.get(0).unwrap().len(), 4);
        assert_eq!(rings.get(1).unwrap().len(), 3);
        assert_eq!(pool.recycled(), 3);
    }

    #[test]
    fn evict_empty_is_noop() {
        let mut rings = RingList::new();
        let mut pool = ParticlePool::new();
        assert_eq!(rings.evict_oldest(&mut pool), None);
        assert_eq!(rings.evict_if_over_capacity(0, &mut pool), 0);
    }

    #[test]
    fn evict_if_over_capacity_bounds_count() {
        let (mut rings, mut pool) = build(&[2, 2, 2, 2, 2]);
        assert_eq!(rings.evict_if_over_capacity(3, &mut pool), 2);
        assert_eq!(rings.len(), 3);
        assert_eq!(rings.evict_if_over_capacity(3, &mut pool), 0);
        assert_eq!(pool.recycled(), 4);
    }

    #[test]
    fn clear_all_pools_everything() {
        let (mut rings, mut pool) = build(&[1, 5, 2]);
        assert_eq!(rings.clear_all(&mut pool), 3);
        assert!(rings.is_empty());
        assert_eq!(pool.recycled(), 8);
        assert_eq!(pool.allocated(), 8);
    }

    #[test]
    fn particle_count_sums_rings() {
        let (rings, pool) = build(&[4, 0, 6]);
        assert_eq!(rings.particle_count(), 10);
        assert_eq!(rings.particle_count() + pool.recycled(), pool.allocated());
    }
}
