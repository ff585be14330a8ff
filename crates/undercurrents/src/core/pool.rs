use rand::Rng;

use crate::api::config::SimConfig;
use crate::api::types::ParticleId;
use crate::core::particle::Particle;
use crate::core::ring::Ring;
use crate::error::SimError;

/// Arena of particle slots plus a free-index stack.
///
/// Every slot ever allocated lives in `slots` for the rest of the run. A slot
/// is owned either by exactly one [`Ring`] (which holds its id) or by the free
/// stack, never both.
#[derive(Debug, Default)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    free: Vec<ParticleId>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a randomized particle, reusing a pooled slot when one is free.
    pub fn acquire(&mut self, rng: &mut impl Rng, config: &SimConfig) -> Result<ParticleId, SimError> {
        if let Some(id) = self.free.pop() {
            self.slots[id.index()].randomize(rng, config);
            return Ok(id);
        }

        // The free stack is empty here; size it to hold every slot so release never allocates.
        let total = self.slots.len() + 1;
        self.slots
            .try_reserve(1)
            .map_err(|source| SimError::OutOfMemory { what: "particle", source })?;
        self.free
            .try_reserve(total)
            .map_err(|source| SimError::OutOfMemory { what: "particle free list", source })?;
        let id = ParticleId(self.slots.len() as u32);
        self.slots.push(Particle::random(rng, config));
        Ok(id)
    }

    /// Take back every particle owned by `ring`. Slots are not reset here;
    /// they are re-randomized on the next [`acquire`](Self::acquire).
    /// Returns the number of particles pooled.
    pub fn release(&mut self, ring: Ring) -> usize {
        let ids = ring.into_ids();
        let count = ids.len();
        self.free.extend(ids);
        count
    }

    pub fn get(&self, id: ParticleId) -> &Particle {
        &self.slots[id.index()]
    }

    pub fn get_mut(&mut self, id: ParticleId) -> &mut Particle {
        &mut self.slots[id.index()]
    }

    /// Particles ever allocated.
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Particles currently waiting for reuse.
    pub fn recycled(&self) -> usize {
        self.free.len()
    }
}
