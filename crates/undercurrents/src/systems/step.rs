use crate::api::config::SimConfig;
use crate::core::pool::ParticlePool;
use crate::core::ring::RingList;

/// Advance every particle owned by a ring by `delta_ms`: expansion, rotation,
/// coordinate refresh and birth countdown.
/// Free function so the ring list can be read while the pool is written.
pub fn step_particles(rings: &RingList, pool: &mut ParticlePool, config: &SimConfig, delta_ms: u32) {
    let expand_rate = config.particle_expand_rate as f32;
    let speed_rate = config.speed_rate();

    for ring in rings.iter() {
        for id in ring.iter() {
            pool.get_mut(id).advance(delta_ms, expand_rate, speed_rate);
        }
    }
}
