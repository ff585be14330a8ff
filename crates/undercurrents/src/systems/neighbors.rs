//! Which particle pairs within a ring are connected by a line.

use crate::core::particle::Particle;
use crate::core::pool::ParticlePool;
use crate::core::ring::Ring;

/// Whether rings at `ring_index` take part in connections at all.
/// Rings at or past `ring_disable` are skipped; a negative cutoff never disables.
pub fn lines_enabled_for_ring(ring_index: usize, ring_disable: i32) -> bool {
    ring_disable < 0 || ring_index < ring_disable as usize
}

/// Connection test for an ordered pair. Only `from`'s line distance counts,
/// so the test is not symmetric.
pub fn is_connected(from: &Particle, to: &Particle, line_distance_rate: f32) -> bool {
    from.xy().distance(to.xy()) < from.line_distance as f32 * line_distance_rate
}

/// Born particles after position `index` in `ring` that the born particle at
/// `index` connects to. Empty when that particle is unborn or out of range.
pub fn connected_after<'a>(
    ring: &'a Ring,
    pool: &'a ParticlePool,
    index: usize,
    line_distance_rate: f32,
) -> impl Iterator<Item = &'a Particle> + 'a {
    let from = ring.iter().nth(index).map(|id| pool.get(id)).filter(|p| p.is_born());
    ring.iter()
        .skip(index + 1)
        .map(move |id| pool.get(id))
        .filter(move |to| match from {
            Some(from) => to.is_born() && is_connected(from, to, line_distance_rate),
            None => false,
        })
}

/// Call `f(ring_index, from, to)` for every connected pair in `ring`, `from`
/// earlier in sequence order than `to`.
pub fn for_each_connected_pair<'a>(
    ring_index: usize,
    ring: &'a Ring,
    pool: &'a ParticlePool,
    line_distance_rate: f32,
    mut f: impl FnMut(usize, &'a Particle, &'a Particle),
) {
    for (index, id) in ring.iter().enumerate() {
        let from = pool.get(id);
        for to in connected_after(ring, pool, index, line_distance_rate) {
            f(ring_index, from, to);
        }
    }
}
