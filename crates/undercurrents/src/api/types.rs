/// Handle to a particle slot in the [`ParticlePool`](crate::ParticlePool) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u32);

impl ParticleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Counters reported by the periodic status event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    /// Frames per second derived from the last delta; `None` when the delta was 0.
    pub fps: Option<f32>,
    pub ring_count: usize,
    /// Particles ever allocated (owned by rings plus pooled).
    pub particle_count: usize,
    /// Particles currently waiting in the pool.
    pub recycled_particles: usize,
}

impl std::fmt::Display for StatusReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.fps {
            Some(fps) => write!(f, "fps={:.6}", fps)?,
            None => write!(f, "fps=inf")?,
        }
        write!(
            f,
            " ringCount={} particleCount={} recycledParticles={}",
            self.ring_count, self.particle_count, self.recycled_particles
        )
    }
}

/// What happened during one call to [`Simulation::advance`](crate::Simulation::advance).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    pub delta_ms: u32,
    /// A new ring was pushed (and older rings possibly evicted).
    pub ring_spawned: bool,
    pub rings_evicted: usize,
    pub missed_spawn_ticks: u32,
    pub missed_status_ticks: u32,
    pub status: Option<StatusReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_format() {
        let report = StatusReport {
            fps: Some(50.0),
            ring_count: 3,
            particle_count: 40,
            recycled_particles: 7,
        };
        assert_eq!(
            report.to_string(),
            "fps=50.000000 ringCount=3 particleCount=40 recycledParticles=7"
        );
    }

    #[test]
    fn status_line_without_fps() {
        let report = StatusReport {
            fps: None,
            ring_count: 0,
            particle_count: 0,
            recycled_particles: 0,
        };
        assert!(report.to_string().starts_with("fps=inf "));
    }
}
