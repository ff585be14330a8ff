//! The simulation context: every piece of mutable state for one run, and the
//! per-frame order in which it changes.

use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::api::config::SimConfig;
use crate::api::types::{FrameReport, StatusReport};
use crate::core::pool::ParticlePool;
use crate::core::ring::RingList;
use crate::core::time::{FrameClock, PeriodicTimer};
use crate::error::{ConfigError, SimError};
use crate::input::command::Command;
use crate::input::queue::InputQueue;
use crate::renderer::traits::FrameVisitor;
use crate::core::particle::Particle;
use crate::systems::neighbors::{connected_after, for_each_connected_pair, lines_enabled_for_ring};
use crate::systems::palette::{ColorCycle, ColorMode, ColorPlan, RybPalette};
use crate::systems::spawn::spawn_ring;
use crate::systems::step::step_particles;

/// Toggles that change what is drawn and whether time moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    pub paused: bool,
    pub blank: bool,
    pub fading: bool,
    pub lines_enabled: bool,
    pub color_mode: ColorMode,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            paused: false,
            blank: false,
            fading: true,
            lines_enabled: true,
            color_mode: ColorMode::Solid,
        }
    }
}

pub struct Simulation {
    config: SimConfig,
    rings: RingList,
    pool: ParticlePool,
    clock: FrameClock,
    spawn_timer: PeriodicTimer,
    status_timer: PeriodicTimer,
    rng: ChaChaRng,
    palette: RybPalette,
    cycle: ColorCycle,
    display: DisplayState,
    running: bool,
    last_delta_ms: u32,
}

impl Simulation {
    /// Build a context from a validated configuration. The RYB corner table is
    /// randomized from `seed`, like every later draw.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaChaRng::seed_from_u64(seed);
        let mut palette = RybPalette::default();
        palette.randomize(&mut rng);

        Ok(Self {
            spawn_timer: PeriodicTimer::new(config.timer_add_new_ring.max(0) as u32),
            status_timer: PeriodicTimer::new(config.timer_print_status_line.max(0) as u32),
            config,
            rings: RingList::new(),
            pool: ParticlePool::new(),
            clock: FrameClock::new(),
            rng,
            palette,
            cycle: ColorCycle::default(),
            display: DisplayState::default(),
            running: true,
            last_delta_ms: 0,
        })
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.display.paused = paused;
        self
    }

    /// One host frame at monotonic time `now_ms`: apply queued input, then advance.
    pub fn frame(&mut self, now_ms: u64, input: &mut InputQueue) -> Result<FrameReport, SimError> {
        let delta = self.clock.delta(now_ms);
        for command in input.drain_commands() {
            self.apply(command);
        }
        self.advance(delta)
    }

    /// Advance by `delta_ms`.
    ///
    /// The status timer runs even while paused; the spawn timer, color cycle
    /// and particle motion do not.
    pub fn advance(&mut self, delta_ms: u32) -> Result<FrameReport, SimError> {
        let mut report = FrameReport {
            delta_ms,
            ..FrameReport::default()
        };
        self.last_delta_ms = delta_ms;
        if !self.running {
            return Ok(report);
        }

        self.status_timer.set_period(self.config.timer_print_status_line.max(0) as u32);
        self.spawn_timer.set_period(self.config.timer_add_new_ring.max(0) as u32);

        if let Some(missed) = self.status_timer.tick(delta_ms) {
            let status = self.status();
            log::info!("{}", status);
            if missed > 0 {
                log::warn!("missed {} status line calls", missed);
            }
            report.status = Some(status);
            report.missed_status_ticks = missed;
        }

        if self.display.paused {
            return Ok(report);
        }

        if let Some(missed) = self.spawn_timer.tick(delta_ms) {
            report.rings_evicted = spawn_ring(&mut self.rings, &mut self.pool, &mut self.rng, &self.config)
                .inspect_err(|e| log::error!("{}", e))?;
            report.ring_spawned = true;
            report.missed_spawn_ticks = missed;
            if missed > 0 {
                log::warn!("missed {} add ring calls", missed);
            }
        }

        self.cycle.advance(delta_ms, self.config.particle_color_speed);
        step_particles(&self.rings, &mut self.pool, &self.config, delta_ms);

        Ok(report)
    }

    pub fn apply(&mut self, command: Command) {
        let config = &mut self.config;
        match command {
            Command::SpeedFactorUp => {
                config.particle_speed_factor = config.particle_speed_factor.saturating_add(1);
                log::info!("particleSpeedFactor={}", config.particle_speed_factor);
            }
            Command::SpeedFactorDown => {
                config.particle_speed_factor = (config.particle_speed_factor - 1).max(0);
                log::info!("particleSpeedFactor={}", config.particle_speed_factor);
            }
            Command::LineDistanceFactorUp => {
                config.particle_line_distance_factor = config.particle_line_distance_factor.saturating_add(1);
                log::info!("particleLineDistanceFactor={}", config.particle_line_distance_factor);
            }
            Command::LineDistanceFactorDown => {
                config.particle_line_distance_factor = (config.particle_line_distance_factor - 1).max(0);
                log::info!("particleLineDistanceFactor={}", config.particle_line_distance_factor);
            }
            Command::ToggleBlank => {
                self.display.blank = !self.display.blank;
                log::info!("blank={}", self.display.blank);
            }
            Command::ClearRings => {
                let cleared = self.rings.clear_all(&mut self.pool);
                log::info!("cleared {} rings", cleared);
            }
            Command::ToggleFading => {
                self.display.fading = !self.display.fading;
                log::info!("fading={}", self.display.fading);
            }
            Command::ToggleLines => {
                self.display.lines_enabled = !self.display.lines_enabled;
                log::info!("lines={}", self.display.lines_enabled);
            }
            Command::CycleColorMode => {
                self.display.color_mode = self.display.color_mode.next();
                log::info!("colorMode={}", self.display.color_mode);
            }
            Command::TogglePause => {
                self.display.paused = !self.display.paused;
                log::info!("paused={}", self.display.paused);
            }
            Command::RandomizePalette => {
                self.palette.randomize(&mut self.rng);
                log::info!("randomized color table");
            }
            Command::Resize { width, height } => {
                config.window_width = width.max(0);
                config.window_height = height.max(0);
                log::info!("window size changed to {}x{}", config.window_width, config.window_height);
            }
            Command::Quit => {
                self.running = false;
                log::info!("quit");
            }
        }
    }

    /// Change one parameter by name. The whole configuration is re-validated
    /// and left untouched on error.
    pub fn set_option(&mut self, name: &str, value: i32) -> Result<(), ConfigError> {
        let mut next = self.config.clone();
        next.set_option(name, value)?;
        next.validate()?;
        self.config = next;
        log::info!("{}={}", name, value);
        Ok(())
    }

    /// Current counters; `fps` comes from the most recent delta.
    pub fn status(&self) -> StatusReport {
        StatusReport {
            fps: (self.last_delta_ms > 0).then(|| 1000.0 / self.last_delta_ms as f32),
            ring_count: self.rings.len(),
            particle_count: self.pool.allocated(),
            recycled_particles: self.pool.recycled(),
        }
    }

    /// Every born particle with its ring index, newest ring first.
    pub fn for_each_visible_particle(&self, mut f: impl FnMut(usize, &Particle)) {
        for (ring_index, ring) in self.rings.iter().enumerate() {
            for id in ring.iter() {
                let particle = self.pool.get(id);
                if particle.is_born() {
                    f(ring_index, particle);
                }
            }
        }
    }

    /// Every connected pair in rings that currently draw lines.
    pub fn for_each_connected_pair(&self, mut f: impl FnMut(usize, &Particle, &Particle)) {
        if !self.display.lines_enabled {
            return;
        }
        let rate = self.config.line_distance_rate();
        for (ring_index, ring) in self.rings.iter().enumerate() {
            if lines_enabled_for_ring(ring_index, self.config.particle_line_ring_disable) {
                for_each_connected_pair(ring_index, ring, &self.pool, rate, &mut f);
            }
        }
    }

    /// Walk this frame's visible geometry, newest ring first. Each particle is
    /// followed directly by its connections to later particles.
    pub fn visit(&self, visitor: &mut impl FrameVisitor) {
        if self.display.blank {
            return;
        }

        let plan = ColorPlan::new(
            self.display.color_mode,
            &self.palette,
            self.cycle,
            self.element_alpha(),
            self.config.rings_maximum,
        );
        let rate = self.config.line_distance_rate();

        if let Some(color) = plan.frame_color() {
            visitor.set_color(color);
        }
        for (ring_index, ring) in self.rings.iter().enumerate() {
            if let Some(color) = plan.ring_color(ring_index) {
                visitor.set_color(color);
            }
            let lines = self.display.lines_enabled
                && lines_enabled_for_ring(ring_index, self.config.particle_line_ring_disable);

            for (position, id) in ring.iter().enumerate() {
                let particle = self.pool.get(id);
                if !particle.is_born() {
                    continue;
                }
                if let Some(color) = plan.particle_color(particle) {
                    visitor.set_color(color);
                }
                visitor.particle(ring_index, particle);
                if !lines {
                    continue;
                }
                for other in connected_after(ring, &self.pool, position, rate) {
                    visitor.connection(ring_index, particle, other);
                }
            }
        }
    }

    /// Alpha of the background clear; below 1 leaves trails.
    /// `alphaBackground` is a raw 0-255 channel value, unlike `alphaElements`.
    pub fn clear_alpha(&self) -> f32 {
        if self.display.fading {
            (self.config.alpha_background as f32 / 255.0).min(1.0)
        } else {
            1.0
        }
    }

    /// Alpha of particles and lines; `alphaElements` is a percentage.
    pub fn element_alpha(&self) -> f32 {
        if self.display.fading {
            self.config.alpha_elements as f32 / 100.0
        } else {
            1.0
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn rings(&self) -> &RingList {
        &self.rings
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn palette(&self) -> &RybPalette {
        &self.palette
    }

    pub fn color_cycle(&self) -> ColorCycle {
        self.cycle
    }

    pub fn is_paused(&self) -> bool {
        self.display.paused
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
