//! A single orbiting particle.
//!
//! Position is kept in polar form (angle in degrees plus height from the
//! center). The cartesian position is derived and refreshed whenever either
//! polar coordinate changes, so it can never be set on its own.

use glam::Vec2;
use rand::Rng;

use crate::api::config::SimConfig;

/// Number of palette entries: 6 hue bands of 256 steps.
pub const MAX_COLORS: u32 = 256 * 6;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Visual size, fixed at spawn.
    pub radius: u32,
    /// Signed angular rate; the sign is the direction of rotation.
    pub speed: i32,
    /// Connection range used when this particle is the earlier of a pair.
    pub line_distance: u32,
    /// Palette index in `[0, MAX_COLORS)`.
    pub color: u32,
    position: f32,
    height: f32,
    born_timer: i32,
    xy: Vec2,
}

impl Particle {
    pub fn new(
        born_timer: i32,
        radius: u32,
        height: f32,
        speed: i32,
        line_distance: u32,
        position: f32,
        color: u32,
    ) -> Self {
        let mut p = Particle {
            radius,
            speed,
            line_distance,
            color,
            position,
            height,
            born_timer: born_timer.max(0),
            xy: Vec2::ZERO,
        };
        p.calculate_coordinates();
        p
    }

    /// A freshly randomized particle.
    pub fn random(rng: &mut impl Rng, config: &SimConfig) -> Self {
        let mut p = Particle::new(0, 0, 0.0, 0, 0, 0.0, 0);
        p.randomize(rng, config);
        p
    }

    /// Overwrite every attribute with fresh random draws. Used both for newly
    /// allocated particles and for slots reclaimed from the pool.
    pub fn randomize(&mut self, rng: &mut impl Rng, config: &SimConfig) {
        let mut speed = uniform(rng, 0, config.particle_speed_maximum);
        if rng.gen_bool(0.5) {
            speed = -speed;
        }

        self.speed = speed;
        self.radius = uniform(rng, config.particle_radius_minimum, config.particle_radius_maximum) as u32;
        self.height = uniform(rng, config.particle_height_minimum, config.particle_height_maximum) as f32;
        self.line_distance = uniform(
            rng,
            config.particle_line_distance_minimum,
            config.particle_line_distance_maximum,
        ) as u32;
        self.color = rng.gen_range(0..MAX_COLORS);
        self.born_timer = uniform(rng, 0, config.particle_born_timer_maximum);
        self.position = rng.gen_range(0..360) as f32;
        self.calculate_coordinates();
    }

    /// Angle in degrees, always within `[0, 360)`.
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Milliseconds until the particle is born.
    pub fn born_timer(&self) -> i32 {
        self.born_timer
    }

    /// Born particles are drawn and take part in connections.
    pub fn is_born(&self) -> bool {
        self.born_timer == 0
    }

    pub fn x(&self) -> f32 {
        self.xy.x
    }

    pub fn y(&self) -> f32 {
        self.xy.y
    }

    /// Cartesian position relative to the simulation center.
    pub fn xy(&self) -> Vec2 {
        self.xy
    }

    /// Raise the height by `amount` and refresh the coordinates.
    pub fn add_height(&mut self, amount: f32) {
        self.height += amount;
        self.calculate_coordinates();
    }

    /// Advance one frame of `delta_ms` milliseconds.
    ///
    /// `expand_rate` is height units per second and `speed_rate` the runtime
    /// speed multiplier. A zero delta leaves every attribute unchanged, and a
    /// particle sitting on the center (height 0) does not rotate.
    pub fn advance(&mut self, delta_ms: u32, expand_rate: f32, speed_rate: f32) {
        let delta = delta_ms as f32;

        self.height += delta * expand_rate / 1000.0;
        if self.height > 0.0 {
            self.position += delta * (self.speed as f32 / self.height / 5.0 * speed_rate);
        }
        self.calculate_coordinates();

        if self.born_timer != 0 {
            self.born_timer = self.born_timer.saturating_sub_unsigned(delta_ms).max(0);
        }
    }

    /// Normalize the angle into `[0, 360)` and derive `x, y`.
    ///
    /// The zero angle points straight up: 270 degrees are added before the
    /// polar-to-cartesian conversion.
    fn calculate_coordinates(&mut self) {
        let mut position = self.position.rem_euclid(360.0);
        if position >= 360.0 {
            position = 0.0;
        }
        self.position = position;

        let radians = (position + 270.0).to_radians();
        self.xy = Vec2::from_angle(radians) * self.height;
    }
}

/// Uniform integer in `[min, max)`; an empty range yields `min`.
pub(crate) fn uniform(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn at(position: f32, height: f32) -> Particle {
        Particle::new(0, 1, height, 10, 50, position, 0)
    }

    #[test]
    fn zero_angle_points_up() {
        let p = at(0.0, 10.0);
        assert!(p.x().abs() < 1e-4, "x was {}", p.x());
        assert!((p.y() + 10.0).abs() < 1e-4, "y was {}", p.y());
    }

    #[test]
    fn quarter_turn_points_right() {
        let p = at(90.0, 10.0);
        assert!((p.x() - 10.0).abs() < 1e-4, "x was {}", p.x());
        assert!(p.y().abs() < 1e-4, "y was {}", p.y());
    }

    #[test]
    fn position_is_normalized() {
        assert_eq!(at(450.0, 1.0).position(), 90.0);
        assert_eq!(at(-90.0, 1.0).position(), 270.0);
        assert_eq!(at(360.0, 1.0).position(), 0.0);
    }

    #[test]
    fn add_height_refreshes_coordinates() {
        let mut p = at(0.0, 10.0);
        p.add_height(5.0);
        assert_eq!(p.height(), 15.0);
        assert!((p.y() + 15.0).abs() < 1e-4);
    }

    #[test]
    fn zero_delta_changes_nothing() {
        let mut p = Particle::new(300, 2, 12.0, -7, 40, 123.0, 9);
        let before = p.clone();
        p.advance(0, 20.0, 1.0);
        assert_eq!(p, before);
    }

    #[test]
    fn advance_expands_and_rotates() {
        let mut p = Particle::new(0, 2, 10.0, 10, 40, 0.0, 0);
        p.advance(1000, 20.0, 1.0);
        assert_eq!(p.height(), 30.0);
        // 1000 * (10 / 30 / 5)
        assert!((p.position() - 66.666_67).abs() < 1e-3, "position was {}", p.position());
    }

    #[test]
    fn negative_speed_rotates_backwards() {
        let mut p = Particle::new(0, 2, 10.0, -10, 40, 0.0, 0);
        p.advance(100, 0.0, 1.0);
        assert!((p.position() - 340.0).abs() < 1e-3, "position was {}", p.position());
    }

    #[test]
    fn zero_height_does_not_rotate() {
        let mut p = Particle::new(0, 2, 0.0, 10, 40, 0.0, 0);
        p.advance(16, 0.0, 1.0);
        assert_eq!(p.position(), 0.0);
        assert!(p.x().is_finite() && p.y().is_finite());
    }

    #[test]
    fn sub_unit_height_uses_exact_rate() {
        let mut p = Particle::new(0, 1, 0.5, 10, 10, 0.0, 0);
        p.advance(16, 0.0, 1.0);
        // 16 * (10 / 0.5 / 5)
        assert!((p.position() - 64.0).abs() < 1e-3, "position was {}", p.position());
    }

    #[test]
    fn growing_from_center_starts_rotating() {
        let mut p = Particle::new(0, 1, 0.0, 10, 10, 0.0, 0);
        p.advance(100, 20.0, 1.0);
        // Height is 2 after expansion: 100 * (10 / 2 / 5)
        assert!((p.position() - 100.0).abs() < 1e-3, "position was {}", p.position());
    }

    #[test]
    fn born_timer_counts_down_and_clamps() {
        let mut p = Particle::new(250, 2, 10.0, 0, 40, 0.0, 0);
        p.advance(100, 0.0, 1.0);
        assert_eq!(p.born_timer(), 150);
        assert!(!p.is_born());
        p.advance(u32::MAX, 0.0, 1.0);
        assert_eq!(p.born_timer(), 0);
        assert!(p.is_born());
        p.advance(100, 0.0, 1.0);
        assert_eq!(p.born_timer(), 0);
    }

    #[test]
    fn randomize_respects_ranges() {
        let config = SimConfig::default();
        let mut rng = ChaChaRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, &config);
            assert!(p.speed.abs() < config.particle_speed_maximum);
            assert!(p.radius >= config.particle_radius_minimum as u32);
            assert!(p.radius < config.particle_radius_maximum as u32);
            assert!(p.height() >= config.particle_height_minimum as f32);
            assert!(p.height() < config.particle_height_maximum as f32);
            assert!(p.line_distance < config.particle_line_distance_maximum as u32);
            assert!(p.color < MAX_COLORS);
            assert!(p.born_timer() >= 0 && p.born_timer() < config.particle_born_timer_maximum);
            assert!(p.position() >= 0.0 && p.position() < 360.0);
        }
    }

    #[test]
    fn randomize_draws_both_directions() {
        let config = SimConfig::default();
        let mut rng = ChaChaRng::seed_from_u64(11);
        let speeds: Vec<i32> = (0..200).map(|_| Particle::random(&mut rng, &config).speed).collect();
        assert!(speeds.iter().any(|&s| s > 0));
        assert!(speeds.iter().any(|&s| s < 0));
    }

    #[test]
    fn empty_ranges_yield_the_bound() {
        let mut config = SimConfig::default();
        config.particle_radius_minimum = 3;
        config.particle_radius_maximum = 3;
        config.particle_speed_maximum = 0;
        config.particle_born_timer_maximum = 0;
        let mut rng = ChaChaRng::seed_from_u64(3);
        let p = Particle::random(&mut rng, &config);
        assert_eq!(p.radius, 3);
        assert_eq!(p.speed, 0);
        assert!(p.is_born());
    }
}
