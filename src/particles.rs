use crate::geometry::Vec2;
use rand::Rng;

/// Applied as `vel.y -= GRAVITY` each update, so particles fall down the field.
pub const GRAVITY: f32 = -0.2;
pub const SHRINK: f32 = 0.3;
const MAX_SPEED: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2<f32>,
    pub vel: Vec2<f32>,
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2<f32>, size: f32, vel: Vec2<f32>) -> Self {
        Particle {
            pos,
            vel,
            size: (size / 2.0).abs(),
        }
    }

    pub fn update(&mut self) {
        self.size -= SHRINK;
        self.pos.add(self.vel);
        self.vel.y -= GRAVITY;
    }

    pub fn is_spent(&self) -> bool {
        self.size <= 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `count` particles at `origin`, each with a random velocity in
    /// [-3, 3) on both axes and half the source size.
    pub fn burst(&mut self, origin: Vec2<i32>, source_size: i32, count: usize, rng: &mut impl Rng) {
        let origin = Vec2::new(origin.x as f32, origin.y as f32);
        self.particles.extend((0..count).map(|_| {
            let vel = Vec2::new(
                rng.gen_range(-MAX_SPEED..MAX_SPEED),
                rng.gen_range(-MAX_SPEED..MAX_SPEED),
            );
            Particle::new(origin, source_size as f32, vel)
        }));
    }

    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
    }

    pub fn collect_garbage(&mut self) {
        self.particles.retain(|p| !p.is_spent());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_burst_spawns_configured_count() {
        let mut system = ParticleSystem::new();
        let mut rng = StdRng::seed_from_u64(3);
        system.burst(Vec2::new(160, 240), 80, 20, &mut rng);
        assert_eq!(system.len(), 20);
        for p in system.iter() {
            assert_eq!(p.pos, Vec2::new(160.0, 240.0));
            assert_eq!(p.size, 40.0);
            assert!((-3.0..3.0).contains(&p.vel.x));
            assert!((-3.0..3.0).contains(&p.vel.y));
        }
    }

    #[test]
    fn test_update_shrinks_and_falls() {
        let mut p = Particle::new(Vec2::new(10.0, 10.0), 80.0, Vec2::new(1.0, -1.0));
        p.update();
        assert!((p.size - 39.7).abs() < 1e-4);
        assert_eq!(p.pos, Vec2::new(11.0, 9.0));
        assert!((p.vel.y - (-0.8)).abs() < 1e-6);
        p.update();
        assert!((p.pos.y - 8.2).abs() < 1e-5);
    }

    #[test]
    fn test_size_strictly_decreases_until_removed() {
        let mut system = ParticleSystem::new();
        let mut rng = StdRng::seed_from_u64(11);
        system.burst(Vec2::new(0, 0), 80, 5, &mut rng);

        let mut frames = 0;
        while !system.is_empty() {
            let before: Vec<f32> = system.iter().map(|p| p.size).collect();
            system.update();
            for (old, p) in before.iter().zip(system.iter()) {
                assert!(p.size < *old);
            }
            system.collect_garbage();
            assert!(system.iter().all(|p| p.size > 0.0));
            frames += 1;
            assert!(frames < 1000, "particles never expired");
        }
        // 40 / 0.3 rounds up to 134 updates
        assert_eq!(frames, 134);
    }

    #[test]
    fn test_negative_source_size_is_made_positive() {
        let p = Particle::new(Vec2::default(), -10.0, Vec2::default());
        assert_eq!(p.size, 5.0);
    }
}
