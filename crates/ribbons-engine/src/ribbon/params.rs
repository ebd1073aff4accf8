use rand::Rng;

use crate::config::RibbonConfig;
use crate::coords::Vec3;

const SPRING_JITTER: f32 = 0.05;
const FRICTION_JITTER: f32 = 0.05;
const THICKNESS_JITTER: f32 = 3.0;
const OFFSET_X_JITTER: f32 = 0.01;
const OFFSET_Y_JITTER: f32 = 0.1;

/// Physical parameters of one ribbon, fixed at construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RibbonParams {
    pub spring: f32,
    pub friction: f32,
    /// Logical pixels.
    pub thickness: f32,
    /// Constant bias added to the shared pointer target.
    pub target_offset: Vec3,
}

impl RibbonParams {
    /// Parameters for ribbon `index` of `count`, jittered around the config's
    /// base values.
    ///
    /// Draws five values from `rng` in a fixed order (spring, friction,
    /// thickness, offset x, offset y) so a seeded generator reproduces the same
    /// bundle.
    pub fn jittered<R: Rng + ?Sized>(config: &RibbonConfig, index: usize, count: usize, rng: &mut R) -> Self {
        let spring = config.base_spring + centered(rng) * SPRING_JITTER;
        let friction = config.base_friction + centered(rng) * FRICTION_JITTER;
        let thickness = config.base_thickness + centered(rng) * THICKNESS_JITTER;

        let center = count.saturating_sub(1) as f32 / 2.0;
        let spread = (index as f32 - center) * config.offset_factor;
        let x = spread + centered(rng) * OFFSET_X_JITTER;
        let y = centered(rng) * OFFSET_Y_JITTER;

        Self { spring, friction, thickness, target_offset: Vec3::new(x, y, 0.0) }
    }

    /// Exact base values, no jitter and no offset.
    pub fn exact(spring: f32, friction: f32, thickness: f32) -> Self {
        Self { spring, friction, thickness, target_offset: Vec3::zero() }
    }
}

/// Uniform sample in `[-0.5, 0.5)`.
#[inline]
fn centered<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.r#gen::<f32>() - 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn jitter_stays_within_bounds() {
        let config = RibbonConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..200 {
            let p = RibbonParams::jittered(&config, i % 5, 5, &mut rng);
            assert!((p.spring - config.base_spring).abs() <= SPRING_JITTER / 2.0);
            assert!((p.friction - config.base_friction).abs() <= FRICTION_JITTER / 2.0);
            assert!((p.thickness - config.base_thickness).abs() <= THICKNESS_JITTER / 2.0);
            assert!(p.target_offset.y.abs() <= OFFSET_Y_JITTER / 2.0);
            assert_eq!(p.target_offset.z, 0.0);
        }
    }

    #[test]
    fn offsets_spread_symmetrically_around_center() {
        let config = RibbonConfig::default().with_offset_factor(1.0);
        let mut rng = StdRng::seed_from_u64(1);
        let first = RibbonParams::jittered(&config, 0, 3, &mut rng);
        let middle = RibbonParams::jittered(&config, 1, 3, &mut rng);
        let last = RibbonParams::jittered(&config, 2, 3, &mut rng);
        assert!((first.target_offset.x + 1.0).abs() <= OFFSET_X_JITTER);
        assert!(middle.target_offset.x.abs() <= OFFSET_X_JITTER);
        assert!((last.target_offset.x - 1.0).abs() <= OFFSET_X_JITTER);
    }

    #[test]
    fn single_ribbon_is_centered() {
        let config = RibbonConfig::default().with_offset_factor(10.0);
        let mut rng = StdRng::seed_from_u64(3);
        let p = RibbonParams::jittered(&config, 0, 1, &mut rng);
        assert!(p.target_offset.x.abs() <= OFFSET_X_JITTER);
    }

    #[test]
    fn same_seed_same_params() {
        let config = RibbonConfig::default();
        let a = RibbonParams::jittered(&config, 2, 4, &mut StdRng::seed_from_u64(42));
        let b = RibbonParams::jittered(&config, 2, 4, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
