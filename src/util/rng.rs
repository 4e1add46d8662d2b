//! Uniform range draws on top of `fastrand::Rng`.

use glam::Vec2;

/// Uniform `f32` in `[lo, hi)`.
pub fn range_f32(rng: &mut fastrand::Rng, lo: f32, hi: f32) -> f32 {
    lo + rng.f32() * (hi - lo)
}

/// Uniform angle in degrees, converted to radians.
pub fn angle_deg(rng: &mut fastrand::Rng, lo: f32, hi: f32) -> f32 {
    range_f32(rng, lo, hi).to_radians()
}

/// Vector with each component uniform in `[-amp, amp)`.
pub fn jitter(rng: &mut fastrand::Rng, amp: f32) -> Vec2 {
    Vec2::new(range_f32(rng, -amp, amp), range_f32(rng, -amp, amp))
}

/// Inclusive integer-ish range over floats, used for placing items on a pixel grid.
pub fn range_px(rng: &mut fastrand::Rng, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    rng.i32(lo as i32..=hi as i32) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..1000 {
            let v = range_f32(&mut rng, 0.25, 1.25);
            assert!((0.25..1.25).contains(&v));
            let j = jitter(&mut rng, 0.2);
            assert!(j.x.abs() <= 0.2 && j.y.abs() <= 0.2);
            let p = range_px(&mut rng, 50.0, 686.0);
            assert!((50.0..=686.0).contains(&p));
        }
    }

    #[test]
    fn degenerate_pixel_range_returns_low() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(range_px(&mut rng, 10.0, 5.0), 10.0);
    }
}
