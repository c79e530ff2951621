// ============================================================
// Layer 4 — Gaussian Coordinate Noise
// ============================================================
// Perturbs every recorded position with independent
// N(0, σ²) offsets on x and y. The clean simulator output is
// left untouched; a noisy COPY is returned so both versions can
// be kept side by side.
//
// Frames are not perturbed: noise models imprecise coordinate
// readings, not a different rendered scene.
//
// Reference: rand_distr::Normal

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::domain::error::{ensure_finite, ParamError};
use crate::domain::trajectory::{Trajectory, TrajectorySample};

/// Return a copy of `trajectory` with Gaussian noise on each coordinate.
pub fn add_gaussian_noise<R: Rng + ?Sized>(
    trajectory: &Trajectory,
    std_dev:    f64,
    rng:        &mut R,
) -> Result<Trajectory, ParamError> {
    ensure_finite("noise_std", std_dev)?;
    if std_dev < 0.0 {
        return Err(ParamError::OutOfBounds {
            name:     "noise_std",
            value:    std_dev,
            expected: "[0, ∞)",
        });
    }

    let mut noisy = trajectory.clone();
    if std_dev == 0.0 {
        return Ok(noisy);
    }

    let normal = Normal::new(0.0, std_dev).map_err(|_| ParamError::OutOfBounds {
        name:     "noise_std",
        value:    std_dev,
        expected: "[0, ∞)",
    })?;

    for p in noisy.positions.iter_mut() {
        p[0] += normal.sample(rng);
        p[1] += normal.sample(rng);
    }
    Ok(noisy)
}

/// Apply noise to a dataset sample in place and record σ on it.
pub fn perturb_sample<R: Rng + ?Sized>(
    sample:  &mut TrajectorySample,
    std_dev: f64,
    rng:     &mut R,
) -> Result<(), ParamError> {
    sample.trajectory = add_gaussian_noise(&sample.trajectory, std_dev, rng)?;
    sample.noise_std  = std_dev;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::{InitialConditions, PhysicsParams};
    use crate::domain::trajectory::Split;
    use rand::{rngs::StdRng, SeedableRng};

    fn flat(n: usize) -> Trajectory {
        Trajectory {
            initial:    InitialConditions { speed: 0.0, direction: 0.0, position: [8.0, 8.0] },
            params:     PhysicsParams { gravity: 0.0, restitution: 1.0 },
            frame_rate: 30,
            positions:  vec![[8.0, 8.0]; n],
            frames:     Vec::new(),
        }
    }

    #[test]
    fn test_zero_noise_is_identity() {
        let t = flat(5);
        let n = add_gaussian_noise(&t, 0.0, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(n.positions, t.positions);
    }

    #[test]
    fn test_noise_statistics() {
        let t       = flat(4000);
        let sigma   = 0.5;
        let noisy   = add_gaussian_noise(&t, sigma, &mut StdRng::seed_from_u64(9)).unwrap();
        let offsets: Vec<f64> = noisy.positions.iter().map(|p| p[0] - 8.0).collect();

        let mean = offsets.iter().sum::<f64>() / offsets.len() as f64;
        let var  = offsets.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / offsets.len() as f64;

        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var.sqrt() - sigma).abs() < 0.05, "std {}", var.sqrt());
    }

    #[test]
    fn test_original_is_untouched() {
        let t = flat(3);
        let _ = add_gaussian_noise(&t, 1.0, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(t.positions, vec![[8.0, 8.0]; 3]);
    }

    #[test]
    fn test_rejects_negative_or_nan_sigma() {
        let t = flat(3);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(add_gaussian_noise(&t, -0.1, &mut rng).is_err());
        assert!(add_gaussian_noise(&t, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn test_perturb_sample_records_sigma() {
        let mut s = TrajectorySample::new(0, Split::Train, flat(3));
        perturb_sample(&mut s, 0.25, &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(s.noise_std, 0.25);
        assert_ne!(s.trajectory.positions, vec![[8.0, 8.0]; 3]);
    }
}
