// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Randomly shuffles samples and splits them into two sets:
//   - Training set:   sequences a model is fitted on
//   - Validation set: held-out sequences from the SAME physics
//                     ranges, to measure in-distribution error
//
// (Out-of-distribution data is generated separately with its
// own parameter ranges, never carved out of this split.)
//
// Why shuffle before splitting?
//   Samples are generated in order. Shuffling keeps any drift in
//   the generator (e.g. a changed config mid-run when datasets
//   are concatenated) from ending up entirely in one split.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom with the
// caller's RNG, so a seeded run always yields the same split.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::{seq::SliceRandom, Rng};

/// Shuffle `samples` with `rng` and split into (train, validation).
///
/// # Arguments
/// * `samples`        - All available samples (consumed by this function)
/// * `train_fraction` - Proportion for training, e.g. 0.8 = 80%
/// * `rng`            - Source of randomness for the shuffle
///
/// # Returns
/// A tuple (train_samples, val_samples)
pub fn split_train_val<T, R: Rng + ?Sized>(
    mut samples:    Vec<T>,
    train_fraction: f64,
    rng:            &mut R,
) -> (Vec<T>, Vec<T>) {
    samples.shuffle(rng);

    // e.g. 100 samples * 0.8 = 80 → first 80 are training
    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction.clamp(0.0, 1.0)).round() as usize;

    // Clamp to valid range to avoid panics on tiny datasets
    let split_at = split_at.min(total);

    // split_off(n) removes elements [n..] from the Vec and returns them
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation ({}% / {}%)",
        samples.len(),
        val.len(),
        (samples.len() * 100) / total.max(1),
        (val.len()     * 100) / total.max(1),
    );

    (samples, val)
}
