use crate::memory::Primitive;
use rand::prelude::*;

/// Generate **sample_cnt** samples with **sample_dims** features each [row-major], every feature
/// drawn uniformly from `[0, max_value)`.
pub fn uniform_samples<T: Primitive, R: Rng + ?Sized>(sample_cnt: usize, sample_dims: usize, max_value: T, rnd: &mut R) -> Vec<T> {
    (0..sample_cnt * sample_dims)
        .map(|_| rnd.gen_range(T::zero()..max_value))
        .collect()
}
