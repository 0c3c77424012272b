use num::{NumCast, Zero, Float};
use std::{
    fmt::{Debug, Display, LowerExp}, iter::Sum, ops::{Add, AddAssign, Sub, SubAssign}
};
use rand::distributions::uniform::SampleUniform;

pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}


/// Per-cluster feature sums and member counts for one accumulation pass.
///
/// Both buffers are sized once at construction ([row-major] = [<sum0>,<sum1>,...]).
/// Accumulators form a commutative monoid under [`CentroidAccumulator::merge`]; every worker
/// folds its chunk into a private instance.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CentroidAccumulator<T: Primitive> {
    pub(crate) sums: Vec<T>,
    pub(crate) counts: Vec<usize>,
    sample_dims: usize
}
impl<T: Primitive> CentroidAccumulator<T> {
    pub fn new(k: usize, sample_dims: usize) -> Self {
        Self {
            sums: vec![T::zero();k * sample_dims],
            counts: vec![0usize;k],
            sample_dims
        }
    }

    #[inline(always)]
    pub fn add_sample(&mut self, centroid_id: usize, sample: &[T]) {
        self.sums.iter_mut().skip(centroid_id * self.sample_dims).take(self.sample_dims)
            .zip(sample.iter())
            .for_each(|(c,s)| *c += s);
        self.counts[centroid_id] += 1;
    }

    pub fn merge(mut self, other: Self) -> Self {
        debug_assert_eq!(self.sums.len(), other.sums.len());
        self.sums.iter_mut().zip(other.sums.iter()).for_each(|(a,b)| *a += b);
        self.counts.iter_mut().zip(other.counts.iter()).for_each(|(a,b)| *a += b);
        self
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_and_merge() {
        let mut a = CentroidAccumulator::<f64>::new(2, 2);
        a.add_sample(0, &[1.0, 2.0]);
        a.add_sample(1, &[10.0, 10.0]);
        let mut b = CentroidAccumulator::<f64>::new(2, 2);
        b.add_sample(0, &[3.0, 4.0]);

        let merged = a.clone().merge(b.clone());
        assert_eq!(merged.sums, vec![4.0, 6.0, 10.0, 10.0]);
        assert_eq!(merged.counts, vec![2, 1]);
        // merge order does not matter for counts, nor for exactly representable sums
        assert_eq!(b.merge(a), merged);
    }

    #[test]
    fn empty_accumulator_is_neutral() {
        let mut a = CentroidAccumulator::<f32>::new(3, 1);
        a.add_sample(2, &[0.5]);
        let merged = CentroidAccumulator::new(3, 1).merge(a.clone());
        assert_eq!(merged, a);
    }
}
