//! Parallel building blocks of one Lloyd iteration.
//!
//! Samples are split into contiguous work packets of `ceil(sample_cnt / workers)` samples, one per
//! worker of the run's pool. Every packet is folded into a private [`CentroidAccumulator`], and the
//! partial results are then merged in packet order. Merging in a fixed order (instead of rayon's
//! work-stealing dependent reduce tree) keeps the floating point sums identical between runs that
//! use the same amount of workers.
use crate::{distance, helpers, memory::*};
use rayon::prelude::*;

pub(crate) struct Reducer<'p> {
    pool: &'p rayon::ThreadPool,
    work_packet_size: usize
}
impl<'p> Reducer<'p> {
    pub fn new(pool: &'p rayon::ThreadPool, sample_cnt: usize) -> Self {
        Self {
            pool,
            work_packet_size: helpers::work_packet_size(sample_cnt, pool.current_num_threads())
        }
    }

    pub fn work_packet_size(&self) -> usize { self.work_packet_size }

    /// Run **op** inside of the run's worker pool.
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        self.pool.install(op)
    }

    /// Sum up all samples per assigned cluster, and count the cluster's members.
    pub fn accumulate<T: Primitive>(&self, samples: &[T], sample_dims: usize, assignments: &[usize], k: usize) -> CentroidAccumulator<T> {
        let packet = self.work_packet_size;
        let partials: Vec<CentroidAccumulator<T>> = self.pool.install(|| {
            samples.par_chunks(packet * sample_dims)
                .zip(assignments.par_chunks(packet))
                .map(|(packet_samples, packet_assignments)| {
                    let mut local = CentroidAccumulator::new(k, sample_dims);
                    packet_samples.chunks_exact(sample_dims)
                        .zip(packet_assignments.iter().cloned())
                        .for_each(|(s, centroid_id)| local.add_sample(centroid_id, s));
                    local
                })
                .collect()
        });
        partials.into_iter()
            .reduce(CentroidAccumulator::merge)
            .unwrap_or_else(|| CentroidAccumulator::new(k, sample_dims))
    }

    /// Move every sample to its nearest centroid.
    ///
    /// ## Returns
    /// - Amount of samples whose cluster changed
    /// - Sum of squared distances from every sample to its (new) centroid
    pub fn reassign<T: Primitive>(&self, samples: &[T], sample_dims: usize, assignments: &mut [usize], centroids: &[T]) -> (usize, T) {
        let packet = self.work_packet_size;
        let partials: Vec<(usize, T)> = self.pool.install(|| {
            samples.par_chunks(packet * sample_dims)
                .zip(assignments.par_chunks_mut(packet))
                .map(|(packet_samples, packet_assignments)| {
                    let mut changed = 0usize;
                    let mut distsum = T::zero();
                    packet_samples.chunks_exact(sample_dims)
                        .zip(packet_assignments.iter_mut())
                        .for_each(|(s, assignment)| {
                            let (best_idx, best_dist) = distance::nearest_centroid(s, centroids);
                            if best_idx != *assignment {
                                *assignment = best_idx;
                                changed += 1;
                            }
                            distsum += best_dist;
                        });
                    (changed, distsum)
                })
                .collect()
        });
        partials.into_iter()
            .fold((0, T::zero()), |(c0, d0), (c1, d1)| (c0 + c1, d0 + d1))
    }
}
