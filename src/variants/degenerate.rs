use crate::{distance, KMeans, KMeansState, memory::*};

/// `k <= 1`: a single cluster, whose centroid is the mean over all samples.
/// Summation happens sequentially in sample order, so the result is bit-reproducible.
pub(crate) fn single_cluster<T: Primitive>(data: &KMeans<T>) -> KMeansState<T> {
    let mut state = KMeansState::new(data.sample_cnt, data.sample_dims, 1);
    let mut sums = vec![T::zero(); data.sample_dims];
    data.samples.chunks_exact(data.sample_dims)
        .for_each(|s| sums.iter_mut().zip(s.iter()).for_each(|(c, sv)| *c += sv));
    let cfreq = T::from(data.sample_cnt).unwrap();
    state.set_centroid_from_iter(0, sums.into_iter().map(|c| c / cfreq));
    state.centroid_frequency[0] = data.sample_cnt;

    state.distsum = data.samples.chunks_exact(data.sample_dims)
        .map(|s| distance::squared_euclidean(s, &state.centroids))
        .sum();
    state
}

/// `k >= sample_cnt`: every sample forms its own cluster, centroid `i` is a copy of sample `i`.
pub(crate) fn singletons<T: Primitive>(data: &KMeans<T>) -> KMeansState<T> {
    let mut state = KMeansState::new(data.sample_cnt, data.sample_dims, data.sample_cnt);
    state.centroids.copy_from_slice(&data.samples);
    state.centroid_frequency.iter_mut().for_each(|f| *f = 1);
    state.assignments.iter_mut().enumerate().for_each(|(i, a)| *a = i);
    state
}
