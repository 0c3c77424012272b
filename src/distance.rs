use crate::memory::Primitive;

/// Squared euclidean distance between two feature vectors of the same length.
#[inline(always)]
pub fn squared_euclidean<T: Primitive>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter())
        .map(|(&av, &bv)| bv - av)      // <centroid> - <sample>
        .map(|v| v * v)                 // <vec_components> ^2
        .sum()
}

/// Index of (and squared distance to) the centroid closest to **sample**.
///
/// ## Arguments
/// - **sample**: Feature vector of the sample to evaluate
/// - **centroids**: Centroids [row-major] = [<centroid0>,<centroid1>,...], each `sample.len()` long
///
/// Ties are resolved towards the lowest centroid index. If no distance compares smaller than
/// infinity (e.g. all NaN), or the sample has no features, centroid 0 is returned.
#[inline]
pub fn nearest_centroid<T: Primitive>(sample: &[T], centroids: &[T]) -> (usize, T) {
    let mut best = (0usize, T::infinity());
    if sample.is_empty() {
        return best;
    }
    for (idx, c) in centroids.chunks_exact(sample.len()).enumerate() {
        let dist = squared_euclidean(sample, c);
        if dist < best.1 {
            best = (idx, dist);
        }
    }
    best
}
