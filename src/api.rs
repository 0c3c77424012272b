use crate::{error::{KMeansError, Result}, memory::*, Termination};
use std::cell::RefCell;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, usize);

/// Iteration ceiling used, when none is configured.
pub const DEFAULT_MAX_ITER: usize = 300;

/// This is a structure holding various configuration options for a k-means calculation, such as
/// the random number generator to use, the amount of worker threads, or a couple of callbacks, that
/// can be set to get status information from a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **changed**: Amount of samples that moved to another cluster in this iteration
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// Amount of worker threads (0 = one per logical cpu)
    pub(crate) num_threads: usize,
    /// Iteration ceiling
    pub(crate) max_iter: usize
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            num_threads: 0,
            max_iter: DEFAULT_MAX_ITER
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("num_threads", &self.num_threads)
            .field("max_iter", &self.max_iter)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the random initial partitioning, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the amount of worker threads used for the calculation. The worker pool is created once per
    /// calculation. `1` calculates sequentially, `0` uses one worker per logical cpu.
    /// ## Note
    /// Results are only bit-reproducible for the same seed **and** the same amount of workers.
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.config.num_threads = num_threads; self
    }
    /// Set the maximum amount of iterations. At least one iteration is always done.
    /// ## Default
    /// [`DEFAULT_MAX_ITER`] (300)
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable, and therefore allowing
/// it to be used in parallel, without having to duplicate the input-data.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters in this result (requested k, clamped to `[1, sample_cnt]`)
/// - **distsum**: The total sum of (squared) distances from all samples to their respective centroids
/// - **centroids**: Calculated cluster centers [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to its respective cluster
/// - **iterations**: Amount of iterations that were done (0 for closed form results)
/// - **termination**: Why the calculation stopped
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<T>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub iterations: usize,
    pub termination: Termination,

    pub(crate) sample_dims: usize
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::zero(),
            centroids: vec![T::zero();sample_dims * k],
            centroid_frequency: vec![0usize;k],
            assignments: vec![0usize;sample_cnt],
            iterations: 0,
            termination: Termination::ClosedForm,
            sample_dims
        }
    }
    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.centroids.iter_mut().skip(self.sample_dims * idx).take(self.sample_dims)
                .zip(src)
                .for_each(|(c,s)| *c = s);
    }

    /// Feature vector of the centroid with index **idx**.
    pub fn centroid(&self, idx: usize) -> &[T] {
        &self.centroids[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }

    /// Amount of features each centroid has.
    pub fn sample_dims(&self) -> usize { self.sample_dims }

    pub(crate) fn update_cluster_frequencies(&mut self) {
        let centroid_frequency = &mut self.centroid_frequency;
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        self.assignments.iter().cloned()
            .for_each(|centroid_id| centroid_frequency[centroid_id] += 1);
    }
}




/// Entrypoint of this crate's API-Surface (the sample store).
///
/// Create an instance of this struct, giving the samples you want to operate on. The primitive type
/// of the passed samples array will be the type used internaly for all calculations, as well as the result
/// as stored in the returned [`KMeansState`] structure.
/// The samples are validated once, on construction: every sample has the same amount of features.
pub struct KMeans<T: Primitive> {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<T>
}
impl<T: Primitive> KMeans<T> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    ///
    /// ## Errors
    /// - [`KMeansError::EmptyDataset`] if there are no samples, or the samples have no features
    /// - [`KMeansError::ShapeMismatch`] if `samples.len() != sample_cnt * sample_dims`
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Result<Self> {
        if sample_cnt == 0 || sample_dims == 0 {
            return Err(KMeansError::EmptyDataset);
        }
        if samples.len() != sample_cnt * sample_dims {
            return Err(KMeansError::ShapeMismatch { expected: sample_cnt * sample_dims, got: samples.len() });
        }
        Ok(Self { sample_cnt, sample_dims, samples })
    }

    /// Create a new instance of the [`KMeans`] structure from one vector per sample.
    /// The amount of features is taken from the first row, all other rows have to match it.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let sample_dims = rows.first().map(|r| r.len()).ok_or(KMeansError::EmptyDataset)?;
        let sample_cnt = rows.len();
        let mut samples = Vec::with_capacity(sample_cnt * sample_dims);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != sample_dims {
                return Err(KMeansError::InconsistentRow { line: idx + 1, expected: sample_dims, got: row.len() });
            }
            samples.extend(row);
        }
        Self::new(samples, sample_cnt, sample_dims)
    }

    pub fn sample_cnt(&self) -> usize { self.sample_cnt }
    pub fn sample_dims(&self) -> usize { self.sample_dims }
    pub fn samples(&self) -> &[T] { &self.samples }

    /// Feature vector of the sample with index **idx**.
    pub fn sample(&self, idx: usize) -> &[T] {
        &self.samples[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }


    /// Lloyd's k-Means algorithm, starting from a random partition of the samples.
    ///
    /// Degenerate cluster counts are answered directly, without iterating:
    /// - `k <= 1`: one cluster, whose centroid is the mean over all samples
    /// - `k >= sample_cnt`: every sample is its own cluster
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result). Check its `termination` field
    /// to find out whether the calculation converged, or was stopped by the iteration ceiling.
    ///
    /// ## Errors
    /// [`KMeansError::ThreadPool`] if the worker pool could not be created.
    ///
    /// ## Example
    /// ```rust
    /// use pkmeans::*;
    /// use rand::prelude::*;
    ///
    /// let (sample_cnt, sample_dims, k) = (2000, 4, 3);
    /// let mut rnd = StdRng::seed_from_u64(42);
    /// let samples: Vec<f64> = (0..sample_cnt * sample_dims).map(|_| rnd.gen()).collect();
    ///
    /// let kmean = KMeans::new(samples, sample_cnt, sample_dims).unwrap();
    /// let conf = KMeansConfig::build().random_generator(rnd).num_threads(2).build();
    /// let result = kmean.kmeans_lloyd(k, &conf).unwrap();
    ///
    /// assert_eq!(result.assignments.len(), sample_cnt);
    /// assert_eq!(result.centroid_frequency.iter().sum::<usize>(), sample_cnt);
    /// ```
    pub fn kmeans_lloyd(&self, k: usize, config: &KMeansConfig<'_, T>) -> Result<KMeansState<T>> {
        crate::variants::calculate(self, k, config)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_samples() {
        assert!(matches!(KMeans::<f64>::new(vec![], 0, 3), Err(KMeansError::EmptyDataset)));
        assert!(matches!(KMeans::<f64>::new(vec![], 3, 0), Err(KMeansError::EmptyDataset)));
        assert!(matches!(KMeans::<f64>::from_rows(vec![]), Err(KMeansError::EmptyDataset)));
    }

    #[test]
    fn rejects_shape_mismatch() {
        let res = KMeans::new(vec![1.0f32, 2.0, 3.0], 2, 2);
        assert!(matches!(res, Err(KMeansError::ShapeMismatch { expected: 4, got: 3 })));
    }

    #[test]
    fn rejects_short_row() {
        let res = KMeans::from_rows(vec![vec![1.0f64, 2.0], vec![3.0, 4.0], vec![5.0]]);
        assert!(matches!(res, Err(KMeansError::InconsistentRow { line: 3, expected: 2, got: 1 })));
    }

    #[test]
    fn from_rows_flattens_row_major() {
        let kmean = KMeans::from_rows(vec![vec![1.0f64, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(kmean.sample_cnt(), 2);
        assert_eq!(kmean.sample_dims(), 2);
        assert_eq!(kmean.samples(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(kmean.sample(1), &[3.0, 4.0]);
    }

    #[test]
    fn cluster_frequencies_follow_assignments() {
        let mut state = KMeansState::<f64>::new(5, 1, 3);
        state.assignments = vec![2, 0, 2, 2, 0];
        state.update_cluster_frequencies();
        assert_eq!(state.centroid_frequency, vec![2, 0, 3]);
    }

    #[test]
    fn config_builder() {
        let conf = KMeansConfig::<f32>::build().num_threads(3).max_iter(7).build();
        assert_eq!(conf.num_threads, 3);
        assert_eq!(conf.max_iter, 7);
        assert_eq!(KMeansConfig::<f32>::default().max_iter, DEFAULT_MAX_ITER);
    }
}
