use crate::{KMeans, KMeansState, KMeansConfig, Termination, memory::*, reduction::Reducer};
use crate::abort_strategy::AbortStrategyLogic;
use rand::prelude::*;
use tracing::{debug, info, warn};

pub(crate) struct Lloyd<T: Primitive> {
    _p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
    /// Turn the accumulated sums into means. Clusters without members can never attract samples
    /// again, so they are moved to a random position in `[0, 1)` per feature instead.
    /// Returns the amount of re-seeded clusters.
    fn update_centroids(state: &mut KMeansState<T>, accumulated: CentroidAccumulator<T>, config: &KMeansConfig<'_, T>) -> usize {
        let mut reseeded = 0;
        let mut rnd = config.rnd.borrow_mut();
        state.centroids.chunks_exact_mut(state.sample_dims)
            .zip(accumulated.sums.chunks_exact(state.sample_dims))
            .zip(accumulated.counts.iter().cloned())
            .for_each(|((c, nc), cfreq)| {
                if cfreq > 0 {
                    let cfreq = T::from(cfreq).unwrap();
                    c.iter_mut().zip(nc.iter()).for_each(|(cv, &ncv)| *cv = ncv / cfreq);
                } else {
                    c.iter_mut().for_each(|cv| *cv = rnd.gen_range(T::zero()..T::one()));
                    reseeded += 1;
                }
            });
        state.centroid_frequency = accumulated.counts;
        reseeded
    }

    pub fn calculate(data: &KMeans<T>, k: usize, pool: &rayon::ThreadPool, config: &KMeansConfig<'_, T>) -> KMeansState<T> {
        debug_assert!(k > 1 && k < data.sample_cnt);

        let reducer = Reducer::new(pool, data.sample_cnt);
        info!(
            n = data.sample_cnt,
            k = k,
            dims = data.sample_dims,
            workers = pool.current_num_threads(),
            "starting lloyd k-means"
        );

        let mut state = KMeansState::new(data.sample_cnt, data.sample_dims, k);

        // Initialize clusters and notify subscriber
        crate::inits::randompartition::calculate(&reducer, &mut state, config);
        (config.init_done)(&state);
        let mut abort_strategy = AbortStrategyLogic::new(config.max_iter);

        let termination = loop {
            let accumulated = reducer.accumulate(&data.samples, data.sample_dims, &state.assignments, k);
            let reseeded = Self::update_centroids(&mut state, accumulated, config);
            let (changed, distsum) = reducer.reassign(&data.samples, data.sample_dims, &mut state.assignments, &state.centroids);
            state.distsum = distsum;

            let termination = abort_strategy.next(changed);
            state.iterations = abort_strategy.iterations();
            debug!(iteration = state.iterations, changed, reseeded, distsum = %distsum, "iteration done");

            // Notify subscriber about finished iteration
            (config.iteration_done)(&state, state.iterations, changed);
            if let Some(termination) = termination {
                break termination;
            }
        };

        // counts of the last accumulation describe the assignment before the final reassignment
        state.update_cluster_frequencies();
        state.termination = termination;

        match termination {
            Termination::IterationLimitReached { changed } => warn!(
                iterations = state.iterations,
                changed,
                "iteration limit reached before convergence, result may be suboptimal"
            ),
            _ => info!(iterations = state.iterations, distsum = %state.distsum, "k-means converged"),
        }
        state
    }
}
