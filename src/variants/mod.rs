mod degenerate;
mod lloyd;

use crate::{error::Result, KMeans, KMeansConfig, KMeansState, memory::*};
use tracing::debug;

pub(crate) use lloyd::Lloyd;

/// Algorithm chosen for a requested cluster count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Variant {
    /// `k <= 1`
    SingleCluster,
    /// `k >= sample_cnt`
    Singletons,
    /// `1 < k < sample_cnt`
    Lloyd
}
impl Variant {
    pub fn select(k: usize, sample_cnt: usize) -> Self {
        if k <= 1 {
            Variant::SingleCluster
        } else if k >= sample_cnt {
            Variant::Singletons
        } else {
            Variant::Lloyd
        }
    }
}

pub(crate) fn calculate<T: Primitive>(data: &KMeans<T>, k: usize, config: &KMeansConfig<'_, T>) -> Result<KMeansState<T>> {
    let variant = Variant::select(k, data.sample_cnt);
    debug!(k, n = data.sample_cnt, ?variant, "selected k-means variant");
    Ok(match variant {
        Variant::SingleCluster => degenerate::single_cluster(data),
        Variant::Singletons => degenerate::singletons(data),
        Variant::Lloyd => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.num_threads)
                .thread_name(|i| format!("pkmeans-worker-{}", i))
                .build()?;
            Lloyd::calculate(data, k, &pool, config)
        }
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Termination;

    #[test]
    fn variant_selection() {
        assert_eq!(Variant::select(0, 10), Variant::SingleCluster);
        assert_eq!(Variant::select(1, 10), Variant::SingleCluster);
        assert_eq!(Variant::select(2, 10), Variant::Lloyd);
        assert_eq!(Variant::select(9, 10), Variant::Lloyd);
        assert_eq!(Variant::select(10, 10), Variant::Singletons);
        assert_eq!(Variant::select(11, 10), Variant::Singletons);
        assert_eq!(Variant::select(1, 1), Variant::SingleCluster);
    }

    #[test]
    fn degenerate_results_ignore_worker_count() {
        let samples: Vec<f64> = (0..60).map(|i| (i as f64).sqrt()).collect();
        let kmean = KMeans::new(samples.clone(), 20, 3).unwrap();
        for k in [0usize, 1, 20, 25] {
            let results: Vec<KMeansState<f64>> = [1usize, 2, 8].iter()
                .map(|&workers| kmean.kmeans_lloyd(k, &KMeansConfig::build().num_threads(workers).build()).unwrap())
                .collect();
            for res in &results {
                assert_eq!(res.termination, Termination::ClosedForm);
                assert_eq!(res.iterations, 0);
                assert_eq!(res.centroids, results[0].centroids);
                assert_eq!(res.assignments, results[0].assignments);
            }
        }
    }

    #[test]
    fn k_above_sample_cnt_yields_singletons() {
        let samples: Vec<f64> = (0..60).map(|i| (i as f64).sqrt()).collect();
        let kmean = KMeans::new(samples, 20, 3).unwrap();
        for workers in [1usize, 4] {
            let res = kmean.kmeans_lloyd(25, &KMeansConfig::build().num_threads(workers).build()).unwrap();
            assert_eq!(res.k, 20);
            assert_eq!(res.centroids.len(), 20 * 3);
            for i in 0..20 {
                assert_eq!(res.centroid(i), kmean.sample(i));
            }
            assert_eq!(res.assignments, (0..20).collect::<Vec<_>>());
            assert_eq!(res.centroid_frequency, vec![1; 20]);
            assert_eq!(res.distsum, 0.0);
        }
    }

    #[test]
    fn k_equal_to_sample_cnt() {
        let kmean = KMeans::from_rows(vec![vec![1.0f32, 2.0], vec![3.0, 4.0], vec![-5.0, 0.5]]).unwrap();
        let res = kmean.kmeans_lloyd(3, &KMeansConfig::default()).unwrap();
        assert_eq!(res.k, 3);
        assert_eq!(res.centroids, vec![1.0, 2.0, 3.0, 4.0, -5.0, 0.5]);
        assert_eq!(res.assignments, vec![0, 1, 2]);
        assert_eq!(res.centroid_frequency, vec![1, 1, 1]);
    }

    #[test]
    fn k_one_is_mean() {
        let kmean = KMeans::from_rows(vec![vec![2.0f64], vec![4.0], vec![9.0]]).unwrap();
        let res = kmean.kmeans_lloyd(1, &KMeansConfig::default()).unwrap();
        assert_eq!(res.centroids, vec![5.0]);
        assert_eq!(res.assignments, vec![0, 0, 0]);
        assert_eq!(res.centroid_frequency, vec![3]);
    }
}
