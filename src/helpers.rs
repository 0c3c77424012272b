pub(crate) fn multiple_roundup(val: usize, multiple_of: usize) -> usize {
    if val % multiple_of != 0 {
        val + multiple_of - (val % multiple_of)
    } else {
        val
    }
}

/// Amount of samples per worker, when splitting **sample_cnt** samples into **workers**
/// contiguous chunks. The last chunk may be shorter.
pub(crate) fn work_packet_size(sample_cnt: usize, workers: usize) -> usize {
    let workers = workers.max(1);
    (multiple_roundup(sample_cnt, workers) / workers).max(1)
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-12))
}

#[cfg(test)]
pub(crate) mod testing {
	use std::collections::HashMap;

	use crate::{KMeansState, Primitive};

	/// Compare two partitions, ignoring how the clusters are numbered.
	/// Returns the mapping (should -> actual) that was found.
	pub fn assert_same_partition(should: &[usize], actual: &[usize]) -> HashMap<usize, usize> {
		assert_eq!(should.len(), actual.len());
		let mut idmap = HashMap::new();
		let mut idrevmap = HashMap::new();
		for idx in 0..should.len() {
			let (should_id, actual_id) = (should[idx], actual[idx]);
			if !idmap.contains_key(&should_id) {
				assert_eq!(idrevmap.contains_key(&actual_id), false,
					"Cluster {} of actual result merges multiple expected clusters", actual_id);
				idmap.insert(should_id, actual_id);
				idrevmap.insert(actual_id, should_id);
			}
			if idmap[&should_id] != actual_id {
				panic!(
					"Cluster assignments different at idx {}.\nMapping(should -> actual): {:?}\nActual: {:?}\nShould: {:?}",
					idx, idmap, actual, should
				);
			}
		}
		idmap
	}

	/// Invariants every settled result has to fulfill.
	pub fn assert_settled<T: Primitive>(state: &KMeansState<T>, sample_cnt: usize) {
		assert_eq!(state.assignments.len(), sample_cnt);
		assert_eq!(state.centroid_frequency.len(), state.k);
		assert_eq!(state.centroids.len(), state.k * state.sample_dims);
		assert!(state.assignments.iter().all(|&a| a < state.k));
		assert_eq!(state.centroid_frequency.iter().sum::<usize>(), sample_cnt);
		for c in 0..state.k {
			let members = state.assignments.iter().filter(|&&a| a == c).count();
			assert_eq!(members, state.centroid_frequency[c]);
		}
	}

	/// Total squared distance from every sample to its assigned centroid, computed naively.
	pub fn objective<T: Primitive>(samples: &[T], state: &KMeansState<T>) -> T {
		samples.chunks_exact(state.sample_dims)
			.zip(state.assignments.iter().cloned())
			.map(|(s, a)| {
				s.iter().zip(state.centroid(a).iter())
					.map(|(&sv, &cv)| (sv - cv) * (sv - cv))
					.sum::<T>()
			})
			.sum()
	}
}
