use crate::{KMeansState, KMeansConfig, memory::*, reduction::Reducer};
use rand::prelude::*;
use rayon::prelude::*;

/// Derive the seed of the random generator used by the worker processing work packet **packet_id**.
#[inline(always)]
pub(crate) fn worker_seed(base_seed: u64, packet_id: usize) -> u64 {
	base_seed ^ (packet_id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Random-Partition initialization
///
/// Every sample is put into a uniformly chosen cluster in `[0, k)`. Each work packet draws from its own
/// generator, seeded from a base seed (taken from the configured generator) combined with the packet id.
/// With a seeded generator and a fixed amount of workers, the partition is reproducible.
pub(crate) fn calculate<T: Primitive>(reducer: &Reducer<'_>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) {
	let k = state.k;
	let base_seed = config.rnd.borrow_mut().next_u64();
	let packet = reducer.work_packet_size();

	reducer.install(|| {
		state.assignments.par_chunks_mut(packet)
			.enumerate()
			.for_each(|(packet_id, assignments)| {
				let mut rnd = StdRng::seed_from_u64(worker_seed(base_seed, packet_id));
				assignments.iter_mut().for_each(|a| *a = rnd.gen_range(0..k));
			});
	});
}


#[cfg(test)]
mod tests {
	use super::*;

	fn partition(seed: u64, workers: usize, sample_cnt: usize, k: usize) -> Vec<usize> {
		let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build().unwrap();
		let reducer = Reducer::new(&pool, sample_cnt);
		let conf = KMeansConfig::<f64>::build().random_generator(StdRng::seed_from_u64(seed)).build();
		let mut state = KMeansState::<f64>::new(sample_cnt, 1, k);
		calculate(&reducer, &mut state, &conf);
		state.assignments
	}

	#[test]
	fn assignments_in_range() {
		let assignments = partition(1, 4, 10_000, 7);
		assert!(assignments.iter().all(|&a| a < 7));
		// every cluster receives members with overwhelming probability
		for c in 0..7 {
			assert!(assignments.iter().filter(|&&a| a == c).count() > 1000);
		}
	}

	#[test]
	fn reproducible_for_same_seed_and_workers() {
		assert_eq!(partition(42, 3, 1000, 5), partition(42, 3, 1000, 5));
		assert_ne!(partition(42, 3, 1000, 5), partition(43, 3, 1000, 5));
	}

	#[test]
	fn workers_use_independent_streams() {
		// with identical streams, every packet would start with the same assignments
		let assignments = partition(5, 4, 400, 1000);
		let packets: Vec<&[usize]> = assignments.chunks(100).collect();
		assert_ne!(packets[0][..10], packets[1][..10]);
		assert_ne!(packets[1][..10], packets[2][..10]);
		assert_ne!(worker_seed(5, 0), worker_seed(5, 1));
	}
}
