//! # pkmeans - API documentation
//!
//! pkmeans partitions a set of samples into k clusters, using Lloyd's k-means algorithm on
//! shared-memory parallelism.
//!
//! ## Design target
//! The two expensive steps of every iteration, summing up the samples of every cluster and
//! moving every sample to its nearest centroid, are spread over a fixed pool of worker threads.
//! Samples are given as a raw, row-major vector, instead of any high-level arithmetics / matrix
//! crate such as nalgebra or ndarray.
//!
//! ## Algorithm
//! - Every sample starts in a uniformly chosen random cluster.
//! - Each iteration computes the cluster means, re-seeds clusters that ran empty to a random position in `[0, 1)`,
//!   and then moves every sample to the centroid with the smallest squared euclidean distance.
//! - The iteration stops once no sample changed its cluster, or after the iteration ceiling (300 by default).
//!   Check [`KMeansState::termination`] to distinguish both cases.
//! - `k <= 1` and `k >= sample_cnt` are answered in closed form, without iterating.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use pkmeans::*;
//! use rand::prelude::*;
//!
//! fn main() {
//!     let (sample_cnt, sample_dims, k) = (20000, 4, 4);
//!
//!     // Generate some random data
//!     let mut rnd = StdRng::seed_from_u64(1337);
//!     let samples = generate::uniform_samples(sample_cnt, sample_dims, 10.0f64, &mut rnd);
//!
//!     let kmean = KMeans::new(samples, sample_cnt, sample_dims).unwrap();
//!     let conf = KMeansConfig::build()
//!         .random_generator(rnd)
//!         .num_threads(4)
//!         .iteration_done(&|_, nr, changed| println!("Iteration {} - {} samples moved", nr, changed))
//!         .build();
//!     let result = kmean.kmeans_lloyd(k, &conf).unwrap();
//!
//!     println!("Centroids: {:?}", result.centroids);
//!     println!("Cluster-Assignments: {:?}", result.assignments);
//!     println!("Error: {} ({:?})", result.distsum, result.termination);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. This struct is generic over the underlying primitive
//! type, that should be used for the calculations. To use KMeans, an instance of this struct is created, taking
//! over the sample data into its ownership (validating that every sample has the same amount of features).
//! The [`io`] module creates such an instance from a text file.
//!
//! Calling [`KMeans::kmeans_lloyd`] does not mutate the struct, so multiple runs can be done in parallel.
//! Internally, a new instance of [`KMeansState`] is used to store the state (and finally the result) of a
//! K-Means calculation.
//!
//! Results are bit-reproducible for a seeded random generator and a fixed amount of worker threads. Different
//! amounts of workers partition the work differently, which changes the random initialization and the
//! order of floating point summation.

#[macro_use] mod helpers;
mod memory;
mod api;
mod abort_strategy;
mod distance;
mod reduction;
mod inits;
mod variants;
pub mod error;
pub mod generate;
pub mod io;

pub use abort_strategy::Termination;
pub use api::{KMeansState, KMeansConfig, KMeansConfigBuilder, KMeans, DEFAULT_MAX_ITER};
pub use distance::{nearest_centroid, squared_euclidean};
pub use error::{KMeansError, Result};
pub use memory::Primitive;
