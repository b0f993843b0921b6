//! # kcluster - API documentation
//!
//! kcluster is a small rust library for k-means centroid initialization and
//! Lloyd refinement.
//!
//! ## Design target
//! It's main target is high performance / throughput, you will therefore find
//! most of its API-surface rather plain.
//! An example of this is, that samples are given using a raw vector, instead of
//! any high-level arithmetics / matrix crate such as nalgebra or ndarray.
//! All distance computations run data-parallel over the samples (rayon), and
//! every nearest-centroid decision goes through the [`DistanceFunction`] seam,
//! so the numeric kernel is exchangeable.
//!
//! ## Supported centroid initializations
//! The outcome of each run depends on the initialization of its clusters.
//! Three initialization methods are implemented, all based on some degree of
//! (seeded, reproducible) randomness:
//! - Random-Sample (a.k.a. Forgy): k samples, uniformly without replacement
//! - K-means++: iterative distance-weighted selection, optionally with
//!   per-sample weights
//! - K-means||: oversampled variant of k-means++ whose expensive distance
//!   passes are embarrassingly parallel, reduced back down to k centroids by a
//!   weighted k-means++ pass
//!
//! For details, have a look at the documentation of [`KCluster`].
//!
//! ## Refinement
//! Lloyd's algorithm: alternate nearest-centroid assignment and centroid mean
//! recomputation until the assignment vector stops changing, or an iteration
//! cap is reached. Hitting the cap is reported through the `converged` flag of
//! the result, never as an error.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! Initialization methods and the refinement entry points can be combined at
//! will. Here is an example running the full pipeline with k-means++
//! initialization:
//!
//! ```rust
//! use kcluster::*;
//!
//! fn main() {
//!     let (sample_cnt, sample_dims, k, max_iter) = (3000, 16, 4, 100);
//!
//!     // Generate some random data
//!     let mut samples = vec![0.0f64; sample_cnt * sample_dims];
//!     samples.iter_mut().for_each(|v| *v = rand::random());
//!
//!     let kclust = KCluster::new(samples, sample_cnt, sample_dims).unwrap();
//!     let result = kclust
//!         .cluster(k, InitStrategy::KMeansPlusPlus, max_iter, &ClusterConfig::default())
//!         .unwrap();
//!
//!     println!("Centroids: {:?}", result.centroids);
//!     println!("Cluster-Assignments: {:?}", result.assignments);
//!     println!("Error: {}", result.distsum);
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kcluster::*;
//!
//! fn main() {
//!     let (sample_cnt, sample_dims, k, max_iter) = (3000, 16, 4, 100);
//!
//!     // Generate some random data
//!     let mut samples = vec![0.0f64; sample_cnt * sample_dims];
//!     samples.iter_mut().for_each(|v| *v = rand::random());
//!
//!     let conf = ClusterConfig::build()
//!         .init_done(&|_| println!("Initialization completed."))
//!         .iteration_done(&|s, nr, new_distsum|
//!             println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
//!                 nr, s.distsum, new_distsum, s.distsum - new_distsum))
//!         .seed(1)
//!         .build();
//!
//!     let kclust = KCluster::new(samples, sample_cnt, sample_dims).unwrap();
//!     let result = kclust
//!         .cluster(k, InitStrategy::KMeansParallel, max_iter, &conf)
//!         .unwrap();
//!
//!     println!("Error: {} (converged: {})", result.distsum, result.converged);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KCluster`] struct. This struct is
//! generic over the underlying primitive type, that should be used for the
//! calculations. To use it, an instance of this struct is created, taking over
//! the sample data into its ownership.
//!
//! **Note**: The input-data has to use the same primitive as the required
//! output-data (distances).
//!
//! The [`KCluster`] struct's instance-methods represent the supported
//! operations: [`KCluster::initialize`] produces initial centroids only,
//! [`KCluster::cluster`] and [`KCluster::lloyd`] run the full refinement.
//! Calling such a method does not mutate the struct, so multiple runs can be
//! done in parallel (the algorithm itself is already parallelized though).
//! Internally, a new instance of [`ClusterState`] is used to store the state
//! (and finally the result) of a calculation.
//!
//! The initialization-method implementations are static methods within the
//! [`KCluster`] struct, which are simply passed in as reference to
//! [`KCluster::lloyd`] (or selected through [`InitStrategy`]). Sizing and
//! configuration problems are reported through [`ClusterError`] before any
//! computation starts.

#[macro_use] mod helpers;
mod api;
mod cancellation;
mod distances;
mod error;
mod inits;
mod primitive;
mod variants;

pub use api::{ClusterConfig, ClusterConfigBuilder, ClusterState, DistanceFunction, InitStrategy, KCluster};
pub use cancellation::CancelToken;
pub use distances::EuclideanDistance;
pub use error::{ClusterError, Result};
pub use primitive::Primitive;
