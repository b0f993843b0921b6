use crate::cancellation::CancelToken;
use crate::distances::EuclideanDistance;
use crate::error::{ClusterError, Result};
use crate::primitive::Primitive;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&ClusterState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&ClusterState<T>, usize, T);

/// Capability to compute the (squared) distance between two equally sized
/// coordinate slices. All nearest-centroid decisions in this crate go through
/// this seam, so the numeric kernel is exchangeable without touching the
/// algorithms.
pub trait DistanceFunction<T: Primitive>: Sync {
    fn distance(&self, a: &[T], b: &[T]) -> T;
}

/// This is a structure holding various configuration options for a clustering
/// calculation, such as the random number generator to use, the optional
/// per-sample weights consumed by the k-means++ initialization, or a couple of
/// callbacks that can be set to get status information from a running
/// calculation.
///
/// For more detailed information about all possible options, have a look at
/// [`ClusterConfigBuilder`].
pub struct ClusterConfig<'a, T: Primitive> {
    /// Callback that is called when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`ClusterState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each refinement iteration
    /// ## Arguments
    /// - **state**: Current [`ClusterState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// Per-sample weights for the k-means++ initialization (uniform when unset)
    pub(crate) weights: Option<Vec<T>>,
    /// Oversampling factor ℓ for the k-means|| initialization (defaults to k)
    pub(crate) oversample_factor: Option<f64>,
    /// Cooperative cancellation handle, checked between iterations
    pub(crate) cancel: CancelToken,
}
impl<'a, T: Primitive> Default for ClusterConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            rnd: Box::new(RefCell::new(ChaCha8Rng::seed_from_u64(0))),
            weights: None,
            oversample_factor: None,
            cancel: CancelToken::new(),
        }
    }
}
impl<'a, T: Primitive> ClusterConfig<'a, T> {
    /// Use the [`ClusterConfigBuilder`] to build a [`ClusterConfig`] instance.
    pub fn build() -> ClusterConfigBuilder<'a, T> {
        ClusterConfigBuilder { config: ClusterConfig::default() }
    }
}
impl<'a, T: Primitive> fmt::Debug for ClusterConfig<'a, T> {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result { Ok(()) }
}

pub struct ClusterConfigBuilder<'a, T: Primitive> {
    config: ClusterConfig<'a, T>,
}
impl<'a, T: Primitive> ClusterConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the calculation.
    /// The default is a generator seeded with 0, so repeated runs with an
    /// untouched configuration are deterministic.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Seed the default random number generator. Shorthand for
    /// [`ClusterConfigBuilder::random_generator`] with a seeded generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.rnd = Box::new(RefCell::new(ChaCha8Rng::seed_from_u64(seed))); self
    }
    /// Set per-sample weights for the k-means++ initialization. The sampling
    /// score of a sample is its weight multiplied by its squared distance to
    /// the nearest already chosen centroid. Must contain one non-negative,
    /// finite value per sample.
    pub fn weights(mut self, weights: Vec<T>) -> Self {
        self.config.weights = Some(weights); self
    }
    /// Set the oversampling factor ℓ used by the k-means|| initialization.
    /// Each oversampling round includes every sample with probability
    /// `min(1, ℓ·d²/cost)`.
    /// ## Default
    /// The requested cluster count k
    pub fn oversample_factor(mut self, oversample_factor: f64) -> Self {
        self.config.oversample_factor = Some(oversample_factor); self
    }
    /// Attach a cancellation token. Cancelling it makes a running calculation
    /// return its current state (with `converged = false`) at the next
    /// iteration boundary.
    pub fn cancel_token(mut self, cancel: CancelToken) -> Self {
        self.config.cancel = cancel; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> ClusterConfig<'a, T> { self.config }
}

/// Centroid initialization strategy, for use with the strategy-dispatching
/// entry points [`KCluster::initialize`] and [`KCluster::cluster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStrategy {
    /// Choose k samples uniformly at random, without replacement.
    Random,
    /// K-means++ (optionally weighted) as described by Arthur/Vassilvitskii.
    KMeansPlusPlus,
    /// K-means|| oversampled initialization (Bahmani et al.).
    KMeansParallel,
}
impl fmt::Display for InitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStrategy::Random => write!(f, "random"),
            InitStrategy::KMeansPlusPlus => write!(f, "kmeans++"),
            InitStrategy::KMeansParallel => write!(f, "kmeans||"),
        }
    }
}
impl FromStr for InitStrategy {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "kmeans++" | "k-means++" | "kmeanspp" => Ok(Self::KMeansPlusPlus),
            "kmeans||" | "k-means||" | "kmeansparallel" | "kmeans-parallel" => Ok(Self::KMeansParallel),
            other => Err(ClusterError::Config(format!(
                "unsupported init strategy '{other}'"
            ))),
        }
    }
}

/// This is the internally used data-structure, storing the current state during
/// a calculation, as well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KCluster`] immutable, and
/// therefore allowing it to be used in parallel, without having to duplicate
/// the input-data.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this result
/// - **distsum**: The total sum of (squared) distances from all samples to their respective centroids
/// - **centroids**: Calculated cluster centers [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to its respective nearest cluster
/// - **centroid_distances**: Vector containing each sample's (squared) distance to its centroid
/// - **iterations**: Amount of refinement iterations that were executed
/// - **converged**: Whether the run terminated because the assignments
///   stabilized (true), or because it hit the iteration cap / was cancelled (false)
#[derive(Clone, Debug)]
pub struct ClusterState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<T>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub iterations: usize,
    pub converged: bool,

    pub(crate) sample_dims: usize,
}
impl<T: Primitive> ClusterState<T> {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::zero(),
            centroids: vec![T::zero(); sample_dims * k],
            centroid_frequency: vec![0usize; k],
            assignments: vec![0usize; sample_cnt],
            centroid_distances: vec![T::infinity(); sample_cnt],
            iterations: 0,
            converged: false,
            sample_dims,
        }
    }
    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.centroids.iter_mut().skip(self.sample_dims * idx).take(self.sample_dims)
                .zip(src)
                .for_each(|(c, s)| *c = s);
    }
}

/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate
/// on. The primitive type of the passed samples array will be the type used
/// internally for all calculations, as well as the result as stored in the
/// returned [`ClusterState`] structure.
///
/// ## Supported refinement
/// - Lloyd's algorithm [`KCluster::lloyd`] (also reachable through [`KCluster::cluster`])
///
/// ## Supported initialization methods
/// - Random-Sample (a.k.a. Forgy) [`KCluster::init_random_sample`]
/// - K-means++, optionally weighted [`KCluster::init_kmeanplusplus`]
/// - K-means|| [`KCluster::init_kmeansparallel`]
/// - Precomputed centroids [`KCluster::init_precomputed`]
pub struct KCluster<T, D = EuclideanDistance>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<T>,
    pub(crate) distance: D,
}

impl<T: Primitive> KCluster<T, EuclideanDistance> {
    /// Create a new instance of the [`KCluster`] structure, using squared
    /// euclidean distance.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **samples** vector has
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Result<Self> {
        Self::with_distance(samples, sample_cnt, sample_dims, EuclideanDistance)
    }
}

impl<T, D> KCluster<T, D>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    /// Create a new instance of the [`KCluster`] structure with a custom
    /// [`DistanceFunction`].
    pub fn with_distance(samples: Vec<T>, sample_cnt: usize, sample_dims: usize, distance: D) -> Result<Self> {
        if sample_dims == 0 {
            return Err(ClusterError::Dimensions("sample_dims must be at least 1".into()));
        }
        if samples.len() != sample_cnt * sample_dims {
            return Err(ClusterError::Dimensions(format!(
                "got {} coordinates for {} samples of {} dimensions",
                samples.len(), sample_cnt, sample_dims
            )));
        }
        Ok(Self { sample_cnt, sample_dims, samples, distance })
    }

    /// Fail-fast validation of the run parameters, done before any computation.
    fn validate_run(&self, k: usize, config: &ClusterConfig<'_, T>) -> Result<()> {
        if k < 1 {
            return Err(ClusterError::Sizing("k must be at least 1".into()));
        }
        if k > self.sample_cnt {
            return Err(ClusterError::Sizing(format!(
                "requested {} clusters from only {} samples", k, self.sample_cnt
            )));
        }
        if let Some(weights) = &config.weights {
            if weights.len() != self.sample_cnt {
                return Err(ClusterError::Config(format!(
                    "got {} weights for {} samples", weights.len(), self.sample_cnt
                )));
            }
            if weights.iter().any(|w| !w.is_finite() || *w < T::zero()) {
                return Err(ClusterError::Config(
                    "weights must be non-negative and finite".into(),
                ));
            }
        }
        if let Some(oversample_factor) = config.oversample_factor {
            if !oversample_factor.is_finite() || oversample_factor <= 0.0 {
                return Err(ClusterError::Config(format!(
                    "oversample_factor must be positive and finite, got {oversample_factor}"
                )));
            }
        }
        Ok(())
    }

    /// Recompute each sample's squared distance to its currently assigned
    /// centroid, leaving the assignments untouched.
    pub(crate) fn update_centroid_distances(&self, state: &mut ClusterState<T>) {
        let centroids = &state.centroids;
        let dims = self.sample_dims;
        let distance = &self.distance;

        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        let work_packet_size = (self.sample_cnt / rayon::current_num_threads()).max(1);
        self.samples.par_chunks_exact(dims)
            .with_min_len(work_packet_size)
            .zip(state.assignments.par_iter().cloned())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let centroid = &centroids[assignment * dims..(assignment + 1) * dims];
                *centroid_dist = distance.distance(s, centroid);
            });
    }

    /// Assign every sample to its nearest centroid and store the squared
    /// distance alongside. Ties are broken towards the lowest centroid index,
    /// so repeated runs over identical data are reproducible.
    pub(crate) fn update_cluster_assignments(&self, state: &mut ClusterState<T>) {
        let centroids = &state.centroids;
        let k = state.k;
        let dims = self.sample_dims;
        let distance = &self.distance;

        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        let work_packet_size = (self.sample_cnt / rayon::current_num_threads()).max(1);
        self.samples.par_chunks_exact(dims)
            .with_min_len(work_packet_size)
            .zip(state.assignments.par_iter_mut())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let mut best_idx = 0usize;
                let mut best_dist = T::infinity();
                for (ci, c) in centroids.chunks_exact(dims).take(k).enumerate() {
                    let dist = distance.distance(s, c);
                    if dist < best_dist {
                        best_idx = ci;
                        best_dist = dist;
                    }
                }
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
    }

    pub(crate) fn update_cluster_frequencies(&self, assignments: &[usize], centroid_frequency: &mut [usize]) {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        assignments.iter().cloned()
            .for_each(|centroid_id| {
                centroid_frequency[centroid_id] += 1;
            });
    }

    /// Lloyd's algorithm: iterate nearest-centroid assignment and centroid
    /// mean recomputation until the assignment vector stops changing, or until
    /// **max_iter** is reached. Hitting the iteration cap is not an error; it
    /// is reported through the `converged` flag of the returned state.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **max_iter**: Hard cap on the amount of iterations
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`ClusterConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`ClusterState`], containing the final state (result).
    ///
    /// ## Example
    /// ```rust
    /// use kcluster::*;
    ///
    /// let (sample_cnt, sample_dims, k, max_iter) = (3000, 8, 4, 100);
    ///
    /// // Generate some random data
    /// let mut samples = vec![0.0f64; sample_cnt * sample_dims];
    /// samples.iter_mut().for_each(|v| *v = rand::random());
    ///
    /// let kclust = KCluster::new(samples, sample_cnt, sample_dims).unwrap();
    /// let result = kclust.lloyd(k, max_iter, KCluster::init_kmeanplusplus, &ClusterConfig::default()).unwrap();
    ///
    /// println!("Centroids: {:?}", result.centroids);
    /// println!("Cluster-Assignments: {:?}", result.assignments);
    /// println!("Error: {}", result.distsum);
    /// ```
    pub fn lloyd<'a, F>(&self, k: usize, max_iter: usize, init: F, config: &ClusterConfig<'a, T>) -> Result<ClusterState<T>>
            where for<'c> F: FnOnce(&KCluster<T, D>, &mut ClusterState<T>, &ClusterConfig<'c, T>) {
        self.validate_run(k, config)?;
        if max_iter == 0 {
            return Err(ClusterError::Config("max_iter must be at least 1".into()));
        }
        Ok(crate::variants::Lloyd::calculate(self, k, max_iter, init, config))
    }

    /// Produce k initial centroids with the given strategy, without running
    /// any refinement.
    ///
    /// ## Returns
    /// The centroids [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
    pub fn initialize(&self, strategy: InitStrategy, k: usize, config: &ClusterConfig<'_, T>) -> Result<Vec<T>> {
        self.validate_run(k, config)?;
        let mut state = ClusterState::new(self.sample_cnt, self.sample_dims, k);
        match strategy {
            InitStrategy::Random => Self::init_random_sample(self, &mut state, config),
            InitStrategy::KMeansPlusPlus => Self::init_kmeanplusplus(self, &mut state, config),
            InitStrategy::KMeansParallel => Self::init_kmeansparallel(self, &mut state, config),
        }
        (config.init_done)(&state);
        Ok(state.centroids)
    }

    /// Initialize with the given strategy and refine with Lloyd's algorithm.
    /// Shorthand for [`KCluster::lloyd`] with the strategy's init method.
    pub fn cluster(&self, k: usize, strategy: InitStrategy, max_iter: usize, config: &ClusterConfig<'_, T>) -> Result<ClusterState<T>> {
        match strategy {
            InitStrategy::Random => self.lloyd(k, max_iter, Self::init_random_sample, config),
            InitStrategy::KMeansPlusPlus => self.lloyd(k, max_iter, Self::init_kmeanplusplus, config),
            InitStrategy::KMeansParallel => self.lloyd(k, max_iter, Self::init_kmeansparallel, config),
        }
    }

    /// K-means++ initialization method
    ///
    /// ## Description
    /// This initialization method starts by selecting one sample uniformly at
    /// random as first centroid. Proceeding from there, the method iteratively
    /// selects one new centroid (per iteration), where each sample's
    /// probability of being selected is proportional to its squared distance
    /// to the nearest already chosen centroid, multiplied by its weight (see
    /// [`ClusterConfigBuilder::weights`]; uniform when unset). This leads to a
    /// tendency of selecting centroids that are far away from the already
    /// chosen ones.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KCluster`].
    pub fn init_kmeanplusplus<'a>(kclust: &KCluster<T, D>, state: &mut ClusterState<T>, config: &ClusterConfig<'a, T>) {
        crate::inits::kmeanplusplus::calculate(kclust, state, config);
    }

    /// K-means|| initialization method
    ///
    /// ## Description
    /// Oversampling variant of k-means++. Instead of drawing one centroid per
    /// pass over the data, each oversampling round includes every sample as a
    /// candidate with an independent probability proportional to its squared
    /// distance to the nearest existing candidate. The oversampled candidate
    /// set is then reduced to exactly k centroids by running weighted
    /// k-means++ over it, weighted by how many samples each candidate
    /// represents.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KCluster`].
    pub fn init_kmeansparallel<'a>(kclust: &KCluster<T, D>, state: &mut ClusterState<T>, config: &ClusterConfig<'a, T>) {
        crate::inits::kmeansparallel::calculate(kclust, state, config);
    }

    /// Random sample initialization method (a.k.a. Forgy)
    ///
    /// ## Description
    /// This initialization method randomly selects k samples as initial
    /// centroids (uniformly, without replacement).
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KCluster`].
    pub fn init_random_sample<'a>(kclust: &KCluster<T, D>, state: &mut ClusterState<T>, config: &ClusterConfig<'a, T>) {
        crate::inits::randomsample::calculate(kclust, state, config);
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Returns an initialization method that copies the passed centroids
    /// [row-major] into the calculation. Use this to refine centroids that
    /// were produced by an earlier run (or by [`KCluster::initialize`]).
    pub fn init_precomputed(centroids: Vec<T>) -> impl for<'c> FnOnce(&KCluster<T, D>, &mut ClusterState<T>, &ClusterConfig<'c, T>) {
        move |kclust, state, config| {
            crate::inits::precomputed::calculate(kclust, state, config, centroids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_band_samples(sample_dims: usize) -> (Vec<f64>, usize) {
        // Deterministic, irregular data spread over two value bands
        let sample_cnt = 60;
        let mut samples = Vec::with_capacity(sample_cnt * sample_dims);
        for i in 0..sample_cnt {
            for d in 0..sample_dims {
                let base = if i % 2 == 0 { 0.0 } else { 50.0 };
                samples.push(base + ((i * 7 + d * 13) % 23) as f64 * 0.5);
            }
        }
        (samples, sample_cnt)
    }

    #[test]
    fn cluster_assignments_match_naive_scan() {
        for sample_dims in [1, 2, 3, 17, 64] {
            let (samples, sample_cnt) = two_band_samples(sample_dims);
            let k = 5;
            let kclust = KCluster::new(samples, sample_cnt, sample_dims).unwrap();

            let mut state = ClusterState::new(sample_cnt, sample_dims, k);
            state.centroids.iter_mut()
                .zip(kclust.samples.iter())
                .for_each(|(c, s)| *c = *s);

            // calculate assignments using a naive scan that (hopefully) works.
            let mut should_assignments = state.assignments.clone();
            let mut should_distances = state.centroid_distances.clone();
            kclust.samples.chunks_exact(sample_dims)
                .zip(should_assignments.iter_mut())
                .zip(should_distances.iter_mut())
                .for_each(|((s, assignment), centroid_dist)| {
                    let mut best = (0usize, f64::INFINITY);
                    for (ci, c) in state.centroids.chunks_exact(sample_dims).enumerate() {
                        let d: f64 = s.iter().zip(c.iter()).map(|(sv, cv)| (sv - cv) * (sv - cv)).sum();
                        if d < best.1 {
                            best = (ci, d);
                        }
                    }
                    *assignment = best.0;
                    *centroid_dist = best.1;
                });

            kclust.update_cluster_assignments(&mut state);

            assert_eq!(state.assignments, should_assignments);
            for i in 0..should_distances.len() {
                assert_approx_eq!(state.centroid_distances[i], should_distances[i], 1e-10f64);
            }
        }
    }

    #[test]
    fn assignment_ties_go_to_the_lowest_index() {
        // Two identical centroids: every sample must be assigned to index 0
        let samples = vec![1.0f64, 2.0, 3.0, 4.0];
        let kclust = KCluster::new(samples, 4, 1).unwrap();
        let mut state = ClusterState::new(4, 1, 2);
        state.centroids = vec![2.5, 2.5];
        kclust.update_cluster_assignments(&mut state);
        assert_eq!(state.assignments, vec![0, 0, 0, 0]);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        assert!(matches!(
            KCluster::new(vec![0.0f64; 7], 3, 2),
            Err(ClusterError::Dimensions(_))
        ));
        assert!(matches!(
            KCluster::new(vec![0.0f64; 4], 4, 0),
            Err(ClusterError::Dimensions(_))
        ));
    }

    #[test]
    fn sizing_errors_fail_fast() {
        let kclust = KCluster::new(vec![0.0f64; 8], 4, 2).unwrap();
        let conf = ClusterConfig::default();
        assert!(matches!(
            kclust.initialize(InitStrategy::Random, 0, &conf),
            Err(ClusterError::Sizing(_))
        ));
        assert!(matches!(
            kclust.initialize(InitStrategy::KMeansPlusPlus, 5, &conf),
            Err(ClusterError::Sizing(_))
        ));
        assert!(matches!(
            kclust.cluster(5, InitStrategy::Random, 10, &conf),
            Err(ClusterError::Sizing(_))
        ));
    }

    #[test]
    fn bad_config_is_rejected() {
        let kclust = KCluster::new(vec![0.0f64; 8], 4, 2).unwrap();

        let conf = ClusterConfig::build().weights(vec![1.0f64; 3]).build();
        assert!(matches!(
            kclust.initialize(InitStrategy::KMeansPlusPlus, 2, &conf),
            Err(ClusterError::Config(_))
        ));

        let conf = ClusterConfig::build().weights(vec![1.0, -1.0, 1.0, 1.0]).build();
        assert!(matches!(
            kclust.initialize(InitStrategy::KMeansPlusPlus, 2, &conf),
            Err(ClusterError::Config(_))
        ));

        let conf = ClusterConfig::build().oversample_factor(0.0).build();
        assert!(matches!(
            kclust.initialize(InitStrategy::KMeansParallel, 2, &conf),
            Err(ClusterError::Config(_))
        ));

        let conf = ClusterConfig::default();
        assert!(matches!(
            kclust.cluster(2, InitStrategy::Random, 0, &conf),
            Err(ClusterError::Config(_))
        ));
    }

    #[test]
    fn initializers_are_deterministic_for_a_fixed_seed() {
        let (samples, sample_cnt) = two_band_samples(3);
        let kclust = KCluster::new(samples, sample_cnt, 3).unwrap();

        for strategy in [InitStrategy::Random, InitStrategy::KMeansPlusPlus, InitStrategy::KMeansParallel] {
            let first = kclust
                .initialize(strategy, 4, &ClusterConfig::build().seed(1337).build())
                .unwrap();
            let second = kclust
                .initialize(strategy, 4, &ClusterConfig::build().seed(1337).build())
                .unwrap();
            assert_eq!(first, second, "strategy {strategy} not reproducible");
            assert_eq!(first.len(), 4 * 3);
        }
    }

    #[test]
    fn strategy_names_round_trip() {
        for strategy in [InitStrategy::Random, InitStrategy::KMeansPlusPlus, InitStrategy::KMeansParallel] {
            assert_eq!(strategy.to_string().parse::<InitStrategy>().unwrap(), strategy);
        }
        assert_eq!("k-means++".parse::<InitStrategy>().unwrap(), InitStrategy::KMeansPlusPlus);
        assert_eq!("kmeans-parallel".parse::<InitStrategy>().unwrap(), InitStrategy::KMeansParallel);
        assert!("voronoi".parse::<InitStrategy>().is_err());
    }
}
