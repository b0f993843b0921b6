use crate::api::{ClusterConfig, ClusterState, DistanceFunction, KCluster};
use crate::primitive::Primitive;
use log::debug;

pub(crate) struct Lloyd<T, D> {
    _p: std::marker::PhantomData<(T, D)>,
}
impl<T, D> Lloyd<T, D>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    /// Recompute every centroid as the coordinate-wise mean of its currently
    /// assigned samples. A centroid without any assigned samples keeps its
    /// previous coordinates for this iteration.
    ///
    /// Returns the distance sum of the finished assignment phase, and the
    /// largest coordinate shift any centroid made.
    fn update_centroids(data: &KCluster<T, D>, state: &mut ClusterState<T>) -> (T, T) {
        let dims = data.sample_dims;
        let mut new_sums = vec![T::zero(); state.centroids.len()];
        let mut new_distsum = T::zero();

        let (centroid_frequency, assignments, centroid_distances) =
            (&mut state.centroid_frequency, &state.assignments, &state.centroid_distances);
        rayon::scope(|s| {
            s.spawn(|_| {
                data.update_cluster_frequencies(assignments, centroid_frequency);
            });
            s.spawn(|_| {
                data.samples.chunks_exact(dims)
                    .zip(assignments.iter().cloned())
                    .for_each(|(smpl, centroid_id)| {
                        new_sums.iter_mut().skip(centroid_id * dims).take(dims)
                            .zip(smpl.iter().cloned())
                            .for_each(|(sum, sv)| *sum += sv);
                    });
            });
            s.spawn(|_| {
                new_distsum = centroid_distances.iter().cloned().sum();
            });
        });

        let mut max_shift = T::zero();
        state.centroids.chunks_exact_mut(dims)
            .zip(new_sums.chunks_exact(dims))
            .zip(state.centroid_frequency.iter().cloned())
            .for_each(|((c, sums), cfreq)| {
                if cfreq == 0 {
                    // Dead centroid: freeze instead of re-seeding
                    return;
                }
                let cfreq = T::from(cfreq).unwrap();
                c.iter_mut().zip(sums.iter().cloned()).for_each(|(cv, sum)| {
                    let new_val = sum / cfreq;
                    let shift = (new_val - *cv).abs();
                    if shift > max_shift {
                        max_shift = shift;
                    }
                    *cv = new_val;
                });
            });
        (new_distsum, max_shift)
    }

    #[inline(always)]
    pub fn calculate<'a, F>(data: &KCluster<T, D>, k: usize, max_iter: usize, init: F, config: &ClusterConfig<'a, T>) -> ClusterState<T>
            where for<'c> F: FnOnce(&KCluster<T, D>, &mut ClusterState<T>, &ClusterConfig<'c, T>) {
        let mut state = ClusterState::new(data.sample_cnt, data.sample_dims, k);
        state.distsum = T::infinity();

        // Initialize clusters and notify subscriber
        init(data, &mut state, config);
        (config.init_done)(&state);

        let mut prev_assignments = state.assignments.clone();
        for i in 1..=max_iter {
            if config.cancel.is_cancelled() {
                debug!("calculation cancelled after {} iterations", state.iterations);
                break;
            }

            data.update_cluster_assignments(&mut state);
            let (new_distsum, max_shift) = Self::update_centroids(data, &mut state);
            state.iterations = i;

            // Notify subscriber about finished iteration
            (config.iteration_done)(&state, i, new_distsum);

            // Fixpoint: the assignments stopped changing, or no centroid moved
            if state.assignments == prev_assignments || max_shift == T::zero() {
                state.converged = true;
                debug!("converged after {} iterations (distsum {})", i, new_distsum);
                break;
            }
            prev_assignments.copy_from_slice(&state.assignments);
            state.distsum = new_distsum;
        }
        if !state.converged && !config.cancel.is_cancelled() {
            debug!("iteration cap of {} reached without convergence", max_iter);
        }

        data.update_centroid_distances(&mut state);
        state.distsum = state.centroid_distances.iter().cloned().sum();
        state
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use rand::prelude::*;
    use std::cell::RefCell;

    fn four_corner_samples() -> KCluster<f64> {
        KCluster::new(vec![0.0, 0.0, 0.0, 1.0, 10.0, 0.0, 10.0, 1.0], 4, 2).unwrap()
    }

    #[test]
    fn two_cluster_refinement() {
        let kclust = four_corner_samples();
        let res = kclust
            .lloyd(2, 100, KCluster::init_precomputed(vec![0.0, 0.0, 10.0, 0.0]), &ClusterConfig::default())
            .unwrap();

        assert_eq!(res.centroids, vec![0.0, 0.5, 10.0, 0.5]);
        assert_eq!(res.assignments, vec![0, 0, 1, 1]);
        assert_eq!(res.centroid_frequency, vec![2, 2]);
        assert_eq!(res.iterations, 2);
        assert!(res.converged);
        assert_approx_eq!(res.distsum, 1.0, 1e-12);
    }

    #[test]
    fn iteration_cap_reports_non_convergence() {
        let kclust = four_corner_samples();
        let res = kclust
            .lloyd(2, 1, KCluster::init_precomputed(vec![0.0, 0.0, 10.0, 0.0]), &ClusterConfig::default())
            .unwrap();

        // One iteration moves the centroids but cannot confirm stability
        assert_eq!(res.centroids, vec![0.0, 0.5, 10.0, 0.5]);
        assert_eq!(res.iterations, 1);
        assert!(!res.converged);
        assert_approx_eq!(res.distsum, 1.0, 1e-12);
    }

    #[test]
    fn single_cluster_converges_in_one_iteration_to_the_mean() {
        let samples = vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let kclust = KCluster::new(samples, 6, 1).unwrap();
        let res = kclust
            .cluster(1, InitStrategy::Random, 100, &ClusterConfig::default())
            .unwrap();

        assert_eq!(res.iterations, 1);
        assert!(res.converged);
        assert_approx_eq!(res.centroids[0], 3.5, 1e-12);
        assert_approx_eq!(res.distsum, 17.5, 1e-12);
    }

    #[test]
    fn one_centroid_per_sample_converges_immediately_at_zero_cost() {
        let samples = vec![0.0f64, 5.0, 10.0, 15.0];
        let kclust = KCluster::new(samples.clone(), 4, 1).unwrap();
        let res = kclust
            .cluster(4, InitStrategy::Random, 100, &ClusterConfig::default())
            .unwrap();

        assert_eq!(res.iterations, 1);
        assert!(res.converged);
        assert_eq!(res.distsum, 0.0);
        assert_eq!(res.centroid_frequency, vec![1, 1, 1, 1]);
        for (i, s) in samples.iter().enumerate() {
            assert_eq!(res.centroids[res.assignments[i]], *s);
        }
    }

    #[test]
    fn single_cluster_f32() {
        let samples = vec![1.0f32, 2.0, 3.0, 4.0];
        let kclust = KCluster::new(samples, 4, 1).unwrap();
        let res = kclust
            .cluster(1, InitStrategy::Random, 10, &ClusterConfig::default())
            .unwrap();
        assert_eq!(res.centroids, vec![2.5f32]);
        assert_eq!(res.iterations, 1);
        assert!(res.converged);
    }

    #[test]
    fn cost_is_monotonically_non_increasing() {
        let mut rnd = rand_chacha::ChaCha8Rng::seed_from_u64(42);
        let (sample_cnt, sample_dims, k) = (240, 3, 6);
        let mut samples = vec![0.0f64; sample_cnt * sample_dims];
        samples.iter_mut().for_each(|v| *v = rnd.gen_range(0.0..100.0));

        let distsums: RefCell<Vec<f64>> = RefCell::new(Vec::new());
        let record = |_s: &ClusterState<f64>, _nr: usize, distsum: f64| {
            distsums.borrow_mut().push(distsum);
        };
        let conf = ClusterConfig::build().seed(1).iteration_done(&record).build();

        let kclust = KCluster::new(samples, sample_cnt, sample_dims).unwrap();
        let res = kclust.cluster(k, InitStrategy::KMeansPlusPlus, 500, &conf).unwrap();

        let distsums = distsums.into_inner();
        assert_eq!(distsums.len(), res.iterations);
        assert!(distsums.windows(2).all(|w| w[1] <= w[0]), "{distsums:?}");
        assert!(res.assignments.iter().all(|&a| a < k));
        assert!(res.converged);
    }

    #[test]
    fn refining_a_converged_state_changes_nothing() {
        let mut rnd = rand_chacha::ChaCha8Rng::seed_from_u64(9);
        let (sample_cnt, sample_dims, k) = (120, 2, 4);
        let mut samples = vec![0.0f64; sample_cnt * sample_dims];
        samples.iter_mut().for_each(|v| *v = rnd.gen_range(0.0..10.0));

        let kclust = KCluster::new(samples, sample_cnt, sample_dims).unwrap();
        let conf = ClusterConfig::build().seed(4).build();
        let first = kclust.cluster(k, InitStrategy::KMeansPlusPlus, 1000, &conf).unwrap();
        assert!(first.converged);

        let again = kclust
            .lloyd(k, 1000, KCluster::init_precomputed(first.centroids.clone()), &ClusterConfig::default())
            .unwrap();
        assert_eq!(again.iterations, 1);
        assert!(again.converged);
        assert_eq!(again.centroids, first.centroids);
        assert_eq!(again.assignments, first.assignments);
    }

    #[test]
    fn dead_centroid_keeps_its_coordinates() {
        let samples = vec![0.0f64, 0.0, 1.0, 0.0];
        let kclust = KCluster::new(samples, 2, 2).unwrap();
        let res = kclust
            .lloyd(2, 100, KCluster::init_precomputed(vec![0.5, 0.0, 100.0, 0.0]), &ClusterConfig::default())
            .unwrap();

        assert_eq!(res.assignments, vec![0, 0]);
        assert_eq!(res.centroid_frequency, vec![2, 0]);
        // The empty cluster's centroid is frozen, not re-seeded
        assert_eq!(res.centroids, vec![0.5, 0.0, 100.0, 0.0]);
        assert!(res.converged);
    }

    #[test]
    fn cancelled_token_stops_before_the_first_iteration() {
        let kclust = four_corner_samples();
        let token = CancelToken::new();
        token.cancel();
        let conf = ClusterConfig::build().cancel_token(token).build();
        let res = kclust
            .lloyd(2, 100, KCluster::init_precomputed(vec![0.0, 0.0, 10.0, 0.0]), &conf)
            .unwrap();

        assert_eq!(res.iterations, 0);
        assert!(!res.converged);
        // The initial centroids were never refined
        assert_eq!(res.centroids, vec![0.0, 0.0, 10.0, 0.0]);
        assert!(res.distsum.is_finite());
    }
}
