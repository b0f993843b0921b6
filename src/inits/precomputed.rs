use crate::api::{ClusterConfig, ClusterState, DistanceFunction, KCluster};
use crate::primitive::Primitive;

#[inline(always)]
pub(crate) fn calculate<'a, T, D>(
    kclust: &KCluster<T, D>, state: &mut ClusterState<T>, _config: &ClusterConfig<'a, T>, computed: Vec<T>,
) where
    T: Primitive,
    D: DistanceFunction<T>,
{
    computed.chunks_exact(kclust.sample_dims).enumerate().for_each(|(ci, c)| {
        if ci >= state.k {
            panic!("Initialized with more centroids than k");
        }
        state.set_centroid_from_iter(ci, c.iter().cloned());
    });
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn refine_with_precomputed_centroids() {
        let samples = vec![0.0f64, 1.0, 10.0, 11.0, 20.0, 21.0];
        let centroids = vec![0.0, 21.0];
        let (sample_cnt, sample_dims) = (samples.len(), 1);

        let kclust = KCluster::new(samples, sample_cnt, sample_dims).unwrap();
        let result = kclust
            .lloyd(2, 200, KCluster::init_precomputed(centroids), &ClusterConfig::default())
            .unwrap();

        assert_eq!(result.assignments, vec![0, 0, 0, 1, 1, 1]);
        assert_approx_eq!(result.centroids[0], 11.0 / 3.0, 1e-12);
        assert_approx_eq!(result.centroids[1], 52.0 / 3.0, 1e-12);
        assert_eq!(result.centroid_frequency, vec![3, 3]);
        assert!(result.converged);
    }
}
