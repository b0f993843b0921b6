use crate::api::{ClusterConfig, ClusterState, DistanceFunction, KCluster};
use crate::primitive::Primitive;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rayon::prelude::*;
use std::ops::DerefMut;

/// Weighted k-means++ selection over an arbitrary flat sample buffer.
///
/// The first centroid is one sample chosen uniformly at random. Every further
/// centroid is drawn with probability proportional to
/// `weight × squared distance to the nearest already chosen centroid`, which
/// makes already chosen samples unpickable (their distance is zero). When the
/// whole distribution collapses to zero (duplicate samples), the draw falls
/// back to a uniform choice among the samples that were not chosen yet.
///
/// This routine is shared: the plain k-means++ initialization runs it over the
/// full sample set, the k-means|| initialization runs it over its oversampled
/// candidate set, weighted by the candidates' Voronoi tallies.
pub(crate) fn select_centroids<T, D>(
    data: &[T],
    sample_cnt: usize,
    sample_dims: usize,
    k: usize,
    weights: Option<&[T]>,
    distance: &D,
    rnd: &mut dyn RngCore,
) -> Vec<T>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    let mut centroids = Vec::with_capacity(k * sample_dims);
    let mut chosen = vec![false; sample_cnt];
    let mut min_dists = vec![T::infinity(); sample_cnt];

    let first = rnd.gen_range(0..sample_cnt);
    chosen[first] = true;
    centroids.extend_from_slice(&data[first * sample_dims..(first + 1) * sample_dims]);
    let mut newest = first;

    for _ in 1..k {
        // Fold the newest centroid into each sample's distance to its nearest
        // chosen centroid
        let newest_row = &data[newest * sample_dims..(newest + 1) * sample_dims];
        min_dists.par_iter_mut()
            .zip(data.par_chunks_exact(sample_dims))
            .for_each(|(min_dist, s)| {
                let dist = distance.distance(s, newest_row);
                if dist < *min_dist {
                    *min_dist = dist;
                }
            });

        let scores: Vec<T> = match weights {
            Some(weights) => min_dists.iter().zip(weights.iter()).map(|(&d, &w)| w * d).collect(),
            None => min_dists.clone(),
        };
        let next = match WeightedIndex::new(scores.iter()) {
            Ok(sampler) => sampler.sample(rnd),
            // Degenerate distribution (every remaining score is zero): fall
            // back to a uniform draw among the not-yet-chosen samples.
            Err(_) => {
                let open: Vec<usize> = (0..sample_cnt).filter(|&i| !chosen[i]).collect();
                open[rnd.gen_range(0..open.len())]
            }
        };
        chosen[next] = true;
        centroids.extend_from_slice(&data[next * sample_dims..(next + 1) * sample_dims]);
        newest = next;
    }
    centroids
}

#[inline(always)]
pub(crate) fn calculate<'a, T, D>(kclust: &KCluster<T, D>, state: &mut ClusterState<T>, config: &ClusterConfig<'a, T>)
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    let mut rnd = config.rnd.borrow_mut();
    let centroids = select_centroids(
        &kclust.samples,
        kclust.sample_cnt,
        kclust.sample_dims,
        state.k,
        config.weights.as_deref(),
        &kclust.distance,
        rnd.deref_mut(),
    );
    state.centroids.copy_from_slice(&centroids);
}
