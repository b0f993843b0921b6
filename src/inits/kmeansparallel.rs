use crate::api::{ClusterConfig, ClusterState, DistanceFunction, KCluster};
use crate::inits::kmeanplusplus;
use crate::primitive::Primitive;
use log::debug;
use num::ToPrimitive;
use rand::prelude::*;
use rayon::prelude::*;
use std::ops::DerefMut;

/// Fold one new candidate into each sample's distance to its nearest
/// candidate. Distances only ever shrink, so the running minimum per sample
/// stays valid across rounds.
fn fold_candidate_distances<T, D>(samples: &[T], sample_dims: usize, candidate: &[T], min_dists: &mut [T], distance: &D)
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    min_dists.par_iter_mut()
        .zip(samples.par_chunks_exact(sample_dims))
        .for_each(|(min_dist, s)| {
            let dist = distance.distance(s, candidate);
            if dist < *min_dist {
                *min_dist = dist;
            }
        });
}

/// Count, for every candidate, the samples whose nearest candidate it is
/// (ties towards the lowest candidate index). The counts partition the sample
/// set: they always sum to the sample count.
pub(crate) fn voronoi_tally<T, D>(samples: &[T], sample_dims: usize, candidates: &[T], candidate_cnt: usize, distance: &D) -> Vec<usize>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    let nearest: Vec<usize> = samples.par_chunks_exact(sample_dims)
        .map(|s| {
            let mut best_idx = 0usize;
            let mut best_dist = T::infinity();
            for (ci, c) in candidates.chunks_exact(sample_dims).take(candidate_cnt).enumerate() {
                let dist = distance.distance(s, c);
                if dist < best_dist {
                    best_idx = ci;
                    best_dist = dist;
                }
            }
            best_idx
        })
        .collect();

    let mut counts = vec![0usize; candidate_cnt];
    nearest.iter().for_each(|&ci| counts[ci] += 1);
    counts
}

#[inline(always)]
pub(crate) fn calculate<'a, T, D>(kclust: &KCluster<T, D>, state: &mut ClusterState<T>, config: &ClusterConfig<'a, T>)
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    let (sample_cnt, sample_dims, k) = (kclust.sample_cnt, kclust.sample_dims, state.k);
    let oversample_factor = config.oversample_factor.unwrap_or(k as f64);
    let samples = &kclust.samples;
    let distance = &kclust.distance;
    let mut rnd = config.rnd.borrow_mut();

    let mut in_candidates = vec![false; sample_cnt];
    let mut candidate_idxs: Vec<usize> = Vec::new();
    let mut min_dists = vec![T::infinity(); sample_cnt];

    // Single uniform seed candidate
    let first = rnd.gen_range(0..sample_cnt);
    in_candidates[first] = true;
    candidate_idxs.push(first);
    fold_candidate_distances(samples, sample_dims, &samples[first * sample_dims..(first + 1) * sample_dims], &mut min_dists, distance);

    // The amount of oversampling rounds follows the initial cost:
    // round(ln ψ), but at least one round
    let psi: f64 = min_dists.iter().map(|d| d.to_f64().unwrap()).sum();
    let planned_rounds = if psi > 0.0 { psi.ln().round().max(1.0) as usize } else { 1 };

    let mut round = 0;
    while round < planned_rounds || candidate_idxs.len() < k {
        if candidate_idxs.len() == sample_cnt {
            break;
        }
        let cost: f64 = min_dists.iter().map(|d| d.to_f64().unwrap()).sum();

        // Per-sample Bernoulli inclusion: every sample decides independently,
        // with probability proportional to its squared distance to the
        // nearest candidate as of the start of this round.
        let mut added: Vec<usize> = Vec::new();
        if cost > 0.0 {
            for i in (0..sample_cnt).filter(|&i| !in_candidates[i]) {
                let p = (oversample_factor * min_dists[i].to_f64().unwrap() / cost).min(1.0);
                if rnd.gen_bool(p) {
                    added.push(i);
                }
            }
        } else {
            // Degenerate round (every remaining sample coincides with a
            // candidate): include uniformly instead of dividing by zero
            let p = (oversample_factor / sample_cnt as f64).min(1.0);
            for i in (0..sample_cnt).filter(|&i| !in_candidates[i]) {
                if rnd.gen_bool(p) {
                    added.push(i);
                }
            }
        }

        for &idx in &added {
            in_candidates[idx] = true;
            candidate_idxs.push(idx);
            fold_candidate_distances(samples, sample_dims, &samples[idx * sample_dims..(idx + 1) * sample_dims], &mut min_dists, distance);
        }
        round += 1;
        debug!("k-means|| round {}/{}: +{} candidates, {} total", round, planned_rounds, added.len(), candidate_idxs.len());
    }

    // Weigh every candidate by the amount of samples it represents, then
    // reduce the oversampled set down to k with weighted k-means++
    let mut candidates = Vec::with_capacity(candidate_idxs.len() * sample_dims);
    for &idx in &candidate_idxs {
        candidates.extend_from_slice(&samples[idx * sample_dims..(idx + 1) * sample_dims]);
    }
    let tally = voronoi_tally(samples, sample_dims, &candidates, candidate_idxs.len(), distance);
    let weights: Vec<T> = tally.iter().map(|&cnt| T::from(cnt).unwrap()).collect();

    let centroids = kmeanplusplus::select_centroids(
        &candidates,
        candidate_idxs.len(),
        sample_dims,
        k,
        Some(&weights),
        distance,
        rnd.deref_mut(),
    );
    state.centroids.copy_from_slice(&centroids);
}
