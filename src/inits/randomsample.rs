use crate::api::{ClusterConfig, ClusterState, DistanceFunction, KCluster};
use crate::primitive::Primitive;
use rand::prelude::*;
use std::ops::DerefMut;

#[inline(always)]
pub(crate) fn calculate<'a, T, D>(kclust: &KCluster<T, D>, state: &mut ClusterState<T>, config: &ClusterConfig<'a, T>)
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    kclust.samples.chunks_exact(kclust.sample_dims)
        .choose_multiple(config.rnd.borrow_mut().deref_mut(), state.k)
        .iter().cloned()
        .enumerate()
        .for_each(|(ci, c)| { // Copy randomly chosen centroids into state.centroids
            state.set_centroid_from_iter(ci, c.iter().cloned());
        });
}
