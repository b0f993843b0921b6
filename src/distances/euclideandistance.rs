use crate::api::DistanceFunction;
use crate::primitive::Primitive;

/// Squared euclidean distance. The square root is never taken, since the
/// squared form preserves nearest-neighbor ordering at lower cost.
pub struct EuclideanDistance;

impl<T: Primitive> DistanceFunction<T> for EuclideanDistance {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        a.iter()
            .zip(b.iter())
            .map(|(&av, &bv)| av - bv)
            .map(|v| v * v)
            .sum()
    }
}
