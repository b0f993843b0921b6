pub(crate) mod kmeanplusplus;
pub(crate) mod kmeansparallel;
pub(crate) mod precomputed;
pub(crate) mod randomsample;
