use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

pub trait Primitive:
    Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
    + PartialOrd + Copy + Default + Display + Debug + Sync + Send + 'static
    + for<'a> AddAssign<&'a Self>
{
}
impl Primitive for f32 {}
impl Primitive for f64 {}
