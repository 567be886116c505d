use glam::Vec2;

pub use simple_easing;

/// 0 -> 0
/// 0.5 -> 1
/// 1 -> 0
#[inline(always)]
pub fn quad_010(x: f32) -> f32 {
    let e = 2.0 * x - 1.0;
    1.0 - (e * e)
}

pub trait Lerp {
    fn lerp(&self, other: &Self, factor: f32) -> Self;
}

impl Lerp for f32 {
    #[inline(always)]
    fn lerp(&self, other: &Self, factor: f32) -> Self {
        *self + (*other - *self) * factor
    }
}

impl Lerp for f64 {
    #[inline(always)]
    fn lerp(&self, other: &Self, factor: f32) -> Self {
        *self + (*other - *self) * factor as f64
    }
}

impl Lerp for Vec2 {
    #[inline(always)]
    fn lerp(&self, other: &Self, factor: f32) -> Self {
        Vec2::lerp(*self, *other, factor)
    }
}

macro_rules! impl_tuples {
    ($($id:ident $n:tt),*) => {
        impl<$( $id: Lerp ),*> Lerp for ($($id),*)
        {
            #[inline(always)]
            fn lerp(&self, other: &Self, factor: f32) -> Self {
                (
                    $( self.$n.lerp(&other.$n, factor) ),*
                )
            }
        }
    };
}

impl_tuples!(A 0, B 1);
impl_tuples!(A 0, B 1, C 2);
