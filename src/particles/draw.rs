use glam::Vec2;

use crate::Color;

/// Opaque reference to a drawable resource, e.g. a texture or an atlas region.
///
/// The pool clones handles into its slots and compares them by [`RenderHandle::batch_key`],
/// it never loads, frees or inspects the resource behind them.
pub trait RenderHandle: Clone {
    /// Equal keys mean the same resource. Consecutive draws with the same key share render state.
    fn batch_key(&self) -> u64;

    /// Size of the visual in pixels.
    fn extent(&self) -> Vec2;

    /// Pivot point for rotation and scaling, in pixels from the top left corner.
    ///
    /// Defaults to the pixel center. Single pixel visuals pivot around their corner.
    #[inline]
    fn origin(&self) -> Vec2 {
        let extent = self.extent();
        if extent == Vec2::ONE {
            return Vec2::ZERO;
        }
        (extent * 0.5).floor()
    }
}

impl<T: RenderHandle> RenderHandle for &T {
    #[inline]
    fn batch_key(&self) -> u64 {
        T::batch_key(*self)
    }

    #[inline]
    fn extent(&self) -> Vec2 {
        T::extent(*self)
    }

    #[inline]
    fn origin(&self) -> Vec2 {
        T::origin(*self)
    }
}

/// A plain value handle: an id assigned by the host (texture slot, atlas region, ...) and the
/// pixel size of what it refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteHandle {
    pub id: u32,
    pub extent: Vec2,
}

impl SpriteHandle {
    pub const fn new(id: u32, extent: Vec2) -> Self {
        Self { id, extent }
    }

    /// A one pixel sprite, usually stretched through the particle scale.
    pub const fn pixel(id: u32) -> Self {
        Self {
            id,
            extent: Vec2::ONE,
        }
    }
}

impl RenderHandle for SpriteHandle {
    #[inline]
    fn batch_key(&self) -> u64 {
        self.id as u64
    }

    #[inline]
    fn extent(&self) -> Vec2 {
        self.extent
    }
}

/// Receives draw submissions from the particle pool's draw traversals.
pub trait DrawSink<H> {
    fn draw(
        &mut self,
        handle: &H,
        position: Vec2,
        tint: Color,
        orientation: f32,
        origin: Vec2,
        scale: Vec2,
    );
}

impl<H, F> DrawSink<H> for F
where
    F: FnMut(&H, Vec2, Color, f32, Vec2, Vec2),
{
    #[inline]
    fn draw(
        &mut self,
        handle: &H,
        position: Vec2,
        tint: Color,
        orientation: f32,
        origin: Vec2,
        scale: Vec2,
    ) {
        self(handle, position, tint, orientation, origin, scale)
    }
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use super::{RenderHandle, SpriteHandle};

    #[test]
    fn origin_is_pixel_center() {
        assert_eq!(SpriteHandle::new(0, vec2(32.0, 16.0)).origin(), vec2(16.0, 8.0));
        assert_eq!(SpriteHandle::new(0, vec2(5.0, 3.0)).origin(), vec2(2.0, 1.0));
        assert_eq!(SpriteHandle::pixel(0).origin(), vec2(0.0, 0.0));
    }

    #[test]
    fn references_delegate() {
        let sprite = SpriteHandle::new(7, vec2(8.0, 8.0));
        let handle = &sprite;
        assert_eq!(handle.batch_key(), 7);
        assert_eq!(RenderHandle::origin(&handle), vec2(4.0, 4.0));
    }
}
