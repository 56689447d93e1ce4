//! RGB565 framebuffer with dirty-region flushing
//!
//! The UI draws into the framebuffer through `embedded-graphics`; the
//! framebuffer accumulates a dirty rectangle and [`FrameBuffer::flush`]
//! hands the touched region to a [`FlushSink`] as one rectangular blit.
//! That is the whole contract between the rendering side and the panel
//! driver: an address window plus a run of row-major RGB565 pixels.

use core::convert::Infallible;

use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use tracing::trace;

/// Receiver of rectangular pixel blits.
///
/// `region` is in framebuffer coordinates; `pixels` holds the region's
/// pixels row by row, top to bottom.
pub trait FlushSink {
    fn blit(&mut self, region: Rectangle, pixels: &[Rgb565]);
}

impl<F: FnMut(Rectangle, &[Rgb565])> FlushSink for F {
    fn blit(&mut self, region: Rectangle, pixels: &[Rgb565]) {
        self(region, pixels)
    }
}

/// In-memory RGB565 frame with dirty-rectangle tracking
pub struct FrameBuffer {
    size: Size,
    pixels: Vec<Rgb565>,
    /// Inclusive corners of the touched area since the last flush
    dirty: Option<(Point, Point)>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![Rgb565::BLACK; (width * height) as usize],
            dirty: None,
        }
    }

    /// Framebuffer sized for the round 240x240 panel
    pub fn round_240() -> Self {
        let geometry = crate::panel::PanelGeometry::round_240();
        Self::new(geometry.width, geometry.height)
    }

    /// Pixel at `point`, or `None` outside the frame
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index_of(point).map(|index| self.pixels[index])
    }

    /// Touched area since the last flush
    pub fn dirty_region(&self) -> Option<Rectangle> {
        self.dirty
            .map(|(min, max)| Rectangle::with_corners(min, max))
    }

    /// Blit the dirty region into `sink` and mark the frame clean.
    ///
    /// No-op when nothing was drawn since the last flush.
    pub fn flush(&mut self, sink: &mut impl FlushSink) {
        let Some(region) = self.dirty_region() else {
            return;
        };

        let width = region.size.width as usize;
        let mut out = Vec::with_capacity(width * region.size.height as usize);
        for y in 0..region.size.height as i32 {
            let row_start = self
                .index_of(Point::new(region.top_left.x, region.top_left.y + y))
                .expect("dirty region stays inside the frame");
            out.extend_from_slice(&self.pixels[row_start..row_start + width]);
        }

        trace!(
            "flush {}x{} at ({}, {})",
            region.size.width, region.size.height, region.top_left.x, region.top_left.y
        );
        sink.blit(region, &out);
        self.dirty = None;
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        if point.x < 0
            || point.y < 0
            || point.x >= self.size.width as i32
            || point.y >= self.size.height as i32
        {
            return None;
        }
        Some(point.y as usize * self.size.width as usize + point.x as usize)
    }

    fn mark_dirty(&mut self, point: Point) {
        self.dirty = Some(match self.dirty {
            Some((min, max)) => (
                Point::new(min.x.min(point.x), min.y.min(point.y)),
                Point::new(max.x.max(point.x), max.y.max(point.y)),
            ),
            None => (point, point),
        });
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Out-of-bounds pixels are dropped, matching panel clipping.
            if let Some(index) = self.index_of(point) {
                self.pixels[index] = color;
                self.mark_dirty(point);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_clean_frame_does_not_flush() {
        let mut frame = FrameBuffer::new(16, 16);
        let mut blits = 0;
        frame.flush(&mut |_region, _pixels: &[Rgb565]| blits += 1);
        assert_eq!(blits, 0);
    }

    #[test]
    fn test_dirty_region_is_union_of_draws() {
        let mut frame = FrameBuffer::new(32, 32);

        Rectangle::new(Point::new(2, 3), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut frame)
            .unwrap();
        Rectangle::new(Point::new(10, 20), Size::new(2, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::GREEN))
            .draw(&mut frame)
            .unwrap();

        let dirty = frame.dirty_region().unwrap();
        assert_eq!(dirty.top_left, Point::new(2, 3));
        assert_eq!(dirty.size, Size::new(10, 19));
    }

    #[test]
    fn test_flush_hands_over_region_pixels_and_clears() {
        let mut frame = FrameBuffer::new(16, 16);
        Rectangle::new(Point::new(1, 1), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
            .draw(&mut frame)
            .unwrap();

        let mut seen = None;
        frame.flush(&mut |region, pixels: &[Rgb565]| {
            seen = Some((region, pixels.to_vec()));
        });

        let (region, pixels) = seen.unwrap();
        assert_eq!(region, Rectangle::new(Point::new(1, 1), Size::new(3, 2)));
        assert_eq!(pixels.len(), 6);
        assert!(pixels.iter().all(|&c| c == Rgb565::BLUE));

        // Flushed means clean.
        assert!(frame.dirty_region().is_none());
        let mut blits = 0;
        frame.flush(&mut |_region, _pixels: &[Rgb565]| blits += 1);
        assert_eq!(blits, 0);
    }

    #[test]
    fn test_out_of_bounds_pixels_are_dropped() {
        let mut frame = FrameBuffer::new(8, 8);
        frame
            .draw_iter([Pixel(Point::new(-1, 4), Rgb565::RED)])
            .unwrap();
        frame
            .draw_iter([Pixel(Point::new(8, 0), Rgb565::RED)])
            .unwrap();
        assert!(frame.dirty_region().is_none());
    }

    #[test]
    fn test_pixel_readback() {
        let mut frame = FrameBuffer::new(8, 8);
        frame
            .draw_iter([Pixel(Point::new(3, 3), Rgb565::WHITE)])
            .unwrap();
        assert_eq!(frame.pixel(Point::new(3, 3)), Some(Rgb565::WHITE));
        assert_eq!(frame.pixel(Point::new(0, 0)), Some(Rgb565::BLACK));
        assert_eq!(frame.pixel(Point::new(9, 0)), None);
    }
}
