//! Film

use crate::filter::ArcFilter;
use crate::geometry::{Bounds2i, Point2f, Point2i};
use crate::math::{max, min, Float, Int};

/// A tile of pixels that accumulates filtered sample splats.
///
/// Each pixel stores the sample channels followed by a trailing weight
/// channel. Dividing the accumulated channels by the accumulated weight
/// yields the filtered pixel value.
pub struct FilteredTile {
    /// Tile width in pixels.
    width: usize,

    /// Tile height in pixels.
    height: usize,

    /// Number of sample channels, excluding the weight channel.
    channel_count: usize,

    /// Inclusive pixel window that samples may touch.
    crop_window: Bounds2i,

    /// Reconstruction filter.
    filter: ArcFilter,

    /// Pixel storage, `(channel_count + 1)` floats per pixel.
    pixels: Vec<Float>,
}

impl FilteredTile {
    /// Creates a tile whose crop window covers every pixel.
    ///
    /// * `width`         - Tile width in pixels.
    /// * `height`        - Tile height in pixels.
    /// * `channel_count` - Number of sample channels.
    /// * `filter`        - Reconstruction filter.
    pub fn new(width: usize, height: usize, channel_count: usize, filter: ArcFilter) -> Self {
        let crop_window = Bounds2i::new(
            Point2i::new(0, 0),
            Point2i::new(width as Int - 1, height as Int - 1),
        );
        Self::new_with_crop_window(width, height, channel_count, crop_window, filter)
    }

    /// Creates a tile restricted to the given inclusive crop window.
    ///
    /// * `width`         - Tile width in pixels.
    /// * `height`        - Tile height in pixels.
    /// * `channel_count` - Number of sample channels.
    /// * `crop_window`   - Inclusive pixel window that samples may touch.
    /// * `filter`        - Reconstruction filter.
    pub fn new_with_crop_window(
        width: usize,
        height: usize,
        channel_count: usize,
        crop_window: Bounds2i,
        filter: ArcFilter,
    ) -> Self {
        debug_assert!(width > 0 && height > 0 && channel_count > 0);
        debug_assert!(
            crop_window.p_min.x >= 0
                && crop_window.p_min.y >= 0
                && crop_window.p_max.x < width as Int
                && crop_window.p_max.y < height as Int,
            "crop window exceeds the tile extent"
        );
        Self {
            width,
            height,
            channel_count,
            crop_window,
            filter,
            pixels: vec![0.0; width * height * (channel_count + 1)],
        }
    }

    /// Returns the tile width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the tile height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of sample channels, excluding the weight channel.
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// Splats a sample into every pixel whose filter footprint covers it.
    ///
    /// * `p`      - Sample position in continuous tile coordinates.
    /// * `values` - The sample channels.
    pub fn add(&mut self, p: &Point2f, values: &[Float]) {
        debug_assert_eq!(values.len(), self.channel_count);

        // Continuous to discrete pixel coordinates.
        let dx = p.x - 0.5;
        let dy = p.y - 0.5;

        let radius = self.filter.get_data().radius;
        let x1 = max((dx - radius.x).ceil() as Int, self.crop_window.p_min.x);
        let x2 = min((dx + radius.x).floor() as Int, self.crop_window.p_max.x);
        let y1 = max((dy - radius.y).ceil() as Int, self.crop_window.p_min.y);
        let y2 = min((dy + radius.y).floor() as Int, self.crop_window.p_max.y);

        for py in y1..=y2 {
            for px in x1..=x2 {
                let weight = self
                    .filter
                    .evaluate(&Point2f::new(px as Float - dx, py as Float - dy));

                let offset = (py as usize * self.width + px as usize) * (self.channel_count + 1);
                let pixel = &mut self.pixels[offset..offset + self.channel_count + 1];
                for (dest, value) in pixel.iter_mut().zip(values.iter()) {
                    *dest += weight * value;
                }
                pixel[self.channel_count] += weight;
            }
        }
    }

    /// Returns the accumulated channels and trailing weight of a pixel.
    ///
    /// * `x` - Pixel x-coordinate.
    /// * `y` - Pixel y-coordinate.
    pub fn pixel(&self, x: usize, y: usize) -> &[Float] {
        debug_assert!(x < self.width && y < self.height);
        let offset = (y * self.width + x) * (self.channel_count + 1);
        &self.pixels[offset..offset + self.channel_count + 1]
    }

    /// Resets every pixel to zero.
    pub fn clear(&mut self) {
        self.pixels.fill(0.0);
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
