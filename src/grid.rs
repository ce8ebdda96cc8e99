//! Pixel grid abstraction over caller-owned images.

use crate::sequencer::ChannelCoord;
use image::{RgbImage, RgbaImage};

/// A width x height grid of pixels with at least three 8-bit color channels.
///
/// Only channels 0..3 (red, green, blue) are ever addressed; anything else a
/// pixel carries, such as alpha, is left alone.
pub trait PixelGrid {
    fn dimensions(&self) -> (u32, u32);

    fn channel(&self, coord: ChannelCoord) -> u8;

    fn set_channel(&mut self, coord: ChannelCoord, value: u8);
}

impl PixelGrid for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn channel(&self, coord: ChannelCoord) -> u8 {
        self.get_pixel(coord.x, coord.y)[coord.channel as usize]
    }

    fn set_channel(&mut self, coord: ChannelCoord, value: u8) {
        self.get_pixel_mut(coord.x, coord.y)[coord.channel as usize] = value;
    }
}

impl PixelGrid for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn channel(&self, coord: ChannelCoord) -> u8 {
        self.get_pixel(coord.x, coord.y)[coord.channel as usize]
    }

    fn set_channel(&mut self, coord: ChannelCoord, value: u8) {
        self.get_pixel_mut(coord.x, coord.y)[coord.channel as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    #[test]
    fn test_rgb_channel_access() {
        let mut img = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let coord = ChannelCoord { x: 2, y: 1, channel: 1 };
        assert_eq!(PixelGrid::dimensions(&img), (3, 2));
        assert_eq!(img.channel(coord), 20);

        img.set_channel(coord, 21);
        assert_eq!(img.get_pixel(2, 1), &Rgb([10, 21, 30]));
        assert_eq!(img.get_pixel(1, 1), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_rgba_alpha_untouched() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 200]));
        for channel in 0..3 {
            let coord = ChannelCoord { x: 0, y: 0, channel };
            let v = img.channel(coord);
            img.set_channel(coord, v ^ 1);
        }
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 3, 2, 200]));
    }
}
