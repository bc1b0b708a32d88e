use ndarray::ArrayView3;

use super::geometry::Extent;

/// A decoded photo: contiguous interleaved bytes in row-major order.
///
/// Photos are immutable once built. Every warp step produces a new `Photo`
/// rather than editing the previous one, so a composition is a fold over
/// owned values.
#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Photo {
    /// Wraps `data` without checking its length; consumers that index
    /// pixels check [`Photo::has_valid_length`] first.
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// Builds a photo from an RGB image without copying the pixel buffer.
    pub fn from_rgb(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(img.into_raw(), width, height, 3)
    }

    pub fn from_rgba(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(img.into_raw(), width, height, 4)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.width as f64, self.height as f64)
    }

    /// True when there is no pixel data to read.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.channels == 0
    }

    /// True when the buffer holds exactly `width * height * channels` bytes.
    pub fn has_valid_length(&self) -> bool {
        let (h, w, c) = self.shape();
        self.data.len() == h * w * c
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Photo data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let photo = Photo::new(data.clone(), 2, 2, 3);
        assert_eq!(photo.width(), 2);
        assert_eq!(photo.height(), 2);
        assert_eq!(photo.channels(), 3);
        assert_eq!(photo.data(), &data[..]);
    }

    #[test]
    fn test_extent_matches_dimensions() {
        let photo = Photo::new(vec![0u8; 4 * 3 * 3], 4, 3, 3);
        let extent = photo.extent();
        assert_relative_eq!(extent.width, 4.0);
        assert_relative_eq!(extent.height, 3.0);
    }

    #[test]
    fn test_is_empty_for_zero_extent() {
        assert!(Photo::new(Vec::new(), 0, 10, 3).is_empty());
        assert!(Photo::new(Vec::new(), 10, 0, 3).is_empty());
        assert!(!Photo::new(vec![0u8; 3], 1, 1, 3).is_empty());
    }

    #[test]
    fn test_has_valid_length() {
        assert!(Photo::new(vec![0u8; 12], 2, 2, 3).has_valid_length());
        assert!(!Photo::new(vec![0u8; 10], 2, 2, 3).has_valid_length());
        assert!(Photo::new(Vec::new(), 0, 0, 3).has_valid_length());
    }

    #[test]
    fn test_from_rgb_keeps_pixels() {
        let mut img = image::RgbImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgb([10, 20, 30]));
        let photo = Photo::from_rgb(img);
        assert_eq!(photo.channels(), 3);
        assert_eq!(photo.as_ndarray()[[1, 2, 0]], 10);
        assert_eq!(photo.as_ndarray()[[1, 2, 2]], 30);
    }

    #[test]
    fn test_from_rgba_has_four_channels() {
        let img = image::RgbaImage::new(2, 2);
        let photo = Photo::from_rgba(img);
        assert_eq!(photo.channels(), 4);
        assert_eq!(photo.data().len(), 16);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let photo = Photo::new(vec![0u8; 24], 4, 2, 3);
        assert_eq!(photo.as_ndarray().shape(), &[2, 4, 3]); // (height, width, channels)
    }

    #[test]
    fn test_into_data_returns_buffer() {
        let photo = Photo::new(vec![7u8; 6], 2, 1, 3);
        assert_eq!(photo.into_data(), vec![7u8; 6]);
    }
}
