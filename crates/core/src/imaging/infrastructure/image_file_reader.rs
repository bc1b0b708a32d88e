use std::path::Path;

use crate::imaging::domain::photo_reader::PhotoReader;
use crate::shared::photo::Photo;

/// Decodes image files with the `image` crate.
///
/// Images with an alpha channel load as RGBA, everything else as RGB.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Photo, Box<dyn std::error::Error>> {
        let img = image::open(path)?;
        let photo = if img.color().has_alpha() {
            Photo::from_rgba(img.into_rgba8())
        } else {
            Photo::from_rgb(img.into_rgb8())
        };
        log::debug!(
            "Read {} ({}x{}, {} channels)",
            path.display(),
            photo.width(),
            photo.height(),
            photo.channels()
        );
        Ok(photo)
    }
}
