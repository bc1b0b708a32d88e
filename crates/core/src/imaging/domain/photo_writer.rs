use std::path::Path;

use image::DynamicImage;

/// Writes a rendered image to storage.
pub trait PhotoWriter: Send {
    /// Writes the image to the given path, optionally resizing to the given dimensions.
    fn write(
        &self,
        path: &Path,
        rendered: &DynamicImage,
        size: Option<(u32, u32)>,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
