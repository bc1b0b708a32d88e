use std::path::Path;

use crate::shared::photo::Photo;

/// Decodes a photo from storage.
pub trait PhotoReader: Send {
    fn read(&self, path: &Path) -> Result<Photo, Box<dyn std::error::Error>>;
}
