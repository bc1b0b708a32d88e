/// Added to a feature group's extent so the bump reaches past its outermost landmarks.
pub const RADIUS_MARGIN_PX: f64 = 10.0;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

pub const CONFIG_DIR_NAME: &str = "FaceWarp";
pub const SCALES_FILE_NAME: &str = "scales.json";
