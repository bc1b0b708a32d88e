use ndarray::ArrayView3;

use crate::shared::geometry::PixelPoint;
use crate::shared::photo::Photo;
use crate::warping::domain::radial_warper::RadialWarper;

/// CPU bump distortion using backward mapping and bilinear sampling.
///
/// For every output pixel inside the disc, the source position is pulled
/// toward (strength > 0) or pushed away from (strength < 0) the center by a
/// factor that eases back to 1 at the rim with a smoothstep, so the warp
/// blends into untouched pixels without a seam. Pixels outside the disc are
/// copied as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBumpWarper;

impl CpuBumpWarper {
    pub fn new() -> Self {
        Self
    }
}

impl RadialWarper for CpuBumpWarper {
    fn warp(
        &self,
        photo: &Photo,
        center: PixelPoint,
        radius: f64,
        strength: f64,
    ) -> Result<Photo, Box<dyn std::error::Error>> {
        validate(photo, center, radius, strength)?;
        if strength == 0.0 {
            return Ok(photo.clone());
        }

        let src = photo.as_ndarray();
        let width = photo.width() as usize;
        let channels = photo.channels() as usize;
        let mut out = photo.data().to_vec();

        let (col_lo, col_hi) = span(center.x, radius, width);
        let (row_lo, row_hi) = span(center.y, radius, photo.height() as usize);

        for row in row_lo..row_hi {
            for col in col_lo..col_hi {
                // Pixel (col, row) is sampled at its center.
                let dx = col as f64 + 0.5 - center.x;
                let dy = row as f64 + 0.5 - center.y;
                let dist = dx.hypot(dy);
                if dist >= radius {
                    continue;
                }

                let factor = displacement_factor(dist / radius, strength);
                let sx = center.x + dx * factor - 0.5;
                let sy = center.y + dy * factor - 0.5;

                let offset = (row * width + col) * channels;
                sample_bilinear(&src, sx, sy, &mut out[offset..offset + channels]);
            }
        }

        Ok(Photo::new(out, photo.width(), photo.height(), photo.channels()))
    }
}

fn validate(
    photo: &Photo,
    center: PixelPoint,
    radius: f64,
    strength: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    if photo.is_empty() {
        return Err("Cannot warp a photo with no pixels".into());
    }
    if !photo.has_valid_length() {
        return Err(format!(
            "Photo buffer holds {} bytes, too few or too many for {}x{}x{}",
            photo.data().len(),
            photo.width(),
            photo.height(),
            photo.channels()
        )
        .into());
    }
    if !center.is_finite() {
        return Err(format!("Invalid warp center ({}, {})", center.x, center.y).into());
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(format!("Invalid warp radius {radius}").into());
    }
    if !strength.is_finite() {
        return Err(format!("Invalid warp strength {strength}").into());
    }
    Ok(())
}

/// Scale applied to a pixel's offset from the center at normalized distance `t`.
fn displacement_factor(t: f64, strength: f64) -> f64 {
    let eased = t * t * (3.0 - 2.0 * t);
    (1.0 - strength * (1.0 - eased)).max(0.0)
}

/// Half-open index range of pixels whose centers may fall inside the disc.
fn span(center: f64, radius: f64, len: usize) -> (usize, usize) {
    let limit = len as f64;
    let lo = (center - radius).floor().clamp(0.0, limit) as usize;
    let hi = (center + radius).ceil().clamp(0.0, limit) as usize;
    (lo, hi)
}

/// Bilinear sample at index-space `(x, y)`, clamped to the edges.
fn sample_bilinear(src: &ArrayView3<'_, u8>, x: f64, y: f64, out: &mut [u8]) {
    let (h, w, _) = src.dim();
    let x = x.clamp(0.0, (w - 1) as f64);
    let y = y.clamp(0.0, (h - 1) as f64);
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    for (ch, value) in out.iter_mut().enumerate() {
        let top = src[[y0, x0, ch]] as f64 * (1.0 - fx) + src[[y0, x1, ch]] as f64 * fx;
        let bottom = src[[y1, x0, ch]] as f64 * (1.0 - fx) + src[[y1, x1, ch]] as f64 * fx;
        *value = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
}
