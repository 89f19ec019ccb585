use std::path::Path;

use anyhow::{Context, Result};
use gc_core::pixel::PixelBuffer;
use image::{ColorType, DynamicImage};

/// Charge une image fixe (PNG, JPEG, BMP, PPM, GIF) depuis le disque.
///
/// # Errors
/// Returns an error if the image cannot be loaded.
///
/// # Example
/// ```no_run
/// use gc_source::image::load_image;
/// use std::path::Path;
/// let buf = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    from_dynamic(&img).with_context(|| format!("Image inutilisable : {}", path.display()))
}

/// Convertit une image décodée en `PixelBuffer`.
///
/// Les images en niveaux de gris restent sur un canal, tout le reste passe
/// en RGB 8 bits (l'alpha est ignoré).
///
/// # Errors
/// Returns an error if the image has a zero dimension.
///
/// # Example
/// ```
/// use gc_source::image::from_dynamic;
/// use image::{DynamicImage, GrayImage};
/// let img = DynamicImage::ImageLuma8(GrayImage::new(4, 2));
/// let buf = from_dynamic(&img).unwrap();
/// assert_eq!(buf.channels(), 1);
/// ```
pub fn from_dynamic(img: &DynamicImage) -> Result<PixelBuffer> {
    let buf = match img.color() {
        ColorType::L8 | ColorType::L16 | ColorType::La8 | ColorType::La16 => {
            let luma = img.to_luma8();
            let (w, h) = luma.dimensions();
            PixelBuffer::new(w, h, 1, luma.into_raw())?
        }
        _ => {
            let rgb = img.to_rgb8();
            let (w, h) = rgb.dimensions();
            PixelBuffer::new(w, h, 3, rgb.into_raw())?
        }
    };
    Ok(buf)
}
