use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use gc_core::frame::{Animation, AnimationFrame};
use gc_core::pixel::PixelBuffer;
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Delay, DynamicImage};

/// `true` si l'extension est `.gif` (insensible à la casse).
#[must_use]
pub fn is_gif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"))
}

/// Décode toutes les frames d'un GIF avec leur délai déclaré.
///
/// Les frames sont composées sur le canevas complet par le décodeur, donc
/// toutes partagent les mêmes dimensions.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not a valid GIF.
///
/// # Example
/// ```no_run
/// use gc_source::gif::load_animation;
/// use std::path::Path;
/// let anim = load_animation(Path::new("spinner.gif")).unwrap();
/// ```
pub fn load_animation(path: &Path) -> Result<Animation> {
    let file =
        File::open(path).with_context(|| format!("Impossible d'ouvrir {}", path.display()))?;
    let decoder = GifDecoder::new(BufReader::new(file))
        .with_context(|| format!("GIF invalide : {}", path.display()))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .with_context(|| format!("Erreur de décodage des frames de {}", path.display()))?;

    let mut out = Vec::with_capacity(frames.len());
    for frame in frames {
        let delay_cs = delay_to_cs(frame.delay());
        // Alpha ignoré : la composition du canevas est déjà faite
        let rgb = DynamicImage::ImageRgba8(frame.into_buffer()).to_rgb8();
        let (w, h) = rgb.dimensions();
        let buffer = PixelBuffer::new(w, h, 3, rgb.into_raw())?;
        out.push(AnimationFrame::new(buffer, delay_cs));
    }
    log::debug!("{} : {} frames décodées", path.display(), out.len());
    Ok(Animation::new(out)?)
}

/// Délai GIF (ms en fraction) → centisecondes arrondies.
fn delay_to_cs(delay: Delay) -> i32 {
    let (numer, denom) = delay.numer_denom_ms();
    if denom == 0 {
        return 0;
    }
    (f64::from(numer) / f64::from(denom) / 10.0).round() as i32
}
