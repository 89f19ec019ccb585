//! Decoding adapters for glyphcast (still images, PPM, animated GIF).
//!
//! Everything here sits outside the rendering core: it turns files into
//! [`PixelBuffer`](gc_core::PixelBuffer)s and [`Animation`](gc_core::Animation)s.

pub mod gif;
pub mod image;

use std::path::Path;

use anyhow::Result;
use gc_core::frame::Animation;
use gc_core::pixel::PixelBuffer;

/// Résultat du décodage d'un fichier.
#[derive(Debug)]
pub enum Decoded {
    /// Image fixe (ou GIF à une seule frame).
    Still(PixelBuffer),
    /// Séquence animée d'au moins deux frames.
    Animated(Animation),
}

/// Décode `path` : les GIF multi-frames deviennent une animation, tout le
/// reste une image fixe.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
pub fn open(path: &Path) -> Result<Decoded> {
    if gif::is_gif(path) {
        let animation = gif::load_animation(path)?;
        if animation.len() > 1 {
            log::info!(
                "GIF animé : {} frames, cycle de {} cs",
                animation.len(),
                animation.total_delay_cs()
            );
            return Ok(Decoded::Animated(animation));
        }
        return Ok(Decoded::Still(animation.frame(0).buffer().clone()));
    }
    crate::image::load_image(path).map(Decoded::Still)
}
