use gc_core::error::CoreError;
use gc_core::pixel::PixelBuffer;

/// Redimensionne `src` en `width`×`height` au plus proche voisin.
///
/// Le pixel de sortie `(x, y)` copie le pixel source
/// `(floor(x·W/width), floor(y·H/height))`, chaque coordonnée bornée à
/// `[0, dim-1]`. Aucun mélange : le tone mapping lisse déjà.
///
/// # Errors
/// Returns [`CoreError::InvalidArgument`] if `width` or `height` is zero.
///
/// # Example
/// ```
/// use gc_core::pixel::PixelBuffer;
/// use gc_ascii::resample::resample;
/// let src = PixelBuffer::new(4, 2, 1, vec![0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
/// let dst = resample(&src, 2, 1).unwrap();
/// assert_eq!(dst.data(), &[0, 2]);
/// ```
pub fn resample(src: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer, CoreError> {
    if width == 0 || height == 0 || src.data().is_empty() {
        return Err(CoreError::InvalidArgument { width, height });
    }
    if src.width() == width && src.height() == height {
        return Ok(src.clone());
    }

    let channels = usize::from(src.channels());
    let mut data = Vec::with_capacity(width as usize * height as usize * channels);

    // Colonnes source pré-calculées : identiques pour chaque ligne
    let columns: Vec<u32> = (0..width)
        .map(|x| source_coord(x, src.width(), width))
        .collect();

    for y in 0..height {
        let sy = source_coord(y, src.height(), height);
        for &sx in &columns {
            data.extend_from_slice(src.pixel(sx, sy));
        }
    }

    PixelBuffer::new(width, height, src.channels(), data)
}

/// `floor(dst · src_len / dst_len)`, borné à `src_len - 1`.
#[inline(always)]
fn source_coord(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    let s = u64::from(dst) * u64::from(src_len) / u64::from(dst_len.max(1));
    (s as u32).min(src_len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_target_is_invalid_argument() {
        let src = PixelBuffer::filled(2, 2, &[0]).unwrap();
        assert!(matches!(
            resample(&src, 0, 2),
            Err(CoreError::InvalidArgument { width: 0, height: 2 })
        ));
        assert!(resample(&src, 2, 0).is_err());
    }

    #[test]
    fn upscale_repeats_pixels() {
        let src = PixelBuffer::new(2, 1, 1, vec![10, 20]).unwrap();
        let dst = resample(&src, 4, 2).unwrap();
        assert_eq!(dst.data(), &[10, 10, 20, 20, 10, 10, 20, 20]);
    }

    #[test]
    fn keeps_channel_interleaving() {
        let src = PixelBuffer::new(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let dst = resample(&src, 1, 1).unwrap();
        assert_eq!(dst.data(), &[1, 2, 3]);
        assert_eq!(dst.channels(), 3);
    }

    #[test]
    fn same_size_is_identity() {
        let src = PixelBuffer::new(2, 2, 1, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(resample(&src, 2, 2).unwrap(), src);
    }

    proptest! {
        #[test]
        fn output_length_matches_target(
            sw in 1u32..40, sh in 1u32..40,
            tw in 1u32..60, th in 1u32..60,
            rgb in any::<bool>(),
        ) {
            let channels: u8 = if rgb { 3 } else { 1 };
            let len = (sw * sh) as usize * usize::from(channels);
            let src = PixelBuffer::new(sw, sh, channels, vec![7; len]).unwrap();
            let dst = resample(&src, tw, th).unwrap();
            prop_assert_eq!(dst.data().len(), (tw * th) as usize * usize::from(channels));
            prop_assert_eq!((dst.width(), dst.height()), (tw, th));
        }
    }
}
