use gc_core::charset::GlyphRamp;

/// Index de rampe pour une intensité : `clamp(floor(i·(len-1)), 0, len-1)`.
///
/// # Example
/// ```
/// use gc_ascii::glyph::glyph_index;
/// assert_eq!(glyph_index(0.0, 10), 0);
/// assert_eq!(glyph_index(0.5, 10), 4);
/// assert_eq!(glyph_index(1.0, 10), 9);
/// assert_eq!(glyph_index(7.0, 10), 9);
/// ```
#[inline(always)]
#[must_use]
pub fn glyph_index(intensity: f32, len: usize) -> usize {
    let last = len.saturating_sub(1);
    // `as usize` sature : négatif et NaN → 0
    ((intensity * last as f32) as usize).min(last)
}

/// Glyphe de `ramp` pour l'intensité `intensity` ∈ [0, 1].
///
/// # Example
/// ```
/// use gc_core::charset::GlyphRamp;
/// use gc_ascii::glyph::map_intensity;
/// let ramp = GlyphRamp::new(" .:-=+*#%@");
/// assert_eq!(map_intensity(1.0, &ramp), '@');
/// ```
#[inline(always)]
#[must_use]
pub fn map_intensity(intensity: f32, ramp: &GlyphRamp) -> char {
    ramp.glyph(glyph_index(intensity, ramp.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_core::config::RenderMode;

    const MODES: [RenderMode; 3] = [RenderMode::Clean, RenderMode::HighFidelity, RenderMode::Block];

    #[test]
    fn extremes_map_to_ramp_ends() {
        for mode in MODES {
            let ramp = GlyphRamp::for_mode(mode);
            assert_eq!(map_intensity(0.0, &ramp), ramp.first(), "{mode:?}");
            assert_eq!(map_intensity(1.0, &ramp), ramp.last(), "{mode:?}");
        }
    }

    #[test]
    fn out_of_range_intensity_is_clamped() {
        let ramp = GlyphRamp::for_mode(RenderMode::Clean);
        assert_eq!(map_intensity(-3.0, &ramp), ' ');
        assert_eq!(map_intensity(f32::NAN, &ramp), ' ');
        assert_eq!(map_intensity(2.0, &ramp), '@');
    }

    #[test]
    fn index_is_monotonic_in_intensity() {
        for mode in MODES {
            let len = GlyphRamp::for_mode(mode).len();
            let mut prev = 0;
            for step in 0..=100u8 {
                let idx = glyph_index(f32::from(step) / 100.0, len);
                assert!(idx >= prev && idx < len, "{mode:?} à {step}");
                prev = idx;
            }
        }
    }

    #[test]
    fn block_ramp_indexes_by_glyph() {
        let ramp = GlyphRamp::for_mode(RenderMode::Block);
        assert_eq!(map_intensity(0.25, &ramp), '░');
        assert_eq!(map_intensity(0.5, &ramp), '▒');
        assert_eq!(map_intensity(0.75, &ramp), '▓');
    }
}
