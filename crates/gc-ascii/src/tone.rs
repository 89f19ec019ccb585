use gc_core::config::RenderConfig;

/// Résultat du tone mapping d'un pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    /// Intensité finale normalisée [0.0, 1.0].
    pub intensity: f32,
    /// Couleur utilisée pour la coloration optionnelle.
    pub rgb: (u8, u8, u8),
}

/// Convertit un pixel en intensité perceptuelle.
///
/// Luminance BT.601 → gamma optionnel → contraste/luminosité → smoothstep.
///
/// # Example
/// ```
/// use gc_core::config::RenderConfig;
/// use gc_ascii::tone::ToneMapper;
/// let mapper = ToneMapper::new(&RenderConfig::default());
/// assert_eq!(mapper.map(&[255, 255, 255]).intensity, 1.0);
/// assert_eq!(mapper.map(&[0, 0, 0]).intensity, 0.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ToneMapper {
    contrast: f32,
    brightness: f32,
    /// `Some(gamma)` si la correction est activée.
    gamma: Option<f32>,
}

impl ToneMapper {
    /// Capture the tone parameters of `config`.
    #[must_use]
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            contrast: config.contrast,
            brightness: config.brightness,
            gamma: config.use_gamma_correction.then_some(config.gamma),
        }
    }

    /// Tone-map one pixel given as its interleaved channels.
    ///
    /// Trois canaux ou plus : RGB. Un canal : niveau de gris, répliqué sur
    /// R, G et B pour la coloration.
    #[inline]
    #[must_use]
    pub fn map(&self, pixel: &[u8]) -> Tone {
        let (mut lum, rgb) = match *pixel {
            [r, g, b, ..] => (luminance(r, g, b), (r, g, b)),
            [v] => {
                let lum = f32::from(v) / 255.0;
                let scaled = (lum * 255.0) as u8;
                (lum, (scaled, scaled, scaled))
            }
            _ => (0.0, (0, 0, 0)),
        };

        if let Some(gamma) = self.gamma {
            lum = apply_gamma_correction(lum, gamma);
        }
        lum = apply_contrast_brightness(lum, self.contrast, self.brightness);
        Tone {
            intensity: apply_perceptual_mapping(lum),
            rgb,
        }
    }
}

/// Luminance perceptuelle BT.601, normalisée [0.0, 1.0].
///
/// # Example
/// ```
/// use gc_ascii::tone::luminance;
/// assert_eq!(luminance(255, 255, 255), 1.0);
/// assert!((luminance(255, 0, 0) - 0.299).abs() < 1e-6);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * f32::from(r) / 255.0 + 0.587 * f32::from(g) / 255.0 + 0.114 * f32::from(b) / 255.0
}

/// `value^(1/gamma)`, bornée à [0, 1] avant et après.
#[inline(always)]
#[must_use]
pub fn apply_gamma_correction(value: f32, gamma: f32) -> f32 {
    if value <= 0.0 {
        return 0.0;
    }
    if value >= 1.0 {
        return 1.0;
    }
    value.powf(1.0 / gamma).clamp(0.0, 1.0)
}

/// `clamp(value·contrast + brightness, 0, 1)`.
#[inline(always)]
#[must_use]
pub fn apply_contrast_brightness(value: f32, contrast: f32, brightness: f32) -> f32 {
    (value * contrast + brightness).clamp(0.0, 1.0)
}

/// Smoothstep `3x² − 2x³` : compresse les tons moyens.
#[inline(always)]
#[must_use]
pub fn apply_perceptual_mapping(x: f32) -> f32 {
    (x * x * (3.0 - 2.0 * x)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mapper(contrast: f32, brightness: f32) -> ToneMapper {
        ToneMapper::new(&RenderConfig {
            contrast,
            brightness,
            ..RenderConfig::default()
        })
    }

    #[test]
    fn gray_channel_is_replicated() {
        let tone = mapper(1.0, 0.0).map(&[255]);
        assert_eq!(tone.rgb, (255, 255, 255));
        assert_eq!(tone.intensity, 1.0);
        assert_eq!(mapper(1.0, 0.0).map(&[0]).rgb, (0, 0, 0));
    }

    #[test]
    fn gamma_bounds_avoid_domain_errors() {
        assert_eq!(apply_gamma_correction(-0.5, 2.2), 0.0);
        assert_eq!(apply_gamma_correction(0.0, 2.2), 0.0);
        assert_eq!(apply_gamma_correction(1.5, 2.2), 1.0);
        let mid = apply_gamma_correction(0.25, 2.0);
        assert!((mid - 0.5).abs() < 1e-6);
    }

    #[test]
    fn gamma_brightens_mid_tones() {
        let plain = mapper(1.0, 0.0).map(&[64, 64, 64]).intensity;
        let corrected = ToneMapper::new(&RenderConfig {
            use_gamma_correction: true,
            gamma: 2.2,
            ..RenderConfig::default()
        })
        .map(&[64, 64, 64])
        .intensity;
        assert!(corrected > plain);
    }

    #[test]
    fn brightness_is_applied_before_clamp() {
        assert_eq!(mapper(1.0, 1.0).map(&[0, 0, 0]).intensity, 1.0);
        assert_eq!(mapper(1.0, -1.0).map(&[255, 255, 255]).intensity, 0.0);
        assert_eq!(mapper(0.0, 0.0).map(&[255, 255, 255]).intensity, 0.0);
    }

    #[test]
    fn smoothstep_fixed_points() {
        assert_eq!(apply_perceptual_mapping(0.0), 0.0);
        assert_eq!(apply_perceptual_mapping(1.0), 1.0);
        assert!((apply_perceptual_mapping(0.5) - 0.5).abs() < 1e-6);
        assert!(apply_perceptual_mapping(0.25) < 0.25);
        assert!(apply_perceptual_mapping(0.75) > 0.75);
    }

    #[test]
    fn neutral_gray_ramp_is_monotonic() {
        let m = mapper(1.0, 0.0);
        let mut prev = -1.0f32;
        for v in 0..=255u8 {
            let i = m.map(&[v, v, v]).intensity;
            assert!(i >= prev, "intensité non monotone à {v}");
            prev = i;
        }
    }

    proptest! {
        #[test]
        fn intensity_non_decreasing_in_gray(
            v in 0u8..255,
            contrast in 0.5f32..2.0,
            brightness in -0.5f32..0.5,
        ) {
            let m = mapper(contrast, brightness);
            let lo = m.map(&[v, v, v]).intensity;
            let hi = m.map(&[v + 1, v + 1, v + 1]).intensity;
            prop_assert!(hi >= lo, "{lo} > {hi} pour v={v}");
            prop_assert!((0.0..=1.0).contains(&hi));
        }
    }
}
