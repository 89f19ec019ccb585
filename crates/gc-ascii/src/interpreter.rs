use gc_core::charset::GlyphRamp;
use gc_core::config::{RenderConfig, RenderMode};
use gc_core::error::CoreError;
use gc_core::pixel::PixelBuffer;

use crate::colorize::colorize_into;
use crate::glyph::map_intensity;
use crate::resample::resample;
use crate::tone::ToneMapper;

/// Convertit des buffers de pixels en texte, selon une `RenderConfig`.
///
/// La rampe de glyphes est pré-calculée et reconstruite seulement quand le
/// mode change.
///
/// # Example
/// ```
/// use gc_core::config::RenderConfig;
/// use gc_core::pixel::PixelBuffer;
/// use gc_ascii::Interpreter;
///
/// let mut interp = Interpreter::new(RenderConfig::default());
/// interp.set_target_size(2, 2);
/// let white = PixelBuffer::filled(2, 2, &[255, 255, 255]).unwrap();
/// assert_eq!(interp.convert(&white).unwrap(), "@@\n@@\n");
/// ```
#[derive(Clone, Debug)]
pub struct Interpreter {
    config: RenderConfig,
    ramp: GlyphRamp,
}

impl Interpreter {
    /// Create an interpreter for `config`.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        let ramp = GlyphRamp::for_mode(config.effective_mode());
        if config.effective_mode() != config.mode {
            log::warn!(
                "Mode {} indisponible sans Unicode, utilisation de clean.",
                config.mode.name()
            );
        }
        Self { config, ramp }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Change le mode de rendu (reconstruit la rampe).
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.config.mode = mode;
        self.ramp = GlyphRamp::for_mode(self.config.effective_mode());
    }

    /// Fixe la taille de la grille. `height == 0` : dérivée de l'aspect.
    pub fn set_target_size(&mut self, width: u32, height: u32) {
        self.config.target_width = width;
        self.config.target_height = height;
    }

    /// Set the linear contrast gain.
    pub fn set_contrast(&mut self, contrast: f32) {
        self.config.contrast = contrast;
    }

    /// Set the additive brightness offset.
    pub fn set_brightness(&mut self, brightness: f32) {
        self.config.brightness = brightness;
    }

    /// Enable or disable truecolor output.
    pub fn set_color(&mut self, use_color: bool) {
        self.config.use_color = use_color;
    }

    /// Enable gamma correction with exponent `gamma`, or disable it with `None`.
    pub fn set_gamma(&mut self, gamma: Option<f32>) {
        match gamma {
            Some(g) => {
                self.config.gamma = g;
                self.config.use_gamma_correction = true;
            }
            None => self.config.use_gamma_correction = false,
        }
    }

    /// Dimensions de la grille de sortie pour une source donnée.
    #[must_use]
    pub fn grid_size(&self, image: &PixelBuffer) -> (u32, u32) {
        (
            self.config.target_width,
            self.config.resolve_height(image.width(), image.height()),
        )
    }

    /// Convertit une image en bloc de texte : une ligne par rangée de la
    /// grille, chacune terminée par `\n`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidArgument`] if the resolved grid has a zero
    /// dimension.
    pub fn convert(&self, image: &PixelBuffer) -> Result<String, CoreError> {
        let mut out = String::new();
        self.convert_into(image, &mut out)?;
        Ok(out)
    }

    /// Variante de [`Interpreter::convert`] qui réutilise `out` (vidé
    /// d'abord). Utilisée par la boucle d'animation.
    ///
    /// # Errors
    /// Same as [`Interpreter::convert`].
    pub fn convert_into(&self, image: &PixelBuffer, out: &mut String) -> Result<(), CoreError> {
        let (width, height) = self.grid_size(image);
        let grid = resample(image, width, height)?;
        let tone = ToneMapper::new(&self.config);
        let use_color = self.config.use_color;

        out.clear();
        let per_cell = if use_color { 24 } else { 1 };
        out.reserve((width as usize * per_cell + 1) * height as usize);

        for y in 0..height {
            for x in 0..width {
                let t = tone.map(grid.pixel(x, y));
                let ch = map_intensity(t.intensity, &self.ramp);
                colorize_into(out, ch, t.rgb, use_color);
            }
            out.push('\n');
        }
        Ok(())
    }
}
