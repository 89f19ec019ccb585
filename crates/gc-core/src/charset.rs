use crate::config::RenderMode;

/// 10 caractères : clair, bon contraste.
pub const CHARSET_CLEAN: &str = " .:-=+*#%@";

/// Rampe dense, de l'espace aux symboles pleins. Asset opaque : l'ordre est
/// conservé octet pour octet (le `\\t` est un antislash suivi de `t`).
pub const CHARSET_HIGH_FIDELITY: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Blocs Unicode : ombrages fractionnaires.
pub const CHARSET_BLOCK: &str = " ░▒▓█";

/// Rampe de glyphes ordonnée du plus sombre (index 0) au plus dense.
///
/// Pré-calculée une fois : l'indexation se fait par glyphe, pas par octet,
/// ce qui compte pour les blocs Unicode multi-octets.
///
/// # Example
/// ```
/// use gc_core::charset::GlyphRamp;
/// use gc_core::config::RenderMode;
/// let ramp = GlyphRamp::for_mode(RenderMode::Block);
/// assert_eq!(ramp.len(), 5);
/// assert_eq!(ramp.last(), '█');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from a charset ordered darkest→densest.
    ///
    /// An empty charset falls back to [`CHARSET_CLEAN`].
    ///
    /// # Example
    /// ```
    /// use gc_core::charset::GlyphRamp;
    /// assert_eq!(GlyphRamp::new("").len(), 10);
    /// assert_eq!(GlyphRamp::new(" #").first(), ' ');
    /// ```
    #[must_use]
    pub fn new(charset: &str) -> Self {
        let glyphs: Vec<char> = charset.chars().collect();
        if glyphs.is_empty() {
            return Self::new(CHARSET_CLEAN);
        }
        Self { glyphs }
    }

    /// The ramp for a render mode.
    #[must_use]
    pub fn for_mode(mode: RenderMode) -> Self {
        Self::new(charset_for(mode))
    }

    /// Number of glyphs, always `>= 1`.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, clamped to the last glyph.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        let last = self.glyphs.len().saturating_sub(1);
        self.glyphs.get(index.min(last)).copied().unwrap_or(' ')
    }

    /// Darkest glyph.
    #[must_use]
    pub fn first(&self) -> char {
        self.glyph(0)
    }

    /// Densest glyph.
    #[must_use]
    pub fn last(&self) -> char {
        self.glyph(usize::MAX)
    }
}

/// Charset brut associé à un mode.
#[must_use]
pub fn charset_for(mode: RenderMode) -> &'static str {
    match mode {
        RenderMode::Clean => CHARSET_CLEAN,
        RenderMode::HighFidelity => CHARSET_HIGH_FIDELITY,
        RenderMode::Block => CHARSET_BLOCK,
    }
}
