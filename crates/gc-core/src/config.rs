use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Mode de rendu : sélectionne la rampe de glyphes.
///
/// # Example
/// ```
/// use gc_core::config::RenderMode;
/// assert_eq!(RenderMode::from_name("HF"), RenderMode::HighFidelity);
/// assert_eq!(RenderMode::from_name("nimporte"), RenderMode::Clean);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum RenderMode {
    /// Rampe ASCII clairsemée (10 glyphes).
    #[default]
    Clean,
    /// Rampe ASCII dense.
    HighFidelity,
    /// Blocs d'ombrage Unicode.
    Block,
}

impl RenderMode {
    /// Parse un nom de mode (insensible à la casse, alias courts acceptés).
    ///
    /// Un nom inconnu n'est pas une erreur : retombe sur `Clean`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::try_from_name(name).unwrap_or_else(|| {
            log::warn!("Mode inconnu '{name}', utilisation de clean.");
            Self::Clean
        })
    }

    /// Strict variant of [`RenderMode::from_name`]: `None` for unknown names.
    #[must_use]
    pub fn try_from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "clean" | "c" => Some(Self::Clean),
            "high_fidelity" | "high-fidelity" | "high" | "hf" => Some(Self::HighFidelity),
            "block" | "b" => Some(Self::Block),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::HighFidelity => "high_fidelity",
            Self::Block => "block",
        }
    }

    /// `true` si la rampe contient des glyphes hors ASCII.
    #[must_use]
    pub fn needs_unicode(self) -> bool {
        matches!(self, Self::Block)
    }
}

/// Borne de chaque dimension de la grille, explicite ou dérivée.
pub const MAX_GRID_DIM: u32 = 4096;

/// Configuration du rendu image → glyphes.
///
/// # Example
/// ```
/// use gc_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.target_width, 80);
/// assert_eq!(config.resolve_height(160, 100), 25);
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Largeur de la grille en glyphes (> 0).
    pub target_width: u32,
    /// Hauteur de la grille. 0 = dérivée du ratio d'aspect.
    pub target_height: u32,
    /// Correction hauteur/largeur d'une cellule (typiquement 0.5).
    pub char_aspect_ratio: f32,
    /// Gain linéaire appliqué à la luminance. 1.0 = neutre.
    pub contrast: f32,
    /// Offset additif, appliqué avant le clamp. 0.0 = neutre.
    pub brightness: f32,
    /// Exposant gamma (> 0), utilisé si `use_gamma_correction`.
    pub gamma: f32,
    /// Rampe de glyphes.
    pub mode: RenderMode,
    /// Activer la couleur truecolor.
    pub use_color: bool,
    /// Appliquer `luminance^(1/gamma)`.
    pub use_gamma_correction: bool,
    /// Dériver la hauteur quand `target_height == 0`.
    pub maintain_aspect: bool,
    /// Les glyphes Unicode sont affichables (décision externe).
    pub unicode: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target_width: 80,
            target_height: 0,
            char_aspect_ratio: 0.5,
            contrast: 1.0,
            brightness: 0.0,
            gamma: 2.2,
            mode: RenderMode::Clean,
            use_color: false,
            use_gamma_correction: false,
            maintain_aspect: true,
            unicode: true,
        }
    }
}

impl RenderConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.target_width = self.target_width.clamp(1, MAX_GRID_DIM);
        self.target_height = self.target_height.min(MAX_GRID_DIM);
        self.char_aspect_ratio = self.char_aspect_ratio.clamp(0.05, 10.0);
        self.contrast = self.contrast.clamp(0.0, 10.0);
        self.brightness = self.brightness.clamp(-1.0, 1.0);
        self.gamma = self.gamma.clamp(0.05, 10.0);
    }

    /// Hauteur effective de la grille pour une source `width`×`height`.
    ///
    /// `target_width · H · char_aspect_ratio / W`, tronqué vers zéro et borné
    /// à [`MAX_GRID_DIM`], quand la hauteur n'est pas fixée.
    #[must_use]
    pub fn resolve_height(&self, src_width: u32, src_height: u32) -> u32 {
        if self.target_height != 0 || !self.maintain_aspect || src_width == 0 {
            return self.target_height;
        }
        let derived = f64::from(self.target_width) * f64::from(src_height)
            * f64::from(self.char_aspect_ratio)
            / f64::from(src_width);
        (derived as u32).min(MAX_GRID_DIM)
    }

    /// Mode réellement utilisé : `Block` retombe sur `Clean` sans Unicode.
    #[must_use]
    pub fn effective_mode(&self) -> RenderMode {
        if self.mode.needs_unicode() && !self.unicode {
            RenderMode::Clean
        } else {
            self.mode
        }
    }
}

/// Paramètres de lecture animée.
///
/// # Example
/// ```
/// use gc_core::config::PlaybackConfig;
/// let playback = PlaybackConfig::default();
/// assert_eq!(playback.min_interval_ms, 20);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PlaybackConfig {
    /// Multiplicateur de vitesse (> 0). 2.0 = deux fois plus vite.
    pub speed: f32,
    /// Intervalle minimal entre deux frames, en millisecondes.
    pub min_interval_ms: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            min_interval_ms: 20,
        }
    }
}

impl PlaybackConfig {
    /// Clamp numeric fields to their valid ranges.
    pub fn clamp_all(&mut self) {
        self.speed = self.speed.clamp(0.01, 100.0);
        self.min_interval_ms = self.min_interval_ms.min(10_000);
    }
}

/// Configuration complète chargée depuis TOML.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Rendering parameters.
    pub render: RenderConfig,
    /// Animation playback parameters.
    pub playback: PlaybackConfig,
}

impl AppConfig {
    /// Clamp every section.
    pub fn clamp_all(&mut self) {
        self.render.clamp_all();
        self.playback.clamp_all();
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    playback: Option<PlaybackSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    width: Option<u32>,
    height: Option<u32>,
    aspect_ratio: Option<f32>,
    contrast: Option<f32>,
    brightness: Option<f32>,
    gamma: Option<f32>,
    mode: Option<String>,
    color: Option<bool>,
    gamma_correction: Option<bool>,
    maintain_aspect: Option<bool>,
    unicode: Option<bool>,
}

/// Playback section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct PlaybackSection {
    speed: Option<f32>,
    min_interval_ms: Option<u32>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gc_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("glyphcast.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML content and merge it over the defaults.
///
/// # Errors
/// Returns an error if the content is not valid TOML for the config layout.
///
/// # Example
/// ```
/// use gc_core::config::{parse_config, RenderMode};
/// let config = parse_config("[render]\nmode = \"block\"\nwidth = 40\n").unwrap();
/// assert_eq!(config.render.mode, RenderMode::Block);
/// assert_eq!(config.render.target_width, 40);
/// ```
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = AppConfig::default();

    if let Some(r) = file.render {
        let render = &mut config.render;
        if let Some(v) = r.width {
            render.target_width = v;
        }
        if let Some(v) = r.height {
            render.target_height = v;
        }
        if let Some(v) = r.aspect_ratio {
            render.char_aspect_ratio = v;
        }
        if let Some(v) = r.contrast {
            render.contrast = v;
        }
        if let Some(v) = r.brightness {
            render.brightness = v;
        }
        if let Some(v) = r.gamma {
            render.gamma = v;
        }
        if let Some(v) = r.mode {
            render.mode = RenderMode::from_name(&v);
        }
        if let Some(v) = r.color {
            render.use_color = v;
        }
        if let Some(v) = r.gamma_correction {
            render.use_gamma_correction = v;
        }
        if let Some(v) = r.maintain_aspect {
            render.maintain_aspect = v;
        }
        if let Some(v) = r.unicode {
            render.unicode = v;
        }
    }

    if let Some(p) = file.playback {
        if let Some(v) = p.speed {
            config.playback.speed = v;
        }
        if let Some(v) = p.min_interval_ms {
            config.playback.min_interval_ms = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_aliases() {
        assert_eq!(RenderMode::from_name("clean"), RenderMode::Clean);
        assert_eq!(RenderMode::from_name("C"), RenderMode::Clean);
        assert_eq!(RenderMode::from_name("high"), RenderMode::HighFidelity);
        assert_eq!(RenderMode::from_name("High_Fidelity"), RenderMode::HighFidelity);
        assert_eq!(RenderMode::from_name("b"), RenderMode::Block);
        assert_eq!(RenderMode::try_from_name("sextant"), None);
        assert_eq!(RenderMode::from_name("sextant"), RenderMode::Clean);
    }

    #[test]
    fn derived_height_truncates() {
        let config = RenderConfig {
            target_width: 10,
            char_aspect_ratio: 0.5,
            ..RenderConfig::default()
        };
        // 10 * 7 * 0.5 / 3 = 11.66 → 11
        assert_eq!(config.resolve_height(3, 7), 11);
    }

    #[test]
    fn derived_height_is_bounded() {
        let config = RenderConfig {
            target_width: MAX_GRID_DIM,
            char_aspect_ratio: 10.0,
            ..RenderConfig::default()
        };
        // 4096 * 10000 * 10 / 1 dépasse largement la borne
        assert_eq!(config.resolve_height(1, 10_000), MAX_GRID_DIM);
    }

    #[test]
    fn explicit_height_wins() {
        let config = RenderConfig {
            target_height: 9,
            ..RenderConfig::default()
        };
        assert_eq!(config.resolve_height(100, 100), 9);
    }

    #[test]
    fn no_derivation_without_maintain_aspect() {
        let config = RenderConfig {
            maintain_aspect: false,
            ..RenderConfig::default()
        };
        assert_eq!(config.resolve_height(100, 100), 0);
    }

    #[test]
    fn block_needs_unicode() {
        let config = RenderConfig {
            mode: RenderMode::Block,
            unicode: false,
            ..RenderConfig::default()
        };
        assert_eq!(config.effective_mode(), RenderMode::Clean);
    }

    #[test]
    fn partial_toml_merges_over_defaults() {
        let config = parse_config(
            "[render]\ncontrast = 1.5\nmode = \"hf\"\n[playback]\nspeed = 2.0\n",
        )
        .unwrap();
        assert!((config.render.contrast - 1.5).abs() < f32::EPSILON);
        assert_eq!(config.render.mode, RenderMode::HighFidelity);
        assert_eq!(config.render.target_width, 80);
        assert!((config.playback.speed - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.playback.min_interval_ms, 20);
    }

    #[test]
    fn shipped_default_config_matches_defaults() {
        let config = parse_config(include_str!("../../../config/default.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config =
            parse_config("[render]\nwidth = 0\ngamma = -1.0\n[playback]\nspeed = 0.0\n").unwrap();
        assert_eq!(config.render.target_width, 1);
        assert!(config.render.gamma > 0.0);
        assert!(config.playback.speed > 0.0);
    }

    #[test]
    fn load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glyphcast.toml");
        std::fs::write(&path, "[render]\ncolor = true\n").unwrap();
        let config = load_config(&path).unwrap();
        assert!(config.render.use_color);
    }

    #[test]
    fn load_config_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }
}
