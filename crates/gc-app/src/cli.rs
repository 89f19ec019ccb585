use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gc_core::config::{AppConfig, RenderMode};

/// Largeur utilisée quand la largeur positionnelle est absente ou invalide.
pub const DEFAULT_WIDTH: u32 = 80;

/// glyphcast : rendu d'images en glyphes dans le terminal, GIF animés inclus.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source : PNG, JPEG, BMP, GIF (animé ou non) ou PPM.
    pub image: PathBuf,

    /// Forme positionnelle : style (clean, high_fidelity, block).
    #[arg(value_name = "STYLE")]
    pub style_pos: Option<String>,

    /// Forme positionnelle : couleurs (yes/no).
    #[arg(value_name = "COLORS", requires = "style_pos")]
    pub colors_pos: Option<String>,

    /// Forme positionnelle : largeur en colonnes.
    #[arg(value_name = "WIDTH", requires = "colors_pos", allow_negative_numbers = true)]
    pub width_pos: Option<String>,

    /// Style de rendu : clean, high_fidelity, block.
    #[arg(long)]
    pub style: Option<String>,

    /// Activer la couleur truecolor.
    #[arg(long, default_value_t = false)]
    pub color: bool,

    /// Largeur de la grille en colonnes.
    #[arg(long)]
    pub width: Option<u32>,

    /// Hauteur de la grille en lignes (0 : dérivée du ratio d'aspect).
    #[arg(long)]
    pub height: Option<u32>,

    /// Ratio largeur/hauteur d'une cellule du terminal.
    #[arg(long)]
    pub aspect: Option<f32>,

    /// Gain de contraste.
    #[arg(long, allow_negative_numbers = true)]
    pub contrast: Option<f32>,

    /// Décalage de luminosité, entre -1 et 1.
    #[arg(long, allow_negative_numbers = true)]
    pub brightness: Option<f32>,

    /// Active la correction gamma avec cet exposant.
    #[arg(long)]
    pub gamma: Option<f32>,

    /// Multiplicateur de vitesse des animations.
    #[arg(long)]
    pub speed: Option<f32>,

    /// Intervalle minimal entre deux frames, en millisecondes.
    #[arg(long, value_name = "MS")]
    pub min_interval: Option<u32>,

    /// Considérer le terminal compatible Unicode sans consulter la locale.
    #[arg(long, default_value_t = false)]
    pub force_unicode: bool,

    /// N'afficher que la première frame d'une animation.
    #[arg(long, default_value_t = false)]
    pub once: bool,

    /// Fichier de configuration TOML (voir config/default.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Applique les arguments sur `config` : forme positionnelle d'abord,
    /// puis les options nommées, qui ont le dernier mot.
    ///
    /// # Errors
    /// Returns an error if the positional COLORS value is not recognized.
    pub fn apply(&self, config: &mut AppConfig) -> Result<()> {
        let render = &mut config.render;

        if let Some(ref style) = self.style_pos {
            render.mode = RenderMode::from_name(style);
        }
        if let Some(ref colors) = self.colors_pos {
            render.use_color = parse_colors(colors)?;
        }
        if let Some(ref width) = self.width_pos {
            render.target_width = parse_width(width);
        }

        if let Some(ref style) = self.style {
            render.mode = RenderMode::from_name(style);
        }
        if self.color {
            render.use_color = true;
        }
        if let Some(v) = self.width {
            render.target_width = v;
        }
        if let Some(v) = self.height {
            render.target_height = v;
        }
        if let Some(v) = self.aspect {
            render.char_aspect_ratio = v;
        }
        if let Some(v) = self.contrast {
            render.contrast = v;
        }
        if let Some(v) = self.brightness {
            render.brightness = v;
        }
        if let Some(v) = self.gamma {
            render.gamma = v;
            render.use_gamma_correction = true;
        }
        if let Some(v) = self.speed {
            config.playback.speed = v;
        }
        if let Some(v) = self.min_interval {
            config.playback.min_interval_ms = v;
        }

        config.clamp_all();
        Ok(())
    }
}

/// Parse the positional COLORS argument.
///
/// # Errors
/// Returns an error for anything but yes/y/true/1 or no/n/false/0.
pub fn parse_colors(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        _ => anyhow::bail!("Valeur de couleurs invalide : '{value}' (attendu : yes ou no)"),
    }
}

/// Largeur positionnelle : un entier strictement positif, sinon
/// [`DEFAULT_WIDTH`].
#[must_use]
pub fn parse_width(value: &str) -> u32 {
    match value.trim().parse::<i64>() {
        Ok(w) if w > 0 => u32::try_from(w).unwrap_or(u32::MAX),
        _ => {
            log::warn!("Largeur invalide '{value}', utilisation de {DEFAULT_WIDTH}.");
            DEFAULT_WIDTH
        }
    }
}
