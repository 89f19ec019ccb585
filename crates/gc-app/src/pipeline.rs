use std::io::Write;

use anyhow::{Context, Result};
use gc_ascii::Interpreter;
use gc_core::clock::{CancelToken, SystemClock};
use gc_core::config::{AppConfig, PlaybackConfig, load_config};
use gc_core::frame::Animation;
use gc_core::pixel::PixelBuffer;
use gc_render::pacer::FramePacer;
use gc_render::sink::TerminalSink;
use gc_render::stats::PlaybackStats;
use gc_source::Decoded;

use crate::cli::Cli;

/// Resolve config: `--config` file if present, then CLI overrides.
///
/// # Errors
/// Returns an error if the config file is invalid or a CLI value is rejected.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match cli.config {
        Some(ref path) if path.exists() => load_config(path)?,
        Some(ref path) => {
            log::warn!(
                "Config introuvable : {}. Utilisation des défauts.",
                path.display()
            );
            AppConfig::default()
        }
        None => AppConfig::default(),
    };
    cli.apply(&mut config)?;
    config.render.unicode = unicode_available(config.render.unicode, cli.force_unicode, |key| {
        std::env::var(key).ok()
    });
    Ok(config)
}

/// Disponibilité d'Unicode : `--force-unicode` l'impose, sinon il faut à la
/// fois `unicode = true` dans la config et une locale UTF-8.
#[must_use]
pub fn unicode_available(
    configured: bool,
    forced: bool,
    lookup: impl Fn(&str) -> Option<String>,
) -> bool {
    forced || (configured && locale_is_utf8(lookup))
}

/// `true` si la locale active annonce UTF-8.
///
/// Même priorité que la libc : `LC_ALL`, puis `LC_CTYPE`, puis `LANG` ; la
/// première variable non vide décide.
#[must_use]
pub fn locale_is_utf8(lookup: impl Fn(&str) -> Option<String>) -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .find_map(|key| lookup(key).filter(|v| !v.is_empty()))
        .is_some_and(|v| {
            let v = v.to_ascii_uppercase();
            v.contains("UTF-8") || v.contains("UTF8")
        })
}

/// Décode l'image et l'affiche : une fois pour une image fixe, en boucle
/// jusqu'à Ctrl-C pour un GIF animé.
///
/// # Errors
/// Returns an error if decoding, rendering or writing to the terminal fails.
pub fn run(cli: &Cli, config: AppConfig) -> Result<()> {
    let decoded = gc_source::open(&cli.image)?;
    let interpreter = Interpreter::new(config.render);
    let mut stdout = std::io::stdout().lock();

    match decoded {
        Decoded::Still(image) => render_still(&interpreter, &image, &mut stdout),
        Decoded::Animated(animation) if cli.once => {
            render_still(&interpreter, animation.frame(0).buffer(), &mut stdout)
        }
        Decoded::Animated(animation) => {
            drop(stdout);
            let cancel = CancelToken::new();
            install_interrupt_handler(&cancel)?;
            let stats = play(interpreter, config.playback, &animation, &cancel)?;
            log::debug!("Part des frames affichées : {:.2}", stats.render_ratio());
            Ok(())
        }
    }
}

/// Écrit la conversion d'une image fixe dans `out`.
///
/// # Errors
/// Returns an error if the conversion or the write fails.
pub fn render_still(
    interpreter: &Interpreter,
    image: &PixelBuffer,
    out: &mut impl Write,
) -> Result<()> {
    let text = interpreter
        .convert(image)
        .context("Conversion de l'image impossible")?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn play(
    interpreter: Interpreter,
    playback: PlaybackConfig,
    animation: &Animation,
    cancel: &CancelToken,
) -> Result<PlaybackStats> {
    let mut pacer = FramePacer::new(interpreter, playback, SystemClock);
    let mut sink = TerminalSink::stdout();
    let stats = pacer
        .play(animation, &mut sink, cancel)
        .context("Lecture de l'animation interrompue")?;
    Ok(stats)
}

/// Ctrl-C lève le jeton ; la boucle de lecture s'arrête à l'itération
/// suivante et restaure le curseur.
fn install_interrupt_handler(cancel: &CancelToken) -> Result<()> {
    let token = cancel.clone();
    ctrlc::set_handler(move || token.cancel())
        .context("Installation du handler Ctrl-C impossible")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use gc_core::config::RenderMode;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn locale_detection() {
        assert!(locale_is_utf8(env(&[("LANG", "fr_FR.UTF-8")])));
        assert!(locale_is_utf8(env(&[("LC_CTYPE", "en_US.utf8")])));
        assert!(!locale_is_utf8(env(&[("LANG", "C")])));
        assert!(!locale_is_utf8(env(&[])));
        // LC_ALL prime sur LANG
        assert!(!locale_is_utf8(env(&[("LC_ALL", "POSIX"), ("LANG", "fr_FR.UTF-8")])));
        // Variable vide ignorée
        assert!(locale_is_utf8(env(&[("LC_ALL", ""), ("LANG", "C.UTF-8")])));
    }

    #[test]
    fn unicode_combines_config_locale_and_flag() {
        let utf8 = || env(&[("LANG", "C.UTF-8")]);
        assert!(unicode_available(true, false, utf8()));
        assert!(!unicode_available(true, false, env(&[("LANG", "C")])));
        assert!(unicode_available(false, true, env(&[("LANG", "C")])));
        assert!(!unicode_available(false, false, utf8()));
    }

    #[test]
    fn config_file_can_disable_unicode_under_utf8_locale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ascii.toml");
        std::fs::write(&path, "[render]\nmode = \"block\"\nunicode = false\n").unwrap();

        let mut config = load_config(&path).unwrap();
        config.render.unicode =
            unicode_available(config.render.unicode, false, env(&[("LANG", "C.UTF-8")]));

        assert!(!config.render.unicode);
        assert_eq!(config.render.effective_mode(), RenderMode::Clean);
    }

    #[test]
    fn config_file_then_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glyphcast.toml");
        std::fs::write(
            &path,
            "[render]\nmode = \"block\"\nwidth = 30\ncolor = true\n\n[playback]\nspeed = 3.0\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "glyphcast",
            "chat.png",
            "--config",
            path.to_str().unwrap(),
            "--width",
            "50",
            "--force-unicode",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.render.mode, RenderMode::Block);
        assert_eq!(config.render.target_width, 50);
        assert!(config.render.use_color);
        assert!(config.render.unicode);
        assert!((config.playback.speed - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let cli = Cli::try_parse_from(["glyphcast", "chat.png", "--config", "/nulle/part.toml"])
            .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.render.target_width, 80);
    }

    #[test]
    fn invalid_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cassé.toml");
        std::fs::write(&path, "[render\nwidth = ").unwrap();
        let cli = Cli::try_parse_from(["glyphcast", "chat.png", "--config", path.to_str().unwrap()])
            .unwrap();
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn still_image_is_written_once() {
        let mut interp = Interpreter::new(AppConfig::default().render);
        interp.set_target_size(2, 2);
        let white = PixelBuffer::filled(2, 2, &[255, 255, 255]).unwrap();
        let mut out = Vec::new();
        render_still(&interp, &white, &mut out).unwrap();
        assert_eq!(out, b"@@\n@@\n");
    }

    #[test]
    fn missing_image_reports_path() {
        let cli = Cli::try_parse_from(["glyphcast", "/nulle/part/chat.png"]).unwrap();
        let err = run(&cli, AppConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("chat.png"));
    }
}
