use anyhow::Result;
use clap::Parser;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Config : fichier, puis overrides CLI, puis détection Unicode
    let config = pipeline::resolve_config(&cli)?;
    log::debug!(
        "Rendu {}×{} en mode {} (couleur : {})",
        config.render.target_width,
        config.render.target_height,
        config.render.effective_mode().name(),
        config.render.use_color
    );

    // 4. Décoder et afficher
    pipeline::run(&cli, config)
}
