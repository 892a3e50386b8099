//! Island generator binary: loads assets, builds the island and reports what
//! would be handed to a renderer.
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>           JSON island config (default: built-in)
//!   --preset <NAME>           classic | rolling | peaks (ignored with --config)
//!   --seed <SEED>             Terrain noise seed
//!   --decoration-seed <SEED>  Fix rock/tree/cloud placement
//!   --assets <DIR>            Asset root directory (default: assets)
//!   --timeout <SECS>          Asset loading timeout (default: 30)
//!   --dump-config <PATH>      Write the effective config as JSON and exit

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use hexisle::core::{logging, Result};
use hexisle::scene::{
    FsAssetProvider, IslandConfig, IslandScene, Preset, RenderTarget, SceneMesh, SceneSetup,
};

/// Logs each submitted mesh instead of drawing it
#[derive(Default)]
struct SummaryTarget {
    meshes: usize,
    triangles: usize,
}

impl RenderTarget for SummaryTarget {
    fn configure(&mut self, setup: &SceneSetup) {
        log::info!(
            "Camera at {:?} (fov {}), light at {:?} intensity {}",
            setup.camera.position,
            setup.camera.fov_y,
            setup.light.position,
            setup.light.intensity,
        );
    }

    fn add_mesh(&mut self, mesh: SceneMesh) {
        log::info!(
            "  {:<14} {:>7} verts {:>7} tris  material {:?}",
            mesh.name,
            mesh.mesh.vertex_count(),
            mesh.mesh.triangle_count(),
            mesh.material.model,
        );
        if let Some(bounds) = mesh.mesh.bounds() {
            log::debug!("    centre {:?} extent {:?}", bounds.center(), bounds.size());
        }
        self.meshes += 1;
        self.triangles += mesh.mesh.triangle_count();
    }
}

fn parse_arg<T: FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn build_config(args: &[String]) -> Result<IslandConfig> {
    let mut config = match parse_arg::<PathBuf>(args, "--config") {
        Some(path) => IslandConfig::load(path)?,
        None => {
            let preset = match parse_arg::<String>(args, "--preset") {
                Some(name) => name.parse::<Preset>()?,
                None => Preset::default(),
            };
            log::info!("Using preset '{}'", preset.name());
            IslandConfig::preset(preset)
        }
    };

    if let Some(seed) = parse_arg(args, "--seed") {
        config.terrain.seed = seed;
    }
    if let Some(seed) = parse_arg(args, "--decoration-seed") {
        config.decoration.seed = Some(seed);
    }
    if let Some(root) = parse_arg(args, "--assets") {
        config.assets.root = root;
    }
    if let Some(timeout) = parse_arg(args, "--timeout") {
        config.assets.timeout_secs = timeout;
    }
    config.validate()?;
    Ok(config)
}

async fn run(args: Vec<String>) -> Result<()> {
    let config = build_config(&args)?;

    if let Some(path) = parse_arg::<PathBuf>(&args, "--dump-config") {
        config.save(&path)?;
        log::info!("Wrote config to {}", path.display());
        return Ok(());
    }

    log::info!(
        "Generating island: seed {}, max height {}, assets in {}",
        config.terrain.seed,
        config.max_height(),
        config.assets.root.display(),
    );

    let scene = IslandScene::load(config, Arc::new(FsAssetProvider)).await?;
    let stats = scene.terrain().stats.clone();

    let mut target = SummaryTarget::default();
    scene.submit(&mut target);

    log::info!(
        "Submitted {} meshes, {} triangles ({} columns, {} rocks, {} trees)",
        target.meshes,
        target.triangles,
        stats.columns,
        stats.rocks,
        stats.trees,
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
