//! Asset loading: textures and the environment map, gated on a timeout.
//!
//! Scene assembly waits for every asset. Any failure, or the timeout
//! elapsing first, aborts startup with a typed error instead of rendering
//! a half-textured island.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, Rgb32FImage};
use tokio::task::JoinSet;

use super::config::AssetConfig;
use crate::core::{Error, Result};
use crate::terrain::biome::Biome;

/// Decoded texture shared between materials
#[derive(Clone, Debug)]
pub struct Texture {
    pub path: PathBuf,
    image: Arc<DynamicImage>,
}

impl Texture {
    pub fn new(path: impl Into<PathBuf>, image: DynamicImage) -> Self {
        Self { path: path.into(), image: Arc::new(image) }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Linear HDR environment map used for image-based lighting
#[derive(Clone, Debug)]
pub struct EnvironmentMap {
    pub path: PathBuf,
    image: Arc<Rgb32FImage>,
}

impl EnvironmentMap {
    pub fn new(path: impl Into<PathBuf>, image: Rgb32FImage) -> Self {
        Self { path: path.into(), image: Arc::new(image) }
    }

    pub fn image(&self) -> &Rgb32FImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Source of decoded assets
pub trait AssetProvider: Send + Sync {
    fn load_texture(&self, path: &Path) -> impl Future<Output = Result<Texture>> + Send;

    fn load_environment(&self, path: &Path) -> impl Future<Output = Result<EnvironmentMap>> + Send;
}

/// Reads assets from disk with `tokio::fs` and decodes them with `image`
#[derive(Clone, Copy, Debug, Default)]
pub struct FsAssetProvider;

impl AssetProvider for FsAssetProvider {
    async fn load_texture(&self, path: &Path) -> Result<Texture> {
        let bytes = tokio::fs::read(path).await?;
        let image = image::load_from_memory(&bytes)?;
        log::debug!(
            "Loaded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Texture::new(path, image))
    }

    async fn load_environment(&self, path: &Path) -> Result<EnvironmentMap> {
        let bytes = tokio::fs::read(path).await?;
        // Format is sniffed from the header so Radiance files need no extension
        let image = image::load_from_memory(&bytes)?.to_rgb32f();
        log::debug!(
            "Loaded environment map {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(EnvironmentMap::new(path, image))
    }
}

/// Every asset the scene needs, fully loaded
#[derive(Clone, Debug)]
pub struct AssetSet {
    pub environment: EnvironmentMap,
    pub textures: BTreeMap<String, Texture>,
}

impl AssetSet {
    pub fn texture(&self, key: &str) -> Option<&Texture> {
        self.textures.get(key)
    }

    pub fn biome_texture(&self, biome: Biome) -> Option<&Texture> {
        self.texture(biome.texture_key())
    }
}

/// Load the environment map and every configured texture concurrently.
///
/// Fails with the first asset error, or [`Error::AssetTimeout`] if the
/// configured timeout elapses; outstanding loads are cancelled either way.
pub async fn load_assets<P>(provider: Arc<P>, config: &AssetConfig) -> Result<AssetSet>
where
    P: AssetProvider + 'static,
{
    let timeout = config.timeout();
    match tokio::time::timeout(timeout, load_all(provider, config)).await {
        Ok(result) => result,
        Err(_) => {
            log::error!("Asset loading timed out after {:?}", timeout);
            Err(Error::AssetTimeout(timeout))
        }
    }
}

async fn load_all<P>(provider: Arc<P>, config: &AssetConfig) -> Result<AssetSet>
where
    P: AssetProvider + 'static,
{
    let mut tasks = JoinSet::new();
    for (key, path) in config.texture_paths() {
        let provider = Arc::clone(&provider);
        let key = key.to_string();
        tasks.spawn(async move {
            let texture = provider
                .load_texture(&path)
                .await
                .map_err(|e| Error::asset(&path, e))?;
            Ok::<_, Error>((key, texture))
        });
    }

    let env_path = config.environment_map_path();
    let environment = provider
        .load_environment(&env_path)
        .await
        .map_err(|e| Error::asset(&env_path, e))?;

    let mut textures = BTreeMap::new();
    while let Some(joined) = tasks.join_next().await {
        let (key, texture) = joined.map_err(|e| Error::Io(std::io::Error::other(e)))??;
        textures.insert(key, texture);
    }

    log::info!("Loaded {} textures and environment map", textures.len());
    Ok(AssetSet { environment, textures })
}
