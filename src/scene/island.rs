//! Island scene assembly.
//!
//! Loading is gated: every asset must arrive before any geometry is built,
//! and a failure leaves nothing half-constructed. The assembled scene is then
//! handed to a [`RenderTarget`], which owns everything from there on.

use std::sync::Arc;
use std::time::Instant;

use super::assets::{load_assets, AssetProvider, AssetSet};
use super::config::IslandConfig;
use super::materials::MaterialDesc;
use super::props;
use super::setup::SceneSetup;
use crate::core::Result;
use crate::decoration::CloudGenerator;
use crate::mesh::MeshData;
use crate::terrain::generator::{IslandTerrain, TerrainBuilder};

/// Geometry paired with its material, ready for the renderer
#[derive(Clone, Debug)]
pub struct SceneMesh {
    pub name: String,
    pub mesh: MeshData,
    pub material: MaterialDesc,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// Consumer of the assembled scene, typically an engine adapter
pub trait RenderTarget {
    fn configure(&mut self, setup: &SceneSetup);

    fn add_mesh(&mut self, mesh: SceneMesh);
}

/// A fully generated island with its assets
pub struct IslandScene {
    config: IslandConfig,
    terrain: IslandTerrain,
    clouds: MeshData,
    assets: AssetSet,
    setup: SceneSetup,
}

impl IslandScene {
    /// Load all assets, then generate the island
    pub async fn load<P>(config: IslandConfig, provider: Arc<P>) -> Result<Self>
    where
        P: AssetProvider + 'static,
    {
        config.validate()?;
        let assets = load_assets(provider, &config.assets).await?;
        Self::generate(config, assets)
    }

    /// Generate the island around already loaded assets
    pub fn assemble(config: IslandConfig, assets: AssetSet) -> Result<Self> {
        config.validate()?;
        Self::generate(config, assets)
    }

    /// Expects a validated config
    fn generate(config: IslandConfig, assets: AssetSet) -> Result<Self> {
        let start = Instant::now();
        let builder = TerrainBuilder::new(&config.terrain, config.decoration.clone())?;

        // Decoration and clouds share one stream so a seed pins both
        let mut rng = config.decoration.rng();
        let terrain = builder.build(&mut rng);
        let clouds = CloudGenerator::new(config.clouds).generate(&mut rng);

        log::info!(
            "Assembled island scene (seed {}) in {:.1}ms",
            config.terrain.seed,
            start.elapsed().as_secs_f64() * 1000.0,
        );

        Ok(Self {
            config,
            terrain,
            clouds,
            assets,
            setup: SceneSetup::default(),
        })
    }

    pub fn config(&self) -> &IslandConfig {
        &self.config
    }

    pub fn terrain(&self) -> &IslandTerrain {
        &self.terrain
    }

    pub fn clouds(&self) -> &MeshData {
        &self.clouds
    }

    pub fn assets(&self) -> &AssetSet {
        &self.assets
    }

    pub fn setup(&self) -> &SceneSetup {
        &self.setup
    }

    /// Hand every non-empty mesh to `target`. Returns how many were submitted.
    pub fn submit<T: RenderTarget + ?Sized>(self, target: &mut T) -> usize {
        let Self { config, terrain, clouds, assets, setup } = self;
        let max_height = config.max_height();

        target.configure(&setup);

        let mut meshes = Vec::with_capacity(9);
        for (biome, mesh) in terrain.buffers {
            meshes.push(SceneMesh {
                name: biome.name().to_string(),
                mesh,
                material: MaterialDesc::biome(biome, &assets),
                cast_shadow: true,
                receive_shadow: true,
            });
        }
        let statics = [
            ("sea", props::sea(max_height), MaterialDesc::sea(&assets)),
            ("map_container", props::container(max_height), MaterialDesc::container(&assets)),
            ("map_floor", props::floor(max_height), MaterialDesc::floor(&assets)),
        ];
        for (name, mesh, material) in statics {
            meshes.push(SceneMesh {
                name: name.to_string(),
                mesh,
                material,
                cast_shadow: false,
                receive_shadow: true,
            });
        }
        meshes.push(SceneMesh {
            name: "clouds".to_string(),
            mesh: clouds,
            material: MaterialDesc::cloud(&assets),
            cast_shadow: false,
            receive_shadow: false,
        });

        let mut submitted = 0;
        for mesh in meshes {
            if mesh.mesh.is_empty() {
                log::debug!("Skipping empty mesh '{}'", mesh.name);
                continue;
            }
            target.add_mesh(mesh);
            submitted += 1;
        }
        submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConfigError, Error};
    use crate::scene::assets::{EnvironmentMap, Texture};
    use crate::terrain::biome::Biome;
    use image::{DynamicImage, Rgb32FImage, RgbImage};
    use std::path::Path;

    struct StubProvider {
        fail: bool,
    }

    impl AssetProvider for StubProvider {
        async fn load_texture(&self, path: &Path) -> Result<Texture> {
            if self.fail {
                return Err(Error::Io(std::io::Error::other("unavailable")));
            }
            Ok(Texture::new(path, DynamicImage::ImageRgb8(RgbImage::new(1, 1))))
        }

        async fn load_environment(&self, path: &Path) -> Result<EnvironmentMap> {
            Ok(EnvironmentMap::new(path, Rgb32FImage::new(1, 1)))
        }
    }

    #[derive(Default)]
    struct Collector {
        configured: Option<SceneSetup>,
        meshes: Vec<SceneMesh>,
    }

    impl RenderTarget for Collector {
        fn configure(&mut self, setup: &SceneSetup) {
            self.configured = Some(*setup);
        }

        fn add_mesh(&mut self, mesh: SceneMesh) {
            self.meshes.push(mesh);
        }
    }

    fn seeded_config() -> IslandConfig {
        let mut config = IslandConfig::default();
        config.decoration.seed = Some(5);
        config
    }

    #[tokio::test]
    async fn test_load_and_submit() {
        let scene = IslandScene::load(seeded_config(), Arc::new(StubProvider { fail: false }))
            .await
            .unwrap();
        let expected = scene.terrain().buffers.iter().filter(|(_, m)| !m.is_empty()).count()
            + 3
            + usize::from(!scene.clouds().is_empty());

        let mut target = Collector::default();
        let submitted = scene.submit(&mut target);

        assert_eq!(submitted, expected);
        assert_eq!(target.meshes.len(), expected);
        assert!(target.configured.is_some());
        assert!(target.meshes.iter().all(|m| !m.mesh.is_empty()));
        assert!(target.meshes.iter().any(|m| m.name == "sea"));
    }

    #[tokio::test]
    async fn test_asset_failure_blocks_scene() {
        let provider = Arc::new(StubProvider { fail: true });
        let result = IslandScene::load(seeded_config(), provider).await;
        assert!(matches!(result, Err(Error::Asset { .. })));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_before_loading() {
        let mut config = seeded_config();
        config.terrain.height.exponent = 0.0;
        let result = IslandScene::load(config, Arc::new(StubProvider { fail: false })).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_empty_buffers_skipped() {
        // Threshold above every possible height: everything is shallow dirt
        let mut config = seeded_config();
        config.clouds.enabled = false;
        config.decoration.enabled = false;
        config.terrain.thresholds.stone = 1.0;
        config.terrain.thresholds.dirt = 0.99;
        config.terrain.thresholds.grass = 0.98;
        config.terrain.thresholds.sand = 0.97;

        let scene = IslandScene::load(config, Arc::new(StubProvider { fail: false }))
            .await
            .unwrap();
        assert!(scene.terrain().buffers.get(Biome::Stone).is_empty());

        let mut target = Collector::default();
        let submitted = scene.submit(&mut target);
        let names: Vec<_> = target.meshes.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(submitted, names.len());
        assert!(!names.contains(&"stone"));
        assert!(!names.contains(&"clouds"));
        assert!(names.contains(&"map_floor"));
    }

    fn empty_assets() -> AssetSet {
        AssetSet {
            environment: EnvironmentMap::new("env", Rgb32FImage::new(1, 1)),
            textures: Default::default(),
        }
    }

    #[test]
    fn test_assemble_validates_whole_config() {
        let mut config = seeded_config();
        config.clouds.altitude_min = 30.0;
        config.clouds.altitude_max = 12.0;
        let result = IslandScene::assemble(config, empty_assets());
        assert!(matches!(result, Err(Error::Config(ConfigError::Range { .. }))));

        let mut config = seeded_config();
        config.assets.timeout_secs = -1.0;
        assert!(matches!(IslandScene::assemble(config, empty_assets()), Err(Error::Config(_))));
    }

    #[test]
    fn test_seeded_scene_reproducible() {
        let assets = empty_assets;
        let a = IslandScene::assemble(seeded_config(), assets()).unwrap();
        let b = IslandScene::assemble(seeded_config(), assets()).unwrap();
        assert_eq!(a.terrain().buffers, b.terrain().buffers);
        assert_eq!(a.clouds(), b.clouds());
    }
}
