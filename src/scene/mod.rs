//! Scene assembly around the generated island

pub mod config;
pub mod assets;
pub mod materials;
pub mod props;
pub mod setup;
pub mod island;

pub use config::{AssetConfig, IslandConfig, Preset};
pub use assets::{load_assets, AssetProvider, AssetSet, EnvironmentMap, FsAssetProvider, Texture};
pub use materials::MaterialDesc;
pub use setup::{CameraRig, PointLight, SceneSetup};
pub use island::{IslandScene, RenderTarget, SceneMesh};
