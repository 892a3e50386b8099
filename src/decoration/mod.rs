//! Decorative props attached to tiles: rocks, trees and clouds.
//!
//! Which biome grows what, how often, and which biome buffer the prop is
//! merged into are all data ([`DecorationRule`]). The default rules place
//! trees on dirt tiles but merge them into the grass buffer so they pick up
//! the grass material, and drop beach rocks into the stone buffer.

pub mod rock;
pub mod tree;
pub mod cloud;

pub use rock::{rock_cluster, RockParams};
pub use tree::{tree, TreeParams};
pub use cloud::{CloudGenerator, CloudParams};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;
use crate::mesh::MeshData;
use crate::terrain::biome::Biome;
use crate::terrain::layout::WorldPos;

/// Kind of prop a rule spawns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationKind {
    Rock,
    Tree,
}

/// Spawn `kind` on tiles of biome `source` with `probability`, merging the
/// result into the `target` biome's buffer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecorationRule {
    pub source: Biome,
    pub kind: DecorationKind,
    pub probability: f32,
    pub target: Biome,
}

impl DecorationRule {
    pub fn new(source: Biome, kind: DecorationKind, probability: f32, target: Biome) -> Self {
        Self { source, kind, probability, target }
    }
}

/// Decoration configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationParams {
    pub enabled: bool,
    /// At most one rule per source biome
    pub rules: Vec<DecorationRule>,
    pub rock: RockParams,
    pub tree: TreeParams,
    /// Fixes placement and cloud scatter; a fresh seed is drawn when unset
    pub seed: Option<u64>,
}

impl Default for DecorationParams {
    fn default() -> Self {
        Self {
            enabled: true,
            rules: vec![
                DecorationRule::new(Biome::Stone, DecorationKind::Rock, 0.5, Biome::Stone),
                DecorationRule::new(Biome::Dirt, DecorationKind::Tree, 0.2, Biome::Grass),
                DecorationRule::new(Biome::Sand, DecorationKind::Rock, 0.2, Biome::Stone),
            ],
            rock: RockParams::default(),
            tree: TreeParams::default(),
            seed: None,
        }
    }
}

impl DecorationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, rule) in self.rules.iter().enumerate() {
            if !(0.0..=1.0).contains(&rule.probability) {
                return Err(ConfigError::Probability {
                    name: format!("{} decoration", rule.source),
                    value: rule.probability,
                });
            }
            if self.rules[..i].iter().any(|r| r.source == rule.source) {
                return Err(ConfigError::DuplicateRule(rule.source.to_string()));
            }
        }
        self.rock.validate()?;
        self.tree.validate()
    }

    /// Random source for decoration and clouds
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed.unwrap_or_else(rand::random))
    }

    /// Rule for tiles of `biome`, if any
    pub fn rule_for(&self, biome: Biome) -> Option<&DecorationRule> {
        self.rules.iter().find(|r| r.source == biome)
    }
}

/// A generated prop and the biome buffer it belongs in
#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub target: Biome,
    pub mesh: MeshData,
}

/// Rolls decorations for tiles
#[derive(Clone, Debug, Default)]
pub struct DecorationGenerator {
    params: DecorationParams,
}

impl DecorationGenerator {
    pub fn new(params: DecorationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DecorationParams {
        &self.params
    }

    /// Maybe produce a prop for a tile of `biome` whose top is at `height`.
    ///
    /// Draws exactly one uniform sample when a rule applies, plus the shape's
    /// own draws when it fires.
    pub fn decorate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        biome: Biome,
        height: f32,
        pos: WorldPos,
    ) -> Option<Decoration> {
        if !self.params.enabled {
            return None;
        }
        let rule = self.params.rule_for(biome)?;
        if rng.random::<f32>() >= rule.probability {
            return None;
        }

        let top = pos.with_height(height);
        let mesh = match rule.kind {
            DecorationKind::Rock => rock_cluster(rng, &self.params.rock, top),
            DecorationKind::Tree => tree(rng, &self.params.tree, top),
        };

        Some(Decoration {
            kind: rule.kind,
            target: rule.target,
            mesh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn hit_rate(generator: &DecorationGenerator, biome: Biome, trials: u32) -> f32 {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let hits = (0..trials)
            .filter(|_| generator.decorate(&mut rng, biome, 5.0, WorldPos::default()).is_some())
            .count();
        hits as f32 / trials as f32
    }

    #[test]
    fn test_default_rules_valid() {
        assert!(DecorationParams::default().validate().is_ok());
    }

    #[test]
    fn test_probabilities() {
        let generator = DecorationGenerator::default();
        let stone = hit_rate(&generator, Biome::Stone, 4000);
        let dirt = hit_rate(&generator, Biome::Dirt, 4000);
        let sand = hit_rate(&generator, Biome::Sand, 4000);
        assert!((stone - 0.5).abs() < 0.05, "stone rate {}", stone);
        assert!((dirt - 0.2).abs() < 0.04, "dirt rate {}", dirt);
        assert!((sand - 0.2).abs() < 0.04, "sand rate {}", sand);
        assert_eq!(hit_rate(&generator, Biome::Grass, 500), 0.0);
        assert_eq!(hit_rate(&generator, Biome::ShallowDirt, 500), 0.0);
    }

    #[test]
    fn test_cross_biome_targets() {
        let generator = DecorationGenerator::new(DecorationParams {
            rules: vec![
                DecorationRule::new(Biome::Dirt, DecorationKind::Tree, 1.0, Biome::Grass),
                DecorationRule::new(Biome::Sand, DecorationKind::Rock, 1.0, Biome::Stone),
            ],
            ..Default::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let tree = generator.decorate(&mut rng, Biome::Dirt, 7.5, WorldPos::new(1.0, 2.0)).unwrap();
        assert_eq!(tree.kind, DecorationKind::Tree);
        assert_eq!(tree.target, Biome::Grass);

        let rock = generator.decorate(&mut rng, Biome::Sand, 4.0, WorldPos::new(1.0, 2.0)).unwrap();
        assert_eq!(rock.kind, DecorationKind::Rock);
        assert_eq!(rock.target, Biome::Stone);
        assert!((rock.mesh.bounds().unwrap().center().y - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_probability_never_fires() {
        let generator = DecorationGenerator::new(DecorationParams {
            rules: vec![DecorationRule::new(Biome::Stone, DecorationKind::Rock, 0.0, Biome::Stone)],
            ..Default::default()
        });
        assert_eq!(hit_rate(&generator, Biome::Stone, 500), 0.0);
    }

    #[test]
    fn test_seeded_rng_repeats() {
        let params = DecorationParams { seed: Some(77), ..Default::default() };
        let draws = |mut rng: ChaCha8Rng| (0..4).map(|_| rng.random()).collect::<Vec<u32>>();
        let a = draws(params.rng());
        let b = draws(params.rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_disabled() {
        let generator = DecorationGenerator::new(DecorationParams {
            enabled: false,
            ..Default::default()
        });
        assert_eq!(hit_rate(&generator, Biome::Stone, 200), 0.0);
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let mut params = DecorationParams::default();
        params.rules[0].probability = 1.5;
        assert!(matches!(params.validate(), Err(ConfigError::Probability { .. })));

        let mut params = DecorationParams::default();
        params
            .rules
            .push(DecorationRule::new(Biome::Stone, DecorationKind::Tree, 0.1, Biome::Grass));
        assert_eq!(params.validate(), Err(ConfigError::DuplicateRule("stone".to_string())));
    }
}
