use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// Configuration constants and run-time settings for the blob arena

// ============================================================================
// ARENA
// ============================================================================

/// Width of the simulated arena in world units
pub const SIM_WIDTH: f32 = 1600.0;

/// Height of the simulated arena in world units
pub const SIM_HEIGHT: f32 = 900.0;

/// Scale between an entity's size and its circular area
pub const SIZE_SCALE: f32 = 70.0;

/// Width of each of the two separator bars
pub const SEPARATOR_WIDTH: f32 = 80.0;

// ============================================================================
// BLOB MODEL
// ============================================================================

/// Seconds a blob lives before it must reproduce or die
pub const LIFESPAN: f32 = 5.0;

/// Stored energy per unit size
pub const ENERGY_SIZE_RATIO: f32 = 10000.0;

/// Energy spent per unit size per unit distance moved
pub const ENERGY_EXP_SIZE_RATIO: f32 = 100.0;

/// Extra movement cost per unit of speed
pub const VEL_ENERGY_MULT: f32 = 0.0002;

/// Energy lost per unit size per second, independent of movement
pub const PASSIVE_ENERGY_LOSS: f32 = 2.0;

/// Magnitude of the steering acceleration towards a target
pub const ACC_MULTIPLIER: f32 = 500.0;

/// Look-ahead blend of acceleration into the effective velocity
pub const LOOKAHEAD_BLEND: f32 = 0.2;

/// Smallest size a blob can have
pub const MIN_SIZE: f32 = 2.0;

/// Smallest top speed a blob can have
pub const SPEED_FLOOR: f32 = 20.0;

/// Fraction of max energy needed to reproduce at the end of the lifespan
pub const REPRODUCTION_THRESHOLD: f32 = 0.5;

/// Offspring produced by a successful reproduction
pub const OFFSPRING_COUNT: usize = 3;

/// Area (in size units) of the disk offspring are scattered in
pub const OFFSPRING_AREA: f32 = 60.0;

/// How far past contact a blob can still reach a candy
pub const EAT_EPSILON: f32 = 2.0;

// ============================================================================
// CANDY
// ============================================================================

/// Smallest size a candy can have
pub const CANDY_MIN_SIZE: f32 = 1.0;

/// Seconds a candy lasts before it counts as perished
pub const CANDY_SHELF_LIFE: f32 = 15.0;

/// Live candy count above which the oldest candy is evicted
pub const CANDY_LIMIT: usize = 500;

/// Number of vertical strips the spawner partitions the arena into
pub const N_INTERVALS: usize = 100;

// ============================================================================
// STATISTICS
// ============================================================================

/// Simulated seconds between recorded trait samples
pub const STATS_INTERVAL: f32 = 1.0;

/// Maximum number of samples kept in the statistics series
pub const STATS_HISTORY: usize = 3600;

// ============================================================================
// INTERFACE
// ============================================================================

/// Number of blobs added by the "Spawn" button
pub const MANUAL_SPAWN_COUNT: usize = 10;

/// Mean trait values around which blobs are drawn
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TraitMeans {
    pub size: f32,
    pub speed: f32,
}

/// Standard deviations used when drawing blob traits
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MutationSdvs {
    pub size_sdv: f32,
    pub speed_sdv: f32,
}

impl Default for MutationSdvs {
    fn default() -> Self {
        Self {
            size_sdv: 5.0,
            speed_sdv: 2.0,
        }
    }
}

/// Run-time configuration of a simulation. Pairs are `(left, right)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: Option<u64>,
    pub mean_traits: TraitMeans,
    pub initial_sdvs: MutationSdvs,
    pub mutation_sdvs: MutationSdvs,
    pub mean_candy_sizes: (f32, f32),
    pub candy_size_sdvs: (f32, f32),
    pub n_candies: (usize, usize),
    pub candy_spawn_rates: (f32, f32),
    pub candy_energy_density: f32,
    pub cutoff_sharpness: f32,
    pub n_blobs: usize,
    pub separation_gap: f32,
    pub sim_speed: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            mean_traits: TraitMeans {
                size: 20.0,
                speed: 300.0,
            },
            initial_sdvs: MutationSdvs::default(),
            mutation_sdvs: MutationSdvs::default(),
            mean_candy_sizes: (5.0, 5.0),
            candy_size_sdvs: (2.0, 2.0),
            n_candies: (20, 20),
            candy_spawn_rates: (20.0, 20.0),
            candy_energy_density: 2000.0,
            cutoff_sharpness: 3.0,
            n_blobs: 10,
            separation_gap: 1.0,
            sim_speed: 1.0,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse simulation config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read simulation config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
