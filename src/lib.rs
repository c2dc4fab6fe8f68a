pub mod blob;
pub mod candy;
pub mod clock;
pub mod config;
pub mod energy;
pub mod geometry;
pub mod lifecycle;
pub mod plugin;
pub mod rng;
pub mod simulation;
pub mod spawner;
pub mod stats;
pub mod steering;

pub use blob::{Blob, BlobId, Traits};
pub use candy::{Candy, CandyId};
pub use clock::{SimulationClock, SimulationState};
pub use config::{ConfigError, SimulationConfig};
pub use plugin::SimulationPlugin;
pub use simulation::{HalfMeans, Simulation, Snapshot, TickReport};
pub use stats::SimStats;
