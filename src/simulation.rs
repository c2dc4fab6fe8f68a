use crate::blob::{Blob, BlobId, Traits};
use crate::candy::{Candy, CandyId};
use crate::clock::SimulationClock;
use crate::config::*;
use crate::energy;
use crate::geometry::Separators;
use crate::lifecycle::{self, Fate};
use crate::rng::RandomSource;
use crate::spawner::CandySpawner;
use crate::steering;
use bevy::log::{debug, info, trace};
use bevy::math::{Rect, Vec2};
use bevy::prelude::Resource;
use std::collections::BTreeMap;

/// What changed during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub births: usize,
    pub deaths: usize,
    pub eaten: usize,
    pub spawned: usize,
    pub evicted: usize,
}

/// Read-only view of a blob for renderers and statistics
#[derive(Debug, Clone, PartialEq)]
pub struct BlobView {
    pub id: BlobId,
    pub position: Vec2,
    pub radius: f32,
    pub traits: Traits,
    pub energy: f32,
    pub max_energy: f32,
    pub age: f32,
    pub hue: f32,
}

impl From<&Blob> for BlobView {
    fn from(blob: &Blob) -> Self {
        Self {
            id: blob.id,
            position: blob.position,
            radius: blob.radius(),
            traits: blob.traits,
            energy: blob.energy,
            max_energy: blob.max_energy(),
            age: blob.age,
            hue: blob.hue,
        }
    }
}

/// Read-only view of a candy
#[derive(Debug, Clone, PartialEq)]
pub struct CandyView {
    pub id: CandyId,
    pub position: Vec2,
    pub radius: f32,
    pub size: f32,
    pub time_to_perish: f32,
}

impl From<&Candy> for CandyView {
    fn from(candy: &Candy) -> Self {
        Self {
            id: candy.id,
            position: candy.position,
            radius: candy.radius(),
            size: candy.size,
            time_to_perish: candy.time_to_perish,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub time: f32,
    pub blobs: Vec<BlobView>,
    pub candies: Vec<CandyView>,
    pub separators: Separators,
}

/// Mean traits of the blobs in each half of the arena. A half without
/// blobs has no mean.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HalfMeans {
    pub left: Option<Traits>,
    pub right: Option<Traits>,
}

fn mean_of<'a>(blobs: impl Iterator<Item = &'a Blob>) -> Option<Traits> {
    let (count, size, speed) = blobs.fold((0usize, 0.0f32, 0.0f32), |(n, size, speed), b| {
        (n + 1, size + b.traits.size, speed + b.traits.speed)
    });
    (count > 0).then(|| Traits::new(size / count as f32, speed / count as f32))
}

/// The population-dynamics engine: live blobs and candies, the separators,
/// the candy spawner and the random stream, advanced one tick at a time.
#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    separators: Separators,
    spawner: CandySpawner,
    rng: RandomSource,
    pub clock: SimulationClock,
    blobs: BTreeMap<BlobId, Blob>,
    candies: BTreeMap<CandyId, Candy>,
    next_blob_id: u64,
    next_candy_id: u64,
    ticks: u64,
    time: f32,
}

impl Simulation {
    /// Build the arena and seed the initial candy and blob populations.
    pub fn new(config: SimulationConfig) -> Self {
        let rng = RandomSource::from_optional_seed(config.seed);
        let separators = Separators::new(config.separation_gap);
        let spawner = CandySpawner::new(&config, &separators);

        let mut sim = Self {
            clock: SimulationClock::new(config.sim_speed),
            config,
            separators,
            spawner,
            rng,
            blobs: BTreeMap::new(),
            candies: BTreeMap::new(),
            next_blob_id: 0,
            next_candy_id: 0,
            ticks: 0,
            time: 0.0,
        };

        sim.seed_candies();
        sim.spawn_random_blobs(sim.config.n_blobs);

        info!(
            "Simulation seeded with {}: {} blobs, {} candies",
            sim.rng.seed(),
            sim.blobs.len(),
            sim.candies.len()
        );
        sim
    }

    fn seed_candies(&mut self) {
        let half_width = (SIM_WIDTH - SEPARATOR_WIDTH) / 2.0;
        let regions = [
            (
                self.config.n_candies.0,
                self.config.mean_candy_sizes.0,
                self.config.candy_size_sdvs.0,
                Rect::new(0.0, 0.0, half_width, SIM_HEIGHT),
            ),
            (
                self.config.n_candies.1,
                self.config.mean_candy_sizes.1,
                self.config.candy_size_sdvs.1,
                Rect::new(SIM_WIDTH - half_width, 0.0, SIM_WIDTH, SIM_HEIGHT),
            ),
        ];

        for (count, mean_size, sdv, region) in regions {
            for _ in 0..count {
                let id = self.allocate_candy_id();
                if let Some(candy) =
                    Candy::random(id, &mut self.rng, mean_size, sdv, region, &self.separators)
                {
                    self.candies.insert(candy.id, candy);
                }
            }
        }
    }

    fn allocate_blob_id(&mut self) -> BlobId {
        self.next_blob_id += 1;
        BlobId(self.next_blob_id)
    }

    fn allocate_candy_id(&mut self) -> CandyId {
        self.next_candy_id += 1;
        CandyId(self.next_candy_id)
    }

    /// Add `count` blobs drawn around the configured mean traits.
    pub fn spawn_random_blobs(&mut self, count: usize) {
        let mean = Traits::from(self.config.mean_traits);
        for _ in 0..count {
            let id = self.allocate_blob_id();
            let blob = Blob::random(
                id,
                &mut self.rng,
                mean,
                self.config.initial_sdvs,
                &self.separators,
                None,
            );
            self.blobs.insert(id, blob);
        }
    }

    /// Place a newborn blob with the given traits, bounded into the arena.
    pub fn insert_blob(&mut self, traits: Traits, position: Vec2) -> BlobId {
        let id = self.allocate_blob_id();
        let position = self.separators.bound_position(position, traits.radius());
        self.blobs.insert(id, Blob::new(id, traits, position, 0.0));
        id
    }

    /// Place a candy, bounded into the arena.
    pub fn insert_candy(&mut self, size: f32, position: Vec2) -> CandyId {
        let id = self.allocate_candy_id();
        let mut candy = Candy::new(id, size, position);
        candy.position = self.separators.bound_position(position, candy.radius());
        self.candies.insert(id, candy);
        id
    }

    /// Feed a wall-clock delta through the clock; ticks unless paused.
    pub fn advance(&mut self, wall_dt: f32) -> Option<TickReport> {
        let dt = self.clock.advance(wall_dt)?;
        Some(self.tick(dt))
    }

    /// Advance the world by `dt` simulated seconds.
    ///
    /// Every blob steers towards food, pays for moving and living, ages,
    /// has its fate decided and then eats. Deaths and births are collected
    /// while iterating and applied once every blob has been updated.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let Self {
            config,
            separators,
            spawner,
            rng,
            blobs,
            candies,
            next_blob_id,
            next_candy_id,
            ..
        } = self;
        let (config, separators, spawner) = (&*config, &*separators, &*spawner);

        let mut report = TickReport::default();
        let mut dead: Vec<BlobId> = Vec::new();
        let mut newborn: Vec<Blob> = Vec::new();

        for blob in blobs.values_mut() {
            let moved = steering::steer(blob, candies.values(), separators, separators, dt);
            if let Some(movement) = moved {
                energy::charge_movement(blob, movement.length());
            }
            energy::charge_passive(blob, dt);
            blob.age_by(dt);

            let fate = lifecycle::evaluate(blob);
            if fate == Fate::Reproduces {
                newborn.extend(lifecycle::offspring(
                    blob,
                    rng,
                    config.mutation_sdvs,
                    separators,
                    || {
                        *next_blob_id += 1;
                        BlobId(*next_blob_id)
                    },
                ));
            }
            if fate.is_dead() {
                dead.push(blob.id);
            }

            // eaten candy leaves the set at once so nobody else can eat it
            let reachable: Vec<CandyId> = candies
                .values()
                .filter(|candy| energy::can_eat(blob, candy))
                .map(|candy| candy.id)
                .collect();
            for id in reachable {
                if let Some(candy) = candies.remove(&id) {
                    energy::feed(blob, &candy, config.candy_energy_density);
                    report.eaten += 1;
                }
            }
        }

        for id in &dead {
            blobs.remove(id);
        }
        report.deaths = dead.len();
        report.births = newborn.len();
        for blob in newborn {
            blobs.insert(blob.id, blob);
        }

        for candy in candies.values_mut() {
            candy.age_by(dt);
        }

        let spawned = spawner.spawn(dt, rng, separators, || {
            *next_candy_id += 1;
            CandyId(*next_candy_id)
        });
        report.spawned = spawned.len();
        for candy in spawned {
            candies.insert(candy.id, candy);
        }

        while candies.len() > CANDY_LIMIT {
            if let Some((id, _)) = candies.pop_first() {
                trace!("Evicted candy {:?} over the limit", id);
                report.evicted += 1;
            }
        }

        self.ticks += 1;
        self.time += dt;
        if report.births > 0 || report.deaths > 0 {
            debug!(
                "Tick {}: {} born, {} died, {} blobs alive",
                self.ticks,
                report.births,
                report.deaths,
                self.blobs.len()
            );
        }
        report
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds elapsed over all ticks
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn separators(&self) -> &Separators {
        &self.separators
    }

    pub fn blobs(&self) -> impl Iterator<Item = &Blob> {
        self.blobs.values()
    }

    pub fn candies(&self) -> impl Iterator<Item = &Candy> {
        self.candies.values()
    }

    pub fn blob(&self, id: BlobId) -> Option<&Blob> {
        self.blobs.get(&id)
    }

    pub fn blob_mut(&mut self, id: BlobId) -> Option<&mut Blob> {
        self.blobs.get_mut(&id)
    }

    pub fn candy(&self, id: CandyId) -> Option<&Candy> {
        self.candies.get(&id)
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    pub fn candy_count(&self) -> usize {
        self.candies.len()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.time(),
            blobs: self.blobs.values().map(BlobView::from).collect(),
            candies: self.candies.values().map(CandyView::from).collect(),
            separators: self.separators,
        }
    }

    /// Mean size and speed of the blobs left and right of the midline.
    pub fn mean_traits(&self) -> HalfMeans {
        let midline = SIM_WIDTH / 2.0;
        HalfMeans {
            left: mean_of(self.blobs.values().filter(|b| b.position.x < midline)),
            right: mean_of(self.blobs.values().filter(|b| b.position.x >= midline)),
        }
    }
}
