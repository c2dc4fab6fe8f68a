use crate::candy::{Candy, CandyId};
use crate::config::*;
use crate::geometry::Separators;
use crate::rng::RandomSource;
use bevy::math::Rect;

/// Left-to-right gradient from `range.0` to `range.1` evaluated at `x`.
///
/// `sharpness` of 1 gives a straight line; larger values approach a step
/// at the arena's midline.
pub fn interpolate(x: f32, range: (f32, f32), sharpness: f32) -> f32 {
    let (low, high) = range;
    let x = x / SIM_WIDTH;
    let raw = 1.0 - 1.0 / (1.0 + (1.0 / x - 1.0).powf(-sharpness));
    low + (high - low) * raw
}

/// Strip `i` of `count`. Strips that overlap a separator are replaced by a
/// band of the same width filling the gap below the top bar.
pub fn strip(i: usize, count: usize, separators: &Separators, gap: f32) -> Rect {
    let width = SIM_WIDTH / count as f32;
    let left = width * i as f32;
    let rect = Rect::new(left, 0.0, left + width, SIM_HEIGHT);

    if separators.overlaps(rect) {
        let top = separators.top.max.y;
        Rect::new(left, top, left + width, top + gap * SIM_HEIGHT)
    } else {
        rect
    }
}

/// Spawns candy strip by strip. Every tick each strip spawns a Poisson
/// number of candies whose rate and size follow a left-to-right gradient
/// between the configured `(left, right)` values.
#[derive(Debug, Clone)]
pub struct CandySpawner {
    intervals: Vec<Rect>,
    spawn_rates: (f32, f32),
    mean_sizes: (f32, f32),
    size_sdvs: (f32, f32),
    sharpness: f32,
}

impl CandySpawner {
    pub fn new(config: &SimulationConfig, separators: &Separators) -> Self {
        let intervals = (0..N_INTERVALS)
            .map(|i| strip(i, N_INTERVALS, separators, config.separation_gap))
            .collect();

        Self {
            intervals,
            spawn_rates: config.candy_spawn_rates,
            mean_sizes: config.mean_candy_sizes,
            size_sdvs: config.candy_size_sdvs,
            sharpness: config.cutoff_sharpness,
        }
    }

    pub fn intervals(&self) -> &[Rect] {
        &self.intervals
    }

    /// Expected number of candies `interval` spawns over `dt` seconds.
    pub fn lambda(&self, interval: Rect, dt: f32) -> f32 {
        let area_ratio = interval.width() * interval.height() / (SIM_WIDTH * SIM_HEIGHT);
        let rate = interpolate(interval.center().x, self.spawn_rates, self.sharpness);
        rate * dt * area_ratio
    }

    /// Candies spawned in `interval` this tick. Candies too large for the
    /// interval are dropped.
    pub fn spawn_interval(
        &self,
        interval: Rect,
        dt: f32,
        rng: &mut RandomSource,
        separators: &Separators,
        mut next_id: impl FnMut() -> CandyId,
    ) -> Vec<Candy> {
        if interval.is_empty() {
            return Vec::new();
        }

        let x = interval.center().x;
        let count = rng.poisson(self.lambda(interval, dt));
        let sdv = interpolate(x, self.size_sdvs, self.sharpness);
        let mean_size = interpolate(x, self.mean_sizes, self.sharpness);

        (0..count)
            .filter_map(|_| Candy::random(next_id(), rng, mean_size, sdv, interval, separators))
            .collect()
    }

    /// All candies spawned across the arena this tick, strip by strip.
    pub fn spawn(
        &self,
        dt: f32,
        rng: &mut RandomSource,
        separators: &Separators,
        mut next_id: impl FnMut() -> CandyId,
    ) -> Vec<Candy> {
        let mut spawned = Vec::new();
        for &interval in &self.intervals {
            spawned.extend(self.spawn_interval(interval, dt, rng, separators, &mut next_id));
        }
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation_hits_midpoint_and_extremes() {
        let range = (10.0, 90.0);
        assert!((interpolate(SIM_WIDTH / 2.0, range, 3.0) - 50.0).abs() < 1e-3);
        assert!(interpolate(SIM_WIDTH * 0.01, range, 3.0) < 10.5);
        assert!(interpolate(SIM_WIDTH * 0.99, range, 3.0) > 89.5);
    }

    #[test]
    fn sharpness_one_is_linear() {
        let range = (0.0, 100.0);
        let v = interpolate(SIM_WIDTH * 0.25, range, 1.0);
        assert!((v - 25.0).abs() < 1e-3);
    }

    #[test]
    fn strips_avoid_separators() {
        let gap = 0.3;
        let seps = Separators::new(gap);
        for i in 0..N_INTERVALS {
            let rect = strip(i, N_INTERVALS, &seps, gap);
            assert!(!seps.overlaps(rect), "strip {i} overlaps a separator");
        }
        let middle = strip(N_INTERVALS / 2, N_INTERVALS, &seps, gap);
        assert!((middle.height() - gap * SIM_HEIGHT).abs() < 1e-3);
        assert_eq!(middle.min.y, seps.top.max.y);
    }

    #[test]
    fn open_arena_keeps_full_height_strips() {
        let seps = Separators::new(1.0);
        let rect = strip(N_INTERVALS / 2, N_INTERVALS, &seps, 1.0);
        assert_eq!(rect.height(), SIM_HEIGHT);
    }

    #[test]
    fn degenerate_interval_spawns_nothing() {
        let config = SimulationConfig {
            candy_spawn_rates: (1.0e7, 1.0e7),
            ..SimulationConfig::default()
        };
        let seps = Separators::new(1.0);
        let spawner = CandySpawner::new(&config, &seps);
        let mut rng = RandomSource::from_seed(3);
        let mut next = 0;
        let sliver = Rect::new(100.0, 100.0, 100.5, 800.0);
        let spawned = spawner.spawn_interval(sliver, 0.1, &mut rng, &seps, || {
            next += 1;
            CandyId(next)
        });
        assert!(spawned.is_empty());
    }

    #[test]
    fn spawn_counts_track_lambda() {
        let config = SimulationConfig::default();
        let seps = Separators::new(1.0);
        let spawner = CandySpawner::new(&config, &seps);
        let interval = spawner.intervals()[10];
        let dt = 0.5;
        let lambda = spawner.lambda(interval, dt);
        let mut rng = RandomSource::from_seed(99);
        let mut next = 0;

        let ticks = 100_000;
        let total: usize = (0..ticks).map(|_| rng.poisson(lambda)).sum();
        let mean = total as f32 / ticks as f32;
        assert!((mean - lambda).abs() < 0.01, "mean {mean} lambda {lambda}");

        let wide = Rect::new(100.0, 100.0, 500.0, 800.0);
        let spawned: usize = (0..2_000)
            .map(|_| {
                spawner
                    .spawn_interval(wide, dt, &mut rng, &seps, || {
                        next += 1;
                        CandyId(next)
                    })
                    .len()
            })
            .sum();
        let expected = spawner.lambda(wide, dt) * 2_000.0;
        assert!((spawned as f32 - expected).abs() < expected * 0.05);
    }
}
