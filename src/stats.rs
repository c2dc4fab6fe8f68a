use crate::config::*;
use crate::simulation::{HalfMeans, Simulation};
use bevy::prelude::Resource;
use std::collections::VecDeque;

/// Mean traits of both arena halves at one point in simulated time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub time: f32,
    pub means: HalfMeans,
}

/// Time series of per-half mean traits, sampled at a fixed simulated-time
/// interval and capped at `STATS_HISTORY` points.
#[derive(Resource, Debug, Clone)]
pub struct SimStats {
    points: VecDeque<DataPoint>,
    interval: f32,
    next_sample: f32,
}

impl Default for SimStats {
    fn default() -> Self {
        Self::new(STATS_INTERVAL)
    }
}

impl SimStats {
    pub fn new(interval: f32) -> Self {
        Self {
            points: VecDeque::new(),
            interval,
            next_sample: 0.0,
        }
    }

    pub fn add_data(&mut self, point: DataPoint) {
        if self.points.len() == STATS_HISTORY {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Record a sample if the simulation has reached the next sample time.
    /// Returns whether a sample was taken.
    pub fn record(&mut self, sim: &Simulation) -> bool {
        let time = sim.time();
        if time < self.next_sample {
            return false;
        }
        self.add_data(DataPoint {
            time,
            means: sim.mean_traits(),
        });
        if self.interval > 0.0 {
            self.next_sample = ((time / self.interval).floor() + 1.0) * self.interval;
        }
        true
    }

    pub fn times(&self) -> Vec<f32> {
        self.points.iter().map(|p| p.time).collect()
    }

    pub fn latest(&self) -> Option<&DataPoint> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
