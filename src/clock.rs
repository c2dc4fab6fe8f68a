/// Whether the simulation advances
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SimulationState {
    #[default]
    Running,
    Paused,
}

/// Turns wall-clock deltas into simulated time.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    pub state: SimulationState,
    /// Simulated seconds per wall-clock second
    pub speed: f32,
}

impl SimulationClock {
    pub fn new(speed: f32) -> Self {
        Self {
            state: SimulationState::Running,
            speed,
        }
    }

    /// Simulated time step for a wall-clock delta, or `None` while paused.
    pub fn advance(&mut self, wall_dt: f32) -> Option<f32> {
        match self.state {
            SimulationState::Paused => None,
            SimulationState::Running => Some(wall_dt * self.speed),
        }
    }

    /// Flip between running and paused. Returns true if now paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            SimulationState::Running => SimulationState::Paused,
            SimulationState::Paused => SimulationState::Running,
        };
        self.is_paused()
    }

    pub fn is_paused(&self) -> bool {
        self.state == SimulationState::Paused
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}
