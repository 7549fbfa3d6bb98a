/// Process-wide simulation clock controls.
/// When paused, integration is skipped entirely but the frame loop keeps
/// running, so the camera still responds to input. Unpausing resumes
/// from the exact stored angles.
#[derive(Debug, Clone, Copy)]
pub struct SceneTime {
    time_speed: f32,
    paused: bool,
}

impl SceneTime {
    pub fn new(time_speed: f32) -> Self {
        Self {
            time_speed: time_speed.max(0.0),
            paused: false,
        }
    }

    /// Simulation delta for this tick: `time_speed` when running,
    /// or `None` when paused (the integrator skips the tick).
    pub fn sim_dt(&self) -> Option<f32> {
        if self.paused {
            None
        } else {
            Some(self.time_speed)
        }
    }

    pub fn time_speed(&self) -> f32 {
        self.time_speed
    }

    pub fn set_time_speed(&mut self, speed: f32) {
        self.time_speed = speed.max(0.0);
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }
}

impl Default for SceneTime {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_yields_no_sim_dt() {
        let mut time = SceneTime::new(2.0);
        assert_eq!(time.sim_dt(), Some(2.0));
        time.set_paused(true);
        assert_eq!(time.sim_dt(), None);
        time.set_paused(false);
        assert_eq!(time.sim_dt(), Some(2.0));
    }

    #[test]
    fn negative_speed_clamps_to_zero() {
        let mut time = SceneTime::default();
        time.set_time_speed(-5.0);
        assert_eq!(time.time_speed(), 0.0);
    }
}
