use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded random source for every stochastic rule in the simulation.
#[derive(Resource)]
pub struct SimRng(pub StdRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::seeded(0)
    }
}
