//! Simulation mode and per-frame flow control.

use bevy::prelude::*;

/// Whether gameplay runs this frame.
///
/// While `Editing`, the frame clock still advances but nothing else updates
/// and gameplay commands are discarded.
#[derive(Resource, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SimulationMode {
    #[default]
    Playing,
    Editing,
}

/// A requested switch to another level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRequest {
    pub destination: u32,
    /// Explicit arrival position, or the destination's default spawn.
    pub position: Option<Vec2>,
    pub cause: TransitionCause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    Entry,
    Portal,
    Debug,
}

/// Frame-scoped flow state.
///
/// A transition requested during a frame is applied once, after which the
/// remaining gameplay sets of that frame are skipped.
#[derive(Resource, Debug, Default, Clone)]
pub struct FrameFlow {
    pub pending: Option<TransitionRequest>,
    pub aborted: bool,
}

impl FrameFlow {
    /// Record a transition unless one is already queued this frame.
    pub fn request(&mut self, request: TransitionRequest) -> bool {
        if self.pending.is_some() || self.aborted {
            return false;
        }
        self.pending = Some(request);
        true
    }
}

/// Run condition: gameplay is not paused for editing.
pub fn simulation_playing(mode: Res<SimulationMode>) -> bool {
    *mode == SimulationMode::Playing
}

/// Run condition: no transition is queued or has already happened this frame.
pub fn frame_active(flow: Res<FrameFlow>) -> bool {
    flow.pending.is_none() && !flow.aborted
}
