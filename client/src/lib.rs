//! Client-side frame history and temporal interpolation for tickrep.
//!
//! The receiving side of the replication pipeline keeps two kinds of
//! history:
//!
//! - [`ClientFrameManager`]: an ascending-tick chain of received frames, for
//!   looking up "the latest frame at or before tick T" and bounding memory
//!   by discarding frames nobody can reference anymore.
//! - [`InterpolatedVariable`]: per-field timestamped sample buffers that
//!   smooth discrete network samples into a continuous value for rendering,
//!   with linear or Hermite blending, cyclic wrap-around, and bounded
//!   extrapolation.

mod context;
mod frames;
mod interp;

pub use context::{ContextGuard, InterpolationContext};
pub use frames::{ClientFrame, ClientFrameManager, FrameError};
pub use interp::{
    hermite, lerp, InterpMode, InterpStatus, InterpValue, InterpolatedVariable, Sample,
};

#[cfg(test)]
mod tests {
    use super::*;
    use codec::Tick;

    #[test]
    fn public_api_exports() {
        let _ = ClientFrameManager::new();
        let _ = ClientFrame::new(Tick::new(1), Vec::new());
        let _ = InterpolationContext::default();
        let _: InterpolatedVariable<f32> = InterpolatedVariable::new(InterpMode::Linear);
    }
}
