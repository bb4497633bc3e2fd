//! Received-frame history keyed by tick.

use std::collections::VecDeque;
use std::fmt;

use codec::Tick;

/// Errors that can occur when inserting into the frame history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Frame ticks must be positive.
    ZeroTick,

    /// Frames must arrive in ascending tick order.
    OutOfOrder { last_tick: Tick, new_tick: Tick },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTick => write!(f, "frame tick must be positive"),
            Self::OutOfOrder {
                last_tick,
                new_tick,
            } => {
                write!(
                    f,
                    "frame tick {} not after last tick {}",
                    new_tick.raw(),
                    last_tick.raw()
                )
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// One received frame: its tick and an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFrame {
    pub tick: Tick,
    pub payload: Vec<u8>,
}

impl ClientFrame {
    /// Creates a frame.
    #[must_use]
    pub const fn new(tick: Tick, payload: Vec<u8>) -> Self {
        Self { tick, payload }
    }
}

/// An ordered history of received frames.
///
/// Frames are kept in strictly ascending tick order with no duplicates; the
/// caller appends them in arrival order, which for a tick-stamped stream is
/// ascending by contract. Lookup supports exact ticks and "latest at or
/// before".
#[derive(Debug, Default)]
pub struct ClientFrameManager {
    frames: VecDeque<ClientFrame>,
}

impl ClientFrameManager {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a frame at the tail of the chain and returns the new count.
    ///
    /// The tick must be positive and strictly greater than the newest stored
    /// tick.
    pub fn add_client_frame(&mut self, frame: ClientFrame) -> Result<usize, FrameError> {
        if frame.tick.is_zero() {
            return Err(FrameError::ZeroTick);
        }
        if let Some(last) = self.frames.back() {
            if frame.tick <= last.tick {
                return Err(FrameError::OutOfOrder {
                    last_tick: last.tick,
                    new_tick: frame.tick,
                });
            }
        }
        self.frames.push_back(frame);
        Ok(self.frames.len())
    }

    /// Looks up a frame by tick.
    ///
    /// With `exact`, returns the frame with exactly that tick. Otherwise
    /// returns the latest frame whose tick is at or before the requested
    /// tick; `None` when the history is empty or starts after the request
    /// (no usable baseline yet).
    #[must_use]
    pub fn get_client_frame(&self, tick: Tick, exact: bool) -> Option<&ClientFrame> {
        if exact {
            return self.frames.iter().find(|frame| frame.tick == tick);
        }
        self.frames.iter().rev().find(|frame| frame.tick <= tick)
    }

    /// Removes every frame with a tick strictly before `before` and returns
    /// how many were removed.
    pub fn delete_client_frames(&mut self, before: Tick) -> usize {
        let mut removed = 0;
        while let Some(front) = self.frames.front() {
            if front.tick >= before {
                break;
            }
            self.frames.pop_front();
            removed += 1;
        }
        removed
    }

    /// Removes all frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Unlinks and returns the oldest frame.
    pub fn remove_oldest_frame(&mut self) -> Option<ClientFrame> {
        self.frames.pop_front()
    }

    /// Returns the number of stored frames.
    #[must_use]
    pub fn count_client_frames(&self) -> usize {
        self.frames.len()
    }

    /// Returns the newest stored tick.
    #[must_use]
    pub fn newest_tick(&self) -> Option<Tick> {
        self.frames.back().map(|frame| frame.tick)
    }

    /// Returns the oldest stored tick.
    #[must_use]
    pub fn oldest_tick(&self) -> Option<Tick> {
        self.frames.front().map(|frame| frame.tick)
    }
}
