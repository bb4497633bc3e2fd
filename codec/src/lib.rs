//! Snapshot packing, change tracking, and delta formatting for tickrep.
//!
//! This is the authority-side core: each tick, object state is packed into
//! immutable per-object buffers inside a frame snapshot, diffed against the
//! cached baseline for that object id, and formatted into absolute or delta
//! update messages per recipient interest set.
//!
//! # Design Principles
//!
//! - **Explicit ownership** - The manager's baseline cache owns the current
//!   baseline outright; change history moves between baselines, it is never
//!   shared mutably. Sealed snapshots share packed objects read-only.
//! - **Byte-exact change detection** - A field changed if its encoding
//!   changed, with no type-specific equality.
//! - **Fail-closed decode** - Incoming updates are fully decoded and
//!   validated before any state is touched.

mod apply;
mod changes;
mod error;
mod limits;
mod manager;
mod packed;
mod snapshot;
mod state;
mod types;

pub use apply::{apply_update, decode_update, DecodedField, DecodedObject, DecodedUpdate};
pub use changes::ChangeFrameList;
pub use error::{CodecError, CodecResult, LimitKind};
pub use limits::CodecLimits;
pub use manager::FrameSnapshotManager;
pub use packed::{FieldDelta, PackedField, PackedObject};
pub use snapshot::{FrameSnapshot, FrameSnapshotEntry};
pub use state::{ObjectState, ObjectTable};
pub use types::{ObjectId, Tick, ZoneId};
pub use wire::Limits as WireLimits;
