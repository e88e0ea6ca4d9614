//! Core reconciliation layer for Folder Mirror
//!
//! Keeps a replica directory tree identical to a source tree:
//!
//! - **prune** removes replica entries the source does not back
//! - **synchronize** creates and refreshes replica entries from the source
//! - **run_once** validates the roots and runs prune then synchronize
//!
//! Everything the passes do is reported as [`MirrorEvent`]s to an
//! [`EventSink`] supplied by the caller. The core keeps no state between
//! passes.

pub mod error;
pub mod events;
pub mod report;
pub mod settings;
pub mod sync;

pub use error::{Error, Result};
pub use events::{EventKind, EventLog, EventSink, MirrorEvent, NullSink};
pub use report::{EventCounts, PassResult, PassSummary};
pub use settings::{MirrorSettings, PartialSettings, parse_interval};
pub use sync::{prune, run_once, synchronize};
