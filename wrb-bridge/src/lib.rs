//! # wrb-bridge
//!
//! The Bridge Orchestrator: sequences selection capture, REAPER hand-off,
//! the render wait and the import back into Wwise.
//!
//! Every operation starts from scratch; nothing is carried between calls
//! except what is on disk (the manifest and the scratch directory).
//! Settings are passed in, never read from ambient state.

pub mod error;
pub mod operator;
pub mod orchestrator;
pub mod reconcile;

pub use error::{BridgeError, Precondition};
pub use operator::Operator;
pub use orchestrator::{Bridge, HandOff, OpenOutcome, SyncOutcome};
pub use reconcile::reconcile;
