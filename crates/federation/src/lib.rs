mod chunk_placement;
mod generate_stage;
mod resolve_stage;
mod runtime;
mod session;
mod types;
mod utils;

pub use crate::{chunk_placement::ChunkPlacementPolicy, session::FederationSession};
pub use federation_common::*;
pub use federation_error::{BuildError, BuildResult, FederationError, FederationWarning};
