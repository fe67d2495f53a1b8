use std::sync::Arc;

use federation_common::{ModuleId, NormalizedFederationOptions};
use federation_fs::OsFileSystem;
use federation_resolver::Resolver;
use rustc_hash::FxHashMap;

pub type SharedResolver = Arc<Resolver<OsFileSystem>>;
pub type SharedOptions = Arc<NormalizedFederationOptions>;

/// Module id -> ids of the modules it imports, as reported by the host while parsing.
pub type ModuleGraph = FxHashMap<ModuleId, Vec<ModuleId>>;
