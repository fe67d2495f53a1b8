use std::{
  collections::VecDeque,
  sync::{Arc, LazyLock},
};

use arcstr::ArcStr;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use federation_common::{
  FederationRole, ManualChunks, ModuleId, OutputBundle, OutputOptions, SharedDependency,
};

use crate::types::ModuleGraph;

static SHARED_CHUNK_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"__federation_shared_(.+)\.js$").expect("Shared chunk pattern should be valid")
});

/// Walks the module graph from every shared entry and records the modules that belong to its
/// chunk. A walk never enters another shared entry, and a module reachable from several entries
/// goes to the first one in config order.
pub fn compute_dependency_sets(shared: &mut [SharedDependency], graph: &ModuleGraph) {
  let entries = shared
    .iter()
    .filter(|dep| !dep.is_removed())
    .filter_map(|dep| dep.id.clone())
    .collect::<FxHashSet<_>>();
  let mut owned = FxHashSet::<ModuleId>::default();

  for dep in shared.iter_mut().filter(|dep| !dep.is_removed()) {
    dep.dependencies.clear();
    let Some(entry) = dep.id.clone() else {
      continue;
    };

    let mut queue = VecDeque::from([entry.clone()]);
    while let Some(id) = queue.pop_front() {
      if !owned.insert(id.clone()) {
        continue;
      }
      if let Some(imported) = graph.get(&id) {
        queue.extend(
          imported
            .iter()
            .filter(|imported| **imported == entry || !entries.contains(*imported))
            .filter(|imported| !owned.contains(*imported))
            .cloned(),
        );
      }
      dep.dependencies.insert(id);
    }
  }
}

/// The manual chunk function that keeps each shared dependency together with the modules it
/// pulls in.
#[derive(Debug, Default)]
pub struct ChunkPlacementPolicy {
  owners: FxHashMap<ModuleId, ArcStr>,
}

impl ChunkPlacementPolicy {
  pub fn new(shared: &[SharedDependency]) -> Self {
    let mut owners = FxHashMap::default();
    for dep in shared.iter().filter(|dep| !dep.is_removed()) {
      let chunk_name: ArcStr = dep.chunk_name().into();
      for id in &dep.dependencies {
        owners.entry(id.clone()).or_insert_with(|| chunk_name.clone());
      }
    }
    Self { owners }
  }

  pub fn chunk_for(&self, id: &str) -> Option<ArcStr> {
    self.owners.get(id).cloned()
  }

  /// Wraps a function-style `manual_chunks`, or installs the policy when none is configured.
  /// Group-style configs are left as they are.
  pub fn install(self, output_options: &mut OutputOptions) {
    let policy = Arc::new(self);
    output_options.manual_chunks = match output_options.manual_chunks.take() {
      Some(ManualChunks::Fn(previous)) => Some(ManualChunks::Fn(Arc::new(move |id: &str| {
        policy.chunk_for(id).or_else(|| previous(id))
      }))),
      None => Some(ManualChunks::Fn(Arc::new(move |id: &str| policy.chunk_for(id)))),
      groups @ Some(ManualChunks::Groups(_)) => groups,
    };
    // Keeps shared chunks from being pulled into the entries that import them.
    output_options.hoist_transitive_imports = false;
  }
}

/// Drops the shared chunks a pure remote build was configured not to generate. Returns the file
/// names that were removed.
pub fn remove_ungenerated_shared_chunks(
  bundle: &mut OutputBundle,
  shared: &[SharedDependency],
  role: FederationRole,
) -> Vec<ArcStr> {
  if !role.is_pure_remote() {
    return vec![];
  }

  let generate_of_key =
    shared.iter().map(|dep| (dep.key.as_str(), dep.generate)).collect::<FxHashMap<_, _>>();
  let removed = bundle
    .values()
    .filter_map(|output| output.as_chunk())
    .filter(|chunk| {
      SHARED_CHUNK_FILENAME
        .captures(&chunk.filename)
        .and_then(|captures| captures.get(1))
        .is_some_and(|key| generate_of_key.get(key.as_str()) == Some(&false))
    })
    .map(|chunk| chunk.filename.clone())
    .collect::<Vec<_>>();

  for filename in &removed {
    tracing::debug!("Removed shared chunk {filename}, it is provided by the host");
    bundle.shift_remove(filename.as_str());
  }
  removed
}
