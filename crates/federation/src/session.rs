use std::sync::Arc;

use federation_common::{
  EmittedChunk, FederationOptions, FederationRole, HostOptions, InputOptions, ModuleId,
  NormalizedFederationOptions, OutputBundle, OutputOptions, PreserveSignature,
  REMOTE_ENTRY_HELPER, REMOTE_ENTRY_HELPER_ID, SHARED_RUNTIME, SHARED_RUNTIME_ID, SharedDependency,
};
use federation_error::{BuildResult, FederationWarning};
use federation_fs::OsFileSystem;
use federation_resolver::Resolver;
use federation_utils::sanitize_name::remove_non_reg_letter;
use rustc_hash::FxHashSet;

use crate::{
  chunk_placement::{
    ChunkPlacementPolicy, compute_dependency_sets, remove_ungenerated_shared_chunks,
  },
  generate_stage::GenerateStage,
  resolve_stage::ResolveStage,
  runtime::{render_remote_entry, render_shared_runtime},
  types::{ModuleGraph, SharedOptions, SharedResolver},
  utils::normalize_options::{NormalizeOptionsReturn, normalize_options},
};

/// All federation state of one build. The host calls the hooks in lifecycle order:
/// `options`, `build_start`, `resolve_id`/`load`/`module_parsed` while loading modules,
/// `output_options`, then `generate_bundle`.
pub struct FederationSession {
  options: SharedOptions,
  resolver: SharedResolver,
  shared: Vec<SharedDependency>,
  module_graph: ModuleGraph,
}

impl FederationSession {
  pub fn new(raw_options: FederationOptions, host_options: HostOptions) -> BuildResult<Self> {
    let NormalizeOptionsReturn { options, shared } = normalize_options(raw_options, host_options)?;
    let resolver = Arc::new(Resolver::new(options.builder.cwd.clone(), OsFileSystem));
    tracing::debug!(
      "Federation options normalized: {} exposes, {} remotes, {} shared",
      options.exposes.len(),
      options.remotes.len(),
      shared.len()
    );
    Ok(Self {
      options: Arc::new(options),
      resolver,
      shared,
      module_graph: ModuleGraph::default(),
    })
  }

  pub fn normalized_options(&self) -> &NormalizedFederationOptions {
    &self.options
  }

  /// The shared table, including removed entries.
  pub fn shared(&self) -> &[SharedDependency] {
    &self.shared
  }

  pub fn role(&self) -> FederationRole {
    FederationRole::derive(&self.options.exposes, &self.options.remotes, &self.shared)
  }

  /// Shared packages have to be bundled, they can't stay external.
  pub fn options(&self, input_options: &mut InputOptions) {
    if self.shared.is_empty() {
      return;
    }
    let shared_keys = self.shared.iter().map(|dep| dep.key.as_str()).collect::<FxHashSet<_>>();
    input_options.external.retain(|external| {
      let is_shared = shared_keys.contains(remove_non_reg_letter(external).as_str());
      if is_shared {
        tracing::debug!("Removed shared dependency {external} from external");
      }
      !is_shared
    });
  }

  /// Resolves the shared table and returns the chunks the host must emit.
  pub fn build_start(&mut self) -> BuildResult<Vec<EmittedChunk>> {
    let shared = std::mem::take(&mut self.shared);
    self.shared = ResolveStage::new(&self.options, &self.resolver).resolve(shared)?;

    let role = self.role();
    if !role.is_remote() {
      return Ok(vec![]);
    }

    let mut emitted = vec![EmittedChunk {
      id: REMOTE_ENTRY_HELPER.into(),
      name: None,
      filename: Some(self.options.remote_entry_filename()),
      preserve_signature: PreserveSignature::Strict,
    }];
    emitted.extend(self.options.exposes.iter().map(|expose| EmittedChunk {
      id: expose.source_path.clone(),
      name: Some(expose.export_key.clone()),
      filename: None,
      preserve_signature: PreserveSignature::AllowExtension,
    }));

    if role.is_shared() {
      emitted.push(EmittedChunk {
        id: SHARED_RUNTIME.into(),
        name: None,
        filename: Some(self.options.shared_runtime_filename()),
        preserve_signature: PreserveSignature::Strict,
      });
      emitted.extend(self.shared.iter().filter(|dep| !dep.is_removed()).map(|dep| {
        let chunk_name = dep.chunk_name();
        EmittedChunk {
          id: dep
            .id
            .as_ref()
            .map_or_else(|| dep.package_path.as_str().into(), |id| id.inner().clone()),
          filename: Some(self.options.builder.asset_path(&format!("{chunk_name}.js"))),
          name: Some(chunk_name.into()),
          preserve_signature: PreserveSignature::AllowExtension,
        }
      }));
    }

    tracing::debug!("Emitting {} federation chunks", emitted.len());
    Ok(emitted)
  }

  /// Claims the ids of the virtual modules served by `load`.
  pub fn resolve_id(&self, specifier: &str) -> Option<ModuleId> {
    match specifier {
      REMOTE_ENTRY_HELPER | REMOTE_ENTRY_HELPER_ID => Some(ModuleId::new(REMOTE_ENTRY_HELPER_ID)),
      SHARED_RUNTIME | SHARED_RUNTIME_ID => Some(ModuleId::new(SHARED_RUNTIME_ID)),
      _ => None,
    }
  }

  pub fn load(&self, id: &str) -> Option<String> {
    match id {
      REMOTE_ENTRY_HELPER_ID => Some(render_remote_entry(&self.options)),
      SHARED_RUNTIME_ID => Some(render_shared_runtime(&self.options, &self.shared)),
      _ => None,
    }
  }

  /// Records the static imports of a parsed module.
  pub fn module_parsed(&mut self, id: &str, imported_ids: &[ModuleId]) {
    self.module_graph.insert(ModuleId::new(id), imported_ids.to_vec());
  }

  /// Computes the dependency sets of the shared table and installs the chunk placement policy.
  pub fn output_options(&mut self, output_options: &mut OutputOptions) {
    if !self.role().is_shared() {
      return;
    }
    compute_dependency_sets(&mut self.shared, &self.module_graph);
    ChunkPlacementPolicy::new(&self.shared).install(output_options);
  }

  /// Finalizes the generated runtime chunks. Never fails the build, problems are returned as
  /// warnings.
  pub fn generate_bundle(&self, bundle: &mut OutputBundle) -> Vec<FederationWarning> {
    let warnings = GenerateStage::new(&self.options, bundle).generate();
    for warning in &warnings {
      tracing::warn!("{warning}");
    }
    remove_ungenerated_shared_chunks(bundle, &self.shared, self.role());
    warnings
  }
}
