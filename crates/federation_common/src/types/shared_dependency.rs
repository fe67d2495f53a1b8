use arcstr::ArcStr;
use federation_utils::{indexmap::FxIndexSet, sanitize_name::remove_non_reg_letter};

use crate::{ModuleId, SHARED_CHUNK_PREFIX, VersionDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
  /// Not looked up yet.
  Pending,
  Resolved,
  /// Could not be resolved, never emitted. Replaced by its expansions when it is a monorepo root.
  Removed,
}

#[derive(Debug, Clone)]
pub struct SharedDependency {
  /// Package name as written in the config, e.g. `vue` or `@scope/pkg/sub`.
  pub name: ArcStr,
  /// Identifier-safe form of `name`. Suffix of the shared chunk's name.
  pub key: ArcStr,
  pub package_path: String,
  pub version: Option<String>,
  pub required_version: Option<String>,
  pub scope: String,
  pub singleton: bool,
  pub eager: bool,
  pub import: bool,
  pub generate: bool,
  /// Resolved entry module of the package.
  pub id: Option<ModuleId>,
  /// Modules reachable from `id` that belong in the same chunk.
  pub dependencies: FxIndexSet<ModuleId>,
  pub state: ResolutionState,
  /// Name of the monorepo root this entry was synthesized from.
  pub root: Option<ArcStr>,
}

impl SharedDependency {
  pub fn new(name: &str, scope: String) -> Self {
    Self {
      name: name.into(),
      key: remove_non_reg_letter(name).into(),
      package_path: name.to_string(),
      version: None,
      required_version: None,
      scope,
      singleton: false,
      eager: false,
      import: true,
      generate: true,
      id: None,
      dependencies: FxIndexSet::default(),
      state: ResolutionState::Pending,
      root: None,
    }
  }

  pub fn is_removed(&self) -> bool {
    self.state == ResolutionState::Removed
  }

  pub fn is_resolved(&self) -> bool {
    self.state == ResolutionState::Resolved
  }

  /// `__federation_shared_<key>`
  pub fn chunk_name(&self) -> String {
    format!("{SHARED_CHUNK_PREFIX}{}", self.key)
  }

  /// Synthesizes the entry for a sub-directory `entry_name` of this monorepo root. Everything but
  /// the identity and resolution fields is inherited.
  pub fn derive_entry(&self, entry_name: &str, id: ModuleId, version: String) -> Self {
    Self {
      name: entry_name.into(),
      key: remove_non_reg_letter(entry_name).into(),
      package_path: entry_name.to_string(),
      version: Some(version),
      id: Some(id),
      dependencies: FxIndexSet::default(),
      state: ResolutionState::Resolved,
      root: Some(self.name.clone()),
      ..self.clone()
    }
  }

  pub fn version_descriptor(&self, from: Option<&str>) -> VersionDescriptor {
    VersionDescriptor {
      scope: self.scope.clone(),
      version: self.version.clone().unwrap_or_default(),
      required_version: self.required_version.clone(),
      singleton: self.singleton,
      eager: self.eager,
      from: from.map(ToString::to_string),
    }
  }
}

#[test]
fn test_derive_entry() {
  let mut root = SharedDependency::new("@org/ui", "custom".to_string());
  root.singleton = true;
  root.state = ResolutionState::Removed;

  let entry = root.derive_entry(
    "@org/ui/button",
    ModuleId::from("/app/node_modules/@org/ui/button/index.js"),
    "1.0.0".into(),
  );
  assert_eq!(entry.key, "@orgUiButton");
  assert_eq!(entry.chunk_name(), "__federation_shared_@orgUiButton");
  assert_eq!(entry.scope, "custom");
  assert!(entry.singleton);
  assert!(entry.is_resolved());
  assert_eq!(entry.root.as_deref(), Some("@org/ui"));

  let descriptor = entry.version_descriptor(Some("remote_app"));
  assert_eq!(descriptor.version, "1.0.0");
  assert_eq!(descriptor.from.as_deref(), Some("remote_app"));
}
