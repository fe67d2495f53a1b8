use federation_utils::indexmap::FxIndexMap;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_SHARE_SCOPE;

fn default_scope() -> String {
  DEFAULT_SHARE_SCOPE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDescriptor {
  #[serde(default = "default_scope")]
  pub scope: String,
  /// Same as the version key the descriptor is stored under.
  #[serde(default)]
  pub version: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub required_version: Option<String>,
  #[serde(default)]
  pub singleton: bool,
  #[serde(default)]
  pub eager: bool,
  /// Name of the build that provided this version.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub from: Option<String>,
}

/// Package name -> version key -> descriptor. The payload `init` receives.
pub type SharedVersionTable = FxIndexMap<String, FxIndexMap<String, VersionDescriptor>>;

/// Scope -> package name -> version key -> descriptor.
///
/// `init` follows the same rules as the generated runtime's `init`: entries are placed by their
/// descriptor's scope and merged, so repeating a payload changes nothing and different versions
/// of one package accumulate.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareScope(FxIndexMap<String, SharedVersionTable>);

impl ShareScope {
  pub fn init(&mut self, payload: &SharedVersionTable) {
    for (package, versions) in payload {
      for (version, descriptor) in versions {
        self
          .0
          .entry(descriptor.scope.clone())
          .or_default()
          .entry(package.clone())
          .or_default()
          .insert(version.clone(), descriptor.clone());
      }
    }
  }

  pub fn register(&mut self, package: &str, version: &str, descriptor: VersionDescriptor) {
    let mut payload = SharedVersionTable::default();
    payload.entry(package.to_string()).or_default().insert(version.to_string(), descriptor);
    self.init(&payload);
  }

  pub fn scope(&self, scope: &str) -> Option<&SharedVersionTable> {
    self.0.get(scope)
  }

  pub fn versions(
    &self,
    scope: &str,
    package: &str,
  ) -> Option<&FxIndexMap<String, VersionDescriptor>> {
    self.scope(scope)?.get(package)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

#[cfg(test)]
fn payload(entries: &[(&str, &str, &str)]) -> SharedVersionTable {
  let mut table = SharedVersionTable::default();
  for (package, version, scope) in entries {
    table.entry((*package).to_string()).or_default().insert(
      (*version).to_string(),
      VersionDescriptor {
        scope: (*scope).to_string(),
        version: (*version).to_string(),
        required_version: None,
        singleton: false,
        eager: false,
        from: None,
      },
    );
  }
  table
}

#[test]
fn init_is_idempotent() {
  let incoming = payload(&[("react", "18.2.0", "default"), ("vue", "3.4.0", "ui")]);
  let mut once = ShareScope::default();
  once.init(&incoming);
  let mut twice = ShareScope::default();
  twice.init(&incoming);
  twice.init(&incoming);
  assert_eq!(once, twice);
}

#[test]
fn init_accumulates_versions() {
  let mut scope = ShareScope::default();
  scope.init(&payload(&[("react", "18.2.0", "default")]));
  scope.init(&payload(&[("react", "17.0.2", "default")]));
  let versions = scope.versions("default", "react").unwrap();
  assert_eq!(versions.keys().collect::<Vec<_>>(), ["18.2.0", "17.0.2"]);

  // One payload carrying two versions keeps both as well.
  let mut scope = ShareScope::default();
  scope.init(&payload(&[("react", "18.2.0", "default"), ("react", "17.0.2", "default")]));
  assert_eq!(scope.versions("default", "react").unwrap().len(), 2);
}

#[test]
fn init_is_associative() {
  let a = payload(&[("react", "18.2.0", "default")]);
  let b = payload(&[("react", "17.0.2", "legacy"), ("vue", "3.4.0", "default")]);

  let mut sequential = ShareScope::default();
  sequential.init(&a);
  sequential.init(&b);

  let mut combined = a.clone();
  for (package, versions) in &b {
    combined.entry(package.clone()).or_default().extend(versions.clone());
  }
  let mut at_once = ShareScope::default();
  at_once.init(&combined);

  assert_eq!(sequential, at_once);
  assert!(sequential.versions("legacy", "react").is_some());
}

#[test]
fn descriptor_scope_defaults() {
  let table: SharedVersionTable = serde_json::from_str(r#"{"react":{"18.2.0":{}}}"#).unwrap();
  let mut scope = ShareScope::default();
  scope.init(&table);
  assert!(scope.versions("default", "react").is_some());
}
