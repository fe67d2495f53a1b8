mod expand_monorepo;

use federation_common::{ModuleId, NormalizedFederationOptions, ResolutionState, SharedDependency};
use federation_error::{BuildResult, FederationError};
use federation_fs::FileSystem;
use federation_utils::rayon::{IntoParallelIterator, ParallelIterator};
use rustc_hash::FxHashSet;

use crate::types::SharedResolver;

/// Fills in versions and entry ids of the shared table and replaces unresolvable monorepo roots by
/// their sub-packages.
pub struct ResolveStage<'a> {
  options: &'a NormalizedFederationOptions,
  resolver: &'a SharedResolver,
}

impl<'a> ResolveStage<'a> {
  pub fn new(options: &'a NormalizedFederationOptions, resolver: &'a SharedResolver) -> Self {
    Self { options, resolver }
  }

  pub fn resolve(&self, shared: Vec<SharedDependency>) -> BuildResult<Vec<SharedDependency>> {
    // Manifest lookups are independent of each other, the ordered collect keeps config order.
    let results = shared
      .into_par_iter()
      .map(|dep| self.resolve_dependency(dep))
      .collect::<Vec<Result<SharedDependency, FederationError>>>();

    let mut errors: Vec<anyhow::Error> = vec![];
    let mut resolved = Vec::with_capacity(results.len());
    for result in results {
      match result {
        Ok(dep) => resolved.push(dep),
        Err(err) => errors.push(err.into()),
      }
    }
    if !errors.is_empty() {
      Err(errors)?;
    }

    let mut expansions = vec![];
    for root in resolved.iter().filter(|dep| dep.is_removed()) {
      expansions.extend(self.expand_monorepo(root)?);
    }

    let mut seen = resolved
      .iter()
      .filter(|dep| !dep.is_removed())
      .map(|dep| dep.name.clone())
      .collect::<FxHashSet<_>>();
    for entry in expansions {
      if seen.insert(entry.name.clone()) {
        resolved.push(entry);
      } else {
        tracing::debug!("Skipped duplicate shared entry {}", entry.name);
      }
    }

    Ok(resolved)
  }

  fn resolve_dependency(
    &self,
    mut dep: SharedDependency,
  ) -> Result<SharedDependency, FederationError> {
    if dep.version.is_none() {
      match self.resolver.resolve_package_json(&dep.package_path) {
        Some(package_json) => {
          let Some(version) = package_json.version.clone() else {
            return Err(FederationError::MissingVersion { name: dep.name.to_string() });
          };
          dep.version = Some(version);
        }
        None => {
          let install_dir = self.options.builder.cwd.join("node_modules").join(dep.name.as_str());
          if !self.resolver.fs().is_dir(&install_dir) {
            return Err(FederationError::UnresolvableShared {
              name: dep.name.to_string(),
              package_path: dep.package_path.clone(),
              install_dir,
            });
          }
          tracing::debug!(
            "Shared dependency {} has no description file, expanding {}",
            dep.name,
            install_dir.display()
          );
          dep.state = ResolutionState::Removed;
          return Ok(dep);
        }
      }
    }

    match self.resolver.resolve(&dep.package_path) {
      Ok(resolved) => dep.id = Some(ModuleId::new(resolved.path)),
      Err(err) => {
        tracing::debug!("Failed to resolve entry of shared dependency {}: {err}", dep.name);
      }
    }
    dep.state = ResolutionState::Resolved;
    Ok(dep)
  }
}
