use federation_common::{ModuleId, SharedDependency};
use federation_error::BuildResult;
use federation_fs::FileSystem;
use federation_utils::rayon::{IntoParallelIterator, ParallelIterator};

use super::ResolveStage;

const FALLBACK_VERSION: &str = "0.0.0";

impl ResolveStage<'_> {
  /// Synthesizes `<root>/<dir name>` for every directory below the root's install directory that
  /// resolves to a module.
  pub fn expand_monorepo(&self, root: &SharedDependency) -> BuildResult<Vec<SharedDependency>> {
    let install_dir = self.options.builder.cwd.join("node_modules").join(root.name.as_str());
    let dirs = self.resolver.fs().collect_dirs(&install_dir).map_err(|err| {
      anyhow::anyhow!("Failed to read {}: {err}", install_dir.display())
    })?;

    let entries = dirs
      .into_par_iter()
      .filter_map(|dir| {
        let resolved = self.resolver.resolve(&dir.to_string_lossy()).ok()?;
        let file_name = dir.file_name()?.to_string_lossy().into_owned();
        // Manifests at or above the install directory belong to the root package or the project.
        let version = resolved
          .package_json
          .as_deref()
          .filter(|manifest| manifest.parent().is_some_and(|dir| !install_dir.starts_with(dir)))
          .and_then(|manifest| self.resolver.read_package_json(manifest).ok())
          .and_then(|package_json| package_json.version.clone())
          .unwrap_or_else(|| {
            tracing::warn!(
              "No version found for {}, using {FALLBACK_VERSION}",
              resolved.path.as_str()
            );
            FALLBACK_VERSION.to_string()
          });
        let name = format!("{}/{file_name}", root.name);
        Some(root.derive_entry(&name, ModuleId::new(resolved.path), version))
      })
      .collect::<Vec<_>>();

    tracing::debug!("Expanded {} into {} shared entries", root.name, entries.len());
    Ok(entries)
  }
}
