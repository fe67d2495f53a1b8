use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use arcstr::ArcStr;
use dashmap::DashMap;
use sugar_path::SugarPath;

use oxc_resolver::{ResolveError, ResolveOptions as OxcResolverOptions, ResolverGeneric};

use federation_common::PackageJson;
use federation_fs::{FileSystem, OsFileSystem};

#[derive(Debug)]
pub struct Resolver<F: FileSystem + Clone = OsFileSystem> {
  cwd: PathBuf,
  fs: F,
  import_resolver: ResolverGeneric<F>,
  package_json_cache: DashMap<PathBuf, Arc<PackageJson>>,
}

#[derive(Debug)]
pub struct ResolveReturn {
  pub path: ArcStr,
  /// The nearest description file above `path`. May belong to the importing project rather than
  /// to the resolved package.
  pub package_json: Option<PathBuf>,
}

impl<F: FileSystem + Clone> Resolver<F> {
  pub fn new(cwd: PathBuf, fs: F) -> Self {
    // Shared dependencies are loaded by the browser runtime, resolve them the way a browser
    // targeted build would.
    let resolve_options = OxcResolverOptions {
      main_fields: vec!["browser".to_string(), "module".to_string(), "main".to_string()],
      alias_fields: vec![vec!["browser".to_string()]],
      condition_names: vec!["import".to_string(), "default".to_string(), "browser".to_string()],
      extensions: vec![
        String::from(".mjs"),
        String::from(".js"),
        String::from(".ts"),
        String::from(".jsx"),
        String::from(".tsx"),
        String::from(".json"),
      ],
      ..Default::default()
    };

    Self {
      cwd,
      import_resolver: ResolverGeneric::new_with_file_system(fs.clone(), resolve_options),
      fs,
      package_json_cache: DashMap::default(),
    }
  }

  pub fn fs(&self) -> &F {
    &self.fs
  }

  /// Resolves `specifier` as if it was imported from a module at the project root.
  pub fn resolve(&self, specifier: &str) -> Result<ResolveReturn, ResolveError> {
    let specifier = if Path::new(specifier).is_absolute() {
      specifier.to_string()
    } else if specifier.starts_with('.') {
      self.cwd.join(specifier).normalize().to_string_lossy().into_owned()
    } else {
      specifier.to_string()
    };

    self.import_resolver.resolve(&self.cwd, &specifier).map(|info| ResolveReturn {
      path: info.full_path().to_string_lossy().as_ref().into(),
      package_json: info.package_json().map(|package_json| package_json.path.clone()),
    })
  }

  /// Finds the description file of the package `package_path` points to.
  ///
  /// `<package_path>/package.json` is tried first. Packages whose `exports` field hides the
  /// description file fall back to the one the resolver attached to the package entry, as long as
  /// it carries the package name.
  pub fn resolve_package_json(&self, package_path: &str) -> Option<Arc<PackageJson>> {
    if let Ok(resolved) = self.resolve(&format!("{package_path}/package.json")) {
      if let Ok(package_json) = self.read_package_json(Path::new(resolved.path.as_str())) {
        return Some(package_json);
      }
    }

    let manifest = self.resolve(package_path).ok()?.package_json?;
    let package_json = self.read_package_json(&manifest).ok()?;
    match package_name_of(package_path) {
      Some(expected) if package_json.name.as_deref() != Some(expected) => None,
      _ => Some(package_json),
    }
  }

  pub fn read_package_json(&self, path: &Path) -> anyhow::Result<Arc<PackageJson>> {
    if let Some(cached) = self.package_json_cache.get(path) {
      return Ok(Arc::clone(cached.value()));
    }
    let content = self.fs.read_to_string(path)?;
    let package_json = Arc::new(PackageJson::from_json(path.to_path_buf(), &content)?);
    self.package_json_cache.insert(path.to_path_buf(), Arc::clone(&package_json));
    Ok(package_json)
  }
}

/// `react/jsx-runtime` -> `react`, `@scope/pkg/sub` -> `@scope/pkg`. Paths have no package name.
pub fn package_name_of(specifier: &str) -> Option<&str> {
  if specifier.starts_with('.') || Path::new(specifier).is_absolute() {
    return None;
  }
  let segments = if specifier.starts_with('@') { 2 } else { 1 };
  let end = specifier.match_indices('/').nth(segments - 1).map_or(specifier.len(), |(idx, _)| idx);
  Some(&specifier[..end])
}

#[test]
fn test_package_name_of() {
  assert_eq!(package_name_of("react"), Some("react"));
  assert_eq!(package_name_of("react/jsx-runtime"), Some("react"));
  assert_eq!(package_name_of("@scope/pkg/sub"), Some("@scope/pkg"));
  assert_eq!(package_name_of("@scope/pkg"), Some("@scope/pkg"));
  assert_eq!(package_name_of("./local"), None);
}

#[cfg(test)]
fn write_package(root: &Path, dir: &str, manifest: &str, entry: &str) {
  let dir = root.join(dir);
  std::fs::create_dir_all(&dir).unwrap();
  std::fs::write(dir.join("package.json"), manifest).unwrap();
  std::fs::write(dir.join(entry), "export default 1;").unwrap();
}

#[test]
fn resolve_package_json_of_installed_package() {
  let root = tempfile::tempdir().unwrap();
  write_package(
    root.path(),
    "node_modules/react",
    r#"{ "name": "react", "version": "18.2.0", "main": "index.js" }"#,
    "index.js",
  );
  let resolver = Resolver::new(root.path().to_path_buf(), OsFileSystem);

  let package_json = resolver.resolve_package_json("react").unwrap();
  assert_eq!(package_json.version.as_deref(), Some("18.2.0"));
  assert!(resolver.resolve("react").unwrap().path.ends_with("index.js"));
}

#[test]
fn resolve_package_json_hidden_by_exports() {
  let root = tempfile::tempdir().unwrap();
  write_package(
    root.path(),
    "node_modules/hidden",
    r#"{ "name": "hidden", "version": "2.0.1", "exports": { ".": "./main.js" } }"#,
    "main.js",
  );
  let resolver = Resolver::new(root.path().to_path_buf(), OsFileSystem);

  let package_json = resolver.resolve_package_json("hidden").unwrap();
  assert_eq!(package_json.version.as_deref(), Some("2.0.1"));
}

#[test]
fn resolve_package_json_of_missing_package() {
  let root = tempfile::tempdir().unwrap();
  let resolver = Resolver::new(root.path().to_path_buf(), OsFileSystem);
  assert!(resolver.resolve_package_json("missing").is_none());
}

#[test]
fn resolve_attaches_the_package_manifest() {
  let root = tempfile::tempdir().unwrap();
  write_package(
    root.path(),
    "node_modules/react",
    r#"{ "name": "react", "version": "18.2.0", "main": "index.js" }"#,
    "index.js",
  );
  let resolver = Resolver::new(root.path().to_path_buf(), OsFileSystem);

  let resolved = resolver.resolve("react").unwrap();
  let manifest = resolved.package_json.unwrap();
  assert!(manifest.ends_with("node_modules/react/package.json"));
}

#[test]
fn resolve_package_json_rejects_a_foreign_manifest() {
  let root = tempfile::tempdir().unwrap();
  std::fs::write(root.path().join("package.json"), r#"{ "name": "app", "version": "9.9.9" }"#)
    .unwrap();
  let dir = root.path().join("node_modules/bare");
  std::fs::create_dir_all(&dir).unwrap();
  std::fs::write(dir.join("index.js"), "export default 1;").unwrap();
  let resolver = Resolver::new(root.path().to_path_buf(), OsFileSystem);

  assert!(resolver.resolve("bare").is_ok());
  assert!(resolver.resolve_package_json("bare").is_none());
}
