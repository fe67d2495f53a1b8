use std::path::PathBuf;

/// Fatal errors. Any of these aborts the build.
#[derive(Debug, thiserror::Error)]
pub enum FederationError {
  #[error(
    "Cannot resolve shared dependency \"{name}\" (package path \"{package_path}\"): no description file was found and \"{}\" is not a directory. Install the package or specify its version in the shared config.",
    .install_dir.display()
  )]
  UnresolvableShared { name: String, package_path: String, install_dir: PathBuf },

  #[error(
    "No description file or no version in description file (usually package.json) of \"{name}\". Add version to description file, or manually specify version in shared config."
  )]
  MissingVersion { name: String },

  #[error(
    "Exposed modules \"{first}\" and \"{second}\" both map to the export key \"{key}\". Rename one of them."
  )]
  ExposeKeyCollision { key: String, first: String, second: String },

  #[error("Invalid federation options: {0}")]
  InvalidOptions(String),
}
