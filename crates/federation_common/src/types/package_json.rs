use std::path::PathBuf;

use serde::Deserialize;

/// The fields of a package description file the federation engine reads.
#[derive(Debug, Clone)]
pub struct PackageJson {
  pub path: PathBuf,
  pub name: Option<String>,
  pub version: Option<String>,
}

#[derive(Deserialize)]
struct RawPackageJson {
  name: Option<String>,
  version: Option<String>,
}

impl PackageJson {
  pub fn from_json(path: PathBuf, content: &str) -> anyhow::Result<Self> {
    let raw: RawPackageJson = serde_json::from_str(content)
      .map_err(|err| anyhow::anyhow!("Failed to parse {}: {err}", path.display()))?;
    Ok(Self { path, name: raw.name, version: raw.version.filter(|version| !version.is_empty()) })
  }
}

#[test]
fn test_from_json() {
  let package_json = PackageJson::from_json(
    PathBuf::from("/p/package.json"),
    r#"{"name":"vue","version":"3.4.0","main":"index.js"}"#,
  )
  .unwrap();
  assert_eq!(package_json.name.as_deref(), Some("vue"));
  assert_eq!(package_json.version.as_deref(), Some("3.4.0"));

  let content = r#"{"name":"vue","version":""}"#;
  let package_json = PackageJson::from_json(PathBuf::from("/p/package.json"), content).unwrap();
  assert_eq!(package_json.version, None);

  assert!(PackageJson::from_json(PathBuf::from("/p/package.json"), "{").is_err());
}
