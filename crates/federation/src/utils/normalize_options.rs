use std::path::Path;

use arcstr::ArcStr;
use rustc_hash::FxHashMap;
use sugar_path::SugarPath;

use federation_common::{
  BuilderInfo, DEFAULT_ASSETS_DIR, DEFAULT_ENTRY_FILENAME, DEFAULT_SHARE_SCOPE, EXPOSE_CHUNK_PREFIX,
  ExposeOptions, ExposedModule, FederationOptions, HostOptions, NormalizedFederationOptions,
  RemoteDeclaration, RemoteOptions, SharedDependency, SharedOptions,
};
use federation_error::{BuildResult, FederationError};
use federation_utils::{indexmap::FxIndexMap, sanitize_name::remove_non_reg_letter};

pub struct NormalizeOptionsReturn {
  pub options: NormalizedFederationOptions,
  pub shared: Vec<SharedDependency>,
}

pub fn normalize_options(
  raw_options: FederationOptions,
  host_options: HostOptions,
) -> BuildResult<NormalizeOptionsReturn> {
  let cwd = match host_options.cwd {
    Some(cwd) => cwd,
    None => std::env::current_dir()
      .map_err(|err| anyhow::anyhow!("Failed to get current dir: {err}"))?,
  };

  let builder = BuilderInfo {
    cwd,
    assets_dir: host_options.assets_dir.unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string()),
    css_code_split: host_options.css_code_split.unwrap_or(true),
  };

  let share_scope =
    raw_options.share_scope.filter(|scope| !scope.is_empty()).unwrap_or(DEFAULT_SHARE_SCOPE.into());

  let exposes = normalize_exposes(raw_options.exposes.unwrap_or_default(), &builder.cwd)?;
  let remotes = normalize_remotes(raw_options.remotes.unwrap_or_default(), &share_scope);
  let shared = normalize_shared(raw_options.shared, &share_scope)?;

  let options = NormalizedFederationOptions {
    name: raw_options.name,
    filename: raw_options
      .filename
      .filter(|filename| !filename.is_empty())
      .unwrap_or_else(|| DEFAULT_ENTRY_FILENAME.to_string()),
    share_scope,
    exposes,
    remotes,
    builder,
  };

  Ok(NormalizeOptionsReturn { options, shared })
}

fn normalize_exposes(
  exposes: FxIndexMap<String, ExposeOptions>,
  cwd: &Path,
) -> BuildResult<Vec<ExposedModule>> {
  let mut owner_of_key = FxHashMap::<ArcStr, ArcStr>::default();
  let mut normalized = Vec::with_capacity(exposes.len());

  for (logical_name, expose) in exposes {
    let sanitized = remove_non_reg_letter(&logical_name);
    if sanitized.is_empty() {
      Err(FederationError::InvalidOptions(format!(
        "exposed name \"{logical_name}\" contains no identifier characters"
      )))?;
    }

    let export_key: ArcStr = format!("{EXPOSE_CHUNK_PREFIX}{sanitized}").into();
    let logical_name: ArcStr = logical_name.into();
    if let Some(first) = owner_of_key.insert(export_key.clone(), logical_name.clone()) {
      Err(FederationError::ExposeKeyCollision {
        key: export_key.to_string(),
        first: first.to_string(),
        second: logical_name.to_string(),
      })?;
    }

    let source_path =
      Path::new(expose.import()).absolutize_with(cwd.to_path_buf()).to_slash_lossy().into_owned();
    normalized.push(ExposedModule { logical_name, source_path: source_path.into(), export_key });
  }

  Ok(normalized)
}

fn normalize_remotes(
  remotes: FxIndexMap<String, RemoteOptions>,
  share_scope: &str,
) -> Vec<RemoteDeclaration> {
  remotes
    .into_iter()
    .map(|(name, remote)| match remote {
      RemoteOptions::Url(external) => RemoteDeclaration {
        name: name.into(),
        external,
        external_type: Default::default(),
        format: Default::default(),
        from: Default::default(),
        scope: share_scope.to_string(),
      },
      RemoteOptions::Detailed(item) => RemoteDeclaration {
        name: name.into(),
        external: item.external,
        external_type: item.external_type.unwrap_or_default(),
        format: item.format.unwrap_or_default(),
        from: item.from.unwrap_or_default(),
        scope: item.share_scope.unwrap_or_else(|| share_scope.to_string()),
      },
    })
    .collect()
}

fn normalize_shared(
  shared: Option<SharedOptions>,
  share_scope: &str,
) -> BuildResult<Vec<SharedDependency>> {
  let Some(shared) = shared else {
    return Ok(vec![]);
  };

  let mut owner_of_key = FxHashMap::<ArcStr, ArcStr>::default();
  let mut normalized = vec![];
  for (name, item) in shared.into_items() {
    let mut dep =
      SharedDependency::new(&name, item.share_scope.unwrap_or_else(|| share_scope.to_string()));
    if dep.key.is_empty() {
      Err(FederationError::InvalidOptions(format!(
        "shared dependency \"{name}\" contains no identifier characters"
      )))?;
    }
    if let Some(first) = owner_of_key.insert(dep.key.clone(), dep.name.clone()) {
      Err(FederationError::InvalidOptions(format!(
        "shared dependencies \"{first}\" and \"{name}\" both map to the key \"{}\"",
        dep.key
      )))?;
    }

    if let Some(package_path) = item.package_path {
      dep.package_path = package_path;
    }
    dep.version = item.version.filter(|version| !version.is_empty());
    dep.required_version = item.required_version;
    dep.singleton = item.singleton.unwrap_or(false);
    dep.eager = item.eager.unwrap_or(false);
    dep.import = item.import.unwrap_or(true);
    dep.generate = item.generate.unwrap_or(true);
    normalized.push(dep);
  }

  Ok(normalized)
}

#[cfg(test)]
fn host(cwd: &str) -> HostOptions {
  HostOptions { cwd: Some(cwd.into()), ..Default::default() }
}

#[test]
fn normalizes_exposes() {
  let raw = FederationOptions::from_json(
    r#"{
      "name": "remote_app",
      "exposes": {
        "./Button": "./src/components/Button.vue",
        "./utils/format": { "import": "src/../lib/format.ts" }
      }
    }"#,
  )
  .unwrap();
  let NormalizeOptionsReturn { options, shared } = normalize_options(raw, host("/app")).unwrap();

  assert!(shared.is_empty());
  assert_eq!(options.filename, "remoteEntry.js");
  assert_eq!(options.share_scope, "default");
  assert_eq!(options.remote_entry_filename(), "assets/remoteEntry.js");

  let button = options.find_expose("./Button").unwrap();
  assert_eq!(button.export_key, "__federation_expose_Button");
  assert_eq!(button.source_path, "/app/src/components/Button.vue");

  let format = options.find_expose("./utils/format").unwrap();
  assert_eq!(format.export_key, "__federation_expose_UtilsFormat");
  assert_eq!(format.source_path, "/app/lib/format.ts");
}

#[test]
fn rejects_colliding_export_keys() {
  let raw = FederationOptions::from_json(
    r#"{ "exposes": { "./my-button": "./a.js", "./my/-button": "./b.js" } }"#,
  )
  .unwrap();
  let err = normalize_options(raw, host("/app")).err().unwrap();
  match err.find::<FederationError>() {
    Some(FederationError::ExposeKeyCollision { key, first, second }) => {
      assert_eq!(key, "__federation_expose_My-button");
      assert_eq!(first, "./my-button");
      assert_eq!(second, "./my/-button");
    }
    other => panic!("unexpected error {other:?}"),
  }
}

#[test]
fn rejects_names_without_identifier_characters() {
  let raw = FederationOptions::from_json(r#"{ "exposes": { "./": "./a.js" } }"#).unwrap();
  let err = normalize_options(raw, host("/app")).err().unwrap();
  assert!(matches!(err.find::<FederationError>(), Some(FederationError::InvalidOptions(_))));
}

#[test]
fn normalizes_shared_and_remotes() {
  let raw = FederationOptions::from_json(
    r#"{
      "shareScope": "team",
      "shared": {
        "react": { "singleton": true, "requiredVersion": "^18.0.0" },
        "@org/ui": { "shareScope": "ui", "generate": false, "packagePath": "./packages/ui" }
      },
      "remotes": {
        "remote_app": "http://localhost:5001/assets/remoteEntry.js",
        "legacy": { "external": "window.legacyUrl", "externalType": "promise", "format": "var", "from": "webpack" }
      }
    }"#,
  )
  .unwrap();
  let NormalizeOptionsReturn { options, shared } = normalize_options(raw, host("/app")).unwrap();

  assert_eq!(shared.len(), 2);
  assert_eq!(shared[0].key, "react");
  assert_eq!(shared[0].scope, "team");
  assert!(shared[0].singleton && shared[0].import && shared[0].generate);
  assert_eq!(shared[0].package_path, "react");
  assert_eq!(shared[1].key, "@orgUi");
  assert_eq!(shared[1].scope, "ui");
  assert!(!shared[1].generate);
  assert_eq!(shared[1].package_path, "./packages/ui");

  assert_eq!(options.remotes.len(), 2);
  assert_eq!(options.remotes[0].scope, "team");
  assert_eq!(options.remotes[1].external_type, federation_common::ExternalType::Promise);
  assert_eq!(options.remotes[1].format, federation_common::RemoteFormat::Var);
}

#[test]
fn shared_list_uses_defaults() {
  let raw = FederationOptions::from_json(r#"{ "shared": ["vue", "pinia"] }"#).unwrap();
  let NormalizeOptionsReturn { shared, .. } = normalize_options(raw, host("/app")).unwrap();
  assert_eq!(shared.iter().map(|dep| dep.name.as_str()).collect::<Vec<_>>(), ["vue", "pinia"]);
  assert!(shared.iter().all(|dep| dep.scope == "default" && dep.version.is_none()));
}
