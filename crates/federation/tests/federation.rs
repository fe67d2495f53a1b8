use std::{
  fs,
  path::{Path, PathBuf},
};

use federation::{
  BuildError, FederationError, FederationOptions, FederationSession, FederationWarning,
  HostOptions, InputOptions, ManualChunks, ModuleId, OutputAsset, OutputBundle, OutputChunk,
  OutputOptions, PreserveSignature, REMOTE_ENTRY_HELPER_ID, SHARED_RUNTIME_ID,
};
use federation_ecmascript::EcmaCompiler;
use tempfile::TempDir;

fn write(root: &Path, path: &str, content: &str) {
  let path = root.join(path);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, content).unwrap();
}

fn install(root: &Path, name: &str, version: &str) {
  write(
    root,
    &format!("node_modules/{name}/package.json"),
    &format!(r#"{{ "name": "{name}", "version": "{version}", "main": "index.js" }}"#),
  );
  write(root, &format!("node_modules/{name}/index.js"), "export default {};");
}

fn session(root: &Path, options: &str) -> Result<FederationSession, BuildError> {
  session_with(root, options, true)
}

fn session_with(
  root: &Path,
  options: &str,
  css_code_split: bool,
) -> Result<FederationSession, BuildError> {
  let host_options = HostOptions {
    cwd: Some(root.to_path_buf()),
    assets_dir: Some("assets".to_string()),
    css_code_split: Some(css_code_split),
  };
  FederationSession::new(FederationOptions::from_json(options).unwrap(), host_options)
}

fn source_path(root: &Path, path: &str) -> String {
  root.join(path).to_string_lossy().replace('\\', "/")
}

fn chunk(name: &str, filename: &str, facade: Option<&str>) -> OutputChunk {
  OutputChunk {
    name: name.into(),
    filename: filename.into(),
    facade_module_id: facade.map(ModuleId::from),
    is_entry: true,
    ..Default::default()
  }
}

fn css(filename: &str) -> OutputAsset {
  OutputAsset { filename: filename.into(), name: None, source: ".a{}".to_string() }
}

/// The chunk the host renders for a virtual module, code left as `load` returned it.
fn runtime_chunk(session: &FederationSession, id: &str, filename: &str) -> OutputChunk {
  OutputChunk { code: session.load(id).unwrap(), ..chunk("", filename, Some(id)) }
}

fn code<'a>(bundle: &'a OutputBundle, filename: &str) -> &'a str {
  &bundle.chunk(filename).unwrap().code
}

fn assert_finalized(code: &str) {
  assert!(!code.contains("__v__css__"), "{code}");
  assert!(!code.contains("${__federation_"), "{code}");
  assert!(EcmaCompiler::parse_module(code).is_ok(), "{code}");
}

fn fixture() -> TempDir {
  let root = tempfile::tempdir().unwrap();
  write(root.path(), "src/Button.js", "import './button.css'; export default {};");
  write(root.path(), "src/Card.js", "import './card.css'; export default {};");
  install(root.path(), "react", "18.2.0");
  install(root.path(), "lodash", "4.17.21");
  root
}

#[test]
fn exposes_button_and_shares_react() {
  let root = fixture();
  let mut session = session(
    root.path(),
    r#"{
      "name": "remote_app",
      "filename": "remoteEntry.js",
      "exposes": { "./Button": "./src/Button.js" },
      "shared": ["react"]
    }"#,
  )
  .unwrap();

  let mut input_options =
    InputOptions { external: vec!["react".to_string(), "lodash".to_string()] };
  session.options(&mut input_options);
  assert_eq!(input_options.external, ["lodash"]);

  let emitted = session.build_start().unwrap();
  let button_path = source_path(root.path(), "src/Button.js");
  assert_eq!(emitted.len(), 4);
  assert_eq!(emitted[0].id, "__remoteEntryHelper__");
  assert_eq!(emitted[0].filename.as_deref(), Some("assets/remoteEntry.js"));
  assert_eq!(emitted[0].preserve_signature, PreserveSignature::Strict);
  assert_eq!(emitted[1].id, button_path.as_str());
  assert_eq!(emitted[1].name.as_deref(), Some("__federation_expose_Button"));
  assert_eq!(emitted[2].id, "__federation_fn_import");
  assert_eq!(emitted[2].filename.as_deref(), Some("assets/__federation_fn_import.js"));
  assert_eq!(emitted[3].name.as_deref(), Some("__federation_shared_react"));
  assert!(emitted[3].id.ends_with("index.js"));

  let react = &session.shared()[0];
  assert_eq!(react.version.as_deref(), Some("18.2.0"));
  let react_id = react.id.clone().unwrap();

  assert_eq!(session.resolve_id("__remoteEntryHelper__").as_deref(), Some(REMOTE_ENTRY_HELPER_ID));
  assert_eq!(session.resolve_id("__federation_fn_import").as_deref(), Some(SHARED_RUNTIME_ID));
  assert_eq!(session.resolve_id("./src/main.js"), None);

  session.module_parsed(&react_id, &[ModuleId::from("/virtual/react/cjs.js")]);
  let mut output_options = OutputOptions::default();
  session.output_options(&mut output_options);
  assert!(!output_options.hoist_transitive_imports);
  let manual_chunks = output_options.manual_chunks.unwrap();
  assert!(matches!(manual_chunks, ManualChunks::Fn(_)));
  assert_eq!(manual_chunks.chunk_for(&react_id).as_deref(), Some("__federation_shared_react"));
  assert_eq!(
    manual_chunks.chunk_for("/virtual/react/cjs.js").as_deref(),
    Some("__federation_shared_react")
  );
  assert_eq!(manual_chunks.chunk_for(&button_path), None);

  let mut bundle = OutputBundle::default();
  bundle.add(runtime_chunk(&session, REMOTE_ENTRY_HELPER_ID, "assets/remoteEntry.js"));
  bundle.add(runtime_chunk(&session, SHARED_RUNTIME_ID, "assets/__federation_fn_import.js"));
  bundle.add(OutputChunk {
    imported_css: ["assets/Button.4b1c.css".into()].into_iter().collect(),
    ..chunk("__federation_expose_Button", "assets/__federation_expose_Button.7d2e.js", Some(&button_path))
  });
  bundle.add(chunk(
    "__federation_shared_react",
    "assets/__federation_shared_react.js",
    Some(&react_id),
  ));
  bundle.add(css("assets/Button.4b1c.css"));

  let warnings = session.generate_bundle(&mut bundle);
  assert!(warnings.is_empty(), "{warnings:?}");

  let remote_entry = code(&bundle, "assets/remoteEntry.js");
  assert_finalized(remote_entry);
  assert!(remote_entry.contains(r#"dynamicLoadingCss(["Button.4b1c.css"]);"#));
  assert!(remote_entry.contains(r#"__federation_import("./__federation_expose_Button.7d2e.js")"#));

  let shared_runtime = code(&bundle, "assets/__federation_fn_import.js");
  assert_finalized(shared_runtime);
  assert!(shared_runtime.contains(r#""react": () => import("./__federation_shared_react.js"),"#));
  assert!(shared_runtime.contains(r#""react":{"18.2.0":{"scope":"default","version":"18.2.0""#));
  assert_eq!(bundle.len(), 5);
}

#[test]
fn pure_remote_drops_ungenerated_shared_chunk() {
  let root = fixture();
  let options = r#"{
    "exposes": { "./Button": "./src/Button.js" },
    "shared": { "lodash": { "generate": false }, "react": {} }
  }"#;
  let mut session = session(root.path(), options).unwrap();
  assert!(session.role().is_pure_remote());
  let emitted = session.build_start().unwrap();
  assert!(emitted.iter().any(|chunk| chunk.name.as_deref() == Some("__federation_shared_lodash")));

  let mut bundle = OutputBundle::default();
  bundle.add(runtime_chunk(&session, SHARED_RUNTIME_ID, "assets/__federation_fn_import.js"));
  bundle.add(chunk("__federation_shared_lodash", "assets/__federation_shared_lodash.js", None));
  bundle.add(chunk("__federation_shared_react", "assets/__federation_shared_react.js", None));

  let warnings = session.generate_bundle(&mut bundle);
  assert!(warnings.is_empty(), "{warnings:?}");
  assert!(bundle.get("assets/__federation_shared_lodash.js").is_none());
  assert!(bundle.get("assets/__federation_shared_react.js").is_some());
  // The runtime still knows where the host copy would have been.
  assert!(code(&bundle, "assets/__federation_fn_import.js")
    .contains(r#""lodash": () => import("./__federation_shared_lodash.js"),"#));
}

#[test]
fn remote_that_is_also_a_host_keeps_ungenerated_shared_chunk() {
  let root = fixture();
  let options = r#"{
    "exposes": { "./Button": "./src/Button.js" },
    "remotes": { "other": "http://localhost:5002/assets/remoteEntry.js" },
    "shared": { "lodash": { "generate": false } }
  }"#;
  let mut session = session(root.path(), options).unwrap();
  session.build_start().unwrap();

  let mut bundle = OutputBundle::default();
  bundle.add(chunk("__federation_shared_lodash", "assets/__federation_shared_lodash.js", None));
  session.generate_bundle(&mut bundle);
  assert_eq!(bundle.len(), 1);
}

#[test]
fn expands_monorepo_roots() {
  let root = fixture();
  write(
    root.path(),
    "node_modules/@org/ui/button/package.json",
    r#"{ "name": "@org/ui-button", "version": "1.2.0", "main": "index.js" }"#,
  );
  write(root.path(), "node_modules/@org/ui/button/index.js", "export default 1;");
  write(root.path(), "node_modules/@org/ui/icons/index.js", "export default 2;");
  write(root.path(), "node_modules/@org/ui/docs/README.md", "# docs");

  let mut session = session(
    root.path(),
    r#"{
      "exposes": { "./Button": "./src/Button.js" },
      "shared": { "@org/ui": { "shareScope": "ui", "singleton": true } }
    }"#,
  )
  .unwrap();
  let emitted = session.build_start().unwrap();

  let shared = session.shared();
  assert_eq!(shared.len(), 3);
  assert!(shared[0].is_removed());
  assert_eq!(shared[1].name, "@org/ui/button");
  assert_eq!(shared[1].version.as_deref(), Some("1.2.0"));
  assert_eq!(shared[1].root.as_deref(), Some("@org/ui"));
  assert_eq!(shared[1].scope, "ui");
  assert!(shared[1].singleton);
  assert_eq!(shared[2].name, "@org/ui/icons");
  assert_eq!(shared[2].version.as_deref(), Some("0.0.0"));

  let shared_chunks = emitted
    .iter()
    .filter_map(|chunk| chunk.name.as_deref())
    .filter(|name| name.starts_with("__federation_shared_"))
    .collect::<Vec<_>>();
  assert_eq!(shared_chunks, ["__federation_shared_@orgUiButton", "__federation_shared_@orgUiIcons"]);

  let runtime = session.load(SHARED_RUNTIME_ID).unwrap();
  assert!(runtime.contains(r#"{"ui":{"@org/ui/button":{"1.2.0""#));
  assert!(!runtime.contains(r#""@org/ui":"#));
}

#[test]
fn monorepo_entries_never_take_the_project_version() {
  let root = fixture();
  write(root.path(), "package.json", r#"{ "name": "app", "version": "9.9.9" }"#);
  write(root.path(), "node_modules/@org/ui/icons/index.js", "export default 2;");

  let mut session = session(
    root.path(),
    r#"{
      "exposes": { "./Button": "./src/Button.js" },
      "shared": ["@org/ui"]
    }"#,
  )
  .unwrap();
  session.build_start().unwrap();

  let shared = session.shared();
  assert_eq!(shared.len(), 2);
  assert_eq!(shared[1].name, "@org/ui/icons");
  assert_eq!(shared[1].version.as_deref(), Some("0.0.0"));
}

#[test]
fn unresolvable_shared_dependency_is_fatal() {
  let root = fixture();
  let mut session = session(
    root.path(),
    r#"{ "exposes": { "./Button": "./src/Button.js" }, "shared": ["missing-package"] }"#,
  )
  .unwrap();
  let err = session.build_start().err().unwrap();
  match err.find::<FederationError>() {
    Some(FederationError::UnresolvableShared { name, install_dir, .. }) => {
      assert_eq!(name, "missing-package");
      assert!(install_dir.ends_with(PathBuf::from("node_modules").join("missing-package")));
    }
    other => panic!("unexpected error {other:?}"),
  }
}

#[test]
fn missing_version_is_fatal() {
  let root = fixture();
  write(root.path(), "node_modules/versionless/package.json", r#"{ "name": "versionless" }"#);
  write(root.path(), "node_modules/versionless/index.js", "export default 1;");
  let mut session = session(root.path(), r#"{ "shared": ["versionless"] }"#).unwrap();
  let err = session.build_start().err().unwrap();
  assert!(matches!(
    err.find::<FederationError>(),
    Some(FederationError::MissingVersion { name }) if name == "versionless"
  ));
}

#[test]
fn explicit_version_skips_manifest_lookup() {
  let root = fixture();
  let mut session =
    session(root.path(), r#"{ "shared": { "not-installed": { "version": "1.0.0" } } }"#).unwrap();
  session.build_start().unwrap();
  let dep = &session.shared()[0];
  assert!(dep.is_resolved());
  assert_eq!(dep.version.as_deref(), Some("1.0.0"));
  assert!(dep.id.is_none());
}

#[test]
fn colliding_exposes_are_rejected() {
  let root = fixture();
  let err = session(
    root.path(),
    r#"{ "exposes": { "./a-b": "./src/Button.js", "./a/-b": "./src/Card.js" } }"#,
  )
  .err()
  .unwrap();
  assert!(matches!(err.find::<FederationError>(), Some(FederationError::ExposeKeyCollision { .. })));
}

#[test]
fn css_of_every_module_is_identical_without_code_split() {
  let root = fixture();
  let mut session = session_with(
    root.path(),
    r#"{ "exposes": { "./Button": "./src/Button.js", "./Card": "./src/Card.js" } }"#,
    false,
  )
  .unwrap();
  session.build_start().unwrap();

  let mut bundle = OutputBundle::default();
  bundle.add(runtime_chunk(&session, REMOTE_ENTRY_HELPER_ID, "assets/remoteEntry.js"));
  bundle.add(chunk(
    "__federation_expose_Button",
    "assets/__federation_expose_Button.js",
    Some(&source_path(root.path(), "src/Button.js")),
  ));
  bundle.add(chunk(
    "__federation_expose_Card",
    "assets/__federation_expose_Card.js",
    Some(&source_path(root.path(), "src/Card.js")),
  ));
  bundle.add(css("assets/style.8a9b.css"));

  let warnings = session.generate_bundle(&mut bundle);
  assert!(warnings.is_empty(), "{warnings:?}");
  let remote_entry = code(&bundle, "assets/remoteEntry.js");
  assert_finalized(remote_entry);
  assert_eq!(remote_entry.matches(r#"dynamicLoadingCss(["style.8a9b.css"]);"#).count(), 2);
}

#[test]
fn css_is_collected_transitively_and_deduplicated() {
  let root = fixture();
  let mut session = session(
    root.path(),
    r#"{ "exposes": { "./Button": "./src/Button.js", "./Card": "./src/Card.js" } }"#,
  )
  .unwrap();
  session.build_start().unwrap();

  let mut bundle = OutputBundle::default();
  bundle.add(runtime_chunk(&session, REMOTE_ENTRY_HELPER_ID, "assets/remoteEntry.js"));
  bundle.add(OutputChunk {
    imports: vec!["assets/common.js".into()],
    imported_css: ["assets/Button.11aa.css".into()].into_iter().collect(),
    ..chunk(
      "__federation_expose_Button",
      "assets/__federation_expose_Button.js",
      Some(&source_path(root.path(), "src/Button.js")),
    )
  });
  bundle.add(OutputChunk {
    imports: vec!["assets/common.js".into()],
    ..chunk(
      "__federation_expose_Card",
      "assets/__federation_expose_Card.js",
      Some(&source_path(root.path(), "src/Card.js")),
    )
  });
  bundle.add(OutputChunk {
    imports: vec!["assets/__federation_expose_Button.js".into()],
    imported_css: ["assets/common.22bb.css".into(), "assets/Button.11aa.css".into()]
      .into_iter()
      .collect(),
    ..chunk("common", "assets/common.js", None)
  });
  bundle.add(css("assets/Button.11aa.css"));
  bundle.add(css("assets/common.22bb.css"));

  let warnings = session.generate_bundle(&mut bundle);
  assert!(warnings.is_empty(), "{warnings:?}");
  let remote_entry = code(&bundle, "assets/remoteEntry.js");
  assert_finalized(remote_entry);
  assert!(remote_entry.contains(r#"dynamicLoadingCss(["Button.11aa.css","common.22bb.css"]);"#));
  assert!(remote_entry.contains(r#"dynamicLoadingCss(["common.22bb.css","Button.11aa.css"]);"#));
}

#[test]
fn unresolved_placeholders_are_reported_and_eliminated() {
  let root = fixture();
  let mut session = session(
    root.path(),
    r#"{ "exposes": { "./Button": "./src/Button.js", "./Card": "./src/Card.js" } }"#,
  )
  .unwrap();
  session.build_start().unwrap();

  let mut bundle = OutputBundle::default();
  bundle.add(runtime_chunk(&session, REMOTE_ENTRY_HELPER_ID, "assets/remoteEntry.js"));
  bundle.add(chunk(
    "__federation_expose_Button",
    "assets/__federation_expose_Button.js",
    Some(&source_path(root.path(), "src/Button.js")),
  ));

  let warnings = session.generate_bundle(&mut bundle);
  assert_eq!(warnings.len(), 2, "{warnings:?}");
  assert!(matches!(&warnings[0], FederationWarning::UnresolvedCss { path, .. } if path.ends_with("src/Card.js")));
  assert!(matches!(&warnings[1], FederationWarning::UnresolvedJs { key, .. } if key == "__federation_expose_Card"));

  let remote_entry = code(&bundle, "assets/remoteEntry.js");
  assert!(!remote_entry.contains("__v__css__"));
  assert!(remote_entry.contains("dynamicLoadingCss([]);"));
  assert!(EcmaCompiler::parse_module(remote_entry).is_ok());
}

#[test]
fn unparsable_chunks_fall_back_to_textual_substitution() {
  let root = fixture();
  let mut session =
    session(root.path(), r#"{ "exposes": { "./Card": "./src/Card.js" } }"#).unwrap();
  session.build_start().unwrap();

  let mut remote_entry = runtime_chunk(&session, REMOTE_ENTRY_HELPER_ID, "assets/remoteEntry.js");
  remote_entry.code.push_str("\nconst = ;");
  let mut bundle = OutputBundle::default();
  bundle.add(remote_entry);

  let warnings = session.generate_bundle(&mut bundle);
  assert!(matches!(warnings.first(), Some(FederationWarning::SyntaxFallback { .. })));
  assert!(warnings.iter().any(|warning| matches!(warning, FederationWarning::UnresolvedCss { .. })));
  let remote_entry = code(&bundle, "assets/remoteEntry.js");
  assert!(!remote_entry.contains("__v__css__"));
  assert!(remote_entry.contains("dynamicLoadingCss([]);"));
}

#[test]
fn bundles_without_runtime_chunks_are_left_alone() {
  let root = fixture();
  let mut session = session(root.path(), r#"{ "remotes": { "remote_app": "http://x/remoteEntry.js" } }"#).unwrap();
  assert!(session.build_start().unwrap().is_empty());
  let mut bundle = OutputBundle::default();
  bundle.add(OutputChunk { code: "console.log(1);".to_string(), ..chunk("index", "index.js", None) });
  assert!(session.generate_bundle(&mut bundle).is_empty());
  assert_eq!(code(&bundle, "index.js"), "console.log(1);");
}
