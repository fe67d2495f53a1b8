use federation_common::{
  DYNAMIC_LOADING_CSS, INTEROP_EXPORT_MARKERS, NormalizedFederationOptions, Placeholder, ShareScope,
  SharedDependency,
};
use federation_utils::ecmascript::{to_string_array_literal, to_string_literal};

const REMOTE_ENTRY_TEMPLATE: &str = include_str!("./remote-entry.js");
const SHARED_RUNTIME_TEMPLATE: &str = include_str!("./shared-runtime.js");

/// Source of the `__remoteEntryHelper__` virtual module.
pub fn render_remote_entry(options: &NormalizedFederationOptions) -> String {
  let mut module_map = String::new();
  for expose in &options.exposes {
    module_map.push_str(&format!(
      "\n  {}: () => {{\n    {DYNAMIC_LOADING_CSS}({});\n    return __federation_import({}).then((module) => Object.keys(module).every((item) => exportSet.has(item)) ? () => module.default : () => module);\n  }},",
      to_string_literal(&expose.logical_name),
      to_string_literal(&expose.css_placeholder()),
      to_string_literal(&expose.js_placeholder()),
    ));
  }

  REMOTE_ENTRY_TEMPLATE
    .replace("$INTEROP_EXPORT_MARKERS", &to_string_array_literal(INTEROP_EXPORT_MARKERS))
    .replace("$ENTRY_FILENAME", &to_string_literal(&options.filename))
    .replace("$MODULE_MAP", &module_map)
}

/// Source of the `__federation_fn_import` virtual module. Removed entries are skipped.
pub fn render_shared_runtime(
  options: &NormalizedFederationOptions,
  shared: &[SharedDependency],
) -> String {
  let mut share_scope = ShareScope::default();
  let mut module_map = String::new();
  for dep in shared.iter().filter(|dep| !dep.is_removed()) {
    let version = dep.version.clone().unwrap_or_default();
    share_scope.register(&dep.name, &version, dep.version_descriptor(options.name.as_deref()));
    // `import: false` never falls back to the local copy
    if dep.import {
      module_map.push_str(&format!(
        "\n  {}: () => import({}),",
        to_string_literal(&dep.name),
        to_string_literal(&Placeholder::js_text(&dep.chunk_name())),
      ));
    }
  }

  let share_scope =
    serde_json::to_string(&share_scope).expect("Serializing the share scope should never fail");

  SHARED_RUNTIME_TEMPLATE.replace("$SHARE_SCOPE", &share_scope).replace("$MODULE_MAP", &module_map)
}

#[cfg(test)]
mod tests {
  use federation_common::{FederationOptions, HostOptions};
  use federation_ecmascript::EcmaCompiler;

  use super::*;
  use crate::utils::normalize_options::{NormalizeOptionsReturn, normalize_options};

  fn normalize(json: &str) -> NormalizeOptionsReturn {
    let host = HostOptions { cwd: Some("/app".into()), ..Default::default() };
    normalize_options(FederationOptions::from_json(json).unwrap(), host).unwrap()
  }

  #[test]
  fn remote_entry_lists_every_expose() {
    let NormalizeOptionsReturn { options, .. } =
      normalize(r#"{ "exposes": { "./Button": "./src/Button.vue", "./Card": "./src/Card.vue" } }"#);
    let source = render_remote_entry(&options);

    assert!(source.contains(r#""./Button": () => {"#));
    assert!(source.contains(r#"dynamicLoadingCss("__v__css__/app/src/Button.vue");"#));
    assert!(source.contains(r#"__federation_import("${__federation_expose_Button}")"#));
    assert!(source.contains(r#"__federation_import("${__federation_expose_Card}")"#));
    assert!(source.contains(r#"metaUrl.lastIndexOf("remoteEntry.js")"#));
    assert!(source.contains(r#"new Set(["Module","__esModule","default","_export_sfc"])"#));
    assert!(EcmaCompiler::parse_module(source).is_ok());
  }

  #[test]
  fn remote_entry_without_exposes_is_valid() {
    let NormalizeOptionsReturn { options, .. } = normalize(r#"{ "filename": "entry.js" }"#);
    let source = render_remote_entry(&options);
    assert!(source.contains(r#"lastIndexOf("entry.js")"#));
    assert!(EcmaCompiler::parse_module(source).is_ok());
  }

  #[test]
  fn shared_runtime_embeds_share_scope() {
    let NormalizeOptionsReturn { options, mut shared } = normalize(
      r#"{
        "name": "remote_app",
        "shared": {
          "react": { "singleton": true, "requiredVersion": "^18.0.0" },
          "lodash": { "import": false, "version": "4.17.21" }
        }
      }"#,
    );
    shared[0].version = Some("18.2.0".to_string());
    let source = render_shared_runtime(&options, &shared);

    assert!(source.contains(
      r#"{"default":{"react":{"18.2.0":{"scope":"default","version":"18.2.0","requiredVersion":"^18.0.0","singleton":true,"eager":false,"from":"remote_app"}}"#
    ));
    assert!(source.contains(r#""react": () => import("${__federation_shared_react}"),"#));
    assert!(!source.contains("${__federation_shared_lodash}"));
    assert!(source.contains(r#""lodash":{"4.17.21""#));
    assert!(EcmaCompiler::parse_module(source).is_ok());
  }
}
