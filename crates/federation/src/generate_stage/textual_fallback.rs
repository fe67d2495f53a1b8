use std::sync::LazyLock;

use arcstr::ArcStr;
use regex::{Captures, Regex};

use federation_error::FederationWarning;
use federation_utils::ecmascript::{to_string_array_literal, to_string_literal};

use super::PlaceholderResolver;

static CSS_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#""__v__css__([^"]*)"|'__v__css__([^']*)'"#)
    .expect("Stylesheet placeholder pattern should be valid")
});

static JS_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r#""\$\{(__federation_(?:expose|shared)_[^"}]*)\}"|'\$\{(__federation_(?:expose|shared)_[^'}]*)\}'"#,
  )
  .expect("Chunk placeholder pattern should be valid")
});

/// The first group that matched, the patterns carry one group per quote style.
fn captured<'h>(captures: &Captures<'h>) -> &'h str {
  captures.get(1).or_else(|| captures.get(2)).map_or("", |matched| matched.as_str())
}

impl PlaceholderResolver<'_> {
  /// Substitution for chunks that failed to parse. Unresolved stylesheet placeholders become `[]`
  /// so their loader calls are inert.
  pub fn substitute_textually(
    &self,
    code: &str,
    owner: &str,
    warnings: &mut Vec<FederationWarning>,
  ) -> String {
    let code = CSS_PLACEHOLDER.replace_all(code, |captures: &Captures| {
      let path = captured(captures);
      match self.resolve_css(path) {
        Some(css) => to_string_array_literal(css.iter().map(ArcStr::as_str)),
        None => {
          warnings.push(FederationWarning::UnresolvedCss {
            chunk: owner.to_string(),
            path: path.to_string(),
          });
          "[]".to_string()
        }
      }
    });

    JS_PLACEHOLDER
      .replace_all(&code, |captures: &Captures| {
        let key = captured(captures);
        match self.resolve_js(key, owner) {
          Some(path) => to_string_literal(&path),
          None => {
            warnings.push(FederationWarning::UnresolvedJs {
              chunk: owner.to_string(),
              key: key.to_string(),
            });
            captures[0].to_string()
          }
        }
      })
      .into_owned()
  }
}

#[test]
fn neutralizes_unresolved_css() {
  use federation_common::{OutputBundle, OutputChunk};

  use super::resolve_css_placeholders::CssLookup;

  let mut bundle = OutputBundle::default();
  bundle.add(OutputChunk {
    name: "__federation_expose_Button".into(),
    filename: "assets/Button.js".into(),
    facade_module_id: Some("/app/src/Button.vue".into()),
    ..Default::default()
  });
  let css_lookup = CssLookup::new(&bundle);
  let resolver =
    PlaceholderResolver { bundle: &bundle, css_lookup: &css_lookup, css_code_split: true };

  let mut warnings = vec![];
  let code = resolver.substitute_textually(
    "d('__v__css__/app/src/Button.vue'); d(\"__v__css__/app/src/Gone.vue\"); i('${__federation_expose_Button}'); i('${__federation_expose_Gone}'); const = ;",
    "assets/remoteEntry.js",
    &mut warnings,
  );

  assert_eq!(
    code,
    "d([]); d([]); i(\"./Button.js\"); i('${__federation_expose_Gone}'); const = ;"
  );
  assert_eq!(warnings.len(), 2);
  assert!(matches!(
    &warnings[0],
    FederationWarning::UnresolvedCss { path, .. } if path == "/app/src/Gone.vue"
  ));
  assert!(matches!(
    &warnings[1],
    FederationWarning::UnresolvedJs { key, .. } if key == "__federation_expose_Gone"
  ));
}
