use oxc::span::Span;

use crate::{DYNAMIC_LOADING_CSS_PREFIX, EXPOSE_CHUNK_PREFIX, SHARED_CHUNK_PREFIX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
  /// `'__v__css__<source path>'`, replaced by the stylesheets the module needs.
  Css,
  /// `'${<chunk name>}'`, replaced by the path of the chunk with that name.
  Js,
}

/// A placeholder string literal found in an emitted chunk. Only lives between collecting and
/// substituting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
  pub kind: PlaceholderKind,
  /// Source path for `Css`, chunk name for `Js`.
  pub key: String,
  /// Span of the whole string literal, quotes included.
  pub span: Span,
}

impl Placeholder {
  pub fn js_text(chunk_name: &str) -> String {
    format!("${{{chunk_name}}}")
  }

  /// Recognizes the value of a string literal as a placeholder.
  pub fn from_literal(value: &str, span: Span) -> Option<Self> {
    if let Some(path) = value.strip_prefix(DYNAMIC_LOADING_CSS_PREFIX) {
      return Some(Self { kind: PlaceholderKind::Css, key: path.to_string(), span });
    }
    let chunk_name = value.strip_prefix("${")?.strip_suffix('}')?;
    (chunk_name.starts_with(EXPOSE_CHUNK_PREFIX) || chunk_name.starts_with(SHARED_CHUNK_PREFIX))
      .then(|| Self { kind: PlaceholderKind::Js, key: chunk_name.to_string(), span })
  }
}

#[test]
fn test_from_literal() {
  let span = Span::new(0, 10);
  let css = Placeholder::from_literal("__v__css__/app/src/Button.vue", span).unwrap();
  assert_eq!(css.kind, PlaceholderKind::Css);
  assert_eq!(css.key, "/app/src/Button.vue");

  let js = Placeholder::from_literal("${__federation_expose_Button}", span).unwrap();
  assert_eq!(js.kind, PlaceholderKind::Js);
  assert_eq!(js.key, "__federation_expose_Button");
  assert_eq!(Placeholder::js_text(&js.key), "${__federation_expose_Button}");

  assert!(Placeholder::from_literal("${somethingElse}", span).is_none());
  assert!(Placeholder::from_literal("./Button.js", span).is_none());
}
