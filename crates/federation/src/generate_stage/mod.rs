mod collect_placeholders;
mod eliminate_dead_loaders;
mod resolve_css_placeholders;
mod resolve_js_placeholders;
mod textual_fallback;

use arcstr::ArcStr;
use oxc::ast_visit::Visit;
use rustc_hash::FxHashSet;
use string_wizard::MagicString;

use federation_common::{
  NormalizedFederationOptions, Output, OutputBundle, PlaceholderKind, REMOTE_ENTRY_HELPER_ID,
  SHARED_RUNTIME_ID,
};
use federation_ecmascript::{EcmaAst, EcmaCompiler};
use federation_error::FederationWarning;
use federation_utils::ecmascript::{to_string_array_literal, to_string_literal};

use self::{
  collect_placeholders::PlaceholderCollector, eliminate_dead_loaders::DeadLoaderEliminator,
  resolve_css_placeholders::CssLookup,
};

/// Rewrites the placeholders of the generated runtime chunks into output paths once the host has
/// finalized its bundle.
pub struct GenerateStage<'a> {
  options: &'a NormalizedFederationOptions,
  bundle: &'a mut OutputBundle,
  warnings: Vec<FederationWarning>,
}

impl<'a> GenerateStage<'a> {
  pub fn new(options: &'a NormalizedFederationOptions, bundle: &'a mut OutputBundle) -> Self {
    Self { options, bundle, warnings: vec![] }
  }

  pub fn generate(mut self) -> Vec<FederationWarning> {
    let css_lookup = CssLookup::new(self.bundle);

    for facade_module_id in [REMOTE_ENTRY_HELPER_ID, SHARED_RUNTIME_ID] {
      let Some(chunk) = self.bundle.find_chunk_by_facade(facade_module_id) else {
        continue;
      };
      let filename = chunk.filename.clone();

      let resolver = PlaceholderResolver {
        bundle: self.bundle,
        css_lookup: &css_lookup,
        css_code_split: self.options.builder.css_code_split,
      };
      let code = match EcmaCompiler::parse_module(chunk.code.as_str()) {
        Ok(ast) => resolver.substitute(&ast, &filename, &mut self.warnings),
        Err(err) => {
          let reason = err.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
          tracing::error!(
            "Failed to parse {filename}, falling back to textual substitution: {reason}"
          );
          self.warnings.push(FederationWarning::SyntaxFallback {
            chunk: filename.to_string(),
            reason,
          });
          resolver.substitute_textually(&chunk.code, &filename, &mut self.warnings)
        }
      };

      if let Some(chunk) = self.bundle.get_mut(filename.as_str()).and_then(Output::as_chunk_mut) {
        chunk.code = code;
      }
    }

    self.warnings
  }
}

/// Read-only view of the bundle used to look placeholder targets up.
pub struct PlaceholderResolver<'a> {
  bundle: &'a OutputBundle,
  css_lookup: &'a CssLookup,
  css_code_split: bool,
}

impl PlaceholderResolver<'_> {
  /// Substitutes every placeholder of `ast` and drops the stylesheet loader calls whose
  /// placeholder could not be resolved. `owner` is the file name of the chunk `ast` belongs to.
  fn substitute(
    &self,
    ast: &EcmaAst,
    owner: &ArcStr,
    warnings: &mut Vec<FederationWarning>,
  ) -> String {
    let placeholders = PlaceholderCollector::collect(ast.program());
    let mut magic_string = MagicString::new(ast.source().as_str());
    let mut dead_css = vec![];

    for placeholder in placeholders {
      let (start, end) = (placeholder.span.start as usize, placeholder.span.end as usize);
      match placeholder.kind {
        PlaceholderKind::Css => match self.resolve_css(&placeholder.key) {
          Some(css) => {
            let literal = to_string_array_literal(css.iter().map(ArcStr::as_str));
            magic_string.update(start, end, literal);
          }
          None => {
            dead_css.push((placeholder.span, warnings.len()));
            warnings.push(FederationWarning::UnresolvedCss {
              chunk: owner.to_string(),
              path: placeholder.key,
            });
          }
        },
        PlaceholderKind::Js => match self.resolve_js(&placeholder.key, owner) {
          Some(path) => {
            magic_string.update(start, end, to_string_literal(&path));
          }
          None => {
            warnings.push(FederationWarning::UnresolvedJs {
              chunk: owner.to_string(),
              key: placeholder.key,
            });
          }
        },
      }
    }

    if dead_css.is_empty() {
      return magic_string.to_string();
    }

    let dead_spans = dead_css.iter().map(|(span, _)| *span).collect::<FxHashSet<_>>();
    let mut eliminator = DeadLoaderEliminator::new(&dead_spans, &mut magic_string);
    eliminator.visit_program(ast.program());
    let eliminated = eliminator.into_eliminated();

    for (span, warning_idx) in dead_css {
      if eliminated.iter().any(|range| range.start <= span.start && span.end <= range.end) {
        continue;
      }
      // Not a loader argument, an empty list keeps the sentinel out of the output.
      magic_string.update(span.start as usize, span.end as usize, "[]");
      if let FederationWarning::UnresolvedCss { chunk, path } = &warnings[warning_idx] {
        tracing::warn!("Unresolved stylesheet placeholder for {path} left outside a loader call");
        warnings[warning_idx] =
          FederationWarning::StrayCss { chunk: chunk.clone(), path: path.clone() };
      }
    }

    magic_string.to_string()
  }
}

#[test]
fn unresolved_css_outside_loader_calls_becomes_an_empty_list() {
  let bundle = OutputBundle::default();
  let css_lookup = CssLookup::new(&bundle);
  let resolver =
    PlaceholderResolver { bundle: &bundle, css_lookup: &css_lookup, css_code_split: true };
  let ast = EcmaCompiler::parse_module(
    "dynamicLoadingCss('__v__css__/src/A.vue');\nconst styles = '__v__css__/src/B.vue';",
  )
  .unwrap();

  let mut warnings = vec![];
  let code = resolver.substitute(&ast, &ArcStr::from("remoteEntry.js"), &mut warnings);

  assert_eq!(code, "\nconst styles = [];");
  assert_eq!(warnings.len(), 2);
  assert!(matches!(
    &warnings[0],
    FederationWarning::UnresolvedCss { path, .. } if path == "/src/A.vue"
  ));
  assert!(matches!(&warnings[1], FederationWarning::StrayCss { path, .. } if path == "/src/B.vue"));
}
