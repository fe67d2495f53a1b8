use oxc::{ast::ast, ast_visit::Visit};

use federation_common::Placeholder;

#[derive(Default)]
pub struct PlaceholderCollector {
  placeholders: Vec<Placeholder>,
}

impl PlaceholderCollector {
  pub fn collect(program: &ast::Program) -> Vec<Placeholder> {
    let mut collector = Self::default();
    collector.visit_program(program);
    collector.placeholders
  }
}

impl<'ast> Visit<'ast> for PlaceholderCollector {
  fn visit_string_literal(&mut self, it: &ast::StringLiteral<'ast>) {
    if let Some(placeholder) = Placeholder::from_literal(it.value.as_str(), it.span) {
      self.placeholders.push(placeholder);
    }
  }
}

#[test]
fn collects_placeholders_in_source_order() {
  use federation_common::PlaceholderKind;
  use federation_ecmascript::EcmaCompiler;

  let ast = EcmaCompiler::parse_module(
    r#"const moduleMap = {
  "./Button": () => {
    dynamicLoadingCss("__v__css__/app/src/Button.vue");
    return __federation_import("${__federation_expose_Button}");
  },
};
const other = "${notAPlaceholder}";"#,
  )
  .unwrap();
  let placeholders = PlaceholderCollector::collect(ast.program());

  assert_eq!(placeholders.len(), 2);
  assert_eq!(placeholders[0].kind, PlaceholderKind::Css);
  assert_eq!(placeholders[0].key, "/app/src/Button.vue");
  assert_eq!(placeholders[1].kind, PlaceholderKind::Js);
  assert_eq!(placeholders[1].key, "__federation_expose_Button");

  let span = placeholders[1].span;
  assert_eq!(
    &ast.source()[span.start as usize..span.end as usize],
    r#""${__federation_expose_Button}""#
  );
}
