use oxc::ast::ast;

pub trait CallExpressionExt<'ast> {
  /// The value of the first argument when it is a plain string literal.
  fn first_string_argument(&self) -> Option<&ast::StringLiteral<'ast>>;
}

impl<'ast> CallExpressionExt<'ast> for ast::CallExpression<'ast> {
  fn first_string_argument(&self) -> Option<&ast::StringLiteral<'ast>> {
    match self.arguments.first()? {
      ast::Argument::StringLiteral(lit) => Some(lit),
      _ => None,
    }
  }
}
