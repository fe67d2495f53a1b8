use oxc::ast::ast;

pub trait ExpressionExt<'ast> {
  fn as_call_expression(&self) -> Option<&ast::CallExpression<'ast>>;
}

impl<'ast> ExpressionExt<'ast> for ast::Expression<'ast> {
  fn as_call_expression(&self) -> Option<&ast::CallExpression<'ast>> {
    match self {
      ast::Expression::CallExpression(expr) => Some(expr),
      // `(0, fn)(...)` and `(fn("..."))` are common in minified output
      ast::Expression::ParenthesizedExpression(paren) => paren.expression.as_call_expression(),
      _ => None,
    }
  }
}
