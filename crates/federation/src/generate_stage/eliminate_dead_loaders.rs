use oxc::{
  allocator::Vec as ArenaVec,
  ast::ast,
  ast_visit::{Visit, walk},
  span::{GetSpan, Span},
};
use rustc_hash::FxHashSet;
use string_wizard::MagicString;

use federation_ecmascript::{CallExpressionExt, ExpressionExt};

/// Removes the stylesheet loader calls whose placeholder argument is in `dead`.
///
/// - In statement lists the whole statement goes away.
/// - In a sequence the element goes away together with its comma.
/// - Anywhere else the call is replaced by `void 0`.
pub struct DeadLoaderEliminator<'me, 's> {
  dead: &'me FxHashSet<Span>,
  magic_string: &'me mut MagicString<'s>,
  eliminated: Vec<Span>,
}

impl<'me, 's> DeadLoaderEliminator<'me, 's> {
  pub fn new(dead: &'me FxHashSet<Span>, magic_string: &'me mut MagicString<'s>) -> Self {
    Self { dead, magic_string, eliminated: vec![] }
  }

  /// Source ranges that were removed or replaced.
  pub fn into_eliminated(self) -> Vec<Span> {
    self.eliminated
  }

  fn remove(&mut self, span: Span) {
    self.magic_string.remove(span.start as usize, span.end as usize);
    self.eliminated.push(span);
  }

  fn is_dead_call(&self, call: &ast::CallExpression) -> bool {
    call.first_string_argument().is_some_and(|argument| self.dead.contains(&argument.span))
  }

  fn is_dead_expression(&self, expr: &ast::Expression) -> bool {
    expr.as_call_expression().is_some_and(|call| self.is_dead_call(call))
  }

  fn is_dead_statement(&self, stmt: &ast::Statement) -> bool {
    matches!(
      stmt,
      ast::Statement::ExpressionStatement(stmt) if self.is_dead_expression(&stmt.expression)
    )
  }

  fn replace_with_void(&mut self, span: Span) {
    self.magic_string.update(span.start as usize, span.end as usize, "void 0");
    self.eliminated.push(span);
  }
}

impl<'ast> Visit<'ast> for DeadLoaderEliminator<'_, '_> {
  fn visit_statements(&mut self, it: &ArenaVec<'ast, ast::Statement<'ast>>) {
    for stmt in it {
      if self.is_dead_statement(stmt) {
        self.remove(stmt.span());
      } else {
        self.visit_statement(stmt);
      }
    }
  }

  fn visit_arrow_function_expression(&mut self, it: &ast::ArrowFunctionExpression<'ast>) {
    // `() => expr` keeps its body in a one statement list that must not become empty.
    if it.expression {
      if let Some(ast::Statement::ExpressionStatement(stmt)) = it.body.statements.first() {
        self.visit_formal_parameters(&it.params);
        self.visit_expression(&stmt.expression);
        return;
      }
    }
    walk::walk_arrow_function_expression(self, it);
  }

  fn visit_sequence_expression(&mut self, it: &ast::SequenceExpression<'ast>) {
    let dead = it.expressions.iter().map(|expr| self.is_dead_expression(expr)).collect::<Vec<_>>();
    if !dead.contains(&true) {
      walk::walk_sequence_expression(self, it);
      return;
    }
    if dead.iter().all(|is_dead| *is_dead) {
      self.replace_with_void(it.span);
      return;
    }

    let len = it.expressions.len();
    let mut idx = 0;
    while idx < len {
      if !dead[idx] {
        self.visit_expression(&it.expressions[idx]);
        idx += 1;
        continue;
      }
      let run_start = idx;
      while idx < len && dead[idx] {
        idx += 1;
      }
      // A trailing run takes the comma in front of it, any other run the comma behind it.
      let (start, end) = if idx < len {
        (it.expressions[run_start].span().start, it.expressions[idx].span().start)
      } else {
        (it.expressions[run_start - 1].span().end, it.expressions[len - 1].span().end)
      };
      self.remove(Span::new(start, end));
    }
  }

  fn visit_call_expression(&mut self, it: &ast::CallExpression<'ast>) {
    if self.is_dead_call(it) {
      self.replace_with_void(it.span);
      return;
    }
    walk::walk_call_expression(self, it);
  }
}
