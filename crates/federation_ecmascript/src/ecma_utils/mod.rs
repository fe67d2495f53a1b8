mod ast_ext;

pub use ast_ext::{call_expression_ext::CallExpressionExt, expression_ext::ExpressionExt};
