/// Quotes `value` as a double-quoted JavaScript string literal.
pub fn to_string_literal(value: &str) -> String {
  serde_json::to_string(value).expect("Serializing a str should never fail")
}

/// Renders a JavaScript array literal of string literals, e.g. `["a.css","b.css"]`.
pub fn to_string_array_literal<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
  let mut ret = String::from("[");
  for (idx, value) in values.into_iter().enumerate() {
    if idx > 0 {
      ret.push(',');
    }
    ret.push_str(&to_string_literal(value));
  }
  ret.push(']');
  ret
}

#[test]
fn test_string_literals() {
  assert_eq!(to_string_literal("./Button"), "\"./Button\"");
  assert_eq!(to_string_literal("it's"), "\"it's\"");
  assert_eq!(to_string_array_literal(["a.css", "b\".css"]), r#"["a.css","b\".css"]"#);
  assert_eq!(to_string_array_literal(std::iter::empty()), "[]");
}
