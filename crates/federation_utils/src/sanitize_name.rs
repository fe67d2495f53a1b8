#[inline]
fn is_name_char(char: char) -> bool {
  char.is_ascii_alphanumeric() || matches!(char, '@' | '_' | '-')
}

/// Drops every character outside `[0-9a-zA-Z@_-]` and upper-cases the character following a
/// dropped run, so `./my/button` becomes `MyButton`.
pub fn remove_non_reg_letter(str: &str) -> String {
  let mut sanitized = String::with_capacity(str.len());
  let mut need_upper_case = false;
  for char in str.chars() {
    if is_name_char(char) {
      if need_upper_case {
        sanitized.push(char.to_ascii_uppercase());
      } else {
        sanitized.push(char);
      }
      need_upper_case = false;
    } else {
      need_upper_case = true;
    }
  }
  sanitized
}

#[test]
fn test_remove_non_reg_letter() {
  assert_eq!(remove_non_reg_letter("./Button"), "Button");
  assert_eq!(remove_non_reg_letter("./components/button.vue"), "ComponentsButtonVue");
  assert_eq!(remove_non_reg_letter("@vue/shared"), "@vueShared");
  assert_eq!(remove_non_reg_letter("react-dom"), "react-dom");
  assert_eq!(remove_non_reg_letter("./"), "");
}
