use std::{borrow::Cow, path::Path};

use sugar_path::SugarPath;

pub trait PathExt {
  fn expect_to_slash(&self) -> String;

  fn hashless_file_name(&self) -> Cow<str>;

  fn relative_import_path(&self, from_dir: &Path) -> String;
}

impl PathExt for Path {
  fn expect_to_slash(&self) -> String {
    self
      .to_slash()
      .unwrap_or_else(|| panic!("Failed to convert {:?} to slash str", self.display()))
      .into_owned()
  }

  /// Strips the extension and one `.`-separated hash segment, `assets/style.3c1a9e.css` becomes
  /// `style`.
  fn hashless_file_name(&self) -> Cow<str> {
    let stem =
      self.file_stem().map_or_else(|| self.to_string_lossy(), |stem| stem.to_string_lossy());
    match Path::new(&*stem).file_stem() {
      Some(inner) if inner.len() < stem.len() => Cow::Owned(inner.to_string_lossy().into_owned()),
      _ => stem,
    }
  }

  /// Path of `self` relative to `from_dir`, with forward slashes and a leading `./` when it
  /// doesn't already start with `.`.
  fn relative_import_path(&self, from_dir: &Path) -> String {
    let relative = self.relative(from_dir).as_path().expect_to_slash();
    if relative.starts_with('.') { relative } else { format!("./{relative}") }
  }
}

#[test]
fn test_hashless_file_name() {
  assert_eq!(Path::new("assets/style.3c1a9e.css").hashless_file_name(), "style");
  assert_eq!(Path::new("assets/Button-4f3a.css").hashless_file_name(), "Button-4f3a");
  assert_eq!(Path::new("style.css").hashless_file_name(), "style");
}

#[test]
fn test_relative_import_path() {
  let dir = Path::new("/dist/assets");
  assert_eq!(Path::new("/dist/assets/Button.js").relative_import_path(dir), "./Button.js");
  assert_eq!(Path::new("/dist/chunks/Button.js").relative_import_path(dir), "../chunks/Button.js");
  assert_eq!(Path::new("/dist/assets/a/b.js").relative_import_path(dir), "./a/b.js");
}
