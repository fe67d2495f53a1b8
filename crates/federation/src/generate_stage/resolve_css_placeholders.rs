use std::path::Path;

use arcstr::ArcStr;
use rustc_hash::{FxHashMap, FxHashSet};

use federation_common::{OutputBundle, OutputChunk};
use federation_utils::{indexmap::FxIndexSet, path_ext::PathExt};

use super::PlaceholderResolver;

/// Stylesheets of the bundle, looked up by exact file name first and by file name without
/// directory, extension and hash otherwise.
pub struct CssLookup {
  by_filename: FxHashSet<ArcStr>,
  by_name: FxHashMap<String, ArcStr>,
  all: Vec<ArcStr>,
}

impl CssLookup {
  pub fn new(bundle: &OutputBundle) -> Self {
    let mut by_filename = FxHashSet::default();
    let mut by_name = FxHashMap::default();
    let mut all = vec![];
    for filename in bundle.css_filenames() {
      let hashless = Path::new(filename.as_str()).hashless_file_name().into_owned();
      by_name.insert(hashless, filename.clone());
      by_filename.insert(filename.clone());
      all.push(filename.clone());
    }
    Self { by_filename, by_name, all }
  }

  fn get(&self, css_filename: &str) -> Option<&ArcStr> {
    // Same-stem stylesheets share a hashless name, only the exact file name tells them apart.
    self
      .by_filename
      .get(css_filename)
      .or_else(|| self.by_name.get(&*Path::new(css_filename).hashless_file_name()))
  }
}

fn basename(filename: &str) -> ArcStr {
  Path::new(filename)
    .file_name()
    .map_or_else(|| ArcStr::from(filename), |name| ArcStr::from(&*name.to_string_lossy()))
}

impl<'a> PlaceholderResolver<'a> {
  /// Base names of the stylesheets the module at `source_path` needs. `None` when no chunk was
  /// generated for it.
  pub fn resolve_css(&self, source_path: &str) -> Option<Vec<ArcStr>> {
    if !self.css_code_split {
      // Every stylesheet of the build ends up in the same few files.
      return Some(
        self
          .css_lookup
          .all
          .iter()
          .map(|filename| basename(filename))
          .collect::<FxIndexSet<_>>()
          .into_iter()
          .collect(),
      );
    }

    if source_path.is_empty() {
      return None;
    }
    let chunk = self.bundle.find_chunk_by_facade(source_path)?;
    let mut visited = FxHashSet::default();
    let mut css = FxIndexSet::default();
    self.collect_css(chunk, &mut visited, &mut css);
    Some(css.into_iter().collect())
  }

  /// Own stylesheets first, then the ones of statically imported chunks, depth first.
  fn collect_css(
    &self,
    chunk: &'a OutputChunk,
    visited: &mut FxHashSet<&'a str>,
    css: &mut FxIndexSet<ArcStr>,
  ) {
    if !visited.insert(chunk.filename.as_str()) {
      return;
    }
    for imported_css in &chunk.imported_css {
      if let Some(filename) = self.css_lookup.get(imported_css) {
        css.insert(basename(filename));
      }
    }
    for import in &chunk.imports {
      if let Some(imported) = self.bundle.chunk(import) {
        self.collect_css(imported, visited, css);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use federation_common::{OutputAsset, OutputChunk};

  use super::*;

  fn chunk(filename: &str, facade: Option<&str>, imports: &[&str], css: &[&str]) -> OutputChunk {
    OutputChunk {
      filename: filename.into(),
      facade_module_id: facade.map(Into::into),
      imports: imports.iter().map(|each| ArcStr::from(*each)).collect(),
      imported_css: css.iter().map(|each| ArcStr::from(*each)).collect(),
      ..Default::default()
    }
  }

  fn css(filename: &str) -> OutputAsset {
    OutputAsset { filename: filename.into(), name: None, source: String::new() }
  }

  fn bundle() -> OutputBundle {
    let mut bundle = OutputBundle::default();
    bundle.add(chunk(
      "assets/Button.1a2b.js",
      Some("/app/src/Button.vue"),
      &["assets/shared.3c4d.js"],
      &["assets/Button.1a2b.css"],
    ));
    bundle.add(chunk(
      "assets/shared.3c4d.js",
      None,
      &["assets/Button.1a2b.js", "assets/base.5e6f.js"],
      &["assets/shared.3c4d.css", "assets/Button.1a2b.css"],
    ));
    bundle.add(chunk("assets/base.5e6f.js", None, &[], &["assets/base.5e6f.css"]));
    bundle.add(chunk("assets/Plain.js", Some("/app/src/Plain.js"), &[], &[]));
    for filename in ["assets/Button.1a2b.css", "assets/shared.3c4d.css", "assets/base.5e6f.css"] {
      bundle.add(css(filename));
    }
    bundle
  }

  fn resolve(
    bundle: &OutputBundle,
    css_code_split: bool,
    source_path: &str,
  ) -> Option<Vec<ArcStr>> {
    let css_lookup = CssLookup::new(bundle);
    PlaceholderResolver { bundle, css_lookup: &css_lookup, css_code_split }.resolve_css(source_path)
  }

  #[test]
  fn collects_transitive_css_once() {
    let bundle = bundle();
    assert_eq!(
      resolve(&bundle, true, "/app/src/Button.vue").unwrap(),
      ["Button.1a2b.css", "shared.3c4d.css", "base.5e6f.css"]
    );
    assert_eq!(resolve(&bundle, true, "/app/src/Plain.js").unwrap(), Vec::<ArcStr>::new());
    assert_eq!(resolve(&bundle, true, "/app/src/Missing.vue"), None);
  }

  #[test]
  fn without_css_code_split_every_module_gets_all_css() {
    let bundle = bundle();
    let button = resolve(&bundle, false, "/app/src/Button.vue").unwrap();
    assert_eq!(button, ["Button.1a2b.css", "shared.3c4d.css", "base.5e6f.css"]);
    assert_eq!(resolve(&bundle, false, "/app/src/Missing.vue").unwrap(), button);
    assert_eq!(resolve(&OutputBundle::default(), false, "/app/src/Button.vue").unwrap().len(), 0);
  }

  #[test]
  fn same_stem_stylesheets_stay_with_their_chunk() {
    let mut bundle = OutputBundle::default();
    bundle.add(chunk(
      "assets/Button.aaaa.js",
      Some("/app/src/admin/Button.vue"),
      &[],
      &["assets/Button.aaaa.css"],
    ));
    bundle.add(chunk(
      "assets/Button.bbbb.js",
      Some("/app/src/shop/Button.vue"),
      &[],
      &["assets/Button.bbbb.css"],
    ));
    bundle.add(css("assets/Button.aaaa.css"));
    bundle.add(css("assets/Button.bbbb.css"));

    assert_eq!(resolve(&bundle, true, "/app/src/admin/Button.vue").unwrap(), ["Button.aaaa.css"]);
    assert_eq!(resolve(&bundle, true, "/app/src/shop/Button.vue").unwrap(), ["Button.bbbb.css"]);
  }

  #[test]
  fn renamed_stylesheet_is_found_by_hashless_name() {
    let mut bundle = OutputBundle::default();
    bundle.add(chunk("assets/Card.js", Some("/app/src/Card.vue"), &[], &["assets/Card.old1.css"]));
    bundle.add(css("assets/Card.new2.css"));

    assert_eq!(resolve(&bundle, true, "/app/src/Card.vue").unwrap(), ["Card.new2.css"]);
  }
}
