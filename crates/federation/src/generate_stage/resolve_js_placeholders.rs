use std::path::Path;

use federation_utils::path_ext::PathExt;

use super::PlaceholderResolver;

impl PlaceholderResolver<'_> {
  /// Path of the chunk named `chunk_name`, relative to the directory of the chunk `owner`.
  pub fn resolve_js(&self, chunk_name: &str, owner: &str) -> Option<String> {
    let target = self.bundle.find_chunk_by_name(chunk_name)?;
    // Output file names are relative to the output directory, anchor both at the same root.
    let root = Path::new("/");
    let owner = root.join(owner);
    let owner_dir = owner.parent().unwrap_or(root);
    Some(root.join(target.filename.as_str()).relative_import_path(owner_dir))
  }
}

#[test]
fn resolves_relative_to_owner() {
  use federation_common::{OutputBundle, OutputChunk};

  use super::resolve_css_placeholders::CssLookup;

  let mut bundle = OutputBundle::default();
  bundle.add(OutputChunk {
    name: "__federation_expose_Button".into(),
    filename: "assets/__federation_expose_Button-3f2a.js".into(),
    ..Default::default()
  });
  bundle.add(OutputChunk {
    name: "__federation_shared_react".into(),
    filename: "chunks/__federation_shared_react.js".into(),
    ..Default::default()
  });
  let css_lookup = CssLookup::new(&bundle);
  let resolver =
    PlaceholderResolver { bundle: &bundle, css_lookup: &css_lookup, css_code_split: true };

  assert_eq!(
    resolver.resolve_js("__federation_expose_Button", "assets/remoteEntry.js").as_deref(),
    Some("./__federation_expose_Button-3f2a.js")
  );
  assert_eq!(
    resolver.resolve_js("__federation_shared_react", "assets/__federation_fn_import.js").as_deref(),
    Some("../chunks/__federation_shared_react.js")
  );
  assert_eq!(
    resolver.resolve_js("__federation_expose_Button", "remoteEntry.js").as_deref(),
    Some("./assets/__federation_expose_Button-3f2a.js")
  );
  assert_eq!(resolver.resolve_js("__federation_expose_Card", "remoteEntry.js"), None);
}
