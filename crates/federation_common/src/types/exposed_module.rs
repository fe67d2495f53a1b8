use arcstr::ArcStr;

use crate::{DYNAMIC_LOADING_CSS_PREFIX, Placeholder};

#[derive(Debug, Clone)]
pub struct ExposedModule {
  /// Public id, e.g. `./Button`.
  pub logical_name: ArcStr,
  /// Absolute, forward-slashed path of the module that gets exposed.
  pub source_path: ArcStr,
  /// `__federation_expose_<sanitized logical name>`. Also the name of the exposed module's chunk.
  pub export_key: ArcStr,
}

impl ExposedModule {
  /// String content of the stylesheet placeholder for this module.
  pub fn css_placeholder(&self) -> String {
    format!("{DYNAMIC_LOADING_CSS_PREFIX}{}", self.source_path)
  }

  pub fn js_placeholder(&self) -> String {
    Placeholder::js_text(&self.export_key)
  }
}
