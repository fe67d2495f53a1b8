use arcstr::ArcStr;
use federation_utils::indexmap::FxIndexSet;

use crate::ModuleId;

#[derive(Debug, Clone, Default)]
pub struct OutputChunk {
  /// Chunk name before hashing, e.g. `__federation_expose_Button`.
  pub name: ArcStr,
  pub filename: ArcStr,
  pub facade_module_id: Option<ModuleId>,
  pub is_entry: bool,
  /// File names of statically imported chunks.
  pub imports: Vec<ArcStr>,
  /// File names of stylesheets this chunk's modules import.
  pub imported_css: FxIndexSet<ArcStr>,
  pub code: String,
}
