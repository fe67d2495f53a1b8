pub const REMOTE_ENTRY_HELPER: &str = "__remoteEntryHelper__";
pub const REMOTE_ENTRY_HELPER_ID: &str = "\0virtual:__remoteEntryHelper__";

pub const SHARED_RUNTIME: &str = "__federation_fn_import";
pub const SHARED_RUNTIME_ID: &str = "\0virtual:__federation_fn_import";

pub const DEFAULT_ENTRY_FILENAME: &str = "remoteEntry.js";
pub const DEFAULT_SHARE_SCOPE: &str = "default";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Name of the stylesheet loader exported by the remote entry.
pub const DYNAMIC_LOADING_CSS: &str = "dynamicLoadingCss";
/// Sentinel prefix of stylesheet placeholders, followed by the exposed module's source path.
pub const DYNAMIC_LOADING_CSS_PREFIX: &str = "__v__css__";

pub const EXPOSE_CHUNK_PREFIX: &str = "__federation_expose_";
pub const SHARED_CHUNK_PREFIX: &str = "__federation_shared_";

/// Export names that only ever appear on ESM/CJS interop wrappers.
pub const INTEROP_EXPORT_MARKERS: [&str; 4] = ["Module", "__esModule", "default", "_export_sfc"];
