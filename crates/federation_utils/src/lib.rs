pub mod ecmascript;
pub mod indexmap;
pub mod path_ext;
pub mod rayon;
pub mod sanitize_name;
