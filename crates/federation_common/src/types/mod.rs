pub mod emitted_chunk;
pub mod exposed_module;
pub mod federation_role;
pub mod input_options;
pub mod module_id;
pub mod output;
pub mod output_asset;
pub mod output_bundle;
pub mod output_chunk;
pub mod output_options;
pub mod package_json;
pub mod placeholder;
pub mod remote_declaration;
pub mod share_scope;
pub mod shared_dependency;
