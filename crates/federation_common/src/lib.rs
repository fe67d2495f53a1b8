mod constants;
mod federation_options;
mod types;

pub use crate::{
  constants::*,
  federation_options::{
    FederationOptions, HostOptions,
    builder_info::BuilderInfo,
    expose_options::{ExposeItemOptions, ExposeOptions},
    normalized_federation_options::NormalizedFederationOptions,
    remote_options::{ExternalType, RemoteFormat, RemoteFrom, RemoteItemOptions, RemoteOptions},
    shared_options::{SharedItemOptions, SharedOptions},
  },
  types::{
    emitted_chunk::{EmittedChunk, PreserveSignature},
    exposed_module::ExposedModule,
    federation_role::FederationRole,
    input_options::InputOptions,
    module_id::ModuleId,
    output::Output,
    output_asset::OutputAsset,
    output_bundle::OutputBundle,
    output_chunk::OutputChunk,
    output_options::{ManualChunks, ManualChunksFn, OutputOptions},
    package_json::PackageJson,
    placeholder::{Placeholder, PlaceholderKind},
    remote_declaration::RemoteDeclaration,
    share_scope::{ShareScope, SharedVersionTable, VersionDescriptor},
    shared_dependency::{ResolutionState, SharedDependency},
  },
};
