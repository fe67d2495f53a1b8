// An wrapper around the `oxc_resolver` crate to provide a more federation-specific API.

mod resolver;

pub use crate::resolver::{ResolveReturn, Resolver, package_name_of};

pub use oxc_resolver::ResolveError;
