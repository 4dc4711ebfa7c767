//! Route declarations, descriptors and the route registry

pub mod descriptor;
pub mod registry;
pub mod roles;

pub use descriptor::{
    derive_display_name, names_match, RouteDeclaration, RouteDescriptor, Routable, ViewType,
};
pub use registry::{RegistryBuilder, RouteRegistry, RouteSource};
pub use roles::RoleSet;
