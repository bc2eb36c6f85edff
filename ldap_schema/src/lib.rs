pub type AnyError = anyhow::Error;

pub mod data;
pub mod error;
pub mod name;
pub mod registry;
pub mod schema;

pub mod prelude;

pub use self::{
    name::{Dn, Rdn},
    schema::{AttributeType, ObjectClass, Schema},
};
