//! Schema resolver
//!
//! Turns a [`FormMode`] into the ordered field list and validation rules the
//! form controller works against. Resolution is pure: the same mode and
//! rules always produce the same schema.

mod field;
mod mode;
mod resolver;

pub use field::{FieldDescriptor, InputKind, Validator};
pub use mode::{FormMode, SchemaError};
pub use resolver::{resolve, resolve_str, resolve_with, FormSchema, SchemaRules};

/// Field names shared by the schema and the payload builders
pub mod names {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const ADDRESS1: &str = "address1";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const POSTAL_CODE: &str = "postalCode";
    pub const DATE_OF_BIRTH: &str = "dateOfBirth";
    pub const SSN: &str = "ssn";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
}
