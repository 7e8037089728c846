//! Command implementations.

pub mod compare;
pub mod connect;
pub mod documents;
pub mod permissions;
pub mod profile;
pub mod query;
pub mod upload;

pub use self::compare::execute_compare;
pub use self::connect::execute_connect;
pub use self::documents::execute_documents;
pub use self::permissions::execute_permissions;
pub use self::profile::execute_profile;
pub use self::query::execute_query;
pub use self::upload::execute_upload;
