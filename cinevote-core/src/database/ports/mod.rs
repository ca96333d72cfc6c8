//! Store ports (interfaces) the services are written against.

pub mod credentials;
pub mod votes;
