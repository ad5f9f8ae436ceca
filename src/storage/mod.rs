//! Storage backend

pub mod mongo;

pub use mongo::MongoGateway;
