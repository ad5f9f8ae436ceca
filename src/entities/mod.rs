//! Domain entities: persisted document types and their payload schemas

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::Cart;
pub use order::Order;
pub use product::Product;
pub use user::User;
