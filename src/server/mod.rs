//! HTTP server: shared state, router, and request handlers

pub mod handlers;
pub mod router;

pub use router::build_router;

use mongodb::Database;

use crate::auth::{CredentialManager, TokenIssuer};
use crate::config::AppConfig;
use crate::entities::{Cart, Order, Product, User};
use crate::resolver::ReferenceResolver;
use crate::storage::MongoGateway;

/// Shared application state, cloned into each handler.
///
/// All members are cheap to clone; the gateways share one driver connection
/// pool underneath.
#[derive(Clone)]
pub struct AppState {
    pub users: MongoGateway<User>,
    pub products: MongoGateway<Product>,
    pub carts: MongoGateway<Cart>,
    pub orders: MongoGateway<Order>,
    pub credentials: CredentialManager,
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(database: Database, config: &AppConfig) -> Self {
        Self {
            users: MongoGateway::new(database.clone()),
            products: MongoGateway::new(database.clone()),
            carts: MongoGateway::new(database.clone()),
            orders: MongoGateway::new(database),
            credentials: CredentialManager::new(config.bcrypt_cost),
            tokens: TokenIssuer::new(&config.jwt_secret, config.token_ttl_secs),
        }
    }

    pub fn resolver(&self) -> ReferenceResolver {
        ReferenceResolver::new(self.users.clone(), self.products.clone())
    }
}
