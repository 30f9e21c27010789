pub mod deck;
pub mod provider;
pub mod router;
pub mod routes;

pub use provider::DeckEngine;
pub use router::{CofoundrState, KeyStatus, cofoundr_router};
