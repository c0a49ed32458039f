//! Catalog handlers.

mod load_user_offers;

pub use load_user_offers::LoadUserOffersHandler;
