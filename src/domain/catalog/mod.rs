//! Commercial offer catalog: offers, billing cycles, and hierarchy resolution.

mod offer;
mod resolver;

pub use offer::{Offer, OfferCycle, OfferKind};
pub use resolver::merge_offers;
