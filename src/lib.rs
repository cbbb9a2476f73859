//! Cortado
//!
//! Cortado is an order-composition and pricing engine for a café point of sale: a catalog snapshot, size-aware drink pricing, a cart aggregate with percentage promos, and the finalization path that turns a cart into a submittable transaction.

pub mod catalog;
pub mod customer;
pub mod order;
pub mod prelude;
pub mod pricing;
pub mod promo;
pub mod remote;
pub mod session;
pub mod transaction;
