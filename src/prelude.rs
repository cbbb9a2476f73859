//! Cortado prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{
        CatalogError, CatalogItem, CatalogSnapshot, CustomizationDefinition, CustomizationOption,
        ItemType, Size,
    },
    customer::CustomerRef,
    order::{
        LineError, OptionChoice, OrderAggregate, OrderCustomization, OrderError, OrderLine,
        QuantityUpdate, SelectionSet,
    },
    pricing::{SizePrices, derive_size_prices, unit_price},
    promo::{PromoApplication, PromoError, resolve_promo},
    remote::{
        CatalogApi, CustomerApi, HttpPosClient, PromoApi, RemoteError, TransactionApi,
    },
    session::{PosSession, SessionError, SessionState},
    transaction::{FinalizeError, TransactionRecord, TransactionRow, finalize},
};
