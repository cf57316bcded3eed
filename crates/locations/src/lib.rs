//! # Location resolution (`locations`)
//!
//! Turns the free-text address fields extracted from a customer conversation
//! into catalog entries. Cities, districts and wards are fetched tier by tier
//! from a [`LocationSource`] and matched with [`matcher::Matcher`]; the
//! order source is matched the same way against an [`OrderSourceProvider`].
//!
//! Sources are async so remote location services can sit behind them.
//! [`CachedSource`] keeps fetched lists for a day by default.
//!
//! ```
//! use locations::{AddressResolver, ConversationExtract, StaticCatalog};
//!
//! # tokio_test_block(async {
//! let catalog = StaticCatalog::from_json(r#"{
//!     "cities": [{"id": 1, "name": "Hà Nội"}],
//!     "districts": {"1": [{"id": 11, "name": "Quận Hoàn Kiếm"}]},
//!     "wards": {"11": [{"id": 111, "name": "Phường Hàng Bạc"}]}
//! }"#).unwrap();
//! let resolver = AddressResolver::new(catalog);
//! let extract = ConversationExtract {
//!     customer_province: Some("tp ha noi".into()),
//!     customer_district: Some("hoan kiem".into()),
//!     customer_ward: Some("hang bac".into()),
//!     ..Default::default()
//! };
//! let resolved = resolver.resolve(&extract).await.unwrap();
//! assert!(resolved.is_complete());
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod cache;
mod error;
mod resolve;
mod source;
mod types;

pub use crate::cache::{CacheConfig, CachedSource, TtlCache, DEFAULT_KEY_PREFIX, DEFAULT_TTL_SECS};
pub use crate::error::LocationError;
pub use crate::resolve::{
    fetch_order_source, resolve_order_source, resolve_order_source_with, AddressResolver,
};
pub use crate::source::{LocationSource, OrderSourceProvider, StaticCatalog};
pub use crate::types::{ConversationExtract, LocationTier, ResolvedAddress};
