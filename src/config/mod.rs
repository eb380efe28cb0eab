//! Configuration for the delivery quote service.
//!
//! Two layers: [`ServiceSettings`] comes from the environment and is fixed for
//! the life of the process; [`TariffStore`] holds the tunable tariff, loaded
//! from a YAML file and rewritten by administrative updates.
//!
//! # Example
//!
//! ```no_run
//! use delivery_quote::config::{ServiceSettings, TariffStore};
//!
//! let settings = ServiceSettings::from_env().unwrap();
//! let store = TariffStore::load(&settings.tariff_file);
//! println!("Tariff file: {}", store.path().display());
//! ```

mod settings;
mod store;
mod types;

pub use settings::{DEFAULT_MAPS_API_BASE, DEFAULT_TIMEZONE, EmailSettings, ServiceSettings};
pub use store::TariffStore;
pub use types::{
    DEFAULT_BASE_FARE, DEFAULT_FAR_TIER_RATE, DEFAULT_MID_TIER_RATE, MAX_TARIFF_AMOUNT, Percent,
    TariffConfig, TariffUpdate, check_tariff_amount, normalize_coupon_code,
};
