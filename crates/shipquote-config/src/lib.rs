//! Configuration for the shipquote aggregator
//!
//! Settings structures, file/environment loading and startup logging.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError};
pub use loader::load_config;
pub use settings::{
	AdapterSettings, CourierSettings, DelhiveryMode, LogFormat, LoggingSettings, ServerSettings,
	Settings, StoreSettings, WeightSettings,
};
pub use startup::{log_startup_complete, log_startup_summary};
