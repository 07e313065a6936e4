//! Business services: quote aggregation, weight calculation, shipment routing

pub mod aggregator;
pub mod shipment;
pub mod weight;

pub use aggregator::AggregatorService;
pub use shipment::{ShipmentError, ShipmentService};
pub use weight::{
	calculate_weight, calculate_weight_lenient, physical_sheets, PrintSide, WeightError,
	WeightInput, WeightResult,
};
