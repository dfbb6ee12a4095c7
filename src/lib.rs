pub mod driver;
pub mod error;
pub mod model;
pub mod report;
pub mod telemetry;
pub mod worker;
