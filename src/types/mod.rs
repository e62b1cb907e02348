pub mod configs;

pub use configs::{ConfigCreate, ConfigResponse, ConfigUpdate};
