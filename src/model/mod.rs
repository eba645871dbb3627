// MODEL: Spin state, tuning and the static site data
pub mod config;
pub mod rotation;
pub mod quote;
pub mod counter;

pub use config::RotationConfig;
pub use rotation::{ElementId, RotationFrame, RotationState, SpinDirection, SpinFeedback, SpinIntensity, VelocityHistory};
pub use quote::{estimate, Estimate, PropertySize, ServiceType};
pub use counter::CounterAnimation;
