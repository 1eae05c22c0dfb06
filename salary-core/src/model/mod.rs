mod artifact;
mod factory;
mod linear;

pub(crate) use artifact::check_feature_order;
pub use artifact::{ModelArtifact, ModelError, SalaryModel};
pub use factory::{ModelFactory, ModelRegistry};
pub use linear::{LinearModel, LinearModelFactory, ScaledLinearModel, ScaledLinearModelFactory};
