mod feature_vector;
mod player_record;
mod salary_estimate;
mod value_flag;

pub use feature_vector::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, InvalidFeature};
pub use player_record::{PlayerComparison, PlayerRecord};
pub use salary_estimate::SalaryEstimate;
pub use value_flag::ValueFlag;
