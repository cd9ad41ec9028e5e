pub mod discovery;
pub mod history;
pub mod mood;
pub mod prediction;
pub mod providers;
pub mod recommendations;
pub mod stats;

pub use discovery::DiscoveryEngine;
pub use mood::{Mood, MoodPick, MoodSelector};
pub use prediction::{batch_predict, predict_rating, Prediction};
pub use recommendations::RecommendationEngine;
