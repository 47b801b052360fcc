//! User profiles and the follow graph.

pub mod types;

pub use types::{UserLocation, UserProfile, UserSocialState};
