// Sub-modules organized by functional domain
pub mod api;
pub mod attachment;
pub mod auth;
pub mod comment;
pub mod label;
pub mod project;
pub mod sprint;
pub mod task;
pub mod team;
pub mod work_time;
pub mod workspace;

// Re-export all models so callers can `use crate::db::models::Task`

// API response structures
pub use api::*;

// Authentication and user models
pub use auth::*;

// Team and membership models
pub use team::*;

// Hierarchy models
pub use project::*;
pub use sprint::*;
pub use workspace::*;

// Task subsystem models
pub use attachment::*;
pub use comment::*;
pub use label::*;
pub use task::*;
pub use work_time::*;
