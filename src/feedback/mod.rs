//! Best-effort audio and visual feedback for committed actions.
pub mod audio;
pub mod effects;
pub mod plugin;

pub use plugin::FeedbackPlugin;
