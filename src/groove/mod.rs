// Groove - Swing and humanization
// Timing feel applied when a performance is scheduled for playback

pub mod humanize;
pub mod swing;

pub use humanize::Humanizer;
pub use swing::SwingRule;
