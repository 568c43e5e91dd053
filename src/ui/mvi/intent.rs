/// Marker for things that can change UI state: user input, finished remote
/// calls and timer expiry.
pub trait Intent: Send + 'static {}
