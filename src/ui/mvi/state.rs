/// Marker for a self-contained, comparable snapshot of everything a view
/// renders.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
