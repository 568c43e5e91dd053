use super::intent::Intent;
use super::state::UiState;

/// The single place where a state transition happens.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// `(State, Intent) -> State`, with no I/O.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
