//! Model-View-Intent primitives.
//!
//! ```text
//! key / mouse / remote result ──→ Intent ──→ Reducer ──→ State ──→ render
//!          ↑                                                  │
//!          └──────────────────────────────────────────────────┘
//! ```
//!
//! State is owned by one controller and only changes through its reducer.
//! Remote calls are decided outside the reducer and report back as intents.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
