//! Domain entities - Objects with identity and lifecycle

mod location_state;
mod suggestion;

pub use location_state::LocationState;
pub use suggestion::SuggestionEntry;
