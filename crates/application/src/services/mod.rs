//! Application services - Use case implementations

mod map_session;
mod suggestion_session;
mod view_controller;

pub use map_session::{MapSession, SessionConfig};
pub use suggestion_session::{
    FetchOutcome, QueryTicket, RequestToken, SuggestionConfig, SuggestionSession,
};
pub use view_controller::{ViewConfig, ViewController, ViewState};
