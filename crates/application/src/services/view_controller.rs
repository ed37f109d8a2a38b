//! Camera controller
//!
//! Derives the view target from the location state and issues exactly one
//! camera command per change. User-initiated map moves flow back in the
//! other direction and only clear the open field's suggestions.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::entities::LocationState;
use domain::value_objects::{Coordinate, GeoLocation, Slot};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::suggestion_session::SuggestionSession;
use crate::ports::{CameraCommand, MapEvent, MapSurfacePort};

/// Deepest zoom level supported by common tile servers
const MAX_ZOOM: u8 = 22;

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Zoom level when flying to a single point
    #[serde(default = "default_street_zoom")]
    pub street_zoom: u8,
    /// Zoom level of the empty view
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
    /// Center of the empty view
    #[serde(default = "default_center")]
    pub default_center: GeoLocation,
    /// Animation duration in milliseconds
    #[serde(default = "default_fly_duration_ms")]
    pub fly_duration_ms: u64,
    /// Padding around a framed source/destination pair
    #[serde(default = "default_bounds_padding_px")]
    pub bounds_padding_px: u32,
}

const fn default_street_zoom() -> u8 {
    13
}

const fn default_zoom() -> u8 {
    2
}

const fn default_center() -> GeoLocation {
    GeoLocation::new_unchecked(20.0, 0.0)
}

const fn default_fly_duration_ms() -> u64 {
    2000
}

const fn default_bounds_padding_px() -> u32 {
    50
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            street_zoom: default_street_zoom(),
            default_zoom: default_zoom(),
            default_center: default_center(),
            fly_duration_ms: default_fly_duration_ms(),
            bounds_padding_px: default_bounds_padding_px(),
        }
    }
}

impl ViewConfig {
    /// The animation duration
    #[must_use]
    pub const fn fly_duration(&self) -> Duration {
        Duration::from_millis(self.fly_duration_ms)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.street_zoom > MAX_ZOOM || self.default_zoom > MAX_ZOOM {
            return Err(format!("zoom levels must be at most {MAX_ZOOM}"));
        }
        GeoLocation::new(
            self.default_center.latitude(),
            self.default_center.longitude(),
        )
        .map_err(|e| format!("default_center: {e}"))?;
        Ok(())
    }
}

/// Where the camera should point for a given state
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// No location set
    Empty,
    /// A single point at street level
    SinglePoint(Coordinate),
    /// Source and destination framed together
    PairBound {
        /// Start of the pair
        source: Coordinate,
        /// End of the pair
        destination: Coordinate,
    },
}

impl ViewState {
    /// Derive the view target from a location state
    ///
    /// A complete source/destination pair always wins. Otherwise the most
    /// recently written slot is shown, falling back to the first occupied
    /// slot in the order source, destination, selected.
    #[must_use]
    pub fn derive(state: &LocationState) -> Self {
        if let Some((source, destination)) = state.pair() {
            return Self::PairBound {
                source: source.clone(),
                destination: destination.clone(),
            };
        }

        let focused = state.focus().and_then(|slot| state.get(slot));
        let single = focused.or_else(|| {
            [Slot::Source, Slot::Destination, Slot::Selected]
                .into_iter()
                .find_map(|slot| state.get(slot))
        });

        single.map_or(Self::Empty, |coordinate| {
            Self::SinglePoint(coordinate.clone())
        })
    }

    /// Short name for logging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::SinglePoint(_) => "single_point",
            Self::PairBound { .. } => "pair_bound",
        }
    }
}

/// Keeps the map camera in sync with the location state
pub struct ViewController {
    surface: Arc<dyn MapSurfacePort>,
    config: ViewConfig,
    last_command: Mutex<Option<CameraCommand>>,
}

impl fmt::Debug for ViewController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewController")
            .field("config", &self.config)
            .field("last_command", &*self.last_command.lock())
            .finish_non_exhaustive()
    }
}

impl ViewController {
    /// Create a controller driving the given surface
    #[must_use]
    pub fn new(surface: Arc<dyn MapSurfacePort>, config: ViewConfig) -> Self {
        Self {
            surface,
            config,
            last_command: Mutex::new(None),
        }
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The camera command for a view target
    #[must_use]
    pub fn command_for(&self, view: &ViewState) -> CameraCommand {
        let duration = self.config.fly_duration();
        match view {
            ViewState::Empty => CameraCommand::FlyTo {
                target: self.config.default_center,
                zoom: self.config.default_zoom,
                duration,
            },
            ViewState::SinglePoint(point) => CameraCommand::FlyTo {
                target: point.location(),
                zoom: self.config.street_zoom,
                duration,
            },
            ViewState::PairBound {
                source,
                destination,
            } => CameraCommand::FlyToBounds {
                points: vec![source.location(), destination.location()],
                padding_px: self.config.bounds_padding_px,
                duration,
            },
        }
    }

    /// React to a location state change by issuing one camera command
    pub fn on_location_changed(&self, state: &LocationState) -> CameraCommand {
        let view = ViewState::derive(state);
        let command = self.command_for(&view);
        debug!(view = view.name(), ?command, "Moving camera");

        command.dispatch(self.surface.as_ref());
        *self.last_command.lock() = Some(command.clone());
        command
    }

    /// React to a map event
    ///
    /// A user-initiated move end clears the open field's suggestions and
    /// returns true. Programmatic move ends are ignored. Never moves the
    /// camera.
    pub fn on_user_move_end(&self, event: MapEvent, open: Option<&SuggestionSession>) -> bool {
        if !event.is_user_move_end() {
            trace!(?event, "Ignoring programmatic move end");
            return false;
        }

        match open {
            Some(session) => {
                debug!(field = %session.field(), "User moved the map, clearing suggestions");
                session.clear();
                true
            },
            None => false,
        }
    }

    /// The most recently issued command
    #[must_use]
    pub fn last_command(&self) -> Option<CameraCommand> {
        self.last_command.lock().clone()
    }
}
