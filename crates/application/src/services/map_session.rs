//! Map session
//!
//! Owns the location state of one map view and wires it to the camera
//! controller, the three suggestion sessions and the external ports. Every
//! state write and the camera command it causes happen under one lock, so
//! concurrent writers cannot interleave a stale command after a newer one.

use std::fmt;
use std::sync::Arc;

use domain::entities::{LocationState, SuggestionEntry};
use domain::overlay::MapOverlay;
use domain::value_objects::{Coordinate, FieldId, Slot};
use domain::format_distance_km;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::suggestion_session::{FetchOutcome, SuggestionConfig, SuggestionSession};
use super::view_controller::{ViewConfig, ViewController, ViewState};
use crate::error::ApplicationError;
use crate::ports::{
    CameraCommand, GeocodingPort, GeolocationPort, MapEvent, MapSurfacePort, Notice,
    NotificationPort,
};

/// Configuration of a map session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Camera behavior
    #[serde(default)]
    pub view: ViewConfig,
    /// Suggestion debouncing
    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

/// The three input fields and their suggestion sessions
struct Fields {
    single: Arc<SuggestionSession>,
    source: Arc<SuggestionSession>,
    destination: Arc<SuggestionSession>,
}

impl Fields {
    fn new(geocoder: &Arc<dyn GeocodingPort>, config: &SuggestionConfig) -> Self {
        let session = |field| {
            Arc::new(SuggestionSession::new(
                field,
                Arc::clone(geocoder),
                config.clone(),
            ))
        };
        Self {
            single: session(FieldId::Single),
            source: session(FieldId::Source),
            destination: session(FieldId::Destination),
        }
    }

    const fn get(&self, field: FieldId) -> &Arc<SuggestionSession> {
        match field {
            FieldId::Single => &self.single,
            FieldId::Source => &self.source,
            FieldId::Destination => &self.destination,
        }
    }
}

/// Location and view synchronization for one map
pub struct MapSession {
    state: Mutex<LocationState>,
    view: ViewController,
    fields: Fields,
    open_field: Mutex<Option<FieldId>>,
    geocoder: Arc<dyn GeocodingPort>,
    geolocation: Option<Arc<dyn GeolocationPort>>,
    notifier: Arc<dyn NotificationPort>,
}

impl fmt::Debug for MapSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSession")
            .field("state", &*self.state.lock())
            .field("view", &self.view)
            .field("open_field", &*self.open_field.lock())
            .field("has_geolocation", &self.geolocation.is_some())
            .finish_non_exhaustive()
    }
}

impl MapSession {
    /// Create a session with an empty location state
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the view configuration is invalid.
    pub fn new(
        geocoder: Arc<dyn GeocodingPort>,
        surface: Arc<dyn MapSurfacePort>,
        notifier: Arc<dyn NotificationPort>,
        config: SessionConfig,
    ) -> Result<Self, ApplicationError> {
        config
            .view
            .validate()
            .map_err(ApplicationError::Configuration)?;

        Ok(Self {
            state: Mutex::new(LocationState::new()),
            view: ViewController::new(surface, config.view),
            fields: Fields::new(&geocoder, &config.suggestions),
            open_field: Mutex::new(Some(FieldId::Single)),
            geocoder,
            geolocation: None,
            notifier,
        })
    }

    /// Attach a device geolocation source
    #[must_use]
    pub fn with_geolocation(mut self, geolocation: Arc<dyn GeolocationPort>) -> Self {
        self.geolocation = Some(geolocation);
        self
    }

    /// Seed the location state
    ///
    /// No camera command is issued until [`MapSession::initialize`].
    #[must_use]
    pub fn with_initial_state(mut self, state: LocationState) -> Self {
        *self.state.get_mut() = state;
        self
    }

    /// Point the camera at the current state
    pub fn initialize(&self) -> CameraCommand {
        let state = self.state.lock();
        info!(view = ViewState::derive(&state).name(), "Initializing map view");
        self.view.on_location_changed(&state)
    }

    // ------------------------------------------------------------------
    // Location state
    // ------------------------------------------------------------------

    /// Replace the selected location
    pub fn set_selected(&self, coordinate: Coordinate) -> CameraCommand {
        self.set_slot(Slot::Selected, coordinate)
    }

    /// Replace the source location
    pub fn set_source(&self, coordinate: Coordinate) -> CameraCommand {
        self.set_slot(Slot::Source, coordinate)
    }

    /// Replace the destination location
    pub fn set_destination(&self, coordinate: Coordinate) -> CameraCommand {
        self.set_slot(Slot::Destination, coordinate)
    }

    /// Replace one slot and move the camera
    pub fn set_slot(&self, slot: Slot, coordinate: Coordinate) -> CameraCommand {
        debug!(%slot, name = coordinate.name(), "Setting location");
        self.update(|state| state.set(slot, coordinate))
    }

    /// Empty one slot and move the camera
    pub fn clear_slot(&self, slot: Slot) -> CameraCommand {
        debug!(%slot, "Clearing location");
        self.update(|state| {
            state.clear(slot);
        })
    }

    /// Empty every slot and return to the default view
    pub fn reset(&self) -> CameraCommand {
        debug!("Resetting locations");
        self.update(LocationState::reset)
    }

    /// Snapshot of the location state
    #[must_use]
    pub fn location_state(&self) -> LocationState {
        self.state.lock().clone()
    }

    /// The state lock is not reentrant and is held while the surface runs
    fn update(&self, change: impl FnOnce(&mut LocationState)) -> CameraCommand {
        let mut state = self.state.lock();
        change(&mut state);
        self.view.on_location_changed(&state)
    }

    // ------------------------------------------------------------------
    // Input fields
    // ------------------------------------------------------------------

    /// Mark a field as the one whose suggestions are shown
    pub fn open_field(&self, field: FieldId) {
        *self.open_field.lock() = Some(field);
    }

    /// Close the open field, hiding its suggestions
    pub fn close_field(&self) {
        if let Some(field) = self.open_field.lock().take() {
            self.fields.get(field).clear();
        }
    }

    /// The field whose suggestions are shown
    #[must_use]
    pub fn current_field(&self) -> Option<FieldId> {
        *self.open_field.lock()
    }

    /// The suggestion session of a field
    #[must_use]
    pub const fn suggestions(&self, field: FieldId) -> &Arc<SuggestionSession> {
        self.fields.get(field)
    }

    /// Type into a field and fetch suggestions
    ///
    /// A failed search is reported to the user; the previous suggestions
    /// stay visible.
    #[instrument(skip(self, text))]
    pub async fn search(&self, field: FieldId, text: &str) -> FetchOutcome {
        self.open_field(field);
        let outcome = self.fields.get(field).update(text).await;

        if let FetchOutcome::Failed(e) = &outcome {
            warn!(%field, error = %e, "Search failed");
            self.notifier
                .notify(Notice::warning(e.user_message()).for_field(field));
        }

        outcome
    }

    /// Pick a suggestion of a field
    ///
    /// Writes the field's slot, shows the place name in the field and hides
    /// the suggestions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the id is not among the field's suggestions;
    /// the state is unchanged.
    pub fn select_suggestion(&self, field: FieldId, id: &str) -> Result<Coordinate, ApplicationError> {
        let session = self.fields.get(field);
        let entry: SuggestionEntry = session.select(id).ok_or_else(|| {
            warn!(%field, %id, "Selected suggestion is not in the current list");
            ApplicationError::NotFound(format!("suggestion {id}"))
        })?;

        let coordinate = Coordinate::from(&entry);
        session.replace_text(&entry.display_name);
        session.clear();
        self.set_slot(field.slot(), coordinate.clone());

        info!(%field, name = coordinate.name(), "Suggestion selected");
        Ok(coordinate)
    }

    /// Fill a slot with the device's current position
    ///
    /// The position is named by reverse geocoding and the name is shown in
    /// the matching field.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` or `Unavailable` when no position can be acquired,
    /// `Network` or `Service` when naming it fails. The user is notified and
    /// the state is unchanged.
    #[instrument(skip(self))]
    pub async fn use_current_location(&self, slot: Slot) -> Result<Coordinate, ApplicationError> {
        match self.resolve_current_location().await {
            Ok(coordinate) => {
                self.fields.get(slot.field()).replace_text(coordinate.name());
                self.set_slot(slot, coordinate.clone());
                info!(%slot, name = coordinate.name(), "Current location applied");
                Ok(coordinate)
            },
            Err(e) => {
                warn!(%slot, error = %e, "Current location unavailable");
                self.notifier
                    .notify(Notice::warning(e.user_message()).for_field(slot.field()));
                Err(e)
            },
        }
    }

    async fn resolve_current_location(&self) -> Result<Coordinate, ApplicationError> {
        let geolocation = self.geolocation.as_ref().ok_or_else(|| {
            ApplicationError::Unavailable("geolocation is not supported".to_string())
        })?;

        let position = geolocation.current_position().await?;
        let place = self.geocoder.reverse_geocode(position).await?;

        Ok(Coordinate::from_location(place.display_name, position))
    }

    // ------------------------------------------------------------------
    // Map feedback
    // ------------------------------------------------------------------

    /// Handle one event from the map surface
    ///
    /// Returns true when suggestions were cleared.
    pub fn handle_map_event(&self, event: MapEvent) -> bool {
        let open = *self.open_field.lock();
        self.view
            .on_user_move_end(event, open.map(|field| self.fields.get(field).as_ref()))
    }

    /// Consume map events until the sender side is dropped
    pub fn listen(self: Arc<Self>, mut events: mpsc::Receiver<MapEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                self.handle_map_event(event);
            }
            debug!("Map event stream closed");
        })
    }

    // ------------------------------------------------------------------
    // Presentation helpers
    // ------------------------------------------------------------------

    /// The camera controller
    #[must_use]
    pub const fn view(&self) -> &ViewController {
        &self.view
    }

    /// Straight-line distance between source and destination
    #[must_use]
    pub fn distance_km(&self) -> Option<f64> {
        self.state.lock().route_distance_km()
    }

    /// The distance formatted for display
    #[must_use]
    pub fn distance_label(&self) -> Option<String> {
        self.distance_km().map(format_distance_km)
    }

    /// Markers and route line to draw
    #[must_use]
    pub fn overlay(&self) -> MapOverlay {
        MapOverlay::from_state(&self.state.lock())
    }
}
