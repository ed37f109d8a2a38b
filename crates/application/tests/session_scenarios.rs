//! End-to-end scenarios for a map session
//!
//! Drive a `MapSession` through the public API with in-memory fakes for the
//! geocoder, the map surface and the notifier, and check the resulting camera
//! commands.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use application::{
    ApplicationError, CameraCommand, FetchOutcome, GeocodingPort, GeolocationPort, MapEvent,
    MapSession, MapSurfacePort, Notice, NotificationPort, SessionConfig, SuggestionConfig,
};
use async_trait::async_trait;
use domain::entities::SuggestionEntry;
use domain::value_objects::{Coordinate, FieldId, GeoLocation, Slot};
use parking_lot::Mutex;

// ============================================================================
// Fakes
// ============================================================================

#[derive(Default)]
struct RecordingSurface {
    commands: Mutex<Vec<CameraCommand>>,
}

impl RecordingSurface {
    fn commands(&self) -> Vec<CameraCommand> {
        self.commands.lock().clone()
    }
}

impl MapSurfacePort for RecordingSurface {
    fn fly_to(&self, target: GeoLocation, zoom: u8, duration: Duration) {
        self.commands.lock().push(CameraCommand::FlyTo {
            target,
            zoom,
            duration,
        });
    }

    fn fly_to_bounds(&self, points: &[GeoLocation], padding_px: u32, duration: Duration) {
        self.commands.lock().push(CameraCommand::FlyToBounds {
            points: points.to_vec(),
            padding_px,
            duration,
        });
    }
}

#[derive(Default)]
struct FakeGeocoder {
    places: HashMap<String, Vec<SuggestionEntry>>,
    searches: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    fn with(mut self, query: &str, entries: Vec<SuggestionEntry>) -> Self {
        self.places.insert(query.to_string(), entries);
        self
    }
}

#[async_trait]
impl GeocodingPort for FakeGeocoder {
    async fn search(&self, text: &str) -> Result<Vec<SuggestionEntry>, ApplicationError> {
        self.searches.lock().push(text.to_string());
        Ok(self.places.get(text).cloned().unwrap_or_default())
    }

    async fn reverse_geocode(
        &self,
        location: GeoLocation,
    ) -> Result<SuggestionEntry, ApplicationError> {
        Ok(SuggestionEntry::new("0", format!("Near {location}"), location))
    }
}

struct FailingGeocoder;

#[async_trait]
impl GeocodingPort for FailingGeocoder {
    async fn search(&self, _text: &str) -> Result<Vec<SuggestionEntry>, ApplicationError> {
        Err(ApplicationError::Network("connection refused".to_string()))
    }

    async fn reverse_geocode(
        &self,
        _location: GeoLocation,
    ) -> Result<SuggestionEntry, ApplicationError> {
        Err(ApplicationError::Network("connection refused".to_string()))
    }
}

struct FixedPosition(GeoLocation);

#[async_trait]
impl GeolocationPort for FixedPosition {
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError> {
        Ok(self.0)
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl NotificationPort for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn mumbai_entry() -> SuggestionEntry {
    SuggestionEntry::new(
        "1",
        "Mumbai, Maharashtra, India",
        GeoLocation::new_unchecked(19.076, 72.8777),
    )
}

fn delhi_entry() -> SuggestionEntry {
    SuggestionEntry::new(
        "2",
        "Delhi, India",
        GeoLocation::new_unchecked(28.6139, 77.2090),
    )
}

fn config() -> SessionConfig {
    SessionConfig {
        suggestions: SuggestionConfig::for_testing(),
        ..SessionConfig::default()
    }
}

struct Harness {
    session: Arc<MapSession>,
    surface: Arc<RecordingSurface>,
    notifier: Arc<RecordingNotifier>,
}

fn harness(geocoder: impl GeocodingPort + 'static) -> Harness {
    let surface = Arc::new(RecordingSurface::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let session = MapSession::new(
        Arc::new(geocoder),
        Arc::clone(&surface) as Arc<dyn MapSurfacePort>,
        Arc::clone(&notifier) as Arc<dyn NotificationPort>,
        config(),
    )
    .unwrap();

    Harness {
        session: Arc::new(session),
        surface,
        notifier,
    }
}

fn indian_cities() -> FakeGeocoder {
    FakeGeocoder::default()
        .with("Mumbai", vec![mumbai_entry()])
        .with("Delhi", vec![delhi_entry()])
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn search_and_select_flies_to_street_level() {
    let h = harness(indian_cities());

    let outcome = h.session.search(FieldId::Single, "Mumbai").await;
    assert!(outcome.is_applied());

    h.session.select_suggestion(FieldId::Single, "1").unwrap();

    assert_eq!(
        h.surface.commands(),
        vec![CameraCommand::FlyTo {
            target: GeoLocation::new_unchecked(19.076, 72.8777),
            zoom: 13,
            duration: Duration::from_secs(2),
        }]
    );
    assert_eq!(
        h.session.location_state().selected().map(Coordinate::name),
        Some("Mumbai, Maharashtra, India")
    );
}

#[tokio::test]
async fn source_and_destination_frame_the_route() {
    let h = harness(indian_cities());

    h.session.search(FieldId::Source, "Mumbai").await;
    h.session.select_suggestion(FieldId::Source, "1").unwrap();
    h.session.search(FieldId::Destination, "Delhi").await;
    h.session.select_suggestion(FieldId::Destination, "2").unwrap();

    let commands = h.surface.commands();
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], CameraCommand::FlyTo { zoom: 13, .. }));
    assert_eq!(
        commands[1],
        CameraCommand::FlyToBounds {
            points: vec![
                GeoLocation::new_unchecked(19.076, 72.8777),
                GeoLocation::new_unchecked(28.6139, 77.2090),
            ],
            padding_px: 50,
            duration: Duration::from_secs(2),
        }
    );

    let distance = h.session.distance_km().unwrap();
    assert!((distance - 1148.1).abs() < 2.0, "distance was {distance}");
    assert_eq!(h.session.distance_label().as_deref(), Some("1148.09 km"));

    let overlay = h.session.overlay();
    assert_eq!(overlay.markers.len(), 2);
    assert_eq!(overlay.markers[0].label, "Source: Mumbai, Maharashtra, India");
    assert_eq!(overlay.markers[1].label, "Destination: Delhi, India");
    assert!(overlay.route.is_some());
}

#[tokio::test]
async fn selecting_single_point_with_pair_set_keeps_pair_framed() {
    let h = harness(indian_cities());

    h.session.set_source(Coordinate::from(mumbai_entry()));
    h.session.set_destination(Coordinate::from(delhi_entry()));
    h.session.search(FieldId::Single, "Mumbai").await;
    h.session.select_suggestion(FieldId::Single, "1").unwrap();

    let last = h.surface.commands().pop();
    assert!(matches!(last, Some(CameraCommand::FlyToBounds { .. })));
}

#[tokio::test]
async fn empty_text_clears_without_request() {
    let geocoder = Arc::new(indian_cities());
    let h = harness(ArcGeocoder(Arc::clone(&geocoder)));

    h.session.search(FieldId::Single, "Mumbai").await;
    assert_eq!(h.session.suggestions(FieldId::Single).results().len(), 1);

    let outcome = h.session.search(FieldId::Single, "").await;
    assert!(matches!(outcome, FetchOutcome::Cleared));
    assert!(h.session.suggestions(FieldId::Single).results().is_empty());
    assert_eq!(geocoder.searches.lock().as_slice(), ["Mumbai"]);
}

#[tokio::test]
async fn user_pan_clears_open_suggestions_without_moving_camera() {
    let h = harness(indian_cities());
    h.session.search(FieldId::Single, "Mumbai").await;

    let (tx, rx) = tokio::sync::mpsc::channel(4);
    let listener = Arc::clone(&h.session).listen(rx);
    tx.send(MapEvent::programmatic_move_end()).await.unwrap();
    tx.send(MapEvent::user_move_end()).await.unwrap();
    drop(tx);
    listener.await.unwrap();

    assert!(h.session.suggestions(FieldId::Single).results().is_empty());
    assert_eq!(h.session.suggestions(FieldId::Single).raw_text(), "Mumbai");
    assert!(h.surface.commands().is_empty());
}

#[tokio::test]
async fn network_failure_is_reported_not_fatal() {
    let h = harness(FailingGeocoder);

    let outcome = h.session.search(FieldId::Source, "Mumbai").await;
    assert!(matches!(outcome, FetchOutcome::Failed(ApplicationError::Network(_))));

    let notices = h.notifier.notices.lock().clone();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].field, Some(FieldId::Source));
    assert!(h.session.location_state().is_empty());
    assert!(h.surface.commands().is_empty());
}

#[tokio::test]
async fn current_location_fills_source() {
    let position = GeoLocation::new_unchecked(28.6139, 77.2090);
    let h = harness(indian_cities());
    let session = Arc::new(
        Arc::try_unwrap(h.session)
            .unwrap()
            .with_geolocation(Arc::new(FixedPosition(position))),
    );

    let coordinate = session.use_current_location(Slot::Source).await.unwrap();

    assert_eq!(coordinate.location(), position);
    assert_eq!(session.location_state().source(), Some(&coordinate));
    assert_eq!(
        h.surface.commands(),
        vec![CameraCommand::FlyTo {
            target: position,
            zoom: 13,
            duration: Duration::from_secs(2),
        }]
    );
}

#[tokio::test]
async fn clearing_destination_returns_to_source() {
    let h = harness(indian_cities());
    h.session.set_source(Coordinate::from(mumbai_entry()));
    h.session.set_destination(Coordinate::from(delhi_entry()));
    h.session.clear_slot(Slot::Destination);

    let last = h.surface.commands().pop();
    assert_eq!(
        last,
        Some(CameraCommand::FlyTo {
            target: GeoLocation::new_unchecked(19.076, 72.8777),
            zoom: 13,
            duration: Duration::from_secs(2),
        })
    );
    assert!(h.session.distance_km().is_none());
}

/// Hands camera commands to a render loop instead of acting on them in place
struct ForwardingSurface {
    sender: tokio::sync::mpsc::UnboundedSender<CameraCommand>,
}

impl MapSurfacePort for ForwardingSurface {
    fn fly_to(&self, target: GeoLocation, zoom: u8, duration: Duration) {
        let _ = self.sender.send(CameraCommand::FlyTo {
            target,
            zoom,
            duration,
        });
    }

    fn fly_to_bounds(&self, points: &[GeoLocation], padding_px: u32, duration: Duration) {
        let _ = self.sender.send(CameraCommand::FlyToBounds {
            points: points.to_vec(),
            padding_px,
            duration,
        });
    }
}

#[tokio::test]
async fn render_loop_reads_overlay_after_each_command() {
    let (sender, mut commands) = tokio::sync::mpsc::unbounded_channel();
    let session = Arc::new(
        MapSession::new(
            Arc::new(indian_cities()),
            Arc::new(ForwardingSurface { sender }),
            Arc::new(RecordingNotifier::default()),
            config(),
        )
        .unwrap(),
    );

    let renderer = {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            let mut frames = Vec::new();
            while let Some(command) = commands.recv().await {
                let overlay = session.overlay();
                frames.push((command, overlay.markers.len(), overlay.route.is_some()));
                if frames.len() == 2 {
                    break;
                }
            }
            frames
        })
    };

    session.set_source(Coordinate::from(mumbai_entry()));
    session.set_destination(Coordinate::from(delhi_entry()));

    let frames = tokio::time::timeout(Duration::from_secs(5), renderer)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(frames.len(), 2);
    assert!(matches!(frames[0].0, CameraCommand::FlyTo { zoom: 13, .. }));
    assert!(matches!(frames[1].0, CameraCommand::FlyToBounds { padding_px: 50, .. }));
    // The render loop runs after the writes, so it sees the final state
    assert_eq!((frames[1].1, frames[1].2), (2, true));
}

/// Shares one fake geocoder between the session and the test body
struct ArcGeocoder(Arc<FakeGeocoder>);

#[async_trait]
impl GeocodingPort for ArcGeocoder {
    async fn search(&self, text: &str) -> Result<Vec<SuggestionEntry>, ApplicationError> {
        self.0.search(text).await
    }

    async fn reverse_geocode(
        &self,
        location: GeoLocation,
    ) -> Result<SuggestionEntry, ApplicationError> {
        self.0.reverse_geocode(location).await
    }
}
