//! Map surface port
//!
//! The rendering engine is an external collaborator. The core only issues
//! animated camera moves to it and receives "move ended" events back over a
//! channel owned by the presentation shell.

use std::time::Duration;

use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Port for camera control of an interactive map
///
/// Commands are issued while the owning `MapSession` holds its state lock.
/// Implementations must return without calling back into the session on the
/// same thread; hand the command to a render loop or channel and read
/// `location_state()` or `overlay()` from there.
#[cfg_attr(test, automock)]
pub trait MapSurfacePort: Send + Sync {
    /// Animate the camera to a point at a zoom level
    ///
    /// A call during an in-flight animation retargets it.
    fn fly_to(&self, target: GeoLocation, zoom: u8, duration: Duration);

    /// Animate the camera to frame all points with symmetric padding
    fn fly_to_bounds(&self, points: &[GeoLocation], padding_px: u32, duration: Duration);
}

/// What caused the map view to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOrigin {
    /// The user panned, dragged or zoomed
    User,
    /// A camera command issued by the core finished
    Programmatic,
}

/// Events emitted by the map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    /// The view stopped moving
    MoveEnd {
        /// Cause of the move
        origin: MoveOrigin,
    },
}

impl MapEvent {
    /// A move ended by direct user interaction
    #[must_use]
    pub const fn user_move_end() -> Self {
        Self::MoveEnd {
            origin: MoveOrigin::User,
        }
    }

    /// A move ended because a camera command completed
    #[must_use]
    pub const fn programmatic_move_end() -> Self {
        Self::MoveEnd {
            origin: MoveOrigin::Programmatic,
        }
    }

    /// True for a user-initiated move end
    #[must_use]
    pub const fn is_user_move_end(&self) -> bool {
        matches!(
            self,
            Self::MoveEnd {
                origin: MoveOrigin::User
            }
        )
    }
}

/// A camera command as issued to the surface
#[derive(Debug, Clone, PartialEq)]
pub enum CameraCommand {
    /// Fly to a single point
    FlyTo {
        /// Target position
        target: GeoLocation,
        /// Zoom level
        zoom: u8,
        /// Animation duration
        duration: Duration,
    },
    /// Fit a region covering all points
    FlyToBounds {
        /// Points to frame, in order
        points: Vec<GeoLocation>,
        /// Symmetric padding in pixels
        padding_px: u32,
        /// Animation duration
        duration: Duration,
    },
}

impl CameraCommand {
    /// Send this command to a map surface
    pub fn dispatch(&self, surface: &dyn MapSurfacePort) {
        match self {
            Self::FlyTo {
                target,
                zoom,
                duration,
            } => surface.fly_to(*target, *zoom, *duration),
            Self::FlyToBounds {
                points,
                padding_px,
                duration,
            } => surface.fly_to_bounds(points, *padding_px, *duration),
        }
    }
}
