//! "Last known location" collaborator.

use crate::domain::Coordinates;

/// Source of the device's last known fix, read once at startup.
pub trait LocationProvider: Send + Sync {
    fn last_known_location(&self) -> Option<Coordinates>;
}

/// A fix supplied up front, e.g. from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(pub Option<Coordinates>);

impl LocationProvider for FixedLocation {
    fn last_known_location(&self) -> Option<Coordinates> {
        self.0
    }
}
