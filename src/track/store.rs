use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::debug;

use crate::error::LookupError;

use super::Track;

slotmap::new_key_type! {
    /// Unique identifier for a track in a [`TrackStore`].
    pub struct TrackId;
}

/// Owns the tracks of one scene.
///
/// Tracks are addressed by generational keys; a track may also carry a
/// string id so plan entries can refer to it by name.
#[derive(Debug, Default)]
pub struct TrackStore {
    tracks: SlotMap<TrackId, Track>,
    names: HashMap<String, TrackId>,
}

impl TrackStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an unnamed track and returns its ID.
    pub fn add(&mut self, track: Track) -> TrackId {
        self.tracks.insert(track)
    }

    /// Inserts a track under `name`.
    ///
    /// If the name was already taken, the earlier track stays in the store
    /// but is no longer reachable by name.
    pub fn add_named(&mut self, name: impl Into<String>, track: Track) -> TrackId {
        let name = name.into();
        let id = self.tracks.insert(track);
        if let Some(previous) = self.names.insert(name.clone(), id) {
            debug!(name = %name, ?previous, "track name rebound");
        }
        id
    }

    /// Returns the track with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the track has been removed or never existed.
    pub fn track(&self, id: TrackId) -> Result<&Track, LookupError> {
        self.tracks
            .get(id)
            .ok_or_else(|| LookupError::TrackNotFound(format!("{id:?}")))
    }

    /// Returns a mutable reference to the track with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the track has been removed or never existed.
    pub fn track_mut(&mut self, id: TrackId) -> Result<&mut Track, LookupError> {
        self.tracks
            .get_mut(id)
            .ok_or_else(|| LookupError::TrackNotFound(format!("{id:?}")))
    }

    /// Looks up the ID registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if no live track has that name.
    pub fn resolve_name(&self, name: &str) -> Result<TrackId, LookupError> {
        self.names
            .get(name)
            .copied()
            .filter(|id| self.tracks.contains_key(*id))
            .ok_or_else(|| LookupError::TrackNotFound(name.to_owned()))
    }

    /// Returns the track registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if no live track has that name.
    pub fn by_name(&self, name: &str) -> Result<&Track, LookupError> {
        self.track(self.resolve_name(name)?)
    }

    /// Removes a track and any name pointing at it.
    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        let track = self.tracks.remove(id)?;
        self.names.retain(|_, v| *v != id);
        Some(track)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Iterates over every track with its ID.
    pub fn iter(&self) -> impl Iterator<Item = (TrackId, &Track)> {
        self.tracks.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polyline;
    use crate::math::Point2;

    fn line(len: f64) -> Track {
        Track::new(vec![Polyline::line(Point2::origin(), Point2::new(len, 0.0))
            .unwrap()
            .into()])
        .unwrap()
    }

    #[test]
    fn add_and_lookup() {
        let mut store = TrackStore::new();
        let a = store.add(line(1.0));
        let b = store.add_named("ramp", line(2.0));
        assert_eq!(store.len(), 2);
        assert!((store.track(a).unwrap().total_length() - 1.0).abs() < 1e-12);
        assert_eq!(store.resolve_name("ramp").unwrap(), b);
        assert!((store.by_name("ramp").unwrap().total_length() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn missing_name_is_lookup_error() {
        let store = TrackStore::new();
        assert_eq!(
            store.by_name("nope").unwrap_err(),
            LookupError::TrackNotFound("nope".into())
        );
    }

    #[test]
    fn remove_invalidates_id_and_name() {
        let mut store = TrackStore::new();
        let id = store.add_named("ramp", line(1.0));
        assert!(store.remove(id).is_some());
        assert!(store.track(id).is_err());
        assert!(store.resolve_name("ramp").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn rebinding_a_name_keeps_old_track() {
        let mut store = TrackStore::new();
        let first = store.add_named("path", line(1.0));
        let second = store.add_named("path", line(3.0));
        assert_eq!(store.resolve_name("path").unwrap(), second);
        assert!(store.track(first).is_ok());
        assert_eq!(store.iter().count(), 2);
    }

    #[test]
    fn tracks_can_be_edited_in_place() {
        let mut store = TrackStore::new();
        let id = store.add(line(1.0));
        store
            .track_mut(id)
            .unwrap()
            .replace_segments(vec![Polyline::line(Point2::origin(), Point2::new(4.0, 0.0))
                .unwrap()
                .into()])
            .unwrap();
        assert!((store.track(id).unwrap().total_length() - 4.0).abs() < 1e-12);
    }
}
