use tracing::debug;

use crate::detection::Detection;
use crate::track::Track;

/// Creation-ordered registry of every track seen during one processing
/// session, retired tracks included. Ids are dense: a track with id `n`
/// sits at index `n`.
pub struct TrackStore {
    tracks: Vec<Track>,
    next_id: u32,
}

impl TrackStore {
    pub fn new() -> Self {
        Self {
            tracks: Vec::with_capacity(64),
            next_id: 0,
        }
    }

    /// Create a track from an unmatched detection, assigning the next
    /// sequential id.
    pub fn spawn(&mut self, frame_index: u64, det: &Detection) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        debug!(id, class = det.class, frame_index, "track spawned");
        self.tracks.push(Track::new(id, frame_index, det));

        id
    }

    #[inline]
    pub fn get(&self, id: u32) -> Option<&Track> {
        self.tracks.get(id as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[inline]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Tracks in creation order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'_ Track> {
        self.tracks.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Track> {
        self.tracks.iter_mut()
    }
}

impl Default for TrackStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::BBox;

    fn det() -> Detection {
        Detection::new(BBox::ltrb(0.0, 0.0, 10.0, 10.0), 0.9, 0)
    }

    #[test]
    fn ids_are_sequential_from_zero() {
        let mut store = TrackStore::new();

        assert_eq!(store.spawn(0, &det()), 0);
        assert_eq!(store.spawn(0, &det()), 1);
        assert_eq!(store.spawn(3, &det()), 2);
        assert_eq!(store.next_id(), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn tracks_are_indexed_by_id() {
        let mut store = TrackStore::new();
        store.spawn(0, &det());
        let id = store.spawn(5, &det());

        let track = store.get(id).unwrap();
        assert_eq!(track.id, id);
        assert_eq!(track.start_frame, 5);
        assert_eq!(track.last_active_frame, 5);
        assert_eq!(track.absent, -1);
        assert!(!track.retired);
        assert!(store.get(99).is_none());
    }
}
