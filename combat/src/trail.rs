//! Bullet trail handles
//!
//! Trails are drawn by the rendering layer; the simulation only owns their
//! lifetime. A handle cannot be cloned and `release` consumes it, so a trail
//! can never be freed twice no matter which termination path runs.

use bevy::prelude::*;
use std::collections::HashMap;

/// Owning token for one live trail. Deliberately not `Clone`/`Copy`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TrailHandle(u64);

/// Line segment the renderer draws for one trail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailLine {
    pub origin: Vec3,
    pub endpoint: Vec3,
}

/// All live trails, keyed by handle.
#[derive(Resource, Default)]
pub struct TrailRegistry {
    next_id: u64,
    live: HashMap<u64, TrailLine>,
    released: u64,
}

impl TrailRegistry {
    /// Allocate a trail anchored at `origin`.
    pub fn acquire(&mut self, origin: Vec3) -> TrailHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(
            id,
            TrailLine {
                origin,
                endpoint: origin,
            },
        );
        TrailHandle(id)
    }

    /// Move the visible end of the trail.
    pub fn set_endpoint(&mut self, handle: &TrailHandle, endpoint: Vec3) {
        if let Some(line) = self.live.get_mut(&handle.0) {
            line.endpoint = endpoint;
        }
    }

    /// Re-anchor a trail, e.g. after a ricochet.
    pub fn set_origin(&mut self, handle: &TrailHandle, origin: Vec3) {
        if let Some(line) = self.live.get_mut(&handle.0) {
            line.origin = origin;
            line.endpoint = origin;
        }
    }

    /// Free a trail. Consumes the handle, so this happens exactly once.
    pub fn release(&mut self, handle: TrailHandle) {
        if self.live.remove(&handle.0).is_some() {
            self.released += 1;
        } else {
            warn!("released trail {:?} that was not live", handle.0);
        }
    }

    pub fn line(&self, handle: &TrailHandle) -> Option<TrailLine> {
        self.live.get(&handle.0).copied()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total trails freed since startup.
    pub fn released_count(&self) -> u64 {
        self.released
    }

    /// Lines for the renderer.
    pub fn iter_lines(&self) -> impl Iterator<Item = &TrailLine> {
        self.live.values()
    }
}
