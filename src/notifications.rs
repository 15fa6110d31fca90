//! Transient dismissible banners for user-facing failures.

use crate::constants::BANNER_DURATION;
use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    #[serde(skip)]
    pub duration: Duration,
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
            duration: BANNER_DURATION,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Info,
            message: message.into(),
            duration: BANNER_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

#[derive(Debug)]
struct Shown {
    id: u64,
    banner: Banner,
    shown_at: Instant,
}

/// Banners on screen, oldest first. Each expires after its own duration.
#[derive(Debug, Default)]
pub struct BannerQueue {
    shown: VecDeque<Shown>,
    next_id: u64,
}

impl BannerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a banner. Returns its id for dismissal.
    pub fn push(&mut self, banner: Banner, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.shown.push_back(Shown {
            id,
            banner,
            shown_at: now,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.shown.len();
        self.shown.retain(|s| s.id != id);
        self.shown.len() != before
    }

    /// Drop every banner whose time is up. Returns how many were removed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.shown.len();
        self.shown
            .retain(|s| now.saturating_duration_since(s.shown_at) < s.banner.duration);
        before - self.shown.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Banner> {
        self.shown.iter().map(|s| &s.banner)
    }

    pub fn latest(&self) -> Option<&Banner> {
        self.shown.back().map(|s| &s.banner)
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    pub fn clear(&mut self) {
        self.shown.clear();
    }
}
