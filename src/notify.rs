// src/notify.rs
//
// Toast-style notifications. Each entry lives on its own clock:
// shown for NOTIFY_TTL, then fading for NOTIFY_FADE, then gone.
// Nothing is deduplicated or rate limited.

use std::time::{Duration, Instant};

use crate::config::consts::{NOTIFY_FADE_MS, NOTIFY_TTL_MS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✔",
            Severity::Error   => "⛔",
            Severity::Warning => "⚠",
            Severity::Info    => "ℹ",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Severity::Info    => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error   => "error",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Shown,
    /// Fade started at this instant.
    Fading(Instant),
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created: Instant,
    pub phase: Phase,
}

impl Notification {
    /// 1.0 while shown, ramps to 0.0 across the fade.
    pub fn opacity(&self, now: Instant, fade: Duration) -> f32 {
        match self.phase {
            Phase::Shown => 1.0,
            Phase::Fading(since) => {
                if fade.is_zero() { return 0.0; }
                let t = now.saturating_duration_since(since).as_secs_f32() / fade.as_secs_f32();
                (1.0 - t).clamp(0.0, 1.0)
            }
        }
    }
}

pub struct NotificationCenter {
    items: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
    fade: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_timing(
            Duration::from_millis(NOTIFY_TTL_MS),
            Duration::from_millis(NOTIFY_FADE_MS),
        )
    }
}

impl NotificationCenter {
    pub fn with_timing(ttl: Duration, fade: Duration) -> Self {
        Self { items: Vec::new(), next_id: 1, ttl, fade }
    }

    pub fn fade(&self) -> Duration { self.fade }

    /// Append a notification stamped `now`. Returns its id.
    pub fn notify_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        logd!("Notify[{}]: {}", severity.tag(), message);
        self.items.push(Notification {
            id,
            message,
            severity,
            created: now,
            phase: Phase::Shown,
        });
        id
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.notify_at(message, severity, Instant::now())
    }

    /// Close button: start fading right away. Unknown ids are ignored.
    pub fn dismiss_at(&mut self, id: u64, now: Instant) {
        if let Some(n) = self.items.iter_mut().find(|n| n.id == id) {
            if n.phase == Phase::Shown {
                n.phase = Phase::Fading(now);
            }
        }
    }

    pub fn dismiss(&mut self, id: u64) {
        self.dismiss_at(id, Instant::now())
    }

    /// Advance lifecycles: expire shown entries, drop fully faded ones.
    pub fn tick(&mut self, now: Instant) {
        let (ttl, fade) = (self.ttl, self.fade);
        for n in &mut self.items {
            if n.phase == Phase::Shown && now.saturating_duration_since(n.created) >= ttl {
                n.phase = Phase::Fading(n.created + ttl);
            }
        }
        self.items.retain(|n| match n.phase {
            Phase::Shown => true,
            Phase::Fading(since) => now.saturating_duration_since(since) < fade,
        });
    }

    /// Live notifications, oldest first.
    pub fn visible(&self) -> &[Notification] { &self.items }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn last(&self) -> Option<&Notification> { self.items.last() }

    /// Take everything (CLI prints and forgets).
    pub fn drain(&mut self) -> Vec<Notification> { std::mem::take(&mut self.items) }

    /// When the next visible change happens, for repaint scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.items
            .iter()
            .map(|n| match n.phase {
                Phase::Shown => n.created + self.ttl,
                Phase::Fading(since) => since + self.fade,
            })
            .min()
    }
}
