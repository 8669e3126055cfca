//! Keymap: the live set of bindings, chord dispatch and capture sessions

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use super::action::{ActionKind, FireMode};
use super::binding::{Binding, DEFAULT_REPEAT_DELAY};
use super::capture::{CaptureError, CaptureOutcome, CaptureSession, InputProvider, SessionPoll};
use super::chord::Chord;
use super::config::{parse_keymap_yaml, records_to_yaml, BindingRecord, KeymapError};
use super::controllers::Controllers;
use super::defaults::default_bindings;
use super::factory;
use super::types::KeyCode;

/// Default time a capture may stay open before it is cancelled
pub const DEFAULT_CAPTURE_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity of a binding within one keymap
///
/// Ids increase with creation order and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u64);

impl BindingId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tunables applied to every binding in a keymap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeymapSettings {
    /// Minimum time between two effects of a held level-triggered chord
    pub repeat_delay: Duration,
    /// How long a capture may stay open without a result
    pub capture_timeout: Duration,
}

impl Default for KeymapSettings {
    fn default() -> Self {
        Self {
            repeat_delay: DEFAULT_REPEAT_DELAY,
            capture_timeout: DEFAULT_CAPTURE_TIMEOUT,
        }
    }
}

/// Counts from loading a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// New bindings inserted
    pub added: usize,
    /// Built-ins replaced in place
    pub replaced: usize,
    /// Records that produced no binding
    pub dropped: usize,
}

#[derive(Debug, Clone)]
struct Entry {
    id: BindingId,
    binding: Binding,
    /// Whether the chord was held on the previous update
    down: bool,
}

/// The keymap stores all bindings and dispatches chord presses
#[derive(Debug)]
pub struct Keymap {
    /// Kept sorted by (kind, id)
    entries: Vec<Entry>,
    next_id: u64,
    settings: KeymapSettings,
    capture: Option<CaptureSession>,
    next_capture: u64,
}

impl Keymap {
    /// Create an empty keymap
    pub fn new(settings: KeymapSettings) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            settings,
            capture: None,
            next_capture: 1,
        }
    }

    /// Create a keymap holding the built-in default set
    pub fn with_defaults(settings: KeymapSettings) -> Self {
        let mut keymap = Self::new(settings);
        for binding in default_bindings() {
            keymap.insert(binding);
        }
        keymap
    }

    pub fn settings(&self) -> &KeymapSettings {
        &self.settings
    }

    /// All bindings ordered by action kind, then creation order
    pub fn iter(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
        self.entries.iter().map(|e| (e.id, &e.binding))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: BindingId) -> Option<&Binding> {
        self.position(id).map(|idx| &self.entries[idx].binding)
    }

    /// Mutable access for value and chord edits
    pub fn get_mut(&mut self, id: BindingId) -> Option<&mut Binding> {
        let idx = self.position(id)?;
        Some(&mut self.entries[idx].binding)
    }

    /// First binding of a kind, if any
    pub fn find(&self, kind: ActionKind) -> Option<BindingId> {
        self.entries
            .iter()
            .find(|e| e.binding.kind() == kind)
            .map(|e| e.id)
    }

    /// Insert a binding as given and return its id
    pub fn insert(&mut self, mut binding: Binding) -> BindingId {
        binding.set_repeat_delay(self.settings.repeat_delay);

        let id = BindingId(self.next_id);
        self.next_id += 1;

        let key = (binding.kind(), id);
        let idx = self
            .entries
            .partition_point(|e| (e.binding.kind(), e.id) < key);
        self.entries.insert(
            idx,
            Entry {
                id,
                binding,
                down: false,
            },
        );
        id
    }

    /// Insert a binding created by the user
    pub fn insert_user(&mut self, mut binding: Binding) -> BindingId {
        binding.set_user_defined(true);
        self.insert(binding)
    }

    /// Create a new, unassigned user binding of the given kind
    pub fn add_user_binding(&mut self, kind: ActionKind) -> BindingId {
        let id = self.insert_user(Binding::from_kind(kind));
        tracing::info!(binding = %id, action = %kind, "Added user binding");
        id
    }

    /// Delete a user-defined binding
    ///
    /// Built-ins cannot be deleted; clear their chord instead.
    pub fn delete(&mut self, id: BindingId) -> Result<Binding, KeymapError> {
        let idx = self.position(id).ok_or(KeymapError::UnknownBinding(id))?;
        if !self.entries[idx].binding.is_user_defined() {
            return Err(KeymapError::BuiltIn(id));
        }
        if self.capture_in_flight() == Some(id) {
            self.cancel_capture();
        }
        let entry = self.entries.remove(idx);
        tracing::info!(binding = %id, action = %entry.binding.kind(), "Deleted user binding");
        Ok(entry.binding)
    }

    /// Replace every built-in with the default set
    ///
    /// User-defined bindings are kept.
    pub fn reset_to_defaults(&mut self) {
        if let Some(target) = self.capture_in_flight() {
            if self.get(target).is_some_and(|b| !b.is_user_defined()) {
                self.cancel_capture();
            }
        }
        self.entries.retain(|e| e.binding.is_user_defined());
        for binding in default_bindings() {
            self.insert(binding);
        }
        tracing::info!(bindings = self.entries.len(), "Reset built-in bindings to defaults");
    }

    // ========================================================================
    // Capture
    // ========================================================================

    /// Start capturing a new chord for a binding
    ///
    /// Only one capture may be open across the whole keymap.
    pub fn begin_capture(
        &mut self,
        id: BindingId,
        provider: &mut dyn InputProvider,
    ) -> Result<(), CaptureError> {
        if let Some(session) = &self.capture {
            tracing::debug!(
                requested = %id,
                in_flight = %session.binding(),
                "Capture rejected, another capture is in progress"
            );
            return Err(CaptureError::InFlight(session.binding()));
        }
        if self.position(id).is_none() {
            return Err(CaptureError::UnknownBinding(id));
        }

        let session_id = self.next_capture;
        self.next_capture += 1;
        let (session, completer) = CaptureSession::start(session_id, id);
        self.capture = Some(session);
        tracing::debug!(binding = %id, session = session_id, "Capture started");
        provider.capture_next_chord(completer);
        Ok(())
    }

    /// End the open capture without assigning anything
    pub fn cancel_capture(&mut self) -> Option<BindingId> {
        let session = self.capture.take()?;
        tracing::debug!(binding = %session.binding(), session = session.id(), "Capture cancelled");
        Some(session.binding())
    }

    /// Binding currently waiting for a captured chord
    pub fn capture_in_flight(&self) -> Option<BindingId> {
        self.capture.as_ref().map(CaptureSession::binding)
    }

    /// Check the open capture for a result or a timeout
    pub fn poll_capture(&mut self, elapsed: Duration) -> Option<CaptureOutcome> {
        let session = self.capture.as_mut()?;
        let binding = session.binding();

        match session.poll() {
            SessionPoll::Completed(keys) => {
                self.capture = None;
                let Some(target) = self.get_mut(binding) else {
                    tracing::warn!(binding = %binding, "Captured chord for a binding that no longer exists");
                    return None;
                };
                target.set_chord(Chord::new(keys.clone()));
                tracing::info!(binding = %binding, chord = %target.chord(), "Captured chord assigned");
                Some(CaptureOutcome::Assigned { binding, keys })
            }
            SessionPoll::Abandoned => {
                self.capture = None;
                tracing::warn!(binding = %binding, "Input provider abandoned capture");
                Some(CaptureOutcome::Abandoned { binding })
            }
            SessionPoll::Pending => {
                session.advance(elapsed);
                if session.age() >= self.settings.capture_timeout {
                    self.capture = None;
                    tracing::warn!(binding = %binding, "Capture timed out");
                    Some(CaptureOutcome::TimedOut { binding })
                } else {
                    None
                }
            }
        }
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Per-cycle update: resolve captures, then dispatch held chords
    ///
    /// `held` is every key currently down, in any order. While a capture is
    /// open no binding fires, and on the cycle it ends the held keys only
    /// seed pressed state, so a freshly recorded chord needs a new press.
    pub fn update(
        &mut self,
        held: &[KeyCode],
        controllers: &mut Controllers<'_>,
        elapsed: Duration,
    ) -> Option<CaptureOutcome> {
        let outcome = self.poll_capture(elapsed);

        if self.capture.is_some() {
            self.release_all();
            return outcome;
        }

        if outcome.is_some() {
            for entry in &mut self.entries {
                entry.down = entry.binding.chord().matches_held(held);
            }
            return outcome;
        }

        for entry in &mut self.entries {
            let down = entry.binding.chord().matches_held(held);
            match entry.binding.fire_mode() {
                FireMode::Edge => {
                    if down && !entry.down {
                        tracing::debug!(binding = %entry.id, action = %entry.binding.kind(), "Chord pressed");
                        entry.binding.press(controllers, elapsed);
                    }
                }
                FireMode::Level => {
                    if down {
                        entry.binding.press(controllers, elapsed);
                    } else if entry.down {
                        entry.binding.release();
                    }
                }
            }
            entry.down = down;
        }

        outcome
    }

    fn release_all(&mut self) {
        for entry in &mut self.entries {
            if entry.down {
                entry.binding.release();
                entry.down = false;
            }
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Records for every binding, in iteration order
    pub fn to_records(&self) -> Vec<BindingRecord> {
        self.entries.iter().map(|e| e.binding.to_record()).collect()
    }

    /// Serialize the whole set as keymap YAML
    pub fn to_yaml(&self) -> Result<String, KeymapError> {
        records_to_yaml(&self.to_records())
    }

    /// Load records into this keymap
    ///
    /// Built-in records replace a built-in of the same kind in place
    /// (preferring one with the same location or time unit); user records are
    /// added. Each record is handled independently.
    pub fn load_records<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a BindingRecord>,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        let mut replaced = HashSet::new();
        for record in records {
            self.apply_record(record, &mut replaced, &mut report);
        }
        tracing::info!(
            added = report.added,
            replaced = report.replaced,
            dropped = report.dropped,
            "Loaded binding records"
        );
        report
    }

    /// Load a keymap YAML document into this keymap
    ///
    /// Fails only if the document is not a keymap at all.
    pub fn load_yaml(&mut self, yaml: &str) -> Result<LoadReport, KeymapError> {
        let entries = parse_keymap_yaml(yaml)?;

        let mut report = LoadReport::default();
        let mut replaced = HashSet::new();
        for entry in entries {
            match entry {
                Ok(record) => self.apply_record(&record, &mut replaced, &mut report),
                Err(e) => {
                    tracing::error!(error = %e, "Dropping malformed binding entry");
                    report.dropped += 1;
                }
            }
        }
        tracing::info!(
            added = report.added,
            replaced = report.replaced,
            dropped = report.dropped,
            "Loaded keymap"
        );
        Ok(report)
    }

    fn apply_record(
        &mut self,
        record: &BindingRecord,
        replaced: &mut HashSet<BindingId>,
        report: &mut LoadReport,
    ) {
        let Some(mut binding) = factory::load(record) else {
            report.dropped += 1;
            return;
        };

        if binding.is_user_defined() {
            self.insert(binding);
            report.added += 1;
            return;
        }

        match self.builtin_slot(&binding, replaced) {
            Some(idx) => {
                binding.set_repeat_delay(self.settings.repeat_delay);
                let entry = &mut self.entries[idx];
                replaced.insert(entry.id);
                entry.binding = binding;
                entry.down = false;
                report.replaced += 1;
            }
            None => {
                tracing::debug!(action = %binding.kind(), "No built-in to replace, adding record");
                let id = self.insert(binding);
                replaced.insert(id);
                report.added += 1;
            }
        }
    }

    /// Built-in entry a loaded built-in binding should replace
    fn builtin_slot(&self, binding: &Binding, replaced: &HashSet<BindingId>) -> Option<usize> {
        let candidates: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                !e.binding.is_user_defined()
                    && e.binding.kind() == binding.kind()
                    && !replaced.contains(&e.id)
            })
            .map(|(idx, _)| idx)
            .collect();

        candidates
            .iter()
            .copied()
            .find(|&idx| {
                let existing = &self.entries[idx].binding;
                existing.location() == binding.location()
                    && existing.time_unit() == binding.time_unit()
            })
            .or_else(|| candidates.first().copied())
    }

    fn position(&self, id: BindingId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new(KeymapSettings::default())
    }
}
