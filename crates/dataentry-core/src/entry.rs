// Dataentry Entry Context
//
// Owns all entry state and ties the pieces together: controls edit the
// buffer, every edit restarts the inactivity timer and runs the auto-enter
// check, and commits move the entry into the history.

use std::fmt;
use std::time::Instant;

use crate::config::{AfterEntry, Config, CopyMode};
use crate::control::ControlAction;
use crate::criteria::AutoEnter;
use crate::format::FormatCache;
use crate::host::{EntryEvent, EntryObserver, NoVariables, VariableResolver};
use crate::modifier::{ModifierLatches, MODIFIER_SLOTS};
use crate::pattern::EntryPattern;
use crate::snapshot::Snapshot;
use crate::state::{CursorMove, EntryBuffer, EntryHistory};
use crate::timeout::InactivityTimer;
use crate::Trigger;

/// Holder id used for hold latches applied through [`DataEntry::process`]
pub const ANONYMOUS_CONTROL: &str = "action";

/// Result of handling a control or action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Nothing changed
    Unchanged,
    /// Buffer, cursor or modifiers changed
    Changed,
    /// A commit happened
    Entered,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Unchanged => write!(f, "unchanged"),
            Outcome::Changed => write!(f, "changed"),
            Outcome::Entered => write!(f, "entered"),
        }
    }
}

/// Which value a feedback pattern is tested against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchSource {
    #[default]
    Raw,
    Formatted,
}

/// The entry context
///
/// All state lives here and every host callback goes through a method on
/// it. The inactivity timer is polled: hosts call [`DataEntry::poll_timeout`]
/// from their event loop.
pub struct DataEntry {
    config: Config,
    buffer: EntryBuffer,
    history: EntryHistory,
    latches: ModifierLatches,
    timer: InactivityTimer,
    auto_enter: AutoEnter,
    format_cache: FormatCache,
    resolver: Box<dyn VariableResolver>,
    observers: Vec<Box<dyn EntryObserver>>,
}

fn format_entry(
    cache: &mut FormatCache,
    resolver: &dyn VariableResolver,
    spec: &str,
    raw: &str,
) -> String {
    let spec = resolver.interpolate(spec);
    cache.get(&spec).apply(raw)
}

impl DataEntry {
    pub fn new(config: Config) -> Self {
        Self {
            buffer: EntryBuffer::new(config.entry.max_length),
            history: EntryHistory::new(),
            latches: ModifierLatches::new(),
            timer: InactivityTimer::new(config.timeout()),
            auto_enter: AutoEnter::new(config.auto_enter.clone()),
            format_cache: FormatCache::new(),
            resolver: Box::new(NoVariables),
            observers: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn buffer(&self) -> &EntryBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &EntryHistory {
        &self.history
    }

    pub fn latches(&self) -> &ModifierLatches {
        &self.latches
    }

    pub fn raw(&self) -> &str {
        self.buffer.raw()
    }

    /// Deadline of the pending inactivity timer
    ///
    /// Hosts can use it to size their poll interval.
    pub fn timeout_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Swap in a new configuration
    ///
    /// The pending timer is cancelled and only restarts with the next edit.
    /// The buffer is truncated to the new maximum length.
    pub fn apply_config(&mut self, config: Config) {
        self.timer.cancel();
        self.timer.set_duration(config.timeout());
        self.buffer.set_max_length(config.entry.max_length);
        self.auto_enter = AutoEnter::new(config.auto_enter.clone());
        self.config = config;
        log::debug!(
            "Config applied: format={:?} logic={} timeout={:?}",
            self.config.entry.format,
            self.config.auto_enter.logic,
            self.timer.duration()
        );
        self.notify(EntryEvent::Changed);
    }

    pub fn set_variable_resolver(&mut self, resolver: Box<dyn VariableResolver>) {
        self.resolver = resolver;
    }

    pub fn add_observer(&mut self, observer: Box<dyn EntryObserver>) {
        self.observers.push(observer);
    }

    /// Handle a control press
    ///
    /// With `modifier` set the control holds that modifier slot until it is
    /// released. Otherwise the control's binding runs.
    pub fn on_control_pressed(&mut self, control: &str, modifier: Option<usize>) -> Outcome {
        self.on_control_pressed_at(control, modifier, Instant::now())
    }

    pub fn on_control_pressed_at(
        &mut self,
        control: &str,
        modifier: Option<usize>,
        now: Instant,
    ) -> Outcome {
        if let Some(slot) = modifier {
            return self.apply_modifier(|latches| latches.press(slot, control));
        }

        match self.config.controls.resolve(control) {
            Some(action) => self.dispatch(action, control, now),
            None => {
                log::debug!("No binding for control '{}'", control);
                Outcome::Unchanged
            }
        }
    }

    /// Handle a control release, dropping any modifier holds it had
    pub fn on_control_released(&mut self, control: &str) -> Outcome {
        if self.latches.release_control(control) {
            self.notify(EntryEvent::ModifierChanged);
            Outcome::Changed
        } else {
            Outcome::Unchanged
        }
    }

    /// Run an action directly
    pub fn process(&mut self, action: ControlAction) -> Outcome {
        self.process_at(action, Instant::now())
    }

    pub fn process_at(&mut self, action: ControlAction, now: Instant) -> Outcome {
        self.dispatch(action, ANONYMOUS_CONTROL, now)
    }

    fn dispatch(&mut self, action: ControlAction, control: &str, now: Instant) -> Outcome {
        match action {
            ControlAction::Insert { text, alternates } => {
                let text =
                    ControlAction::insert_text(&text, &alternates, self.latches.active_slot())
                        .to_string();
                if self.latches.consume_onetime() {
                    self.notify(EntryEvent::ModifierChanged);
                }
                self.edit(now, |buffer| buffer.insert(&text))
            }
            ControlAction::Backspace => self.edit(now, |buffer| {
                buffer.backspace();
            }),
            ControlAction::Delete => self.edit(now, |buffer| {
                buffer.delete();
            }),
            ControlAction::CursorLeft => self.edit(now, |b| b.move_cursor(CursorMove::By(-1))),
            ControlAction::CursorRight => self.edit(now, |b| b.move_cursor(CursorMove::By(1))),
            ControlAction::CursorStart => self.edit(now, |b| b.move_cursor(CursorMove::Start)),
            ControlAction::CursorEnd => self.edit(now, |b| b.move_cursor(CursorMove::End)),
            ControlAction::CursorTo { position } => {
                self.edit(now, |b| b.move_cursor(CursorMove::To(position)))
            }
            ControlAction::Clear => self.clear_at(now),
            ControlAction::Set { text } => self.edit(now, |buffer| buffer.set(&text)),
            ControlAction::Enter { copy } => {
                self.enter(copy);
                Outcome::Entered
            }
            ControlAction::Modifier { slot, mode } => {
                self.apply_modifier(|latches| latches.apply(slot, mode, control))
            }
        }
    }

    /// Apply an edit, then restart the timer and run the auto-enter check
    ///
    /// Cursor-only edits restart the timer but skip the check.
    fn edit<F>(&mut self, now: Instant, f: F) -> Outcome
    where
        F: FnOnce(&mut EntryBuffer),
    {
        let before = self.buffer.clone();
        f(&mut self.buffer);
        if self.buffer == before {
            return Outcome::Unchanged;
        }

        self.timer.restart_at(now);
        self.notify(EntryEvent::Changed);

        if self.buffer.raw() != before.raw() && self.check_enter(Trigger::Input) {
            Outcome::Entered
        } else {
            Outcome::Changed
        }
    }

    fn apply_modifier<F, E>(&mut self, f: F) -> Outcome
    where
        F: FnOnce(&mut ModifierLatches) -> Result<(), E>,
        E: fmt::Display,
    {
        match f(&mut self.latches) {
            Ok(()) => {
                self.notify(EntryEvent::ModifierChanged);
                Outcome::Changed
            }
            Err(e) => {
                log::warn!("{}", e);
                Outcome::Unchanged
            }
        }
    }

    /// Run the auto-enter check, committing if it holds
    fn check_enter(&mut self, trigger: Trigger) -> bool {
        let Self {
            auto_enter,
            format_cache,
            resolver,
            config,
            buffer,
            ..
        } = self;
        let raw = buffer.raw();
        let should = auto_enter.should_enter(
            raw,
            || format_entry(format_cache, &**resolver, &config.entry.format, raw),
            trigger,
        );

        if should {
            log::debug!("Auto-enter triggered by {}", trigger);
            self.enter(None);
        }
        should
    }

    /// Fire the inactivity timer if its deadline has passed
    ///
    /// Returns true if the fire led to a commit.
    pub fn poll_timeout(&mut self, now: Instant) -> bool {
        if !self.timer.check_timeout(now) {
            return false;
        }
        log::debug!("Inactivity timeout fired");
        self.check_enter(Trigger::Timer)
    }

    /// Commit the current entry
    ///
    /// `copy` overrides the configured copy mode. Returns the value pushed
    /// into the history; a mode other than raw or formatted pushes nothing
    /// but the commit is still counted.
    pub fn enter(&mut self, copy: Option<CopyMode>) -> Option<String> {
        self.timer.cancel();

        let copy = copy.unwrap_or_else(|| self.config.enter.copy.clone());
        let value = match &copy {
            CopyMode::Raw => Some(self.buffer.raw().to_string()),
            CopyMode::Formatted => Some(self.formatted()),
            CopyMode::Nothing | CopyMode::Unrecognized(_) => {
                log::error!("Copy data unknown: {}", copy);
                None
            }
        };

        if let Some(value) = &value {
            self.history.push(value.clone());
        }
        let counter = self.history.count();
        log::debug!("Entry #{} committed, copy={}", counter, copy);

        // "none" keeps the buffer whatever `after` says
        if copy != CopyMode::Nothing && self.config.enter.after == AfterEntry::Clear {
            self.buffer.clear();
        }

        self.notify(EntryEvent::Entered);
        value
    }

    /// The current entry run through the format spec
    pub fn formatted(&mut self) -> String {
        format_entry(
            &mut self.format_cache,
            &*self.resolver,
            &self.config.entry.format,
            self.buffer.raw(),
        )
    }

    /// Empty the buffer without touching the history
    ///
    /// Like any other buffer mutation this restarts the inactivity timer.
    pub fn clear(&mut self) -> Outcome {
        self.clear_at(Instant::now())
    }

    pub fn clear_at(&mut self, now: Instant) -> Outcome {
        self.edit(now, EntryBuffer::clear)
    }

    /// Release one modifier slot
    pub fn release_modifier(&mut self, slot: usize) -> Outcome {
        self.apply_modifier(|latches| latches.release(slot))
    }

    pub fn release_all_modifiers(&mut self) {
        self.latches.release_all();
        self.notify(EntryEvent::ModifierChanged);
    }

    pub fn modifier_active(&self, slot: usize) -> bool {
        self.latches.is_active(slot)
    }

    /// Test a `/pattern/flags` literal against the raw or formatted entry
    ///
    /// A malformed literal never matches.
    pub fn matches(&mut self, pattern: &str, source: MatchSource) -> bool {
        let pattern = EntryPattern::compile(pattern);
        match source {
            MatchSource::Raw => pattern.is_match(self.buffer.raw()),
            MatchSource::Formatted => pattern.is_match(&self.formatted()),
        }
    }

    pub fn snapshot(&mut self) -> Snapshot {
        let formatted = self.formatted();
        let mut modifiers = [false; MODIFIER_SLOTS];
        for (slot, on) in modifiers.iter_mut().enumerate() {
            *on = self.latches.is_active(slot);
        }
        Snapshot {
            raw: self.buffer.raw().to_string(),
            formatted,
            cursor: self.buffer.cursor_display(&self.config.entry.cursor),
            raw_length: self.buffer.len(),
            cursor_position: self.buffer.cursor(),
            last: self.history.last().to_string(),
            second_last: self.history.second_last().to_string(),
            last_length: self.history.last().chars().count(),
            counter: self.history.counter(),
            modifiers,
        }
    }

    /// Cancel the pending timer; nothing fires after this
    pub fn shutdown(&mut self) {
        self.timer.cancel();
        log::debug!("Entry context shut down");
    }

    fn notify(&mut self, event: EntryEvent) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.notify(event, &snapshot);
        }
    }
}

impl Default for DataEntry {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Debug for DataEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataEntry")
            .field("raw", &self.buffer.raw())
            .field("cursor", &self.buffer.cursor())
            .field("history", &self.history)
            .field("latches", &self.latches.active_slots())
            .field("timer_pending", &self.timer.is_pending())
            .field("observers", &self.observers.len())
            .finish()
    }
}
