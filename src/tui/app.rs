use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use dataentry_core::{Config, DataEntry, EntryEvent, EntryObserver, Outcome, Snapshot};

const MAX_LOG_LINES: usize = 800;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pane {
    Entry,
    Log,
}

/// Collects committed values for the log pane
struct CommitLog {
    lines: Rc<RefCell<Vec<String>>>,
}

impl EntryObserver for CommitLog {
    fn notify(&mut self, event: EntryEvent, snapshot: &Snapshot) {
        if event != EntryEvent::Entered {
            return;
        }
        let mut lines = self.lines.borrow_mut();
        lines.push(format!("#{} {:?}", snapshot.counter, snapshot.last));
        if lines.len() > MAX_LOG_LINES {
            let excess = lines.len() - MAX_LOG_LINES;
            lines.drain(0..excess);
        }
    }
}

pub struct App {
    pub focused_pane: Pane,
    pub entry: DataEntry,
    pub snapshot: Snapshot,
    pub config_path: Option<PathBuf>,
    pub status: String,
    pub log: Rc<RefCell<Vec<String>>>,
    pub log_scroll: usize,
}

impl App {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut entry = DataEntry::new(config);
        entry.add_observer(Box::new(CommitLog {
            lines: Rc::clone(&log),
        }));
        let snapshot = entry.snapshot();

        Self {
            focused_pane: Pane::Entry,
            entry,
            snapshot,
            config_path,
            status: "Ready".to_string(),
            log,
            log_scroll: 0,
        }
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = msg.into();
    }

    pub fn log_len(&self) -> usize {
        self.log.borrow().len()
    }

    /// Fire the inactivity timer if due and refresh the rendered snapshot
    pub fn tick(&mut self, now: Instant) {
        if self.entry.poll_timeout(now) {
            self.set_status("Entered after inactivity");
        }
        self.refresh();
    }

    pub fn refresh(&mut self) {
        self.snapshot = self.entry.snapshot();
    }

    /// Feed one control press and release to the entry
    pub fn press_control(&mut self, control: &str) {
        let outcome = self.entry.on_control_pressed(control, None);
        self.entry.on_control_released(control);
        match outcome {
            Outcome::Entered => self.set_status(format!("Entered via '{}'", control)),
            Outcome::Unchanged => self.set_status(format!("'{}' had no effect", control)),
            Outcome::Changed => {}
        }
        self.refresh();
    }

    pub fn enter_now(&mut self) {
        self.entry.enter(None);
        self.set_status("Entered manually");
        self.refresh();
    }

    /// Re-read the config file and apply it
    pub fn reload_config(&mut self) {
        let loaded = match &self.config_path {
            Some(path) => Config::from_file(path),
            None => Config::load_default(),
        };
        match loaded {
            Ok(config) => {
                self.entry.apply_config(config);
                self.set_status("Config reloaded");
            }
            Err(e) => self.set_status(format!("Config reload failed: {}", e)),
        }
        self.refresh();
    }

    pub fn cycle_pane(&mut self) {
        self.focused_pane = match self.focused_pane {
            Pane::Entry => Pane::Log,
            Pane::Log => Pane::Entry,
        };
    }

    pub fn shutdown(&mut self) {
        self.entry.shutdown();
    }
}
