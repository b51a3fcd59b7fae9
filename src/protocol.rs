use std::any::Any;

use log::{debug, trace};

use crate::events::EventId;
use crate::song::Song;

const DEFAULT_MAX_STEPS: usize = 128;

/// A snapshot of an event's state, taken before and after every mutation.
///
/// Snapshots of different concrete kinds share one history stack, so
/// `reload_state` checks the kind at runtime and silently ignores a
/// mismatch instead of failing.
pub trait ProtocolEntry {
  fn copy(&self) -> Box<dyn ProtocolEntry>;
  fn reload_state(&mut self, entry: &dyn ProtocolEntry);
  fn as_any(&self) -> &dyn Any;
}

pub struct ProtocolItem {
  event_id: EventId,
  before: Box<dyn ProtocolEntry>,
  after: Box<dyn ProtocolEntry>,
}

impl ProtocolItem {
  pub fn new(
    event_id: EventId,
    before: Box<dyn ProtocolEntry>,
    after: Box<dyn ProtocolEntry>,
  ) -> ProtocolItem {
    ProtocolItem {
      event_id,
      before,
      after,
    }
  }
}

pub struct ProtocolStep {
  description: String,
  items: Vec<ProtocolItem>,
}

impl ProtocolStep {
  fn new<T>(description: T) -> ProtocolStep
  where
    T: Into<String>,
  {
    ProtocolStep {
      description: description.into(),
      items: Vec::new(),
    }
  }
}

pub struct Protocol {
  undo_steps: Vec<ProtocolStep>,
  redo_steps: Vec<ProtocolStep>,
  open_step: Option<ProtocolStep>,
  max_steps: usize,
}

impl Protocol {
  pub fn new() -> Protocol {
    Protocol::with_limit(DEFAULT_MAX_STEPS)
  }

  pub fn with_limit(max_steps: usize) -> Protocol {
    Protocol {
      undo_steps: Vec::new(),
      redo_steps: Vec::new(),
      open_step: None,
      max_steps,
    }
  }

  /// Opens a named step; every `record` until `end_step` lands in it and
  /// the whole group is undone as one action.
  pub fn start_step<T>(&mut self, description: T)
  where
    T: Into<String>,
  {
    self.close_step();
    self.open_step = Some(ProtocolStep::new(description));
  }

  pub fn end_step(&mut self) {
    self.close_step();
  }

  /// Registers one (pre-mutation, post-mutation) snapshot pair. Any
  /// recorded change invalidates the redo stack.
  pub fn record(
    &mut self,
    event_id: EventId,
    before: Box<dyn ProtocolEntry>,
    after: Box<dyn ProtocolEntry>,
  ) {
    trace!("protocol: record change for event {:?}", event_id);
    self.redo_steps.clear();
    let item = ProtocolItem::new(event_id, before, after);
    match self.open_step.as_mut() {
      Some(step) => step.items.push(item),
      None => {
        let mut step = ProtocolStep::new("edit");
        step.items.push(item);
        self.push_step(step);
      }
    }
  }

  pub fn undo(&mut self, song: &mut Song) -> bool {
    self.close_step();
    match self.undo_steps.pop() {
      Some(step) => {
        debug!("protocol: undo {}", step.description);
        for item in step.items.iter().rev() {
          song.reload_event(item.event_id, item.before.as_ref());
        }
        self.redo_steps.push(step);
        true
      }
      None => false,
    }
  }

  pub fn redo(&mut self, song: &mut Song) -> bool {
    self.close_step();
    match self.redo_steps.pop() {
      Some(step) => {
        debug!("protocol: redo {}", step.description);
        for item in step.items.iter() {
          song.reload_event(item.event_id, item.after.as_ref());
        }
        self.undo_steps.push(step);
        true
      }
      None => false,
    }
  }

  pub fn undo_depth(&self) -> usize {
    self.undo_steps.len()
  }

  pub fn redo_depth(&self) -> usize {
    self.redo_steps.len()
  }

  pub fn undo_description(&self) -> Option<&str> {
    self.undo_steps.last().map(|step| step.description.as_str())
  }

  fn close_step(&mut self) {
    if let Some(step) = self.open_step.take() {
      if !step.items.is_empty() {
        self.push_step(step);
      }
    }
  }

  fn push_step(&mut self, step: ProtocolStep) {
    self.undo_steps.push(step);
    if self.undo_steps.len() > self.max_steps {
      self.undo_steps.remove(0);
    }
  }
}
