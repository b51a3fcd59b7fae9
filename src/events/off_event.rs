use std::any::Any;
use std::collections::HashMap;

use crate::midi::types::U4;
use crate::protocol::ProtocolEntry;
use crate::song::track::TrackId;
use crate::time::TicksTime;

use super::{EventId, MidiEvent};

/// The note off half of a note. Its note number and channel live on the
/// paired note on event; serialisation resolves through that pair.
#[derive(Debug, Clone)]
pub struct OffEvent {
  event: MidiEvent,
  line: i32,
  on_event: Option<EventId>,
}

impl OffEvent {
  pub fn new(
    channel: U4,
    line: i32,
    track: TrackId,
    tick: TicksTime,
    pairing: &mut OffEventPairing,
  ) -> OffEvent {
    let on_event = pairing.take_on_event(track, line);
    OffEvent {
      event: MidiEvent::new(channel, track, tick),
      line,
      on_event,
    }
  }

  pub fn base(&self) -> &MidiEvent {
    &self.event
  }

  pub fn base_mut(&mut self) -> &mut MidiEvent {
    &mut self.event
  }

  pub fn id(&self) -> EventId {
    self.event.id()
  }

  pub fn line(&self) -> i32 {
    self.line
  }

  pub fn on_event(&self) -> Option<EventId> {
    self.on_event
  }

  pub fn set_on_event(&mut self, on_event: Option<EventId>) {
    self.on_event = on_event;
  }

  pub fn type_string(&self) -> &'static str {
    "Off Event"
  }
}

impl ProtocolEntry for OffEvent {
  fn copy(&self) -> Box<dyn ProtocolEntry> {
    Box::new(self.clone())
  }

  fn reload_state(&mut self, entry: &dyn ProtocolEntry) {
    let other = match entry.as_any().downcast_ref::<OffEvent>() {
      Some(other) => other,
      None => return,
    };
    self.event.reload_state(&other.event);
    self.line = other.line;
    self.on_event = other.on_event;
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}

/// Registry of note on events still waiting for their note off. A note on
/// enters at construction; a note off built on the same track and line
/// takes the oldest waiting one. A nonzero count after a load means
/// unterminated notes.
pub struct OffEventPairing {
  waiting: HashMap<(TrackId, i32), Vec<EventId>>,
}

impl OffEventPairing {
  pub fn new() -> OffEventPairing {
    OffEventPairing {
      waiting: HashMap::new(),
    }
  }

  pub fn enter_on_event(&mut self, track: TrackId, line: i32, id: EventId) {
    self
      .waiting
      .entry((track, line))
      .or_insert_with(Vec::new)
      .push(id);
  }

  pub fn take_on_event(&mut self, track: TrackId, line: i32) -> Option<EventId> {
    match self.waiting.get_mut(&(track, line)) {
      Some(ids) if !ids.is_empty() => Some(ids.remove(0)),
      _ => None,
    }
  }

  pub fn remove_on_event(&mut self, id: EventId) {
    for ids in self.waiting.values_mut() {
      ids.retain(|waiting_id| *waiting_id != id);
    }
  }

  pub fn waiting_count(&self) -> usize {
    self.waiting.values().map(|ids| ids.len()).sum()
  }
}
