use std::any::Any;

use crate::midi::encoder::Encoder;
use crate::midi::messages::Message;
use crate::midi::types::{U4, U7};
use crate::protocol::{Protocol, ProtocolEntry};
use crate::song::track::TrackId;
use crate::time::TicksTime;

use super::{EventId, MidiEvent};

/// A controller change. The value is clamped to [0,127] on every write,
/// the controller number is stored verbatim, like the note number of a
/// note on event.
#[derive(Debug, Clone)]
pub struct ControlChangeEvent {
  event: MidiEvent,
  control: i32,
  value: i32,
}

impl ControlChangeEvent {
  pub fn new(
    control: i32,
    value: i32,
    channel: U4,
    track: TrackId,
    tick: TicksTime,
  ) -> ControlChangeEvent {
    ControlChangeEvent {
      event: MidiEvent::new(channel, track, tick),
      control,
      value,
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

  pub fn channel(&self) -> U4 {
    self.event.channel()
  }

  pub fn control(&self) -> i32 {
    self.control
  }

  pub fn value(&self) -> i32 {
    self.value
  }

  pub fn set_control(&mut self, control: i32, protocol: &mut Protocol) {
    let before = self.copy();
    self.control = control;
    protocol.record(self.id(), before, self.copy());
  }

  pub fn set_value(&mut self, value: i32, protocol: &mut Protocol) {
    let before = self.copy();
    let mut value = value;
    if value < 0 {
      value = 0;
    }
    if value > 127 {
      value = 127;
    }
    self.value = value;
    protocol.record(self.id(), before, self.copy());
  }

  pub fn to_message(&self) -> String {
    format!("cc {} {} {}", self.channel(), self.control, self.value)
  }

  pub fn save(&self) -> Vec<u8> {
    Encoder::encode_to_vec(&Message::ControlChange {
      channel: self.channel(),
      controller: self.control as U7,
      value: self.value as U7,
    })
  }

  pub fn type_string(&self) -> &'static str {
    "Control Change Event"
  }
}

impl ProtocolEntry for ControlChangeEvent {
  fn copy(&self) -> Box<dyn ProtocolEntry> {
    Box::new(self.clone())
  }

  fn reload_state(&mut self, entry: &dyn ProtocolEntry) {
    let other = match entry.as_any().downcast_ref::<ControlChangeEvent>() {
      Some(other) => other,
      None => return,
    };
    self.event.reload_state(&other.event);
    self.control = other.control;
    self.value = other.value;
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}
