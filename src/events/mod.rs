pub mod control_change;
pub mod note_on;
pub mod off_event;

pub use self::control_change::ControlChangeEvent;
pub use self::note_on::NoteOnEvent;
pub use self::off_event::{OffEvent, OffEventPairing};

use uuid::Uuid;

use crate::color::Color;
use crate::midi::types::U4;
use crate::paint::Painter;
use crate::protocol::{Protocol, ProtocolEntry};
use crate::song::track::TrackId;
use crate::time::TicksTime;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct EventId(Uuid);

impl EventId {
  pub fn new() -> EventId {
    EventId(Uuid::new_v4())
  }
}

/// State shared by every event kind. The owning track is held by id only.
#[derive(Debug, Clone)]
pub struct MidiEvent {
  id: EventId,
  channel: U4,
  track: TrackId,
  tick: TicksTime,
  x: i32,
  y: i32,
  width: i32,
  height: i32,
}

impl MidiEvent {
  pub fn new(channel: U4, track: TrackId, tick: TicksTime) -> MidiEvent {
    MidiEvent {
      id: EventId::new(),
      channel,
      track,
      tick,
      x: 0,
      y: 0,
      width: 0,
      height: 0,
    }
  }

  pub fn id(&self) -> EventId {
    self.id
  }

  pub fn channel(&self) -> U4 {
    self.channel
  }

  pub fn track(&self) -> TrackId {
    self.track
  }

  pub fn tick(&self) -> TicksTime {
    self.tick
  }

  pub fn x(&self) -> i32 {
    self.x
  }

  pub fn y(&self) -> i32 {
    self.y
  }

  pub fn width(&self) -> i32 {
    self.width
  }

  pub fn height(&self) -> i32 {
    self.height
  }

  // view-owned geometry, not part of the undo history
  pub fn set_shape(&mut self, x: i32, y: i32, width: i32, height: i32) {
    self.x = x;
    self.y = y;
    self.width = width;
    self.height = height;
  }

  pub fn draw(&self, painter: &mut dyn Painter, color: &Color) {
    painter.set_color(color);
    painter.fill_rect(self.x, self.y, self.width, self.height);
  }

  // the box is view state and stays untouched
  pub fn reload_state(&mut self, other: &MidiEvent) {
    self.channel = other.channel;
    self.track = other.track;
    self.tick = other.tick;
  }
}

pub enum Event {
  NoteOn(NoteOnEvent),
  Off(OffEvent),
  ControlChange(ControlChangeEvent),
}

impl Event {
  pub fn base(&self) -> &MidiEvent {
    match self {
      Event::NoteOn(event) => event.base(),
      Event::Off(event) => event.base(),
      Event::ControlChange(event) => event.base(),
    }
  }

  pub fn base_mut(&mut self) -> &mut MidiEvent {
    match self {
      Event::NoteOn(event) => event.base_mut(),
      Event::Off(event) => event.base_mut(),
      Event::ControlChange(event) => event.base_mut(),
    }
  }

  pub fn id(&self) -> EventId {
    self.base().id()
  }

  pub fn channel(&self) -> U4 {
    self.base().channel()
  }

  pub fn track(&self) -> TrackId {
    self.base().track()
  }

  pub fn tick(&self) -> TicksTime {
    self.base().tick()
  }

  pub fn type_string(&self) -> &'static str {
    match self {
      Event::NoteOn(event) => event.type_string(),
      Event::Off(event) => event.type_string(),
      Event::ControlChange(event) => event.type_string(),
    }
  }

  pub fn copy_entry(&self) -> Box<dyn ProtocolEntry> {
    match self {
      Event::NoteOn(event) => event.copy(),
      Event::Off(event) => event.copy(),
      Event::ControlChange(event) => event.copy(),
    }
  }

  pub fn reload_state(&mut self, entry: &dyn ProtocolEntry) {
    match self {
      Event::NoteOn(event) => event.reload_state(entry),
      Event::Off(event) => event.reload_state(entry),
      Event::ControlChange(event) => event.reload_state(entry),
    }
  }

  pub fn set_tick(&mut self, tick: TicksTime, protocol: &mut Protocol) {
    let before = self.copy_entry();
    self.base_mut().tick = tick;
    let after = self.copy_entry();
    protocol.record(self.id(), before, after);
  }

  pub fn set_channel(&mut self, channel: U4, protocol: &mut Protocol) {
    let before = self.copy_entry();
    self.base_mut().channel = channel;
    let after = self.copy_entry();
    protocol.record(self.id(), before, after);
  }

  pub fn draw(&self, painter: &mut dyn Painter, color: &Color) {
    match self {
      Event::NoteOn(event) => event.draw(painter, color),
      Event::Off(event) => event.base().draw(painter, color),
      Event::ControlChange(event) => event.base().draw(painter, color),
    }
  }
}
