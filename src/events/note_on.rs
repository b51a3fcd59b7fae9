use std::any::Any;

use crate::color::Color;
use crate::midi::encoder::Encoder;
use crate::midi::messages::Message;
use crate::midi::types::{U4, U7};
use crate::paint::Painter;
use crate::protocol::{Protocol, ProtocolEntry};
use crate::song::track::TrackId;
use crate::time::TicksTime;

use super::off_event::OffEventPairing;
use super::{EventId, MidiEvent};

/// A note on event. Velocity is clamped to [0,127] on every write; the
/// note number is stored verbatim, byte emission masks it to 7 bits.
#[derive(Debug, Clone)]
pub struct NoteOnEvent {
  event: MidiEvent,
  note: i32,
  velocity: i32,
  off_event: Option<EventId>,
}

impl NoteOnEvent {
  pub fn new(
    note: i32,
    velocity: i32,
    channel: U4,
    track: TrackId,
    tick: TicksTime,
    pairing: &mut OffEventPairing,
  ) -> NoteOnEvent {
    let event = NoteOnEvent {
      event: MidiEvent::new(channel, track, tick),
      note,
      velocity,
      off_event: None,
    };
    // registered here because the pairing key is the line, which is not
    // known until the note is stored
    pairing.enter_on_event(track, event.line(), event.id());
    event
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

  pub fn note(&self) -> i32 {
    self.note
  }

  pub fn velocity(&self) -> i32 {
    self.velocity
  }

  /// Display line, higher pitches draw higher on screen.
  pub fn line(&self) -> i32 {
    127 - self.note
  }

  pub fn off_event(&self) -> Option<EventId> {
    self.off_event
  }

  pub fn set_off_event(&mut self, off_event: Option<EventId>) {
    self.off_event = off_event;
  }

  pub fn set_velocity(&mut self, velocity: i32, protocol: &mut Protocol) {
    let before = self.copy();
    let mut velocity = velocity;
    if velocity < 0 {
      velocity = 0;
    }
    if velocity > 127 {
      velocity = 127;
    }
    self.velocity = velocity;
    protocol.record(self.id(), before, self.copy());
  }

  pub fn set_note(&mut self, note: i32, protocol: &mut Protocol) {
    let before = self.copy();
    self.note = note;
    protocol.record(self.id(), before, self.copy());
  }

  pub fn to_message(&self) -> String {
    format!("noteon {} {} {}", self.channel(), self.note, self.velocity)
  }

  pub fn off_event_message(&self) -> String {
    format!("noteoff {} {}", self.channel(), self.note)
  }

  pub fn save(&self) -> Vec<u8> {
    Encoder::encode_to_vec(&Message::NoteOn {
      channel: self.channel(),
      key: self.note as U7,
      velocity: self.velocity as U7,
    })
  }

  pub fn save_off_event(&self) -> Vec<u8> {
    Encoder::encode_to_vec(&Message::NoteOff {
      channel: self.channel(),
      key: self.note as U7,
      velocity: 0,
    })
  }

  pub fn type_string(&self) -> &'static str {
    "Note On Event"
  }

  pub fn draw(&self, painter: &mut dyn Painter, color: &Color) {
    self.event.draw(painter, color);
    painter.set_color(&Color::white());
    painter.draw_text(
      self.event.x() + 1,
      self.event.y() + self.event.height() - 2,
      key_label(self.note).as_str(),
    );
  }
}

impl ProtocolEntry for NoteOnEvent {
  fn copy(&self) -> Box<dyn ProtocolEntry> {
    Box::new(self.clone())
  }

  fn reload_state(&mut self, entry: &dyn ProtocolEntry) {
    let other = match entry.as_any().downcast_ref::<NoteOnEvent>() {
      Some(other) => other,
      None => return,
    };
    self.event.reload_state(&other.event);
    self.note = other.note;
    self.velocity = other.velocity;
    self.off_event = other.off_event;
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}

/// Pitch class label with octave marks, reduced into [60,72): a `-` per
/// octave raised to get there, a `+` per single octave reduced, a `*` per
/// reduction by three octaves at once.
fn key_label(note: i32) -> String {
  let mut label = String::new();
  let mut note_id = note + 12;
  while note_id >= 72 || note_id < 60 {
    if note_id < 60 {
      label.insert(0, '-');
      note_id += 12;
    } else if note_id >= 72 + 24 {
      label.insert(0, '*');
      note_id -= 36;
    } else {
      label.insert(0, '+');
      note_id -= 12;
    }
  }
  let name = match note_id - 60 {
    0 => "1",
    1 => "1#",
    2 => "2",
    3 => "2#",
    4 => "3",
    5 => "4",
    6 => "4#",
    7 => "5",
    8 => "5#",
    9 => "6",
    10 => "6#",
    _ => "7",
  };
  label.push_str(name);
  label
}

#[cfg(test)]
mod test {

  use super::*;

  use crate::events::off_event::OffEventPairing;
  use crate::song::track::TrackId;

  enum PaintOp {
    SetColor(String),
    FillRect(i32, i32, i32, i32),
    DrawText(i32, i32, String),
  }

  struct RecordingPainter {
    ops: Vec<PaintOp>,
  }

  impl RecordingPainter {
    fn new() -> RecordingPainter {
      RecordingPainter { ops: Vec::new() }
    }
  }

  impl Painter for RecordingPainter {
    fn set_color(&mut self, color: &Color) {
      self.ops.push(PaintOp::SetColor(color.get_value().to_string()));
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
      self.ops.push(PaintOp::FillRect(x, y, width, height));
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
      self.ops.push(PaintOp::DrawText(x, y, text.to_string()));
    }
  }

  fn note_event(note: i32, velocity: i32, channel: u8) -> NoteOnEvent {
    let mut pairing = OffEventPairing::new();
    NoteOnEvent::new(
      note,
      velocity,
      channel,
      TrackId::new(),
      TicksTime::zero(),
      &mut pairing,
    )
  }

  #[test]
  pub fn accessors() {
    let event = note_event(64, 100, 3);
    assert_eq!(event.note(), 64);
    assert_eq!(event.velocity(), 100);
    assert_eq!(event.channel(), 3);
    assert_eq!(event.type_string(), "Note On Event");
  }

  #[test]
  pub fn line_inverts_note() {
    assert_eq!(note_event(0, 100, 0).line(), 127);
    assert_eq!(note_event(64, 100, 0).line(), 63);
    assert_eq!(note_event(127, 100, 0).line(), 0);
  }

  #[test]
  pub fn set_velocity_clamps() {
    let mut protocol = Protocol::new();
    let mut event = note_event(64, 100, 0);
    for (input, expected) in
      [(-1, 0), (0, 0), (64, 64), (127, 127), (128, 127), (300, 127)].iter()
    {
      event.set_velocity(*input, &mut protocol);
      assert_eq!(event.velocity(), *expected);
    }
  }

  #[test]
  pub fn set_note_stores_verbatim() {
    let mut protocol = Protocol::new();
    let mut event = note_event(64, 100, 0);
    for input in [-5, 0, 127, 128, 300].iter() {
      event.set_note(*input, &mut protocol);
      assert_eq!(event.note(), *input);
    }
  }

  #[test]
  pub fn every_mutation_is_recorded() {
    let mut protocol = Protocol::new();
    let mut event = note_event(64, 100, 0);
    event.set_velocity(10, &mut protocol);
    event.set_note(65, &mut protocol);
    assert_eq!(protocol.undo_depth(), 2);
  }

  #[test]
  pub fn save_note_on_bytes() {
    assert_eq!(note_event(0, 0, 0).save(), vec![0x90, 0, 0]);
    assert_eq!(note_event(127, 127, 15).save(), vec![0x9f, 127, 127]);
    assert_eq!(note_event(64, 100, 3).save(), vec![0x93, 64, 100]);
    for event in [note_event(60, 90, 0), note_event(12, 1, 9)].iter() {
      let data = event.save();
      assert_eq!(data.len(), 3);
      assert_eq!(data[0] >> 4, 0x9);
      assert_eq!(data[0] & 0x0f, event.channel());
    }
  }

  #[test]
  pub fn save_off_event_bytes() {
    assert_eq!(note_event(0, 0, 0).save_off_event(), vec![0x80, 0, 0]);
    assert_eq!(
      note_event(127, 127, 15).save_off_event(),
      vec![0x8f, 127, 0]
    );
    let data = note_event(64, 100, 3).save_off_event();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0] >> 4, 0x8);
    assert_eq!(data[2], 0x00);
  }

  #[test]
  pub fn messages() {
    assert_eq!(note_event(0, 0, 0).to_message(), "noteon 0 0 0");
    assert_eq!(note_event(127, 127, 15).to_message(), "noteon 15 127 127");
    assert_eq!(note_event(64, 100, 3).to_message(), "noteon 3 64 100");
    assert_eq!(note_event(64, 100, 3).off_event_message(), "noteoff 3 64");
    assert_eq!(note_event(0, 0, 0).off_event_message(), "noteoff 0 0");
  }

  #[test]
  pub fn copy_is_independent() {
    let mut protocol = Protocol::new();
    let original = note_event(64, 100, 0);
    let mut copy = original.clone();
    copy.set_note(70, &mut protocol);
    copy.set_velocity(1, &mut protocol);
    assert_eq!(original.note(), 64);
    assert_eq!(original.velocity(), 100);
    assert_eq!(copy.note(), 70);
    assert_eq!(copy.velocity(), 1);
  }

  #[test]
  pub fn reload_state_restores_fields() {
    let mut protocol = Protocol::new();
    let mut event = note_event(64, 100, 0);
    let snapshot = event.copy();
    event.set_note(70, &mut protocol);
    event.set_velocity(1, &mut protocol);

    event.reload_state(snapshot.as_ref());
    assert_eq!(event.note(), 64);
    assert_eq!(event.velocity(), 100);
  }

  #[test]
  pub fn reload_state_ignores_other_kinds() {
    let mut event = note_event(64, 100, 0);
    let other = crate::events::ControlChangeEvent::new(
      7,
      99,
      0,
      TrackId::new(),
      TicksTime::zero(),
    );
    event.reload_state(other.copy().as_ref());
    assert_eq!(event.note(), 64);
    assert_eq!(event.velocity(), 100);
  }

  #[test]
  pub fn construction_registers_pairing() {
    let mut pairing = OffEventPairing::new();
    let track = TrackId::new();
    let event = NoteOnEvent::new(64, 100, 0, track, TicksTime::zero(), &mut pairing);
    assert_eq!(pairing.waiting_count(), 1);
    assert_eq!(pairing.take_on_event(track, event.line()), Some(event.id()));
  }

  #[test]
  pub fn key_labels() {
    assert_eq!(key_label(48), "1");
    assert_eq!(key_label(49), "1#");
    assert_eq!(key_label(55), "5");
    assert_eq!(key_label(59), "7");
    assert_eq!(key_label(60), "+1");
    assert_eq!(key_label(72), "++1");
    assert_eq!(key_label(36), "-1");
    assert_eq!(key_label(0), "----1");
    assert_eq!(key_label(127), "**5");
  }

  #[test]
  pub fn draw_paints_box_then_label() {
    let mut event = note_event(48, 100, 0);
    event.base_mut().set_shape(10, 20, 30, 8);

    let mut painter = RecordingPainter::new();
    event.draw(&mut painter, &Color::from_rgb(200, 0, 0));

    assert_eq!(painter.ops.len(), 4);
    match &painter.ops[0] {
      PaintOp::SetColor(color) => assert_eq!(color, "rgb(200,0,0)"),
      _ => panic!("expected color op"),
    }
    match &painter.ops[1] {
      PaintOp::FillRect(x, y, width, height) => {
        assert_eq!((*x, *y, *width, *height), (10, 20, 30, 8));
      }
      _ => panic!("expected rect op"),
    }
    match &painter.ops[2] {
      PaintOp::SetColor(color) => assert_eq!(color, "white"),
      _ => panic!("expected color op"),
    }
    match &painter.ops[3] {
      PaintOp::DrawText(x, y, text) => {
        assert_eq!((*x, *y), (11, 26));
        assert_eq!(text, "1");
      }
      _ => panic!("expected text op"),
    }
  }
}
