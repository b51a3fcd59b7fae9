pub mod track;

use std::collections::HashMap;

use log::warn;

use crate::events::off_event::OffEventPairing;
use crate::events::{Event, EventId, NoteOnEvent, OffEvent};
use crate::midi::types::U4;
use crate::protocol::ProtocolEntry;
use crate::time::TicksTime;

use self::track::{MidiTrack, TrackId};

/// The edited document: tracks, events and the on/off pairing registry.
pub struct Song {
  name: String,
  tracks: Vec<MidiTrack>,
  events: HashMap<EventId, Event>,
  order: Vec<EventId>,
  pairing: OffEventPairing,
}

impl Song {
  pub fn new<T>(name: T) -> Song
  where
    T: Into<String>,
  {
    Song {
      name: name.into(),
      tracks: Vec::new(),
      events: HashMap::new(),
      order: Vec::new(),
      pairing: OffEventPairing::new(),
    }
  }

  pub fn get_name(&self) -> &str {
    self.name.as_str()
  }

  pub fn set_name<T>(&mut self, name: T)
  where
    T: Into<String>,
  {
    self.name = name.into();
  }

  pub fn add_track<T>(&mut self, name: T) -> TrackId
  where
    T: Into<String>,
  {
    let track = MidiTrack::new(name);
    let id = track.id();
    self.tracks.push(track);
    id
  }

  pub fn track(&self, id: TrackId) -> Option<&MidiTrack> {
    self.tracks.iter().find(|track| track.id() == id)
  }

  pub fn track_mut(&mut self, id: TrackId) -> Option<&mut MidiTrack> {
    self.tracks.iter_mut().find(|track| track.id() == id)
  }

  pub fn tracks(&self) -> &[MidiTrack] {
    self.tracks.as_slice()
  }

  pub fn pairing(&self) -> &OffEventPairing {
    &self.pairing
  }

  pub fn insert_event(&mut self, event: Event) -> EventId {
    let id = event.id();
    self.order.push(id);
    self.events.insert(id, event);
    id
  }

  /// Creates a note on event at `start` and its off event at `end`,
  /// paired through the registry.
  pub fn add_note(
    &mut self,
    track: TrackId,
    channel: U4,
    note: i32,
    velocity: i32,
    start: TicksTime,
    end: TicksTime,
  ) -> (EventId, EventId) {
    let on = NoteOnEvent::new(note, velocity, channel, track, start, &mut self.pairing);
    let line = on.line();
    let on_id = self.insert_event(Event::NoteOn(on));

    let off = OffEvent::new(channel, line, track, end, &mut self.pairing);
    let paired = off.on_event();
    let off_id = self.insert_event(Event::Off(off));
    if let Some(paired_id) = paired {
      if let Some(Event::NoteOn(on)) = self.events.get_mut(&paired_id) {
        on.set_off_event(Some(off_id));
      }
    }

    (on_id, off_id)
  }

  /// Removing a note on also removes its paired off event.
  pub fn remove_event(&mut self, id: EventId) -> bool {
    match self.events.remove(&id) {
      Some(Event::NoteOn(on)) => {
        self.pairing.remove_on_event(id);
        if let Some(off_id) = on.off_event() {
          self.events.remove(&off_id);
          self.order.retain(|event_id| *event_id != off_id);
        }
        self.order.retain(|event_id| *event_id != id);
        true
      }
      Some(Event::Off(off)) => {
        if let Some(on_id) = off.on_event() {
          if let Some(Event::NoteOn(on)) = self.events.get_mut(&on_id) {
            on.set_off_event(None);
          }
        }
        self.order.retain(|event_id| *event_id != id);
        true
      }
      Some(_) => {
        self.order.retain(|event_id| *event_id != id);
        true
      }
      None => false,
    }
  }

  pub fn event(&self, id: EventId) -> Option<&Event> {
    self.events.get(&id)
  }

  pub fn event_mut(&mut self, id: EventId) -> Option<&mut Event> {
    self.events.get_mut(&id)
  }

  pub fn note_on(&self, id: EventId) -> Option<&NoteOnEvent> {
    match self.events.get(&id) {
      Some(Event::NoteOn(event)) => Some(event),
      _ => None,
    }
  }

  pub fn note_on_mut(&mut self, id: EventId) -> Option<&mut NoteOnEvent> {
    match self.events.get_mut(&id) {
      Some(Event::NoteOn(event)) => Some(event),
      _ => None,
    }
  }

  pub fn events_count(&self) -> usize {
    self.events.len()
  }

  pub fn note_duration(&self, id: EventId) -> Option<TicksTime> {
    let on = self.note_on(id)?;
    let off_id = on.off_event()?;
    let off = self.event(off_id)?;
    Some(off.tick() - on.base().tick())
  }

  pub fn event_bytes(&self, id: EventId) -> Option<Vec<u8>> {
    match self.events.get(&id)? {
      Event::NoteOn(event) => Some(event.save()),
      Event::ControlChange(event) => Some(event.save()),
      Event::Off(event) => match event.on_event().and_then(|on_id| self.note_on(on_id)) {
        Some(on) => Some(on.save_off_event()),
        None => {
          warn!("off event {:?} has no paired note on", id);
          None
        }
      },
    }
  }

  pub fn event_message(&self, id: EventId) -> Option<String> {
    match self.events.get(&id)? {
      Event::NoteOn(event) => Some(event.to_message()),
      Event::ControlChange(event) => Some(event.to_message()),
      Event::Off(event) => match event.on_event().and_then(|on_id| self.note_on(on_id)) {
        Some(on) => Some(on.off_event_message()),
        None => {
          warn!("off event {:?} has no paired note on", id);
          None
        }
      },
    }
  }

  /// Raw MIDI bytes of every event, in tick order. Insertion order breaks
  /// ties.
  pub fn save(&self) -> Vec<u8> {
    let mut entries: Vec<(TicksTime, EventId)> = self
      .order
      .iter()
      .filter_map(|id| self.events.get(id).map(|event| (event.tick(), *id)))
      .collect();
    entries.sort_by_key(|entry| entry.0);

    let mut data = Vec::new();
    for entry in entries.iter() {
      if let Some(bytes) = self.event_bytes(entry.1) {
        data.extend_from_slice(bytes.as_slice());
      }
    }
    data
  }

  /// Restores a prior snapshot into the live event. A missing id or a
  /// snapshot of another kind is tolerated silently.
  pub fn reload_event(&mut self, id: EventId, entry: &dyn ProtocolEntry) {
    if let Some(event) = self.events.get_mut(&id) {
      event.reload_state(entry);
    }
  }
}
