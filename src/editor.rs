use log::debug;

use crate::config::Config;
use crate::events::EventId;
use crate::protocol::Protocol;
use crate::song::track::TrackId;
use crate::song::Song;
use crate::time::TicksTime;

/// The configuration, the edited song and the undo/redo protocol.
pub struct Editor {
  config: Config,
  song: Song,
  protocol: Protocol,
}

impl Editor {
  pub fn new(config: Config) -> Editor {
    let protocol = Protocol::with_limit(config.history.max_steps);
    Editor {
      config,
      song: Song::new("untitled"),
      protocol,
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn song(&self) -> &Song {
    &self.song
  }

  pub fn song_mut(&mut self) -> &mut Song {
    &mut self.song
  }

  pub fn protocol(&self) -> &Protocol {
    &self.protocol
  }

  pub fn add_track<T>(&mut self, name: T) -> TrackId
  where
    T: Into<String>,
  {
    self.song.add_track(name)
  }

  /// Creates a note with the configured default velocity and channel.
  pub fn add_note(
    &mut self,
    track: TrackId,
    start: TicksTime,
    end: TicksTime,
    note: i32,
  ) -> (EventId, EventId) {
    debug!("add note {} at [{:?}, {:?})", note, start, end);
    self.song.add_note(
      track,
      self.config.notes.channel,
      note,
      self.config.notes.velocity,
      start,
      end,
    )
  }

  pub fn set_note(&mut self, id: EventId, note: i32) -> bool {
    match self.song.note_on_mut(id) {
      Some(event) => {
        event.set_note(note, &mut self.protocol);
        true
      }
      None => false,
    }
  }

  pub fn set_note_velocity(&mut self, id: EventId, velocity: i32) -> bool {
    match self.song.note_on_mut(id) {
      Some(event) => {
        event.set_velocity(velocity, &mut self.protocol);
        true
      }
      None => false,
    }
  }

  /// Moves a note and its off event as one protocol step, preserving the
  /// duration.
  pub fn move_note(&mut self, id: EventId, start: TicksTime) -> bool {
    let (off_id, old_start) = match self.song.note_on(id) {
      Some(event) => (event.off_event(), event.base().tick()),
      None => return false,
    };

    self.protocol.start_step("move note");
    if let Some(event) = self.song.event_mut(id) {
      event.set_tick(start, &mut self.protocol);
    }
    if let Some(off_id) = off_id {
      if let Some(off) = self.song.event_mut(off_id) {
        let off_tick = off.tick();
        let moved = if start >= old_start {
          off_tick + (start - old_start)
        } else {
          off_tick - (old_start - start)
        };
        off.set_tick(moved, &mut self.protocol);
      }
    }
    self.protocol.end_step();
    true
  }

  pub fn undo(&mut self) -> bool {
    self.protocol.undo(&mut self.song)
  }

  pub fn redo(&mut self) -> bool {
    self.protocol.redo(&mut self.song)
  }
}

#[cfg(test)]
mod test {

  use super::*;

  fn editor_with_note() -> (Editor, EventId, EventId) {
    let mut editor = Editor::new(Config::default());
    let track = editor.add_track("piano");
    let (on_id, off_id) =
      editor.add_note(track, TicksTime::new(10), TicksTime::new(106), 64);
    (editor, on_id, off_id)
  }

  #[test]
  pub fn add_note_uses_configured_defaults() {
    let config = Config::from_str(
      r#"
        [notes]
        velocity = 80
        channel = 9
      "#,
    )
    .unwrap();
    let mut editor = Editor::new(config);
    let track = editor.add_track("drums");
    let (on_id, _) = editor.add_note(track, TicksTime::zero(), TicksTime::new(96), 36);

    let note = editor.song().note_on(on_id).unwrap();
    assert_eq!(note.velocity(), 80);
    assert_eq!(note.channel(), 9);
    assert_eq!(note.note(), 36);
  }

  #[test]
  pub fn edit_and_undo_redo() {
    let (mut editor, on_id, _) = editor_with_note();

    assert!(editor.set_note(on_id, 72));
    assert!(editor.set_note_velocity(on_id, 40));

    assert!(editor.undo());
    assert_eq!(editor.song().note_on(on_id).unwrap().velocity(), 100);
    assert!(editor.undo());
    assert_eq!(editor.song().note_on(on_id).unwrap().note(), 64);
    assert!(!editor.undo());

    assert!(editor.redo());
    assert_eq!(editor.song().note_on(on_id).unwrap().note(), 72);
    assert!(editor.redo());
    assert_eq!(editor.song().note_on(on_id).unwrap().velocity(), 40);
    assert!(!editor.redo());
  }

  #[test]
  pub fn editing_missing_note_fails() {
    let (mut editor, on_id, off_id) = editor_with_note();
    assert!(!editor.set_note(off_id, 72));
    editor.song_mut().remove_event(on_id);
    assert!(!editor.set_note(on_id, 72));
    assert!(!editor.set_note_velocity(on_id, 10));
    assert!(!editor.move_note(on_id, TicksTime::zero()));
  }

  #[test]
  pub fn move_note_preserves_duration() {
    let (mut editor, on_id, off_id) = editor_with_note();

    assert!(editor.move_note(on_id, TicksTime::new(50)));
    assert_eq!(editor.song().event(on_id).unwrap().tick(), TicksTime::new(50));
    assert_eq!(
      editor.song().event(off_id).unwrap().tick(),
      TicksTime::new(146)
    );
    assert_eq!(
      editor.song().note_duration(on_id),
      Some(TicksTime::new(96))
    );

    assert!(editor.move_note(on_id, TicksTime::zero()));
    assert_eq!(editor.song().event(off_id).unwrap().tick(), TicksTime::new(96));
  }

  #[test]
  pub fn move_note_undoes_as_one_step() {
    let (mut editor, on_id, off_id) = editor_with_note();

    editor.move_note(on_id, TicksTime::new(50));
    assert_eq!(editor.protocol().undo_depth(), 1);
    assert_eq!(editor.protocol().undo_description(), Some("move note"));

    assert!(editor.undo());
    assert_eq!(editor.song().event(on_id).unwrap().tick(), TicksTime::new(10));
    assert_eq!(
      editor.song().event(off_id).unwrap().tick(),
      TicksTime::new(106)
    );
  }

  #[test]
  pub fn history_limit_comes_from_config() {
    let config = Config::from_str(
      r#"
        [history]
        max_steps = 2
      "#,
    )
    .unwrap();
    let mut editor = Editor::new(config);
    let track = editor.add_track("piano");
    let (on_id, _) = editor.add_note(track, TicksTime::zero(), TicksTime::new(96), 64);

    editor.set_note(on_id, 65);
    editor.set_note(on_id, 66);
    editor.set_note(on_id, 67);

    assert!(editor.undo());
    assert!(editor.undo());
    assert!(!editor.undo());
    assert_eq!(editor.song().note_on(on_id).unwrap().note(), 65);
  }
}
