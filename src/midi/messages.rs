use crate::midi::types::{U4, U7};

/// Channel voice messages produced by the editor's event model.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
  NoteOff { channel: U4, key: U7, velocity: U7 },

  NoteOn { channel: U4, key: U7, velocity: U7 },

  ControlChange { channel: U4, controller: U7, value: U7 },
}
