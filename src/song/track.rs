use uuid::Uuid;

use crate::color::Color;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct TrackId(Uuid);

impl TrackId {
  pub fn new() -> TrackId {
    TrackId(Uuid::new_v4())
  }
}

pub struct MidiTrack {
  id: TrackId,
  name: String,
  color: Color,
  mute: bool,
  hidden: bool,
}

impl MidiTrack {
  pub fn new<T>(name: T) -> MidiTrack
  where
    T: Into<String>,
  {
    MidiTrack {
      id: TrackId::new(),
      name: name.into(),
      color: Color::from_rgb(128, 128, 128),
      mute: false,
      hidden: false,
    }
  }

  pub fn id(&self) -> TrackId {
    self.id
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

  pub fn get_color(&self) -> &Color {
    &self.color
  }

  pub fn set_color(&mut self, color: Color) {
    self.color = color;
  }

  pub fn is_mute(&self) -> bool {
    self.mute
  }

  pub fn set_mute(&mut self, mute: bool) {
    self.mute = mute;
  }

  pub fn is_hidden(&self) -> bool {
    self.hidden
  }

  pub fn set_hidden(&mut self, hidden: bool) {
    self.hidden = hidden;
  }
}
