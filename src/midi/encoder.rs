use super::messages::Message;
use super::types::U4;

#[inline]
fn u7(d: &u8) -> u8 {
  d & 0x7f
}

#[inline]
fn status_and_channel(status: U4, channel: &U4) -> u8 {
  (status << 4) | (channel & 0x0f)
}

pub struct Encoder;

impl Encoder {
  pub fn data_size(msg: &Message) -> usize {
    match msg {
      Message::NoteOff { .. } => 3,
      Message::NoteOn { .. } => 3,
      Message::ControlChange { .. } => 3,
    }
  }

  pub fn encode(msg: &Message, out: &mut [u8]) {
    match msg {
      Message::NoteOff {
        channel,
        key,
        velocity,
      } => out[..3].copy_from_slice(&[status_and_channel(0b1000, channel), u7(key), u7(velocity)]),
      Message::NoteOn {
        channel,
        key,
        velocity,
      } => out[..3].copy_from_slice(&[status_and_channel(0b1001, channel), u7(key), u7(velocity)]),
      Message::ControlChange {
        channel,
        controller,
        value,
      } => out[..3].copy_from_slice(&[
        status_and_channel(0b1011, channel),
        u7(controller),
        u7(value),
      ]),
    }
  }

  pub fn encode_to_vec(msg: &Message) -> Vec<u8> {
    let mut data = vec![0; Self::data_size(msg)];
    Self::encode(msg, data.as_mut_slice());
    data
  }
}
