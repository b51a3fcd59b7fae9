pub mod types;

pub mod messages;
pub use self::messages::Message;

pub mod encoder;
pub use self::encoder::Encoder;
