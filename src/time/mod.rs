pub mod ticks;

pub use self::ticks::TicksTime;
