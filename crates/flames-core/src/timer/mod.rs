mod clock;
mod queue;

pub use clock::{Clock, ManualClock, SystemClock};
pub use queue::{TimerEntry, TimerQueue};
