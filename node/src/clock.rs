//! Wall-clock time source.

use rill_types::{Clock, Timestamp};

/// Reads the system clock. The host guarantees the value is monotonically
/// non-decreasing across operations; wall-clock regressions are the
/// deployment's problem, not the ledger's.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
