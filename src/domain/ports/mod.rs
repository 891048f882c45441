pub mod journal;
pub mod notifier;
pub mod probe;

pub use journal::{IntervalJournal, JournalError};
pub use notifier::{ChangeNotifier, NotificationError};
pub use probe::{IpProbe, ProbeError};
