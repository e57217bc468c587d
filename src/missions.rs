//! Orphan-pin reconciliation ("Missions").
//!
//! Flow: load the orphan set, pick one pin, enter a SKU, link, and drop the
//! pin locally. The [`board::MissionBoard`] ties the pieces together for both
//! the one-shot commands and the interactive view.
pub mod board;
pub mod linker;
pub mod loader;
pub mod session;

pub use board::MissionBoard;
pub use session::AdoptionSession;
