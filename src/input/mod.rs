pub mod events;
pub mod handler;
pub mod search;

// Re-export the essential types
pub use events::{Intent, PanDirection};
pub use handler::{HostUpdate, IntentHandler};
pub use search::{SearchDispatcher, SearchOutcome, SearchQuery};
