pub mod export;
pub mod notify;
pub mod suggest;

pub use export::ExportError;
pub use notify::NotificationCenter;
pub use suggest::{SuggestError, SuggestedTask};
