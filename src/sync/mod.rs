pub mod codec;
pub mod reconciler;

pub use codec::{decode, encode, SyncCodeError};
pub use reconciler::{Classification, SyncMode, SyncPreview, SyncSummary};
