//!
//! The transaction envelope, signing, and results.
//!

pub mod request;
pub mod result;
pub mod signed;


pub use self::request::TransactionRequest;
pub use self::result::DecodedEvent;
pub use self::result::LogEntry;
pub use self::result::Status;
pub use self::result::TransactionResult;
pub use self::signed::RecoveredTransaction;
pub use self::signed::SignedTransaction;
