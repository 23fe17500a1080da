//! Service layer for FAM
//!
//! The service layer provides business logic on top of the storage layer:
//! registration, the transaction recorder, and read-side queries.

pub mod account;
pub mod budget;
pub mod recorder;
pub mod registration;
pub mod transaction;
pub mod user;

pub use account::{AccountService, AccountSummary};
pub use budget::{BudgetService, BudgetStatus};
pub use recorder::{
    Abort, AbortReason, Notice, Receipt, RecordOutcome, RecordRequest, TransactionRecorder,
};
pub use registration::{RegisterUser, Registration, RegistrationService};
pub use transaction::{TransactionFilter, TransactionService};
pub use user::UserService;
