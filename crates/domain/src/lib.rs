//! `kawari-domain` — the persisted data model.
//!
//! Users and refresh-token records belong to the credential side; the
//! tenant-scoped business records (customers, transactions, invoices,
//! notifications) all carry the `(company_id, owner_id)` pair the scope
//! resolver filters on.

pub mod customer;
pub mod invoice;
pub mod notification;
pub mod record;
pub mod session;
pub mod transaction;
pub mod user;

pub use customer::Customer;
pub use invoice::{Invoice, InvoiceItem, InvoiceStatus};
pub use notification::Notification;
pub use record::TenantRecord;
pub use session::RefreshTokenRecord;
pub use transaction::{Transaction, TransactionKind};
pub use user::{User, UserPublic, normalize_email};
