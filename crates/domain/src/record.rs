use kawari_core::{RecordId, TenantId, UserId};

/// Ownership accessors shared by every tenant-scoped business record.
///
/// `company_id` and `owner_id` are stamped from the authenticated identity
/// at creation time and never change; the generic record store relies on
/// them to apply the scope filter uniformly.
pub trait TenantRecord {
    fn record_id(&self) -> RecordId;
    fn company_id(&self) -> TenantId;
    fn owner_id(&self) -> UserId;
}
