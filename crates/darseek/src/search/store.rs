use super::domain::Listing;

/// Read seam over the external listings store.
///
/// The production store applies its own row-level access control before
/// rows reach this subsystem; implementations return the candidate rows
/// visible to the caller and nothing more. The search core re-checks
/// publication status itself, so an over-returning store cannot leak
/// drafts into results.
pub trait ListingStore: Send + Sync {
    fn listings(&self) -> Result<Vec<Listing>, StoreError>;
}

/// Failures surfaced by a listings store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("listings store unavailable: {0}")]
    Unavailable(String),
    #[error("listings store query timed out")]
    Timeout,
}
