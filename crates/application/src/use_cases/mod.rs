pub mod claims;

// Re-export use cases
pub use claims::{CheckClaimUseCase, ClaimCheck};
