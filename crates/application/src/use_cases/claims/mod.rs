mod check_claim;

pub use check_claim::{CheckClaimUseCase, ClaimCheck};
