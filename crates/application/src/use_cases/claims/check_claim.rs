use crate::ports::DnsResolver;
use dnsproof_domain::{CandidateName, ClaimProof, DnsMessage, DomainError, QueryBuilder};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of one claim check: the gated name, the query that was sent and
/// the decoded answer it produced.
#[derive(Debug, Clone)]
pub struct ClaimCheck {
    pub candidate: CandidateName,
    pub query: DnsMessage,
    pub response: DnsMessage,
    pub proof: ClaimProof,
    pub elapsed_ms: u64,
}

impl ClaimCheck {
    /// TXT strings of the answer section, each record's segments joined.
    pub fn txt_strings(&self) -> Vec<String> {
        self.response
            .answers
            .iter()
            .filter_map(|record| record.data.txt_joined())
            .map(|joined| String::from_utf8_lossy(&joined).into_owned())
            .collect()
    }
}

pub struct CheckClaimUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl CheckClaimUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// Gate `name`, query `_ens.<name>` TXT and extract claim addresses.
    ///
    /// An ineligible name returns `EligibilityRejected` before the resolver
    /// is touched.
    pub async fn execute(&self, name: &str) -> Result<ClaimCheck, DomainError> {
        let candidate = match CandidateName::parse(name) {
            Ok(candidate) => candidate,
            Err(e) => {
                debug!(name = %name, "Name rejected by eligibility gate");
                return Err(e);
            }
        };

        let query = QueryBuilder::build_proof_query(&candidate);
        let proof_domain = candidate.proof_domain();

        debug!(
            name = %candidate,
            shape = %candidate.shape(),
            query_id = query.id,
            endpoint = %self.resolver.endpoint(),
            "Querying claim proof"
        );

        let start = Instant::now();
        let response = self.resolver.resolve(&query).await.map_err(|e| {
            warn!(error = %e, domain = %proof_domain, "Claim proof lookup failed");
            e
        })?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let proof = ClaimProof::from_message(&proof_domain, &response);

        info!(
            domain = %proof_domain,
            rcode = %response.response_code(),
            answers = response.answers.len(),
            addresses = proof.addresses.len(),
            elapsed_ms,
            "Claim proof resolved"
        );

        Ok(ClaimCheck {
            candidate,
            query,
            response,
            proof,
            elapsed_ms,
        })
    }
}
