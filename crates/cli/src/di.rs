use dnsproof_application::use_cases::CheckClaimUseCase;
use dnsproof_domain::Config;
use dnsproof_infrastructure::dns::DohResolver;
use std::sync::Arc;

pub struct UseCases {
    pub check_claim: Arc<CheckClaimUseCase>,
}

impl UseCases {
    pub fn new(config: &Config) -> Self {
        let resolver = Arc::new(DohResolver::from_config(&config.resolver));
        Self {
            check_claim: Arc::new(CheckClaimUseCase::new(resolver)),
        }
    }
}
