use dnsproof_application::use_cases::ClaimCheck;
use dnsproof_domain::classify;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Serialize)]
pub struct EligibilityReport<'a> {
    pub name: &'a str,
    pub eligible: bool,
    pub shape: Option<&'static str>,
}

impl<'a> EligibilityReport<'a> {
    pub fn new(name: &'a str) -> Self {
        let shape = classify(name);
        Self {
            name,
            eligible: shape.is_some(),
            shape: shape.map(|s| s.as_str()),
        }
    }

    pub fn render_text(&self) -> String {
        match self.shape {
            Some(shape) => format!("{}: eligible ({})", self.name, shape),
            None => format!("{}: not eligible", self.name),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimReport<'a> {
    pub name: &'a str,
    pub shape: &'static str,
    pub proof_domain: String,
    pub resolver: &'a str,
    pub query_id: u16,
    pub rcode: &'static str,
    pub elapsed_ms: u64,
    pub txt: Vec<String>,
    pub addresses: Vec<&'a str>,
    pub invalid: &'a [String],
}

impl<'a> ClaimReport<'a> {
    pub fn new(check: &'a ClaimCheck, resolver: &'a str) -> Self {
        Self {
            name: check.candidate.as_str(),
            shape: check.candidate.shape().as_str(),
            proof_domain: check.candidate.proof_domain(),
            resolver,
            query_id: check.query.id,
            rcode: check.response.response_code().as_str(),
            elapsed_ms: check.elapsed_ms,
            txt: check.txt_strings(),
            addresses: check.proof.addresses.iter().map(|a| a.as_str()).collect(),
            invalid: &check.proof.invalid,
        }
    }

    pub fn has_proof(&self) -> bool {
        !self.addresses.is_empty()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "name:      {} ({})", self.name, self.shape);
        let _ = writeln!(out, "query:     {} TXT via {}", self.proof_domain, self.resolver);
        let _ = writeln!(out, "status:    {} in {} ms", self.rcode, self.elapsed_ms);

        if self.txt.is_empty() {
            let _ = writeln!(out, "txt:       (none)");
        }
        for text in &self.txt {
            let _ = writeln!(out, "txt:       {:?}", text);
        }
        for address in &self.addresses {
            let _ = writeln!(out, "claimant:  {}", address);
        }
        for entry in self.invalid {
            let _ = writeln!(out, "malformed: {:?}", entry);
        }
        if !self.has_proof() {
            let _ = writeln!(out, "no claim address found");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsproof_domain::{
        CandidateName, ClaimProof, DnsMessage, DnsResourceRecord, QueryBuilder,
    };

    const ADDR: &str = "0x5a384227b65fa093dec03ec34e111db80a040615";

    fn check(texts: &[&str]) -> ClaimCheck {
        let candidate = CandidateName::parse("abc.com").unwrap();
        let query = QueryBuilder::build_proof_query(&candidate);
        let mut response = DnsMessage::response_to(&query);
        for text in texts {
            response
                .answers
                .push(DnsResourceRecord::txt("_ens.abc.com", 60, &[*text]));
        }
        let proof = ClaimProof::from_message("_ens.abc.com", &response);
        ClaimCheck {
            candidate,
            query,
            response,
            proof,
            elapsed_ms: 12,
        }
    }

    #[test]
    fn test_eligibility_report() {
        let report = EligibilityReport::new("abc.com");
        assert!(report.eligible);
        assert_eq!(report.shape, Some("short-label"));
        assert_eq!(report.render_text(), "abc.com: eligible (short-label)");

        let rejected = EligibilityReport::new("a");
        assert!(!rejected.eligible);
        assert_eq!(rejected.render_text(), "a: not eligible");
    }

    #[test]
    fn test_claim_report_with_address() {
        let text = format!("a={}", ADDR);
        let check = check(&[text.as_str()]);
        let report = ClaimReport::new(&check, "https://cloudflare-dns.com/dns-query");

        assert!(report.has_proof());
        assert_eq!(report.addresses, vec![ADDR]);
        assert_eq!(report.rcode, "NOERROR");
        assert!(report.render_text().contains(&format!("claimant:  {}", ADDR)));
    }

    #[test]
    fn test_claim_report_json_shape() {
        let check = check(&["a=0x1234"]);
        let report = ClaimReport::new(&check, "https://cloudflare-dns.com/dns-query");
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["name"], "abc.com");
        assert_eq!(json["proof_domain"], "_ens.abc.com");
        assert_eq!(json["txt"][0], "a=0x1234");
        assert_eq!(json["invalid"][0], "a=0x1234");
        assert!(json["addresses"].as_array().unwrap().is_empty());
        assert!(report.render_text().contains("no claim address found"));
    }
}
