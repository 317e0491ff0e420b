mod dns_resolver;

pub use dns_resolver::DnsResolver;

// Re-export for convenience
pub use dnsproof_domain::DnsMessage;
