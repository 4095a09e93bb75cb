//! DNS probes: one resolver answering A/AAAA queries.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use hickory_proto::xfer::Protocol;
use hickory_proto::{ProtoError, ProtoErrorKind};
use hickory_resolver::config::{NameServerConfig, NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{ResolveError, Resolver};
use tracing::debug;

use crate::status::{QueryOutcome, RecordKind};

/// A single independent resolver.
///
/// Implementations never fail: every transport problem is reported as
/// [`QueryOutcome::Failed`].
#[async_trait]
pub trait DnsProbe: Send + Sync {
    /// Label for logs (usually the nameserver address).
    fn name(&self) -> &str;

    /// Query one record kind for a domain.
    async fn query(&self, domain: &str, kind: RecordKind) -> QueryOutcome;
}

/// Probe backed by a hickory resolver pinned to one nameserver.
///
/// No search domains, no retries, no cache: each query goes to the wire once.
pub struct HickoryProbe {
    name: String,
    resolver: Resolver<TokioConnectionProvider>,
}

impl std::fmt::Debug for HickoryProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HickoryProbe").field("name", &self.name).finish()
    }
}

impl HickoryProbe {
    /// Build a probe for one UDP nameserver.
    pub fn new(nameserver: SocketAddr, timeout: Duration) -> Self {
        let servers = NameServerConfigGroup::from(vec![NameServerConfig {
            socket_addr: nameserver,
            protocol: Protocol::Udp,
            tls_dns_name: None,
            http_endpoint: None,
            trust_negative_responses: true,
            bind_addr: None,
        }]);
        let config = ResolverConfig::from_parts(None, vec![], servers);

        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        opts.cache_size = 0;

        let mut builder =
            Resolver::builder_with_config(config, TokioConnectionProvider::default());
        *builder.options_mut() = opts;

        Self {
            name: nameserver.to_string(),
            resolver: builder.build(),
        }
    }
}

#[async_trait]
impl DnsProbe for HickoryProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn query(&self, domain: &str, kind: RecordKind) -> QueryOutcome {
        let fqdn = to_fqdn(domain);
        let outcome = match kind {
            RecordKind::A => match self.resolver.ipv4_lookup(fqdn.as_str()).await {
                Ok(lookup) => answered(lookup.iter().next().is_some()),
                Err(e) => outcome_of_error(&e),
            },
            RecordKind::Aaaa => match self.resolver.ipv6_lookup(fqdn.as_str()).await {
                Ok(lookup) => answered(lookup.iter().next().is_some()),
                Err(e) => outcome_of_error(&e),
            },
        };
        debug!(domain, resolver = %self.name, %kind, ?outcome, "dns query");
        outcome
    }
}

const fn answered(has_records: bool) -> QueryOutcome {
    if has_records {
        QueryOutcome::Answered
    } else {
        QueryOutcome::NoData
    }
}

/// Map a resolver error onto an outcome.
///
/// Only a NOERROR or NXDOMAIN response is an answer; SERVFAIL, REFUSED and
/// every transport fault are failures.
fn outcome_of_error(e: &ResolveError) -> QueryOutcome {
    match e.proto().map(ProtoError::kind) {
        Some(ProtoErrorKind::NoRecordsFound { response_code, .. }) => {
            let outcome = outcome_of_response_code(*response_code);
            if outcome == QueryOutcome::Failed {
                debug!(%response_code, "dns server failed to answer");
            }
            outcome
        }
        _ => {
            debug!(error = %e, "dns query failed");
            QueryOutcome::Failed
        }
    }
}

/// Outcome of an answer that carried no records of the requested kind.
const fn outcome_of_response_code(code: ResponseCode) -> QueryOutcome {
    match code {
        ResponseCode::NXDomain => QueryOutcome::NxDomain,
        ResponseCode::NoError => QueryOutcome::NoData,
        _ => QueryOutcome::Failed,
    }
}

/// Absolute form of a name, so no search suffix is ever applied.
fn to_fqdn(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fqdn_adds_single_dot() {
        assert_eq!(to_fqdn("openai.com"), "openai.com.");
        assert_eq!(to_fqdn("openai.com."), "openai.com.");
    }

    #[test]
    fn empty_answer_is_no_data() {
        assert_eq!(answered(false), QueryOutcome::NoData);
        assert_eq!(answered(true), QueryOutcome::Answered);
    }

    #[test]
    fn only_noerror_and_nxdomain_are_answers() {
        assert_eq!(outcome_of_response_code(ResponseCode::NoError), QueryOutcome::NoData);
        assert_eq!(outcome_of_response_code(ResponseCode::NXDomain), QueryOutcome::NxDomain);
        for code in [
            ResponseCode::ServFail,
            ResponseCode::Refused,
            ResponseCode::FormErr,
            ResponseCode::NotImp,
        ] {
            assert_eq!(outcome_of_response_code(code), QueryOutcome::Failed, "{code}");
        }
    }

    #[test]
    fn transport_errors_are_failures() {
        let err = ResolveError::from(ProtoError::from("connection refused"));
        assert_eq!(outcome_of_error(&err), QueryOutcome::Failed);
    }

    #[tokio::test]
    async fn probe_reports_its_nameserver() {
        let probe = HickoryProbe::new("127.0.0.1:53".parse().unwrap(), Duration::from_millis(10));
        assert_eq!(probe.name(), "127.0.0.1:53");
    }
}
