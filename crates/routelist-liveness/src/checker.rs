//! Concurrent liveness checks over a domain list.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::config::LivenessConfig;
use crate::error::Result;
use crate::probe::{DnsProbe, HickoryProbe};
use crate::status::{classify, DomainStatus, QueryOutcome, RecordKind};

/// Checks domains against several independent resolvers.
///
/// Cheap to clone; clones share the probes.
#[derive(Clone)]
pub struct LivenessChecker {
    inner: Arc<Inner>,
}

struct Inner {
    probes: Vec<Arc<dyn DnsProbe>>,
    query_timeout: Duration,
    concurrency: usize,
}

impl std::fmt::Debug for LivenessChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.inner.probes.iter().map(|p| p.name()).collect();
        f.debug_struct("LivenessChecker")
            .field("probes", &names)
            .field("query_timeout", &self.inner.query_timeout)
            .field("concurrency", &self.inner.concurrency)
            .finish()
    }
}

impl LivenessChecker {
    /// Build a checker from explicit probes.
    pub fn new(probes: Vec<Arc<dyn DnsProbe>>, query_timeout: Duration, concurrency: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                probes,
                query_timeout,
                concurrency: concurrency.max(1),
            }),
        }
    }

    /// Build a checker with one hickory probe per configured resolver.
    pub fn from_config(config: &LivenessConfig) -> Result<Self> {
        config.validate()?;
        let timeout = config.timeout();
        let probes = config
            .nameservers()?
            .into_iter()
            .map(|addr| Arc::new(HickoryProbe::new(addr, timeout)) as Arc<dyn DnsProbe>)
            .collect();
        Ok(Self::new(probes, timeout, config.concurrency))
    }

    /// Classify one domain.
    ///
    /// Every resolver is asked for every record kind. A query that outlives
    /// the timeout counts as failed; nothing is retried.
    pub async fn check_domain(&self, domain: &str) -> DomainStatus {
        let attempts = self.inner.probes.iter().flat_map(|probe| {
            RecordKind::ALL
                .into_iter()
                .map(move |kind| self.attempt(probe.as_ref(), domain, kind))
        });
        let outcomes = futures_util::future::join_all(attempts).await;
        let status = classify(outcomes);
        debug!(domain, %status, "domain classified");
        status
    }

    async fn attempt(&self, probe: &dyn DnsProbe, domain: &str, kind: RecordKind) -> QueryOutcome {
        match tokio::time::timeout(self.inner.query_timeout, probe.query(domain, kind)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                debug!(domain, resolver = probe.name(), %kind, "dns query timed out");
                QueryOutcome::Failed
            }
        }
    }

    /// Check every domain, at most `concurrency` at a time.
    pub async fn check_all(&self, domains: &[String]) -> BTreeMap<String, DomainStatus> {
        self.check_all_with(domains, |_, _| {}).await
    }

    /// Like [`check_all`](Self::check_all), calling `on_result` as each result is collected.
    ///
    /// A worker that panics yields `UNKNOWN` for its domain.
    pub async fn check_all_with<F>(
        &self,
        domains: &[String],
        mut on_result: F,
    ) -> BTreeMap<String, DomainStatus>
    where
        F: FnMut(&str, DomainStatus),
    {
        let semaphore = Arc::new(Semaphore::new(self.inner.concurrency));
        let mut handles = Vec::with_capacity(domains.len());

        for domain in domains {
            let sem = semaphore.clone();
            let checker = self.clone();
            let name = domain.clone();
            let handle = tokio::spawn(async move {
                let Ok(_permit) = sem.acquire().await else {
                    return DomainStatus::Unknown;
                };
                checker.check_domain(&name).await
            });
            handles.push((domain, handle));
        }

        let mut results = BTreeMap::new();
        for (domain, handle) in handles {
            let status = handle.await.unwrap_or_else(|e| {
                warn!(domain = %domain, error = %e, "liveness worker failed");
                DomainStatus::Unknown
            });
            on_result(domain, status);
            results.insert(domain.clone(), status);
        }
        results
    }
}
