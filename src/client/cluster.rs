//! Member inspection.
//!
//! The roster comes from the store's membership API; liveness and role
//! come from probing each member's own client endpoint. Probes are
//! independent: each runs under its own deadline, and a failed probe
//! leaves that member at its pessimistic defaults instead of failing the
//! inspection.

use crate::core::error::{TrellisError, TrellisResult};
use serde::{Deserialize, Serialize};
use tokio::time::timeout_at;
use tracing::warn;

use super::Client;

/// Consensus role of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Currently elected leader.
    Leader,
    /// Any non-leader member.
    Follower,
}

impl Default for Role {
    fn default() -> Self {
        Self::Follower
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Leader => write!(f, "leader"),
            Role::Follower => write!(f, "follower"),
        }
    }
}

/// Probe-derived liveness of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Health {
    /// Status probe succeeded.
    Healthy,
    /// Status probe failed or was never attempted.
    Unhealthy,
}

impl Default for Health {
    fn default() -> Self {
        Self::Unhealthy
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Health::Healthy => write!(f, "healthy"),
            Health::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// One cluster member, built fresh on every inspection.
///
/// Role and status start at their pessimistic defaults and are upgraded
/// only by a successful status probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member id, decimal rendering of the store's 64-bit id.
    pub id: String,
    /// Member name.
    pub name: String,
    /// Peer (consensus) URLs.
    pub peer_urls: Vec<String>,
    /// Client URLs.
    pub client_urls: Vec<String>,
    /// Consensus role.
    pub role: Role,
    /// Probe-derived liveness.
    pub status: Health,
    /// Backend database size in bytes, 0 until a probe succeeds.
    pub db_size: i64,
}

impl Member {
    /// Create a member at its pessimistic defaults.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        peer_urls: Vec<String>,
        client_urls: Vec<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.into(),
            peer_urls,
            client_urls,
            role: Role::default(),
            status: Health::default(),
            db_size: 0,
        }
    }

    /// Upgrade this member from a successful status probe.
    ///
    /// The member is leader when the probed endpoint reports a cluster
    /// leader id equal to its own id.
    pub fn absorb_status(&mut self, report: &StatusReport) {
        self.status = Health::Healthy;
        self.db_size = report.db_size;
        if report.leader_id == report.member_id {
            self.role = Role::Leader;
        }
    }
}

/// What a status probe reports about the probed endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    /// Id of the member that answered the probe.
    pub member_id: u64,
    /// Cluster leader id as seen by that member.
    pub leader_id: u64,
    /// Backend database size in bytes.
    pub db_size: i64,
}

impl Client {
    /// Enumerate cluster members with liveness and role classification.
    ///
    /// Members advertising no client endpoint are excluded entirely
    /// (unreachable or not yet joined), not reported as unhealthy. Probe
    /// failures are logged and swallowed, leaving that member at its
    /// defaults. Members keep the roster's order.
    pub async fn members(&self) -> TrellisResult<Vec<Member>> {
        let mut cluster = self.inner.cluster_client();

        let roster = timeout_at(self.deadline(), cluster.member_list())
            .await
            .map_err(|_| TrellisError::timeout("member list", self.request_timeout))??;

        let mut members = Vec::new();
        for found in roster.members() {
            if found.client_urls().is_empty() {
                continue;
            }
            let mut member = Member::new(
                found.id(),
                found.name(),
                found.peer_urls().to_vec(),
                found.client_urls().to_vec(),
            );
            let endpoint = member.client_urls[0].clone();
            match self.probe_status(&endpoint).await {
                Ok(report) => member.absorb_status(&report),
                Err(err) => warn!("status probe for {} failed: {}", endpoint, err),
            }
            members.push(member);
        }
        Ok(members)
    }

    /// Probe one member endpoint for maintenance status.
    ///
    /// The store client addresses status requests to the endpoint it is
    /// connected to, so the probe dials the member's own endpoint with the
    /// handle's credentials.
    async fn probe_status(&self, endpoint: &str) -> TrellisResult<StatusReport> {
        let probe = async {
            let probed =
                etcd_client::Client::connect([endpoint], self.probe_options.clone()).await?;
            let mut maintenance = probed.maintenance_client();
            let status = maintenance.status().await?;
            Ok::<StatusReport, TrellisError>(StatusReport {
                member_id: status.header().map(|h| h.member_id()).unwrap_or_default(),
                leader_id: status.leader(),
                db_size: status.db_size(),
            })
        };
        timeout_at(self.deadline(), probe)
            .await
            .map_err(|_| TrellisError::timeout("member status", self.request_timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_member() -> Member {
        Member::new(
            7,
            "node-1",
            vec!["http://10.0.0.1:2380".to_string()],
            vec!["http://10.0.0.1:2379".to_string()],
        )
    }

    #[test]
    fn test_member_defaults() {
        let member = sample_member();
        assert_eq!(member.id, "7");
        assert_eq!(member.role, Role::Follower);
        assert_eq!(member.status, Health::Unhealthy);
        assert_eq!(member.db_size, 0);
    }

    #[test]
    fn test_absorb_status_leader() {
        let mut member = sample_member();
        member.absorb_status(&StatusReport {
            member_id: 7,
            leader_id: 7,
            db_size: 4096,
        });
        assert_eq!(member.role, Role::Leader);
        assert_eq!(member.status, Health::Healthy);
        assert_eq!(member.db_size, 4096);
    }

    #[test]
    fn test_absorb_status_follower() {
        let mut member = sample_member();
        member.absorb_status(&StatusReport {
            member_id: 7,
            leader_id: 9,
            db_size: 4096,
        });
        assert_eq!(member.role, Role::Follower);
        assert_eq!(member.status, Health::Healthy);
    }

    #[test]
    fn test_display() {
        assert_eq!(Role::Leader.to_string(), "leader");
        assert_eq!(Health::Unhealthy.to_string(), "unhealthy");
    }
}
