//! Squad membership reconciliation
//!
//! Writes one membership row per imported player. Failures here are
//! collected per player and reported in the import summary; they never
//! fail the import itself, because the player rows are already safely
//! persisted by the time this step runs.

use crate::models::{MembershipError, SquadMembership};
use async_trait::async_trait;

/// What happened to a single membership write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipOutcome {
    /// A new row was created
    Inserted,
    /// The row already existed; the duplicate was absorbed by the
    /// unique constraint and counts as satisfied
    AlreadyPresent,
}

/// Destination for membership rows
///
/// Constraint violations (unknown player/league/team) must come back
/// as errors, not crash the process; the reconciler records them.
#[async_trait]
pub trait MembershipWriter: Send + Sync {
    async fn create_membership(
        &self,
        membership: &SquadMembership,
    ) -> terrace_common::Result<MembershipOutcome>;
}

/// Outcome of reconciling one batch of memberships
#[derive(Debug, Default)]
pub struct MembershipReport {
    /// Memberships satisfied, whether newly created or already present
    pub inserted: usize,
    pub errors: Vec<MembershipError>,
}

impl MembershipReport {
    /// Report for a batch that could not be attempted at all because
    /// no membership writer was available
    pub fn unavailable(memberships: &[SquadMembership]) -> Self {
        Self {
            inserted: 0,
            errors: memberships
                .iter()
                .map(|m| MembershipError {
                    player_id: m.player_id,
                    reason: "squad store unavailable".to_string(),
                })
                .collect(),
        }
    }
}

/// Write memberships one at a time, in input order
///
/// Each failure is recorded against the player it belongs to and the
/// loop continues; this function never returns an error.
pub async fn record_memberships(
    writer: &dyn MembershipWriter,
    memberships: &[SquadMembership],
) -> MembershipReport {
    let mut report = MembershipReport::default();

    for membership in memberships {
        match writer.create_membership(membership).await {
            Ok(_) => report.inserted += 1,
            Err(e) => {
                tracing::warn!(
                    player_id = membership.player_id,
                    team_id = membership.team_id,
                    error = %e,
                    "Failed to record squad membership"
                );
                report.errors.push(MembershipError {
                    player_id: membership.player_id,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer that fails for one configured player id
    struct FlakyWriter {
        failing_player: i64,
    }

    #[async_trait]
    impl MembershipWriter for FlakyWriter {
        async fn create_membership(
            &self,
            membership: &SquadMembership,
        ) -> terrace_common::Result<MembershipOutcome> {
            if membership.player_id == self.failing_player {
                Err(terrace_common::Error::Internal(
                    "FOREIGN KEY constraint failed".to_string(),
                ))
            } else {
                Ok(MembershipOutcome::Inserted)
            }
        }
    }

    fn membership(player_id: i64) -> SquadMembership {
        SquadMembership {
            player_id,
            league_id: 39,
            team_id: 33,
            season: 2021,
        }
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_batch() {
        let writer = FlakyWriter { failing_player: 2 };
        let batch = vec![membership(1), membership(2), membership(3)];

        let report = record_memberships(&writer, &batch).await;

        assert_eq!(report.inserted, 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].player_id, 2);
        assert!(report.errors[0].reason.contains("FOREIGN KEY"));
    }

    #[tokio::test]
    async fn already_present_counts_as_satisfied() {
        struct DuplicateWriter;

        #[async_trait]
        impl MembershipWriter for DuplicateWriter {
            async fn create_membership(
                &self,
                _membership: &SquadMembership,
            ) -> terrace_common::Result<MembershipOutcome> {
                Ok(MembershipOutcome::AlreadyPresent)
            }
        }

        let report = record_memberships(&DuplicateWriter, &[membership(1), membership(2)]).await;
        assert_eq!(report.inserted, 2);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn unavailable_report_names_every_player() {
        let batch = vec![membership(7), membership(8)];
        let report = MembershipReport::unavailable(&batch);

        assert_eq!(report.inserted, 0);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].player_id, 7);
        assert_eq!(report.errors[1].player_id, 8);
        assert!(report.errors[0].reason.contains("unavailable"));
    }
}
