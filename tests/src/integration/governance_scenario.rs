//! End-to-end proposal lifecycle: raw felt events through decode,
//! projection, and the read-time governance engine.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use dao_types::{ProposalPayload, ProposalStatus};

    // Five members, 25 shares total.
    const M1: u8 = 0xa1; // 7 shares, votes yes
    const M2: u8 = 0xa2; // 8 shares, votes yes
    const M3: u8 = 0xa3; // 2 shares, votes no
    const M4: u8 = 0xa4; // 3 shares, votes no
    const M5: u8 = 0xa5; // 5 shares, abstains

    const SUBMITTED_AT: u64 = 10_000;
    const VOTING_ENDS: u64 = SUBMITTED_AT + 60 * 60;
    const GRACE_ENDS: u64 = VOTING_ENDS + 120 * 60;

    /// Governance params, membership, one signaling proposal, four votes.
    async fn seeded_harness() -> Harness {
        let harness = Harness::new(&[(1, 1_000), (2, SUBMITTED_AT)]);

        harness
            .ingest(
                1,
                1_000,
                vec![
                    proposal_params("Signaling", 50, 80, 60, 120),
                    member_added(M1, 7, 0, 1),
                    member_added(M2, 8, 0, 1),
                    member_added(M3, 2, 0, 1),
                    member_added(M4, 3, 0, 1),
                    member_added(M5, 5, 0, 1),
                ],
            )
            .await
            .unwrap();

        harness
            .ingest(
                2,
                SUBMITTED_AT,
                vec![
                    proposal_added(0, "gov signal", "Signaling", 2, M1),
                    vote_submitted(M1, 0, true, M1),
                    vote_submitted(M2, 0, true, M2),
                    vote_submitted(M3, 0, false, M3),
                    vote_submitted(M4, 0, false, M4),
                ],
            )
            .await
            .unwrap();

        harness
    }

    #[tokio::test]
    async fn tallies_are_share_weighted_and_rounded() {
        let harness = seeded_harness().await;
        let view = harness
            .queries()
            .get_proposal(0, SUBMITTED_AT + 1)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(view.yes_votes_total, 15);
        assert_eq!(view.no_votes_total, 5);
        assert_eq!(view.total_votable_shares, 25);
        assert_eq!(view.current_majority, 75.0);
        assert_eq!(view.current_quorum, 80.0);
    }

    #[tokio::test]
    async fn status_walks_the_windows_as_the_clock_advances() {
        let harness = seeded_harness().await;
        let queries = harness.queries();

        let voting = queries
            .get_proposal(0, SUBMITTED_AT + 30 * 60)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(voting.lifecycle.status, ProposalStatus::VotingPeriod);
        assert!(voting.lifecycle.active);
        assert_eq!(voting.lifecycle.time_remaining, Some(-(30 * 60)));
        assert_eq!(voting.lifecycle.voting_period_ending_at, VOTING_ENDS);
        assert_eq!(voting.lifecycle.grace_period_ending_at, GRACE_ENDS);

        // Thresholds are met exactly (quorum 80 of 80), so the window
        // close tips straight into grace.
        let grace = queries
            .get_proposal(0, VOTING_ENDS)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(grace.lifecycle.status, ProposalStatus::GracePeriod);
        assert_eq!(grace.lifecycle.time_remaining, Some(-(120 * 60)));

        let ready = queries.get_proposal(0, GRACE_ENDS).await.unwrap().unwrap();
        assert_eq!(ready.lifecycle.status, ProposalStatus::ApprovedReady);
        assert!(ready.lifecycle.active);
        assert_eq!(ready.lifecycle.approved_to_process_at, Some(GRACE_ENDS));
        assert_eq!(ready.lifecycle.time_remaining, None);
    }

    #[tokio::test]
    async fn a_status_event_makes_the_proposal_terminal() {
        let harness = seeded_harness().await;
        harness
            .ingest(3, GRACE_ENDS + 200, vec![proposal_status_updated(0, "approved")])
            .await
            .unwrap();

        let view = harness
            .queries()
            .get_proposal(0, GRACE_ENDS + 500)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.lifecycle.status, ProposalStatus::Approved);
        assert!(!view.lifecycle.active);
        assert_eq!(view.lifecycle.approved_at, Some(GRACE_ENDS + 200));
        assert_eq!(view.lifecycle.processed_at, Some(GRACE_ENDS + 200));
    }

    #[tokio::test]
    async fn members_onboarded_after_voting_closes_do_not_dilute_quorum() {
        let harness = seeded_harness().await;
        // 100 shares arriving after the voting window must not count.
        harness
            .ingest(3, VOTING_ENDS + 1_000, vec![member_added(0xa6, 100, 0, 3)])
            .await
            .unwrap();

        let view = harness
            .queries()
            .get_proposal(0, VOTING_ENDS + 2_000)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.total_votable_shares, 25);
        assert_eq!(view.current_quorum, 80.0);
        assert_eq!(view.lifecycle.status, ProposalStatus::GracePeriod);
    }

    #[tokio::test]
    async fn members_jailed_before_submission_are_not_votable() {
        let harness = Harness::new(&[(1, 1_000), (3, SUBMITTED_AT)]);
        harness
            .ingest(
                1,
                1_000,
                vec![
                    proposal_params("Signaling", 50, 80, 60, 120),
                    member_added(M1, 7, 0, 1),
                    member_added(M2, 8, 0, 1),
                    member_added(M5, 5, 0, 1),
                ],
            )
            .await
            .unwrap();
        // Jailed well before the proposal exists.
        harness
            .ingest(2, 2_000, vec![member_updated(M5, M5, 5, 0, true, 0, 1)])
            .await
            .unwrap();
        harness
            .ingest(
                3,
                SUBMITTED_AT,
                vec![
                    proposal_added(0, "gov signal", "Signaling", 3, M1),
                    vote_submitted(M1, 0, true, M1),
                ],
            )
            .await
            .unwrap();

        let view = harness
            .queries()
            .get_proposal(0, SUBMITTED_AT + 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.total_votable_shares, 15);
        assert_eq!(view.yes_votes_total, 7);
    }

    #[tokio::test]
    async fn member_did_vote_reflects_projected_voter_lists() {
        let harness = seeded_harness().await;
        let queries = harness.queries();

        assert!(queries
            .member_did_vote(0, &addr(M1).to_string())
            .await
            .unwrap());
        assert!(queries
            .member_did_vote(0, &addr(M4).to_string())
            .await
            .unwrap());
        assert!(!queries
            .member_did_vote(0, &addr(M5).to_string())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn detail_events_fill_the_variant_payload() {
        let harness = seeded_harness().await;
        harness
            .ingest(
                3,
                SUBMITTED_AT + 100,
                vec![
                    proposal_params("Onboard", 60, 50, 30, 30),
                    proposal_added(1, "onboard bob", "Onboard", 3, M1),
                    onboard_proposal_added(1, 0xb0, 12, 3, 400, 0x20),
                ],
            )
            .await
            .unwrap();

        let view = harness
            .queries()
            .get_proposal(1, SUBMITTED_AT + 200)
            .await
            .unwrap()
            .unwrap();
        match view.payload {
            ProposalPayload::Onboard {
                applicant_address,
                shares,
                loot,
                tribute_offered,
                tribute_address,
            } => {
                assert_eq!(applicant_address, Some(addr(0xb0)));
                assert_eq!(shares, Some(12));
                assert_eq!(loot, Some(3));
                assert_eq!(tribute_offered, Some(400));
                assert_eq!(tribute_address, Some(addr(0x20)));
            }
            other => panic!("expected an onboard payload, got {other:?}"),
        }
        assert_eq!(view.majority, 60);
        assert_eq!(view.voting_duration, 30);
    }

    #[tokio::test]
    async fn listing_is_newest_submission_first() {
        let harness = seeded_harness().await;
        harness
            .ingest(
                3,
                SUBMITTED_AT + 100,
                vec![proposal_added(1, "later", "Signaling", 3, M2)],
            )
            .await
            .unwrap();

        let page = harness
            .queries()
            .list_proposals(Default::default(), SUBMITTED_AT + 200)
            .await
            .unwrap();
        assert!(page.errors.is_empty());
        let ids: Vec<u64> = page.data.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 0]);
    }
}
