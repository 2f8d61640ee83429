//! Pipeline error policy: which failures skip one event and which halt
//! the run.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use dao_projector::{DocumentStore, Filter, FindOptions, ReadStore};
    use dao_types::Felt;

    #[tokio::test]
    async fn unknown_event_names_are_skipped_without_failing_the_block() {
        let harness = Harness::new(&[]);
        let result = harness
            .ingest(
                1,
                1_000,
                vec![
                    event("Transfer", vec![Felt::from(1u64)]),
                    proposal_params("Signaling", 50, 80, 60, 120),
                ],
            )
            .await;
        assert!(result.is_ok());

        let params = harness
            .store
            .find_one("proposal_params", &Filter::by("type", "Signaling"))
            .await
            .unwrap();
        assert!(params.is_some());
    }

    #[tokio::test]
    async fn a_decode_failure_aborts_only_the_offending_event() {
        let harness = Harness::new(&[(1, 1_000)]);
        // VoteSubmitted with one felt instead of four: arity mismatch.
        let result = harness
            .ingest(
                1,
                1_000,
                vec![
                    event("VoteSubmitted", vec![Felt::from(9u64)]),
                    member_added(0xa1, 10, 0, 1),
                ],
            )
            .await;
        assert!(result.is_ok());

        let member = harness
            .store
            .find_one("members", &Filter::by("memberAddress", addr(0xa1).to_string()))
            .await
            .unwrap();
        assert!(member.is_some());
    }

    #[tokio::test]
    async fn a_proposal_without_governance_params_halts_ingestion() {
        let harness = Harness::new(&[(1, 1_000)]);
        let result = harness
            .ingest(
                1,
                1_000,
                vec![proposal_added(0, "orphan", "Signaling", 1, 0xa1)],
            )
            .await;

        let err = result.unwrap_err();
        assert!(err.is_fatal());

        let stored = harness
            .store
            .find_one("proposals", &Filter::by("id", 0))
            .await
            .unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn an_unknown_raw_status_string_is_skipped_not_fatal() {
        let harness = Harness::new(&[(1, 1_000)]);
        harness
            .ingest(
                1,
                1_000,
                vec![
                    proposal_params("Signaling", 50, 80, 60, 120),
                    proposal_added(0, "gov signal", "Signaling", 1, 0xa1),
                ],
            )
            .await
            .unwrap();

        let result = harness
            .ingest(2, 2_000, vec![proposal_status_updated(0, "cancelled")])
            .await;
        assert!(result.is_ok());

        let stored = harness
            .store
            .find_one("proposals", &Filter::by("id", 0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored["rawStatus"], "submitted");
    }

    #[tokio::test]
    async fn a_balance_amount_wider_than_i64_aborts_only_that_event() {
        let harness = Harness::new(&[(1, 1_000)]);
        harness
            .ingest(1, 1_000, vec![member_added(0xa1, 10, 0, 1)])
            .await
            .unwrap();

        let oversized = event(
            "UserTokenBalanceIncreased",
            vec![
                addr(0xa1).to_felt(),
                addr(0x77).to_felt(),
                Felt::from(u64::MAX) + 1u64,
            ],
        );
        let result = harness
            .ingest(2, 2_000, vec![oversized, balance_increased(0xa1, 0x77, 40)])
            .await;
        assert!(result.is_ok());

        let member = harness
            .store
            .find_one("members", &Filter::by("memberAddress", addr(0xa1).to_string()))
            .await
            .unwrap()
            .unwrap();
        // Only the in-range increase lands; the wide one is skipped.
        assert_eq!(member["balances"][0]["amount"], 40);
        assert_eq!(member["transactions"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn every_handled_event_lands_in_the_audit_collection() {
        let harness = Harness::new(&[(1, 1_000)]);
        harness
            .ingest(
                1,
                1_000,
                vec![
                    proposal_params("Signaling", 50, 80, 60, 120),
                    member_added(0xa1, 10, 0, 1),
                ],
            )
            .await
            .unwrap();

        let audit = harness
            .store
            .find_many("events", &Filter::new(), &FindOptions::default())
            .await
            .unwrap();
        assert_eq!(audit.len(), 2);
        assert_eq!(audit[0]["name"], "ProposalParamsUpdated");
        assert_eq!(audit[0]["emittedAt"], 1_000);
        assert_eq!(audit[1]["name"], "MemberAdded");
    }

    #[tokio::test]
    async fn a_block_number_reference_resolves_through_the_lookup() {
        // Member onboarded in block 1, reported by an event in block 5.
        let harness = Harness::new(&[(1, 1_000), (5, 5_000)]);
        harness
            .ingest(5, 5_000, vec![member_added(0xa1, 10, 0, 1)])
            .await
            .unwrap();

        let member = harness
            .store
            .find_one("members", &Filter::by("memberAddress", addr(0xa1).to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(member["onboardedAt"], 1_000);
    }
}
