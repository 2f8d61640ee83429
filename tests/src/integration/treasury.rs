//! Bank and balance-ledger flows: whitelisting, signed balance deltas,
//! roles, and jail/exit bookkeeping.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;

    const MEMBER: u8 = 0xa1;
    const ETH: u8 = 0x20;
    const DAI: u8 = 0x21;

    #[tokio::test]
    async fn member_balance_tracks_signed_deltas_with_a_ledger() {
        let harness = Harness::new(&[(1, 1_000)]);
        harness
            .ingest(
                1,
                1_000,
                vec![
                    token_whitelisted("ETH", ETH),
                    member_added(MEMBER, 10, 0, 1),
                ],
            )
            .await
            .unwrap();
        harness
            .ingest(
                2,
                2_000,
                vec![
                    balance_increased(MEMBER, ETH, 100),
                    balance_decreased(MEMBER, ETH, 40),
                ],
            )
            .await
            .unwrap();

        let members = harness
            .queries()
            .list_members(Default::default())
            .await
            .unwrap();
        assert!(members.errors.is_empty());
        let member = &members.data[0];

        assert_eq!(member.balances.len(), 1);
        let balance = &member.balances[0];
        assert_eq!(balance.token_address, addr(ETH));
        assert_eq!(balance.token_name.as_deref(), Some("ETH"));
        assert_eq!(balance.amount, 60);

        // The ledger keeps both movements, signed, in order.
        let amounts: Vec<i64> = member.transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![100, -40]);
        assert!(member.transactions.iter().all(|t| t.timestamp == 2_000));
    }

    #[tokio::test]
    async fn a_never_whitelisted_token_has_no_denormalized_name() {
        let harness = Harness::new(&[(1, 1_000)]);
        harness
            .ingest(1, 1_000, vec![member_added(MEMBER, 10, 0, 1)])
            .await
            .unwrap();
        harness
            .ingest(2, 2_000, vec![balance_increased(MEMBER, DAI, 5)])
            .await
            .unwrap();

        let members = harness
            .queries()
            .list_members(Default::default())
            .await
            .unwrap();
        let balance = &members.data[0].balances[0];
        assert_eq!(balance.token_name, None);
        assert_eq!(balance.amount, 5);
    }

    #[tokio::test]
    async fn bank_balances_move_when_the_bank_is_the_party() {
        let harness = Harness::new(&[]);
        harness
            .ingest(
                1,
                1_000,
                vec![
                    token_whitelisted("ETH", ETH),
                    balance_increased(BANK, ETH, 500),
                ],
            )
            .await
            .unwrap();

        let bank = harness.queries().bank().await.unwrap();
        assert_eq!(bank.bank_address, addr(BANK));
        assert_eq!(bank.balances.len(), 1);
        assert_eq!(bank.balances[0].amount, 500);
        assert_eq!(bank.transactions.len(), 1);
    }

    #[tokio::test]
    async fn unwhitelisting_removes_a_token_from_the_effective_list_only() {
        let harness = Harness::new(&[(1, 1_000)]);
        harness
            .ingest(
                1,
                1_000,
                vec![
                    token_whitelisted("ETH", ETH),
                    token_whitelisted("DAI", DAI),
                    member_added(MEMBER, 10, 0, 1),
                ],
            )
            .await
            .unwrap();
        harness
            .ingest(2, 2_000, vec![token_un_whitelisted("DAI", DAI)])
            .await
            .unwrap();

        let bank = harness.queries().bank().await.unwrap();
        assert_eq!(bank.whitelisted_tokens.len(), 1);
        assert_eq!(bank.whitelisted_tokens[0].token_name, "ETH");
        assert_eq!(bank.whitelisted_tokens[0].timestamp, 1_000);
        assert_eq!(bank.un_whitelisted_tokens.len(), 1);
        assert_eq!(bank.un_whitelisted_tokens[0].timestamp, 2_000);
        // Share totals are computed over the live member set.
        assert_eq!(bank.total_shares, 10);
    }

    #[tokio::test]
    async fn roles_accumulate_and_revocation_removes_one() {
        let harness = Harness::new(&[(1, 1_000)]);
        harness
            .ingest(
                1,
                1_000,
                vec![
                    member_added(MEMBER, 10, 0, 1),
                    role_granted(MEMBER, "admin", 0x01),
                    role_granted(MEMBER, "operator", 0x01),
                ],
            )
            .await
            .unwrap();
        harness
            .ingest(2, 2_000, vec![role_revoked(MEMBER, "admin", 0x01)])
            .await
            .unwrap();

        let members = harness
            .queries()
            .list_members(Default::default())
            .await
            .unwrap();
        assert_eq!(members.data[0].roles, vec!["operator"]);
    }

    #[tokio::test]
    async fn jail_and_exit_timestamps_are_derived_from_updates() {
        let harness = Harness::new(&[(1, 1_000)]);
        harness
            .ingest(1, 1_000, vec![member_added(MEMBER, 10, 2, 1)])
            .await
            .unwrap();

        // Jailed with shares intact.
        harness
            .ingest(2, 2_000, vec![member_updated(MEMBER, MEMBER, 10, 2, true, 0, 1)])
            .await
            .unwrap();
        let jailed = &harness
            .queries()
            .list_members(Default::default())
            .await
            .unwrap()
            .data[0];
        assert_eq!(jailed.jailed_at, Some(2_000));
        assert_eq!(jailed.exited_at, None);

        // Shares drop to zero: the member has ragequit.
        harness
            .ingest(3, 3_000, vec![member_updated(MEMBER, MEMBER, 0, 0, false, 0, 1)])
            .await
            .unwrap();
        let exited = &harness
            .queries()
            .list_members(Default::default())
            .await
            .unwrap()
            .data[0];
        assert_eq!(exited.jailed_at, None);
        assert_eq!(exited.exited_at, Some(3_000));
        assert_eq!(exited.shares, 0);
    }
}
