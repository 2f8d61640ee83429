//! Bank projection for the query boundary.
//!
//! Two things are derived at read time rather than stored:
//! the *effective* whitelist (whitelisted tokens minus any token that also
//! appears in the un-whitelist log) and the DAO-wide share/loot totals,
//! which are sums over the live member set.

use serde::Serialize;

use dao_types::{Address, Balance, Bank, LedgerEntry, Member, TokenListing};

/// The treasury as consumers see it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankView {
    pub bank_address: Address,
    /// Whitelisted tokens still in effect, in listing order.
    pub whitelisted_tokens: Vec<TokenListing>,
    pub un_whitelisted_tokens: Vec<TokenListing>,
    pub balances: Vec<Balance>,
    pub transactions: Vec<LedgerEntry>,
    /// Sum of `shares` over all members.
    pub total_shares: u64,
    /// Sum of `loot` over all members.
    pub total_loot: u64,
}

impl BankView {
    pub fn project(bank: Bank, members: &[Member]) -> Self {
        let effective = effective_whitelist(&bank);
        let total_shares = members.iter().map(|m| m.shares).sum();
        let total_loot = members.iter().map(|m| m.loot).sum();

        Self {
            bank_address: bank.bank_address,
            whitelisted_tokens: effective,
            un_whitelisted_tokens: bank.un_whitelisted_tokens,
            balances: bank.balances,
            transactions: bank.transactions,
            total_shares,
            total_loot,
        }
    }
}

/// Whitelisted tokens whose address never shows up in the un-whitelist log.
fn effective_whitelist(bank: &Bank) -> Vec<TokenListing> {
    bank.whitelisted_tokens
        .iter()
        .filter(|listing| {
            !bank
                .un_whitelisted_tokens
                .iter()
                .any(|un| un.token_address == listing.token_address)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        let mut raw = [0u8; 32];
        raw[31] = byte;
        Address(raw)
    }

    fn listing(byte: u8, name: &str, at: u64) -> TokenListing {
        TokenListing {
            token_name: name.to_owned(),
            token_address: addr(byte),
            timestamp: at,
        }
    }

    fn member(shares: u64, loot: u64) -> Member {
        Member {
            member_address: addr(0xaa),
            shares,
            loot,
            onboarded_at: 0,
            delegate_address: None,
            jailed_at: None,
            exited_at: None,
            last_proposal_yes_vote: None,
            roles: vec![],
            yes_votes: vec![],
            no_votes: vec![],
            balances: vec![],
            transactions: vec![],
        }
    }

    #[test]
    fn unlisted_tokens_drop_out_of_the_effective_whitelist() {
        let bank = Bank {
            bank_address: addr(1),
            whitelisted_tokens: vec![listing(2, "ETH", 10), listing(3, "DAI", 20)],
            un_whitelisted_tokens: vec![listing(3, "DAI", 30)],
            balances: vec![],
            transactions: vec![],
        };
        let view = BankView::project(bank, &[]);
        assert_eq!(view.whitelisted_tokens, vec![listing(2, "ETH", 10)]);
        assert_eq!(view.un_whitelisted_tokens.len(), 1);
    }

    #[test]
    fn totals_sum_over_the_member_set() {
        let bank = Bank {
            bank_address: addr(1),
            whitelisted_tokens: vec![],
            un_whitelisted_tokens: vec![],
            balances: vec![],
            transactions: vec![],
        };
        let members = [member(7, 1), member(8, 0), member(10, 4)];
        let view = BankView::project(bank, &members);
        assert_eq!(view.total_shares, 25);
        assert_eq!(view.total_loot, 5);
    }
}
