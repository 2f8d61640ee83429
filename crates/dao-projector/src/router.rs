//! # Event Router
//!
//! A static, exhaustively-matched table from chain event names to handler
//! kinds. Routing is data, not polymorphism: an unrecognized name yields
//! `None` and is the caller's (logged, non-fatal) data condition.

/// Every governance event the projector handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ProposalAdded,
    ProposalParamsUpdated,
    ProposalStatusUpdated,
    OnboardProposalAdded,
    GuildKickProposalAdded,
    WhitelistProposalAdded,
    UnWhitelistProposalAdded,
    SwapProposalAdded,
    VoteSubmitted,
    MemberAdded,
    MemberUpdated,
    RoleGranted,
    RoleRevoked,
    TokenWhitelisted,
    TokenUnWhitelisted,
    UserTokenBalanceIncreased,
    UserTokenBalanceDecreased,
}

impl EventKind {
    /// Look up the handler kind for a chain event name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ProposalAdded" => Some(Self::ProposalAdded),
            "ProposalParamsUpdated" => Some(Self::ProposalParamsUpdated),
            "ProposalStatusUpdated" => Some(Self::ProposalStatusUpdated),
            "OnboardProposalAdded" => Some(Self::OnboardProposalAdded),
            "GuildKickProposalAdded" => Some(Self::GuildKickProposalAdded),
            "WhitelistProposalAdded" => Some(Self::WhitelistProposalAdded),
            "UnWhitelistProposalAdded" => Some(Self::UnWhitelistProposalAdded),
            "SwapProposalAdded" => Some(Self::SwapProposalAdded),
            "VoteSubmitted" => Some(Self::VoteSubmitted),
            "MemberAdded" => Some(Self::MemberAdded),
            "MemberUpdated" => Some(Self::MemberUpdated),
            "RoleGranted" => Some(Self::RoleGranted),
            "RoleRevoked" => Some(Self::RoleRevoked),
            "TokenWhitelisted" => Some(Self::TokenWhitelisted),
            "TokenUnWhitelisted" => Some(Self::TokenUnWhitelisted),
            "UserTokenBalanceIncreased" => Some(Self::UserTokenBalanceIncreased),
            "UserTokenBalanceDecreased" => Some(Self::UserTokenBalanceDecreased),
            _ => None,
        }
    }

    /// The chain event name, the inverse of [`EventKind::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProposalAdded => "ProposalAdded",
            Self::ProposalParamsUpdated => "ProposalParamsUpdated",
            Self::ProposalStatusUpdated => "ProposalStatusUpdated",
            Self::OnboardProposalAdded => "OnboardProposalAdded",
            Self::GuildKickProposalAdded => "GuildKickProposalAdded",
            Self::WhitelistProposalAdded => "WhitelistProposalAdded",
            Self::UnWhitelistProposalAdded => "UnWhitelistProposalAdded",
            Self::SwapProposalAdded => "SwapProposalAdded",
            Self::VoteSubmitted => "VoteSubmitted",
            Self::MemberAdded => "MemberAdded",
            Self::MemberUpdated => "MemberUpdated",
            Self::RoleGranted => "RoleGranted",
            Self::RoleRevoked => "RoleRevoked",
            Self::TokenWhitelisted => "TokenWhitelisted",
            Self::TokenUnWhitelisted => "TokenUnWhitelisted",
            Self::UserTokenBalanceIncreased => "UserTokenBalanceIncreased",
            Self::UserTokenBalanceDecreased => "UserTokenBalanceDecreased",
        }
    }

    /// All kinds, in routing-table order. Used by schema checks and tests.
    pub const ALL: [EventKind; 17] = [
        Self::ProposalAdded,
        Self::ProposalParamsUpdated,
        Self::ProposalStatusUpdated,
        Self::OnboardProposalAdded,
        Self::GuildKickProposalAdded,
        Self::WhitelistProposalAdded,
        Self::UnWhitelistProposalAdded,
        Self::SwapProposalAdded,
        Self::VoteSubmitted,
        Self::MemberAdded,
        Self::MemberUpdated,
        Self::RoleGranted,
        Self::RoleRevoked,
        Self::TokenWhitelisted,
        Self::TokenUnWhitelisted,
        Self::UserTokenBalanceIncreased,
        Self::UserTokenBalanceDecreased,
    ];
}
