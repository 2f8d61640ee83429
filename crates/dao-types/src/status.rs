//! # Proposal Status Enums
//!
//! Two distinct notions of "status" exist and must never be conflated:
//!
//! - [`ProposalRawStatus`]: the authoritative, chain-emitted state. Stored.
//! - [`ProposalStatus`]: the richer lifecycle state derived at read time
//!   from timestamps, durations, and vote tallies. Never stored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The chain-emitted proposal state, exactly as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalRawStatus {
    Submitted,
    /// Can proceed to execution if it carries any actions.
    Approved,
    Rejected,
    /// Sent directly to grace period by an admin.
    Forced,
}

/// Raised when a stored or chain-supplied status string is unrecognized.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown raw proposal status '{0}'")]
pub struct RawStatusParseError(pub String);

impl ProposalRawStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Forced => "forced",
        }
    }
}

impl fmt::Display for ProposalRawStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalRawStatus {
    type Err = RawStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "forced" => Ok(Self::Forced),
            other => Err(RawStatusParseError(other.to_owned())),
        }
    }
}

/// The derived lifecycle status exposed to consumers.
///
/// Transitions: `VotingPeriod → GracePeriod → {ApprovedReady |
/// RejectedReady} → {Approved | Rejected}`, with `Unknown` absorbing any
/// raw status the derivation does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    #[serde(rename = "Voting Period")]
    VotingPeriod,
    #[serde(rename = "Grace Period")]
    GracePeriod,
    #[serde(rename = "Rejected - Ready to Process")]
    RejectedReady,
    #[serde(rename = "Approved - Ready to Process")]
    ApprovedReady,
    #[serde(rename = "Rejected")]
    Rejected,
    #[serde(rename = "Approved")]
    Approved,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ProposalStatus {
    /// A proposal is active while voting or waiting to be processed.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::VotingPeriod | Self::GracePeriod | Self::RejectedReady | Self::ApprovedReady
        )
    }
}
