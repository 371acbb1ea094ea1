//! Classification outcomes and the endpoint's categorical labels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ministry::MinistryId;

/// Categorical label returned by the classification endpoint.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum WireLabel {
    Mnre,
    Meity,
    Unclassified,
}

impl WireLabel {
    /// Parse a raw label. Matching is exact; anything else, including
    /// other casings or padded values, falls back to `Unclassified`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "MNRE" => Self::Mnre,
            "MEITY" => Self::Meity,
            "UNCLASSIFIED" => Self::Unclassified,
            other => {
                log::debug!("Unknown classifier label {:?}, treating as unclassified", other);
                Self::Unclassified
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mnre => "MNRE",
            Self::Meity => "MEITY",
            Self::Unclassified => "UNCLASSIFIED",
        }
    }
}

impl fmt::Display for WireLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a classification could not be obtained.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    NetworkUnavailable,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkUnavailable => f.write_str("network unavailable"),
        }
    }
}

/// Domain-level result of classifying a query.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassificationOutcome {
    Matched { ministry: MinistryId },
    Unclassified,
    Failed { reason: FailureReason },
}

impl ClassificationOutcome {
    pub fn matched(ministry: MinistryId) -> Self {
        Self::Matched { ministry }
    }

    pub fn failed(reason: FailureReason) -> Self {
        Self::Failed { reason }
    }

    /// Ministry the query was routed to, if any.
    pub fn ministry(&self) -> Option<MinistryId> {
        match self {
            Self::Matched { ministry } => Some(*ministry),
            _ => None,
        }
    }

    /// Wire label reported back to the user; `None` for failures.
    pub fn label(&self) -> Option<WireLabel> {
        match self {
            Self::Matched {
                ministry: MinistryId::Mnre,
            } => Some(WireLabel::Mnre),
            Self::Matched {
                ministry: MinistryId::Meity,
            } => Some(WireLabel::Meity),
            Self::Unclassified => Some(WireLabel::Unclassified),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl From<WireLabel> for ClassificationOutcome {
    fn from(label: WireLabel) -> Self {
        match label {
            WireLabel::Mnre => Self::matched(MinistryId::Mnre),
            WireLabel::Meity => Self::matched(MinistryId::Meity),
            WireLabel::Unclassified => Self::Unclassified,
        }
    }
}
