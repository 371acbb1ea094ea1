//! Ministry contexts a query can be routed to.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How long a switch notification stays visible.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_millis(3000);

/// The supported department contexts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MinistryId {
    /// Ministry of New and Renewable Energy.
    #[default]
    #[serde(rename = "MNRE")]
    Mnre,
    /// Ministry of Electronics and IT.
    #[serde(rename = "MeiTY")]
    Meity,
}

impl MinistryId {
    /// Every supported ministry, in sidebar order.
    pub const ALL: [MinistryId; 2] = [MinistryId::Mnre, MinistryId::Meity];

    /// Display id used throughout the UI.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Mnre => "MNRE",
            Self::Meity => "MeiTY",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Self::Mnre => "Ministry of New and Renewable Energy",
            Self::Meity => "Ministry of Electronics and IT",
        }
    }

    /// Short department label shown on the landing text.
    pub fn department(&self) -> &'static str {
        match self {
            Self::Mnre => "Renewable Energy",
            Self::Meity => "Electronics & IT",
        }
    }
}

impl fmt::Display for MinistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MinistryId {
    type Err = String;

    /// Accepts both display ids and wire labels, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MNRE" => Ok(Self::Mnre),
            "MEITY" => Ok(Self::Meity),
            other => Err(format!("unknown ministry: {other}")),
        }
    }
}

/// Transient signal shown after an automatic context switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchNotification {
    pub target: MinistryId,
    pub expires_at: Instant,
}

impl SwitchNotification {
    pub fn new(target: MinistryId, created_at: Instant) -> Self {
        Self {
            target,
            expires_at: created_at + NOTIFICATION_LIFETIME,
        }
    }

    /// Toast text for the notification.
    pub fn message(&self) -> String {
        format!("Switched to {}", self.target)
    }
}
