//! portal_core - Core types for the ministry portal conversation
//!
//! This crate provides the foundational types used across the portal crates:
//! - `ministry` - MinistryId and the switch notification
//! - `message` - Message, Sender and MessageId for the conversation log
//! - `classification` - ClassificationOutcome and the endpoint's wire labels
//! - `config` - layered Config loading

pub mod classification;
pub mod config;
pub mod message;
pub mod ministry;

// Re-export commonly used types
pub use classification::{ClassificationOutcome, FailureReason, WireLabel};
pub use config::Config;
pub use message::{Message, MessageId, Sender};
pub use ministry::{MinistryId, SwitchNotification, NOTIFICATION_LIFETIME};
