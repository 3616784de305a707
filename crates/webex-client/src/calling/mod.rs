//! Webex Calling services
//!
//! Call control, call history and voicemail for the authenticated user's line.

mod call_history;
mod calls;
mod voicemail;

pub use call_history::{CallHistoryListOptions, CallHistoryRecord, CallHistoryService, CallReason};
pub use calls::{Call, CallHandle, CallsService, ParkResult, RemoteParty};
pub use voicemail::{VoiceMessage, VoiceMessageParty, VoiceMessageSummary, VoicemailService};
