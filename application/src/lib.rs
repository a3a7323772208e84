//! Application layer for tax-duel
//!
//! This crate contains use cases, port definitions, the session store and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session_store;
pub mod use_cases;

// Re-export commonly used types
pub use config::TurnParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, TurnProgressNotifier},
    responder::{Responder, ResponderContext, ResponderError},
    scorer::{Scorer, ScorerError},
    vote_log::{VoteLog, VoteLogError},
};
pub use session_store::{SessionStore, StoreError};
pub use use_cases::record_vote::{RecordVoteError, RecordVoteUseCase};
pub use use_cases::submit_turn::{SubmitTurnError, SubmitTurnUseCase};
