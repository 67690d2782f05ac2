//! Playing a hunt: reveal sequencing, location checks, completion.

mod machine;
mod state;
mod view;

pub use machine::{CheckTicket, HuntSession};
pub use state::{CheckOutcome, ClueState, Reveals, SessionError};
pub use view::{AnswerView, ClueSummary, ClueView, HuntView};
