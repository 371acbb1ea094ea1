use portal_state::QueryState;
use thiserror::Error;

/// Why a submission was ignored. Neither case is shown to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("query is empty")]
    EmptyQuery,

    #[error("a query is already pending")]
    RequestAlreadyPending,
}

/// Why a classified query was not applied to the session.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CompleteRejected {
    #[error("no query is being classified (state is {0:?})")]
    NotClassifying(QueryState),
}
