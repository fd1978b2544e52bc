//! Translation of adapter failures into client-safe domain errors.
//!
//! Clients only ever see the fixed per-operation message; the adapter error
//! is logged with the operation so the cause stays diagnosable.

use tracing::error;

use super::Error;
use super::ports::{
    AccountPersistenceError, CampaignPersistenceError, LeadPersistenceError, PasswordHashError,
    SessionPersistenceError, UserPersistenceError,
};

/// Whether a failure stems from an unreachable store or a failed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureKind {
    Unavailable,
    Internal,
}

/// Log `cause` and build the client-facing error for `operation`.
pub(crate) fn store_failure(
    operation: &'static str,
    kind: FailureKind,
    cause: &dyn std::error::Error,
) -> Error {
    error!(error = %cause, operation, "store operation failed");
    match kind {
        FailureKind::Unavailable => Error::service_unavailable(operation),
        FailureKind::Internal => Error::internal(operation),
    }
}

pub(crate) fn user_failure(operation: &'static str, err: UserPersistenceError) -> Error {
    let kind = match err {
        UserPersistenceError::Connection { .. } => FailureKind::Unavailable,
        _ => FailureKind::Internal,
    };
    store_failure(operation, kind, &err)
}

pub(crate) fn session_failure(operation: &'static str, err: SessionPersistenceError) -> Error {
    let kind = match err {
        SessionPersistenceError::Connection { .. } => FailureKind::Unavailable,
        SessionPersistenceError::Query { .. } => FailureKind::Internal,
    };
    store_failure(operation, kind, &err)
}

pub(crate) fn account_failure(operation: &'static str, err: AccountPersistenceError) -> Error {
    let kind = match err {
        AccountPersistenceError::Connection { .. } => FailureKind::Unavailable,
        AccountPersistenceError::Query { .. } => FailureKind::Internal,
    };
    store_failure(operation, kind, &err)
}

pub(crate) fn campaign_failure(operation: &'static str, err: CampaignPersistenceError) -> Error {
    let kind = match err {
        CampaignPersistenceError::Connection { .. } => FailureKind::Unavailable,
        CampaignPersistenceError::Query { .. } => FailureKind::Internal,
    };
    store_failure(operation, kind, &err)
}

pub(crate) fn lead_failure(operation: &'static str, err: LeadPersistenceError) -> Error {
    let kind = match err {
        LeadPersistenceError::Connection { .. } => FailureKind::Unavailable,
        _ => FailureKind::Internal,
    };
    store_failure(operation, kind, &err)
}

pub(crate) fn hash_failure(operation: &'static str, err: PasswordHashError) -> Error {
    store_failure(operation, FailureKind::Internal, &err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::duplicate_email("a@b.c"), ErrorCode::InternalError)]
    fn user_failures_keep_operation_message(
        #[case] err: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mapped = user_failure("Failed to fetch settings", err);
        assert_eq!(mapped.code(), expected);
        assert_eq!(mapped.message(), "Failed to fetch settings");
    }

    #[rstest]
    fn lead_failures_hide_adapter_detail() {
        let mapped = lead_failure(
            "Failed to fetch leads",
            LeadPersistenceError::query("relation \"leads\" does not exist"),
        );
        assert_eq!(mapped.message(), "Failed to fetch leads");
        assert!(mapped.details().is_none());
    }
}
