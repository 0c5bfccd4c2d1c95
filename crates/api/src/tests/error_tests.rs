// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use talent_domain::{DomainError, Role};
use talent_workflow::WorkflowError;

use crate::{ApiError, translate_domain_error, translate_workflow_error};

#[test]
fn test_status_codes() {
    let cases: Vec<(ApiError, u16)> = vec![
        (
            ApiError::AuthenticationFailed {
                reason: String::from("missing"),
            },
            401,
        ),
        (
            ApiError::Forbidden {
                action: String::from("select"),
                reason: String::from("not owner"),
            },
            403,
        ),
        (
            ApiError::ResourceNotFound {
                resource_type: String::from("Application"),
                message: String::from("gone"),
            },
            404,
        ),
        (
            ApiError::Conflict {
                message: String::from("already allocated"),
            },
            409,
        ),
        (
            ApiError::Internal {
                message: String::from("disk"),
            },
            500,
        ),
    ];
    for (err, code) in cases {
        assert_eq!(err.status_code(), code, "{err}");
    }
}

#[test]
fn test_workflow_not_found_names_the_entity() {
    let err: ApiError = translate_workflow_error(WorkflowError::NotFound {
        entity: "Resource request",
        id: String::from("RR-1"),
    });
    assert_eq!(
        err,
        ApiError::ResourceNotFound {
            resource_type: String::from("Resource request"),
            message: String::from("Resource request 'RR-1' does not exist"),
        }
    );
}

#[test]
fn test_workflow_unauthorized_carries_role_name() {
    let err: ApiError = ApiError::from(WorkflowError::Unauthorized {
        action: String::from("allocate"),
        role: Role::TpManager,
    });
    assert_eq!(
        err,
        ApiError::Unauthorized {
            action: String::from("allocate"),
            role: String::from("TP Manager"),
        }
    );
}

#[test]
fn test_store_failures_are_internal() {
    let err: ApiError = translate_workflow_error(WorkflowError::Store(String::from("locked")));
    assert_eq!(err.status_code(), 500);
    assert!(!err.is_retryable_after_refresh());
}

#[test]
fn test_field_errors_keep_the_field_key() {
    let err: ApiError = translate_domain_error(DomainError::ImmutableField {
        key: String::from("resources_in_propose"),
    });
    assert!(
        matches!(err, ApiError::InvalidInput { ref field, .. } if field == "resources_in_propose")
    );
}
