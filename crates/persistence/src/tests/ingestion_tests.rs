// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ingestion queue tests.

use super::{
    HM_ID, JOB_ID, OTHER_JOB_ID, WFM_ID, create_test_draft, create_test_persistence, test_instant,
};
use crate::Persistence;
use talent_domain::{EmployeeId, ResourceRequestDraft};
use talent_workflow::{IngestionQueue, IngestionTicket, StoreError};

#[test]
fn test_enqueue_and_read_pending_in_order() {
    let mut persistence: Persistence = create_test_persistence();
    let first: ResourceRequestDraft = create_test_draft(JOB_ID, HM_ID, WFM_ID);
    let second: ResourceRequestDraft = create_test_draft(OTHER_JOB_ID, HM_ID, WFM_ID);

    let first_ticket: i64 = persistence
        .enqueue_resource_request(&first, EmployeeId::new(HM_ID), test_instant(1))
        .unwrap();
    let second_ticket: i64 = persistence
        .enqueue_resource_request(&second, EmployeeId::new(HM_ID), test_instant(2))
        .unwrap();

    let pending: Vec<IngestionTicket> = persistence.pending_tickets(10).unwrap();

    assert!(second_ticket > first_ticket);
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].ticket_id, first_ticket);
    assert_eq!(pending[0].draft, first);
    assert_eq!(pending[0].submitted_by, EmployeeId::new(HM_ID));
    assert_eq!(pending[0].queued_at, test_instant(1));
    assert_eq!(pending[1].draft, second);
    assert_eq!(persistence.pending_tickets(1).unwrap().len(), 1);
}

#[test]
fn test_processed_tickets_leave_the_queue() {
    let mut persistence: Persistence = create_test_persistence();
    let ticket: i64 = persistence
        .enqueue_resource_request(
            &create_test_draft(JOB_ID, HM_ID, WFM_ID),
            EmployeeId::new(HM_ID),
            test_instant(1),
        )
        .unwrap();

    persistence
        .mark_ticket_processed(ticket, test_instant(2))
        .unwrap();

    assert!(persistence.pending_tickets(10).unwrap().is_empty());
}

#[test]
fn test_marking_unknown_ticket_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let result: Result<(), StoreError> = persistence.mark_ticket_processed(77, test_instant(0));
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}
