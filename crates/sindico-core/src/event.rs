//! Domain events raised by write operations.
//!
//! Events are an explicit *output* of each operation — a returned list, not
//! mutable state on the aggregates — so propagation is a plain data-flow
//! concern. The API layer currently logs them; an outbox or dispatcher can
//! consume the same list without touching the core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::ContractStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
  CondominiumRegistered {
    condominium_id: Uuid,
  },
  ContractOpened {
    contract_id:    Uuid,
    condominium_id: Uuid,
  },
  ContractStatusChanged {
    contract_id: Uuid,
    from:        ContractStatus,
    to:          ContractStatus,
  },
  WorkPostOpened {
    work_post_id:   Uuid,
    condominium_id: Uuid,
  },
  EmployeeRegistered {
    employee_id: Uuid,
  },
  AllocationScheduled {
    allocation_id: Uuid,
    employee_id:   Uuid,
    work_post_id:  Uuid,
    date:          NaiveDate,
  },
  AbsenceRecorded {
    allocation_id: Uuid,
  },
  AllocationReplaced {
    old_allocation_id: Uuid,
    new_allocation_id: Uuid,
  },
}
