//! Encoding and decoding between domain types and SQLite column values.
//!
//! UUIDs are stored as hyphenated lowercase strings; timestamps as RFC 3339
//! strings; calendar dates as ISO 8601 (`YYYY-MM-DD`); status enums as
//! their lowercase `strum` forms.

use std::str::FromStr as _;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use sindico_core::{
  allocation::{Allocation, AllocationStatus},
  condominium::{Address, Condominium},
  contract::{Contract, ContractStatus, ContractTerms},
  employee::Employee,
  entity::EntityMeta,
  tenant::TenantId,
  work_post::{Shift, WorkPost},
  Result,
};
use uuid::Uuid;

use crate::error::decode_err;

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Uuid::parse_str(s).map_err(|e| decode_err("uuid", e))
}

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| decode_err("timestamp", e))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| decode_err("date", e))
}

fn decode_meta(id: &str, tenant: &str, created_at: &str) -> Result<EntityMeta> {
  Ok(EntityMeta {
    id:         decode_uuid(id)?,
    tenant_id:  TenantId(decode_uuid(tenant)?),
    created_at: decode_dt(created_at)?,
  })
}

// ─── Condominiums ────────────────────────────────────────────────────────────

pub const CONDOMINIUM_COLS: &str = "id, tenant_id, created_at, \
   registration_number, name, street, city, state, postal_code";

pub struct RawCondominium {
  id:                  String,
  tenant_id:           String,
  created_at:          String,
  registration_number: String,
  name:                String,
  street:              Option<String>,
  city:                Option<String>,
  state:               Option<String>,
  postal_code:         Option<String>,
}

impl RawCondominium {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      tenant_id:           row.get(1)?,
      created_at:          row.get(2)?,
      registration_number: row.get(3)?,
      name:                row.get(4)?,
      street:              row.get(5)?,
      city:                row.get(6)?,
      state:               row.get(7)?,
      postal_code:         row.get(8)?,
    })
  }

  pub fn into_domain(self) -> Result<Condominium> {
    Ok(Condominium {
      meta:                decode_meta(
        &self.id,
        &self.tenant_id,
        &self.created_at,
      )?,
      registration_number: self.registration_number,
      name:                self.name,
      address:             Address {
        street:      self.street,
        city:        self.city,
        state:       self.state,
        postal_code: self.postal_code,
      },
    })
  }
}

// ─── Contracts ───────────────────────────────────────────────────────────────

pub const CONTRACT_COLS: &str = "id, tenant_id, created_at, condominium_id, \
   monthly_total, daily_rate, night_premium_pct, monthly_benefits, tax_pct, \
   staff_count, profit_margin_pct, absence_margin_pct, starts_on, ends_on, \
   status";

pub struct RawContract {
  id:                 String,
  tenant_id:          String,
  created_at:         String,
  condominium_id:     String,
  monthly_total:      i64,
  daily_rate:         i64,
  night_premium_pct:  f64,
  monthly_benefits:   i64,
  tax_pct:            f64,
  staff_count:        i32,
  profit_margin_pct:  f64,
  absence_margin_pct: f64,
  starts_on:          String,
  ends_on:            String,
  status:             String,
}

impl RawContract {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                 row.get(0)?,
      tenant_id:          row.get(1)?,
      created_at:         row.get(2)?,
      condominium_id:     row.get(3)?,
      monthly_total:      row.get(4)?,
      daily_rate:         row.get(5)?,
      night_premium_pct:  row.get(6)?,
      monthly_benefits:   row.get(7)?,
      tax_pct:            row.get(8)?,
      staff_count:        row.get(9)?,
      profit_margin_pct:  row.get(10)?,
      absence_margin_pct: row.get(11)?,
      starts_on:          row.get(12)?,
      ends_on:            row.get(13)?,
      status:             row.get(14)?,
    })
  }

  pub fn into_domain(self) -> Result<Contract> {
    let status = ContractStatus::from_str(&self.status)
      .map_err(|_| decode_err("contract", &self.status))?;
    Ok(Contract {
      meta:           decode_meta(&self.id, &self.tenant_id, &self.created_at)?,
      condominium_id: decode_uuid(&self.condominium_id)?,
      terms:          ContractTerms {
        monthly_total:      self.monthly_total,
        daily_rate:         self.daily_rate,
        night_premium_pct:  self.night_premium_pct,
        monthly_benefits:   self.monthly_benefits,
        tax_pct:            self.tax_pct,
        staff_count:        self.staff_count,
        profit_margin_pct:  self.profit_margin_pct,
        absence_margin_pct: self.absence_margin_pct,
        starts_on:          decode_date(&self.starts_on)?,
        ends_on:            decode_date(&self.ends_on)?,
      },
      status,
    })
  }
}

// ─── Work posts ──────────────────────────────────────────────────────────────

pub const WORK_POST_COLS: &str = "id, tenant_id, created_at, condominium_id, \
   name, shift, schedule, staff_count";

pub struct RawWorkPost {
  id:             String,
  tenant_id:      String,
  created_at:     String,
  condominium_id: String,
  name:           String,
  shift:          String,
  schedule:       String,
  staff_count:    i32,
}

impl RawWorkPost {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      tenant_id:      row.get(1)?,
      created_at:     row.get(2)?,
      condominium_id: row.get(3)?,
      name:           row.get(4)?,
      shift:          row.get(5)?,
      schedule:       row.get(6)?,
      staff_count:    row.get(7)?,
    })
  }

  pub fn into_domain(self) -> Result<WorkPost> {
    let shift = Shift::from_str(&self.shift)
      .map_err(|_| decode_err("work post", &self.shift))?;
    Ok(WorkPost {
      meta: decode_meta(&self.id, &self.tenant_id, &self.created_at)?,
      condominium_id: decode_uuid(&self.condominium_id)?,
      name: self.name,
      shift,
      schedule: self.schedule,
      staff_count: self.staff_count,
    })
  }
}

// ─── Employees ───────────────────────────────────────────────────────────────

pub const EMPLOYEE_COLS: &str =
  "id, tenant_id, created_at, name, civil_id, hired_on";

pub struct RawEmployee {
  id:         String,
  tenant_id:  String,
  created_at: String,
  name:       String,
  civil_id:   String,
  hired_on:   String,
}

impl RawEmployee {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      tenant_id:  row.get(1)?,
      created_at: row.get(2)?,
      name:       row.get(3)?,
      civil_id:   row.get(4)?,
      hired_on:   row.get(5)?,
    })
  }

  pub fn into_domain(self) -> Result<Employee> {
    Ok(Employee {
      meta:     decode_meta(&self.id, &self.tenant_id, &self.created_at)?,
      name:     self.name,
      civil_id: self.civil_id,
      hired_on: decode_date(&self.hired_on)?,
    })
  }
}

// ─── Allocations ─────────────────────────────────────────────────────────────

pub const ALLOCATION_COLS: &str =
  "id, tenant_id, created_at, employee_id, work_post_id, date, status";

pub struct RawAllocation {
  id:           String,
  tenant_id:    String,
  created_at:   String,
  employee_id:  String,
  work_post_id: String,
  date:         String,
  status:       String,
}

impl RawAllocation {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      tenant_id:    row.get(1)?,
      created_at:   row.get(2)?,
      employee_id:  row.get(3)?,
      work_post_id: row.get(4)?,
      date:         row.get(5)?,
      status:       row.get(6)?,
    })
  }

  pub fn into_domain(self) -> Result<Allocation> {
    let status = AllocationStatus::from_str(&self.status)
      .map_err(|_| decode_err("allocation", &self.status))?;
    Ok(Allocation {
      meta:         decode_meta(&self.id, &self.tenant_id, &self.created_at)?,
      employee_id:  decode_uuid(&self.employee_id)?,
      work_post_id: decode_uuid(&self.work_post_id)?,
      date:         decode_date(&self.date)?,
      status,
    })
  }
}
