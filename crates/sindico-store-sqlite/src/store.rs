//! [`SqliteStore`] — the SQLite implementation of [`AdminStore`].
//!
//! Reads append `tenant_id = ?` to every query; an anonymous context short
//! circuits to empty before touching the database. Writes are lowered from
//! the staged [`ChangeSet`] into parameterised statements and applied inside
//! a single transaction — the sole serialization point of the system.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params_from_iter, types::Value, OptionalExtension as _, Row};
use uuid::Uuid;

use sindico_core::{
  allocation::Allocation,
  changeset::{ChangeSet, Staged},
  condominium::Condominium,
  contract::Contract,
  employee::Employee,
  entity::EntityMeta,
  store::AdminStore,
  tenant::{TenantContext, TenantId},
  work_post::WorkPost,
  Error, Result,
};

use crate::{
  encode::{
    encode_date, encode_dt, encode_uuid, RawAllocation, RawCondominium,
    RawContract, RawEmployee, RawWorkPost, ALLOCATION_COLS, CONDOMINIUM_COLS,
    CONTRACT_COLS, EMPLOYEE_COLS, WORK_POST_COLS,
  },
  error::{db_err, sqlite_err},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Síndico store backed by a single SQLite file shared by all tenants.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn =
      tokio_rusqlite::Connection::open(path).await.map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn =
      tokio_rusqlite::Connection::open_in_memory().await.map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  /// Run a single-row query and map the raw row type.
  async fn fetch_optional<R>(
    &self,
    sql: String,
    params: Vec<Value>,
    from_row: fn(&Row<'_>) -> rusqlite::Result<R>,
  ) -> Result<Option<R>>
  where
    R: Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, params_from_iter(params), from_row)
            .optional()?,
        )
      })
      .await
      .map_err(db_err)
  }

  /// Run a multi-row query and map each raw row.
  async fn fetch_all<R>(
    &self,
    sql: String,
    params: Vec<Value>,
    from_row: fn(&Row<'_>) -> rusqlite::Result<R>,
  ) -> Result<Vec<R>>
  where
    R: Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)
  }
}

/// The resolved tenant, or the fail-closed empty read.
macro_rules! scope_or_empty {
  ($ctx:expr, $empty:expr) => {
    match $ctx.tenant() {
      Some(t) => t,
      None => return Ok($empty),
    }
  };
}

fn tenant_param(t: TenantId) -> Value { Value::from(encode_uuid(t.0)) }

fn uuid_param(id: Uuid) -> Value { Value::from(encode_uuid(id)) }

fn date_param(d: NaiveDate) -> Value { Value::from(encode_date(d)) }

// ─── AdminStore impl — reads ─────────────────────────────────────────────────

impl AdminStore for SqliteStore {
  async fn get_condominium(
    &self,
    ctx: &TenantContext,
    id: Uuid,
  ) -> Result<Option<Condominium>> {
    let tenant = scope_or_empty!(ctx, None);
    let raw = self
      .fetch_optional(
        format!(
          "SELECT {CONDOMINIUM_COLS} FROM condominiums \
           WHERE tenant_id = ?1 AND id = ?2"
        ),
        vec![tenant_param(tenant), uuid_param(id)],
        RawCondominium::from_row,
      )
      .await?;
    raw.map(RawCondominium::into_domain).transpose()
  }

  async fn list_condominiums(
    &self,
    ctx: &TenantContext,
  ) -> Result<Vec<Condominium>> {
    let tenant = scope_or_empty!(ctx, Vec::new());
    let raws = self
      .fetch_all(
        format!(
          "SELECT {CONDOMINIUM_COLS} FROM condominiums \
           WHERE tenant_id = ?1 ORDER BY name"
        ),
        vec![tenant_param(tenant)],
        RawCondominium::from_row,
      )
      .await?;
    raws.into_iter().map(RawCondominium::into_domain).collect()
  }

  async fn find_condominium_by_registration(
    &self,
    ctx: &TenantContext,
    registration: &str,
  ) -> Result<Option<Condominium>> {
    let tenant = scope_or_empty!(ctx, None);
    let raw = self
      .fetch_optional(
        format!(
          "SELECT {CONDOMINIUM_COLS} FROM condominiums \
           WHERE tenant_id = ?1 AND registration_number = ?2"
        ),
        vec![tenant_param(tenant), Value::from(registration.to_owned())],
        RawCondominium::from_row,
      )
      .await?;
    raw.map(RawCondominium::into_domain).transpose()
  }

  async fn get_contract(
    &self,
    ctx: &TenantContext,
    id: Uuid,
  ) -> Result<Option<Contract>> {
    let tenant = scope_or_empty!(ctx, None);
    let raw = self
      .fetch_optional(
        format!(
          "SELECT {CONTRACT_COLS} FROM contracts \
           WHERE tenant_id = ?1 AND id = ?2"
        ),
        vec![tenant_param(tenant), uuid_param(id)],
        RawContract::from_row,
      )
      .await?;
    raw.map(RawContract::into_domain).transpose()
  }

  async fn list_contracts(&self, ctx: &TenantContext) -> Result<Vec<Contract>> {
    let tenant = scope_or_empty!(ctx, Vec::new());
    let raws = self
      .fetch_all(
        format!(
          "SELECT {CONTRACT_COLS} FROM contracts \
           WHERE tenant_id = ?1 ORDER BY created_at"
        ),
        vec![tenant_param(tenant)],
        RawContract::from_row,
      )
      .await?;
    raws.into_iter().map(RawContract::into_domain).collect()
  }

  async fn list_contracts_for(
    &self,
    ctx: &TenantContext,
    condominium_id: Uuid,
  ) -> Result<Vec<Contract>> {
    let tenant = scope_or_empty!(ctx, Vec::new());
    let raws = self
      .fetch_all(
        format!(
          "SELECT {CONTRACT_COLS} FROM contracts \
           WHERE tenant_id = ?1 AND condominium_id = ?2 \
           ORDER BY created_at"
        ),
        vec![tenant_param(tenant), uuid_param(condominium_id)],
        RawContract::from_row,
      )
      .await?;
    raws.into_iter().map(RawContract::into_domain).collect()
  }

  async fn active_contract_for(
    &self,
    ctx: &TenantContext,
    condominium_id: Uuid,
  ) -> Result<Option<Contract>> {
    let tenant = scope_or_empty!(ctx, None);
    let raw = self
      .fetch_optional(
        format!(
          "SELECT {CONTRACT_COLS} FROM contracts \
           WHERE tenant_id = ?1 AND condominium_id = ?2 \
           AND status IN ('pending', 'paid')"
        ),
        vec![tenant_param(tenant), uuid_param(condominium_id)],
        RawContract::from_row,
      )
      .await?;
    raw.map(RawContract::into_domain).transpose()
  }

  async fn get_work_post(
    &self,
    ctx: &TenantContext,
    id: Uuid,
  ) -> Result<Option<WorkPost>> {
    let tenant = scope_or_empty!(ctx, None);
    let raw = self
      .fetch_optional(
        format!(
          "SELECT {WORK_POST_COLS} FROM work_posts \
           WHERE tenant_id = ?1 AND id = ?2"
        ),
        vec![tenant_param(tenant), uuid_param(id)],
        RawWorkPost::from_row,
      )
      .await?;
    raw.map(RawWorkPost::into_domain).transpose()
  }

  async fn list_work_posts(
    &self,
    ctx: &TenantContext,
  ) -> Result<Vec<WorkPost>> {
    let tenant = scope_or_empty!(ctx, Vec::new());
    let raws = self
      .fetch_all(
        format!(
          "SELECT {WORK_POST_COLS} FROM work_posts \
           WHERE tenant_id = ?1 ORDER BY name"
        ),
        vec![tenant_param(tenant)],
        RawWorkPost::from_row,
      )
      .await?;
    raws.into_iter().map(RawWorkPost::into_domain).collect()
  }

  async fn list_work_posts_for(
    &self,
    ctx: &TenantContext,
    condominium_id: Uuid,
  ) -> Result<Vec<WorkPost>> {
    let tenant = scope_or_empty!(ctx, Vec::new());
    let raws = self
      .fetch_all(
        format!(
          "SELECT {WORK_POST_COLS} FROM work_posts \
           WHERE tenant_id = ?1 AND condominium_id = ?2 ORDER BY name"
        ),
        vec![tenant_param(tenant), uuid_param(condominium_id)],
        RawWorkPost::from_row,
      )
      .await?;
    raws.into_iter().map(RawWorkPost::into_domain).collect()
  }

  async fn get_employee(
    &self,
    ctx: &TenantContext,
    id: Uuid,
  ) -> Result<Option<Employee>> {
    let tenant = scope_or_empty!(ctx, None);
    let raw = self
      .fetch_optional(
        format!(
          "SELECT {EMPLOYEE_COLS} FROM employees \
           WHERE tenant_id = ?1 AND id = ?2"
        ),
        vec![tenant_param(tenant), uuid_param(id)],
        RawEmployee::from_row,
      )
      .await?;
    raw.map(RawEmployee::into_domain).transpose()
  }

  async fn list_employees(&self, ctx: &TenantContext) -> Result<Vec<Employee>> {
    let tenant = scope_or_empty!(ctx, Vec::new());
    let raws = self
      .fetch_all(
        format!(
          "SELECT {EMPLOYEE_COLS} FROM employees \
           WHERE tenant_id = ?1 ORDER BY name"
        ),
        vec![tenant_param(tenant)],
        RawEmployee::from_row,
      )
      .await?;
    raws.into_iter().map(RawEmployee::into_domain).collect()
  }

  async fn find_employee_by_civil_id(
    &self,
    ctx: &TenantContext,
    civil_id: &str,
  ) -> Result<Option<Employee>> {
    let tenant = scope_or_empty!(ctx, None);
    let raw = self
      .fetch_optional(
        format!(
          "SELECT {EMPLOYEE_COLS} FROM employees \
           WHERE tenant_id = ?1 AND civil_id = ?2"
        ),
        vec![tenant_param(tenant), Value::from(civil_id.to_owned())],
        RawEmployee::from_row,
      )
      .await?;
    raw.map(RawEmployee::into_domain).transpose()
  }

  async fn get_allocation(
    &self,
    ctx: &TenantContext,
    id: Uuid,
  ) -> Result<Option<Allocation>> {
    let tenant = scope_or_empty!(ctx, None);
    let raw = self
      .fetch_optional(
        format!(
          "SELECT {ALLOCATION_COLS} FROM allocations \
           WHERE tenant_id = ?1 AND id = ?2"
        ),
        vec![tenant_param(tenant), uuid_param(id)],
        RawAllocation::from_row,
      )
      .await?;
    raw.map(RawAllocation::into_domain).transpose()
  }

  async fn list_allocations(
    &self,
    ctx: &TenantContext,
  ) -> Result<Vec<Allocation>> {
    let tenant = scope_or_empty!(ctx, Vec::new());
    let raws = self
      .fetch_all(
        format!(
          "SELECT {ALLOCATION_COLS} FROM allocations \
           WHERE tenant_id = ?1 ORDER BY date, created_at"
        ),
        vec![tenant_param(tenant)],
        RawAllocation::from_row,
      )
      .await?;
    raws.into_iter().map(RawAllocation::into_domain).collect()
  }

  async fn allocation_for_employee_on(
    &self,
    ctx: &TenantContext,
    employee_id: Uuid,
    date: NaiveDate,
  ) -> Result<Option<Allocation>> {
    let tenant = scope_or_empty!(ctx, None);
    let raw = self
      .fetch_optional(
        format!(
          "SELECT {ALLOCATION_COLS} FROM allocations \
           WHERE tenant_id = ?1 AND employee_id = ?2 AND date = ?3 \
           AND status != 'replaced'"
        ),
        vec![tenant_param(tenant), uuid_param(employee_id), date_param(date)],
        RawAllocation::from_row,
      )
      .await?;
    raw.map(RawAllocation::into_domain).transpose()
  }

  async fn allocation_for_post_on(
    &self,
    ctx: &TenantContext,
    work_post_id: Uuid,
    date: NaiveDate,
  ) -> Result<Option<Allocation>> {
    let tenant = scope_or_empty!(ctx, None);
    let raw = self
      .fetch_optional(
        format!(
          "SELECT {ALLOCATION_COLS} FROM allocations \
           WHERE tenant_id = ?1 AND work_post_id = ?2 AND date = ?3 \
           AND status != 'replaced'"
        ),
        vec![
          tenant_param(tenant),
          uuid_param(work_post_id),
          date_param(date),
        ],
        RawAllocation::from_row,
      )
      .await?;
    raw.map(RawAllocation::into_domain).transpose()
  }

  async fn list_allocations_on(
    &self,
    ctx: &TenantContext,
    date: NaiveDate,
  ) -> Result<Vec<Allocation>> {
    let tenant = scope_or_empty!(ctx, Vec::new());
    let raws = self
      .fetch_all(
        format!(
          "SELECT {ALLOCATION_COLS} FROM allocations \
           WHERE tenant_id = ?1 AND date = ?2 ORDER BY created_at"
        ),
        vec![tenant_param(tenant), date_param(date)],
        RawAllocation::from_row,
      )
      .await?;
    raws.into_iter().map(RawAllocation::into_domain).collect()
  }

  // ── Unit of work ──────────────────────────────────────────────────────

  async fn commit(
    &self,
    ctx: &TenantContext,
    changes: ChangeSet,
  ) -> Result<usize> {
    if changes.is_empty() {
      return Ok(0);
    }
    let tenant = ctx.tenant().ok_or(Error::TenantUnresolved)?;

    let lowered = changes
      .into_ops()
      .into_iter()
      .map(|op| lower_op(op, tenant))
      .collect::<Result<Vec<_>>>()?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut rows = 0usize;

        for op in lowered {
          // Dependency guards run inside the same transaction, so the
          // check and the write cannot be interleaved by another commit.
          for guard in &op.guards {
            let dependents: i64 = tx.query_row(
              guard.sql,
              params_from_iter(guard.params.iter().cloned()),
              |r| r.get(0),
            )?;
            if dependents > 0 {
              return Ok(Err(Error::Conflict(guard.conflict.clone())));
            }
          }

          let affected = match tx.execute(op.sql, params_from_iter(op.params))
          {
            Ok(n) => n,
            Err(e) => return Ok(Err(sqlite_err(e))),
          };

          // Updates and deletes pin the tenant in their WHERE clause; a
          // zero-row match means missing-or-foreign, and the whole set
          // rolls back.
          if affected == 0
            && let Some((kind, id)) = op.verify
          {
            return Ok(Err(Error::NotFound { kind, id }));
          }
          rows += affected;
        }

        tx.commit()?;
        Ok(Ok(rows))
      })
      .await
      .map_err(db_err)?
  }
}

// ─── ChangeSet lowering ──────────────────────────────────────────────────────

/// A pre-commit dependency check; a non-zero count is a conflict.
struct Guard {
  sql:      &'static str,
  params:   Vec<Value>,
  conflict: String,
}

/// One staged operation lowered to a parameterised statement.
struct LoweredOp {
  sql:    &'static str,
  params: Vec<Value>,
  /// `Some((kind, id))` for updates/deletes that must match exactly one row.
  verify: Option<(&'static str, Uuid)>,
  guards: Vec<Guard>,
}

/// Decide the owning tenant for an insert: an unset tenant id is stamped
/// with the caller's; a different one is a data-integrity problem.
fn insert_owner(meta: &EntityMeta, tenant: TenantId) -> Result<TenantId> {
  if meta.tenant_id.is_nil() || meta.tenant_id == tenant {
    Ok(tenant)
  } else {
    Err(Error::ForeignTenant)
  }
}

const INSERT_CONDOMINIUM: &str = "INSERT INTO condominiums \
   (id, tenant_id, created_at, registration_number, name, street, city, \
    state, postal_code) \
   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

// tenant_id is never in a SET list: ownership transfer via update is not a
// thing this store can express.
const UPDATE_CONDOMINIUM: &str = "UPDATE condominiums SET \
   registration_number = ?1, name = ?2, street = ?3, city = ?4, \
   state = ?5, postal_code = ?6 \
   WHERE id = ?7 AND tenant_id = ?8";

const DELETE_CONDOMINIUM: &str =
  "DELETE FROM condominiums WHERE id = ?1 AND tenant_id = ?2";

const INSERT_CONTRACT: &str = "INSERT INTO contracts \
   (id, tenant_id, created_at, condominium_id, monthly_total, daily_rate, \
    night_premium_pct, monthly_benefits, tax_pct, staff_count, \
    profit_margin_pct, absence_margin_pct, starts_on, ends_on, status) \
   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)";

const UPDATE_CONTRACT: &str = "UPDATE contracts SET \
   monthly_total = ?1, daily_rate = ?2, night_premium_pct = ?3, \
   monthly_benefits = ?4, tax_pct = ?5, staff_count = ?6, \
   profit_margin_pct = ?7, absence_margin_pct = ?8, starts_on = ?9, \
   ends_on = ?10, status = ?11 \
   WHERE id = ?12 AND tenant_id = ?13";

const DELETE_CONTRACT: &str =
  "DELETE FROM contracts WHERE id = ?1 AND tenant_id = ?2";

const INSERT_WORK_POST: &str = "INSERT INTO work_posts \
   (id, tenant_id, created_at, condominium_id, name, shift, schedule, \
    staff_count) \
   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const UPDATE_WORK_POST: &str = "UPDATE work_posts SET \
   name = ?1, shift = ?2, schedule = ?3, staff_count = ?4 \
   WHERE id = ?5 AND tenant_id = ?6";

const DELETE_WORK_POST: &str =
  "DELETE FROM work_posts WHERE id = ?1 AND tenant_id = ?2";

const INSERT_EMPLOYEE: &str = "INSERT INTO employees \
   (id, tenant_id, created_at, name, civil_id, hired_on) \
   VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const UPDATE_EMPLOYEE: &str = "UPDATE employees SET \
   name = ?1, civil_id = ?2, hired_on = ?3 \
   WHERE id = ?4 AND tenant_id = ?5";

const DELETE_EMPLOYEE: &str =
  "DELETE FROM employees WHERE id = ?1 AND tenant_id = ?2";

const INSERT_ALLOCATION: &str = "INSERT INTO allocations \
   (id, tenant_id, created_at, employee_id, work_post_id, date, status) \
   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

// Only the status is mutable; reassignments go through the correction flow
// as a replacement row.
const UPDATE_ALLOCATION: &str = "UPDATE allocations SET status = ?1 \
   WHERE id = ?2 AND tenant_id = ?3";

const DELETE_ALLOCATION: &str =
  "DELETE FROM allocations WHERE id = ?1 AND tenant_id = ?2";

const COUNT_CONTRACTS_FOR: &str = "SELECT COUNT(*) FROM contracts \
   WHERE condominium_id = ?1 AND tenant_id = ?2";

const COUNT_WORK_POSTS_FOR: &str = "SELECT COUNT(*) FROM work_posts \
   WHERE condominium_id = ?1 AND tenant_id = ?2";

const COUNT_ALLOCATIONS_FOR_EMPLOYEE: &str =
  "SELECT COUNT(*) FROM allocations \
   WHERE employee_id = ?1 AND tenant_id = ?2";

const COUNT_ALLOCATIONS_FOR_POST: &str = "SELECT COUNT(*) FROM allocations \
   WHERE work_post_id = ?1 AND tenant_id = ?2";

fn meta_params(meta: &EntityMeta, owner: TenantId) -> [Value; 3] {
  [
    uuid_param(meta.id),
    tenant_param(owner),
    Value::from(encode_dt(meta.created_at)),
  ]
}

fn lower_op(op: Staged, tenant: TenantId) -> Result<LoweredOp> {
  let op = match op {
    // ── Condominiums ────────────────────────────────────────────────────
    Staged::InsertCondominium(c) => {
      let owner = insert_owner(&c.meta, tenant)?;
      let [id, owner, created] = meta_params(&c.meta, owner);
      LoweredOp {
        sql:    INSERT_CONDOMINIUM,
        params: vec![
          id,
          owner,
          created,
          Value::from(c.registration_number),
          Value::from(c.name),
          Value::from(c.address.street),
          Value::from(c.address.city),
          Value::from(c.address.state),
          Value::from(c.address.postal_code),
        ],
        verify: None,
        guards: vec![],
      }
    }
    Staged::UpdateCondominium(c) => LoweredOp {
      sql:    UPDATE_CONDOMINIUM,
      params: vec![
        Value::from(c.registration_number),
        Value::from(c.name),
        Value::from(c.address.street),
        Value::from(c.address.city),
        Value::from(c.address.state),
        Value::from(c.address.postal_code),
        uuid_param(c.meta.id),
        tenant_param(tenant),
      ],
      verify: Some(("condominium", c.meta.id)),
      guards: vec![],
    },
    Staged::DeleteCondominium(id) => LoweredOp {
      sql:    DELETE_CONDOMINIUM,
      params: vec![uuid_param(id), tenant_param(tenant)],
      verify: Some(("condominium", id)),
      guards: vec![
        Guard {
          sql:      COUNT_CONTRACTS_FOR,
          params:   vec![uuid_param(id), tenant_param(tenant)],
          conflict: format!("condominium {id} still has contracts"),
        },
        Guard {
          sql:      COUNT_WORK_POSTS_FOR,
          params:   vec![uuid_param(id), tenant_param(tenant)],
          conflict: format!("condominium {id} still has work posts"),
        },
      ],
    },

    // ── Contracts ───────────────────────────────────────────────────────
    Staged::InsertContract(c) => {
      let owner = insert_owner(&c.meta, tenant)?;
      let [id, owner, created] = meta_params(&c.meta, owner);
      let t = c.terms;
      LoweredOp {
        sql:    INSERT_CONTRACT,
        params: vec![
          id,
          owner,
          created,
          uuid_param(c.condominium_id),
          Value::from(t.monthly_total),
          Value::from(t.daily_rate),
          Value::from(t.night_premium_pct),
          Value::from(t.monthly_benefits),
          Value::from(t.tax_pct),
          Value::from(i64::from(t.staff_count)),
          Value::from(t.profit_margin_pct),
          Value::from(t.absence_margin_pct),
          Value::from(encode_date(t.starts_on)),
          Value::from(encode_date(t.ends_on)),
          Value::from(c.status.to_string()),
        ],
        verify: None,
        guards: vec![],
      }
    }
    Staged::UpdateContract(c) => {
      let t = c.terms;
      LoweredOp {
        sql:    UPDATE_CONTRACT,
        params: vec![
          Value::from(t.monthly_total),
          Value::from(t.daily_rate),
          Value::from(t.night_premium_pct),
          Value::from(t.monthly_benefits),
          Value::from(t.tax_pct),
          Value::from(i64::from(t.staff_count)),
          Value::from(t.profit_margin_pct),
          Value::from(t.absence_margin_pct),
          Value::from(encode_date(t.starts_on)),
          Value::from(encode_date(t.ends_on)),
          Value::from(c.status.to_string()),
          uuid_param(c.meta.id),
          tenant_param(tenant),
        ],
        verify: Some(("contract", c.meta.id)),
        guards: vec![],
      }
    }
    Staged::DeleteContract(id) => LoweredOp {
      sql:    DELETE_CONTRACT,
      params: vec![uuid_param(id), tenant_param(tenant)],
      verify: Some(("contract", id)),
      guards: vec![],
    },

    // ── Work posts ──────────────────────────────────────────────────────
    Staged::InsertWorkPost(p) => {
      let owner = insert_owner(&p.meta, tenant)?;
      let [id, owner, created] = meta_params(&p.meta, owner);
      LoweredOp {
        sql:    INSERT_WORK_POST,
        params: vec![
          id,
          owner,
          created,
          uuid_param(p.condominium_id),
          Value::from(p.name),
          Value::from(p.shift.to_string()),
          Value::from(p.schedule),
          Value::from(i64::from(p.staff_count)),
        ],
        verify: None,
        guards: vec![],
      }
    }
    Staged::UpdateWorkPost(p) => LoweredOp {
      sql:    UPDATE_WORK_POST,
      params: vec![
        Value::from(p.name),
        Value::from(p.shift.to_string()),
        Value::from(p.schedule),
        Value::from(i64::from(p.staff_count)),
        uuid_param(p.meta.id),
        tenant_param(tenant),
      ],
      verify: Some(("work post", p.meta.id)),
      guards: vec![],
    },
    Staged::DeleteWorkPost(id) => LoweredOp {
      sql:    DELETE_WORK_POST,
      params: vec![uuid_param(id), tenant_param(tenant)],
      verify: Some(("work post", id)),
      guards: vec![Guard {
        sql:      COUNT_ALLOCATIONS_FOR_POST,
        params:   vec![uuid_param(id), tenant_param(tenant)],
        conflict: format!("work post {id} still has allocations"),
      }],
    },

    // ── Employees ───────────────────────────────────────────────────────
    Staged::InsertEmployee(e) => {
      let owner = insert_owner(&e.meta, tenant)?;
      let [id, owner, created] = meta_params(&e.meta, owner);
      LoweredOp {
        sql:    INSERT_EMPLOYEE,
        params: vec![
          id,
          owner,
          created,
          Value::from(e.name),
          Value::from(e.civil_id),
          Value::from(encode_date(e.hired_on)),
        ],
        verify: None,
        guards: vec![],
      }
    }
    Staged::UpdateEmployee(e) => LoweredOp {
      sql:    UPDATE_EMPLOYEE,
      params: vec![
        Value::from(e.name),
        Value::from(e.civil_id),
        Value::from(encode_date(e.hired_on)),
        uuid_param(e.meta.id),
        tenant_param(tenant),
      ],
      verify: Some(("employee", e.meta.id)),
      guards: vec![],
    },
    Staged::DeleteEmployee(id) => LoweredOp {
      sql:    DELETE_EMPLOYEE,
      params: vec![uuid_param(id), tenant_param(tenant)],
      verify: Some(("employee", id)),
      guards: vec![Guard {
        sql:      COUNT_ALLOCATIONS_FOR_EMPLOYEE,
        params:   vec![uuid_param(id), tenant_param(tenant)],
        conflict: format!("employee {id} still has allocations"),
      }],
    },

    // ── Allocations ─────────────────────────────────────────────────────
    Staged::InsertAllocation(a) => {
      let owner = insert_owner(&a.meta, tenant)?;
      let [id, owner, created] = meta_params(&a.meta, owner);
      LoweredOp {
        sql:    INSERT_ALLOCATION,
        params: vec![
          id,
          owner,
          created,
          uuid_param(a.employee_id),
          uuid_param(a.work_post_id),
          Value::from(encode_date(a.date)),
          Value::from(a.status.to_string()),
        ],
        verify: None,
        guards: vec![],
      }
    }
    Staged::UpdateAllocation(a) => LoweredOp {
      sql:    UPDATE_ALLOCATION,
      params: vec![
        Value::from(a.status.to_string()),
        uuid_param(a.meta.id),
        tenant_param(tenant),
      ],
      verify: Some(("allocation", a.meta.id)),
      guards: vec![],
    },
    Staged::DeleteAllocation(id) => LoweredOp {
      sql:    DELETE_ALLOCATION,
      params: vec![uuid_param(id), tenant_param(tenant)],
      verify: Some(("allocation", id)),
      guards: vec![],
    },
  };
  Ok(op)
}
