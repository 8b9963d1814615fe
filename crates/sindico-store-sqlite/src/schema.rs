//! SQL schema for the Síndico SQLite store.
//!
//! Executed once at connection startup. Unique-key and invariant guards
//! live here as (partial) unique indexes, so a violation that slips past
//! orchestrator pre-checks still fails inside the commit transaction.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS condominiums (
    id                  TEXT PRIMARY KEY,
    tenant_id           TEXT NOT NULL,
    created_at          TEXT NOT NULL,   -- ISO 8601 UTC; set at construction
    registration_number TEXT NOT NULL,
    name                TEXT NOT NULL,
    street              TEXT,
    city                TEXT,
    state               TEXT,
    postal_code         TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS condominiums_registration_idx
    ON condominiums(tenant_id, registration_number);
CREATE INDEX IF NOT EXISTS condominiums_tenant_idx
    ON condominiums(tenant_id);

CREATE TABLE IF NOT EXISTS contracts (
    id                 TEXT PRIMARY KEY,
    tenant_id          TEXT NOT NULL,
    created_at         TEXT NOT NULL,
    condominium_id     TEXT NOT NULL REFERENCES condominiums(id),
    monthly_total      INTEGER NOT NULL,  -- centavos
    daily_rate         INTEGER NOT NULL,
    night_premium_pct  REAL NOT NULL,
    monthly_benefits   INTEGER NOT NULL,
    tax_pct            REAL NOT NULL,
    staff_count        INTEGER NOT NULL,
    profit_margin_pct  REAL NOT NULL,
    absence_margin_pct REAL NOT NULL,
    starts_on          TEXT NOT NULL,     -- ISO 8601 date
    ends_on            TEXT NOT NULL,
    status             TEXT NOT NULL      -- 'pending'|'paid'|'renewal'|'closed'
);

-- At most one active contract per condominium. Applies to inserts and to
-- status-transition updates alike.
CREATE UNIQUE INDEX IF NOT EXISTS contracts_one_active_idx
    ON contracts(tenant_id, condominium_id)
    WHERE status IN ('pending', 'paid');
CREATE INDEX IF NOT EXISTS contracts_condominium_idx
    ON contracts(tenant_id, condominium_id);

CREATE TABLE IF NOT EXISTS work_posts (
    id             TEXT PRIMARY KEY,
    tenant_id      TEXT NOT NULL,
    created_at     TEXT NOT NULL,
    condominium_id TEXT NOT NULL REFERENCES condominiums(id),
    name           TEXT NOT NULL,
    shift          TEXT NOT NULL,          -- 'day' | 'night'
    schedule       TEXT NOT NULL,
    staff_count    INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS work_posts_condominium_idx
    ON work_posts(tenant_id, condominium_id);

CREATE TABLE IF NOT EXISTS employees (
    id         TEXT PRIMARY KEY,
    tenant_id  TEXT NOT NULL,
    created_at TEXT NOT NULL,
    name       TEXT NOT NULL,
    civil_id   TEXT NOT NULL,
    hired_on   TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS employees_civil_id_idx
    ON employees(tenant_id, civil_id);

CREATE TABLE IF NOT EXISTS allocations (
    id           TEXT PRIMARY KEY,
    tenant_id    TEXT NOT NULL,
    created_at   TEXT NOT NULL,
    employee_id  TEXT NOT NULL REFERENCES employees(id),
    work_post_id TEXT NOT NULL REFERENCES work_posts(id),
    date         TEXT NOT NULL,            -- ISO 8601 date
    status       TEXT NOT NULL             -- 'scheduled'|'absence_recorded'|'replaced'
);

-- One live allocation per employee per date, and per post per date.
-- Replaced rows are audit history and do not count.
CREATE UNIQUE INDEX IF NOT EXISTS allocations_employee_date_idx
    ON allocations(tenant_id, employee_id, date)
    WHERE status != 'replaced';
CREATE UNIQUE INDEX IF NOT EXISTS allocations_post_date_idx
    ON allocations(tenant_id, work_post_id, date)
    WHERE status != 'replaced';
CREATE INDEX IF NOT EXISTS allocations_date_idx
    ON allocations(tenant_id, date);

PRAGMA user_version = 1;
";
