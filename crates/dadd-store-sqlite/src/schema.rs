//! SQL schema for the DADD SQLite store.
//!
//! Table and column names match the reporting queries in `store.rs`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS REGION (
    region_id   INTEGER PRIMARY KEY,
    region_name TEXT NOT NULL
);

-- Deleting a region orphans its sub-regions rather than removing them.
CREATE TABLE IF NOT EXISTS SUB_REGION (
    sub_region_id   INTEGER PRIMARY KEY,
    sub_region_name TEXT NOT NULL,
    region_id       INTEGER REFERENCES REGION(region_id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS INTERMEDIATE_REGION (
    intermediate_region_id   INTEGER PRIMARY KEY,
    intermediate_region_name TEXT,
    sub_region_id            INTEGER REFERENCES SUB_REGION(sub_region_id)
);

CREATE TABLE IF NOT EXISTS COUNTRY (
    country_id             INTEGER PRIMARY KEY,
    country_name           TEXT NOT NULL,
    intermediate_region_id INTEGER REFERENCES INTERMEDIATE_REGION(intermediate_region_id)
);

-- Read-only fact table; loaded by import scripts.
CREATE TABLE IF NOT EXISTS DADD_RECORD (
    country_id INTEGER NOT NULL REFERENCES COUNTRY(country_id),
    decade_id  INTEGER NOT NULL,
    dadd_value REAL,
    PRIMARY KEY (country_id, decade_id)
);

CREATE INDEX IF NOT EXISTS dadd_record_decade_idx ON DADD_RECORD(decade_id);

PRAGMA user_version = 1;
";
