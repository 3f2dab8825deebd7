pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS kv (
    key         TEXT PRIMARY KEY NOT NULL,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];

/// Storage keys. Each holds one JSON-encoded snapshot.
pub(crate) const KEY_TRANSACTIONS: &str = "transactions";
pub(crate) const KEY_CUSTOM_CATEGORIES: &str = "custom_categories";
pub(crate) const KEY_BUDGETS: &str = "budgets";
