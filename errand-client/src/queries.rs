/// SQL for the client-side slot store.
pub struct Queries;

impl Queries {
    /// Create the slot table. A single key-value table mirrors the mobile
    /// platform storage the snapshot format originated on.
    pub const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS slots (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    pub const GET_SLOT: &'static str = "SELECT value FROM slots WHERE key = ?1";

    pub const UPSERT_SLOT: &'static str = r#"
        INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
    "#;
}
