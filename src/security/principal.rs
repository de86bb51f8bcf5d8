use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::admins::model::Admin;

#[cfg(feature = "test-utils")]
use std::collections::HashMap;
#[cfg(feature = "test-utils")]
use std::sync::{Arc, RwLock};

/// Store the security gates resolve token subjects through.
///
/// The Postgres variant acquires a pooled connection scoped strictly to
/// the lookup; it is released on every exit path and never held across
/// gate boundaries. The in-memory variant backs the pipeline tests.
#[derive(Clone)]
pub enum PrincipalStore {
    Postgres(PgPool),
    #[cfg(feature = "test-utils")]
    Memory(Arc<RwLock<HashMap<Uuid, Admin>>>),
}

impl PrincipalStore {
    pub async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Admin>> {
        match self {
            PrincipalStore::Postgres(pool) => {
                let mut conn = pool
                    .acquire()
                    .await
                    .context("failed to acquire principal store connection")?;

                let admin = sqlx::query_as::<_, Admin>(
                    "SELECT id, email, hashed_password, full_name, tier, status, \
                     requires_password_change, last_login, created_at \
                     FROM admins WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(conn.as_mut())
                .await
                .context("failed to load principal record")?;

                Ok(admin)
            }
            #[cfg(feature = "test-utils")]
            PrincipalStore::Memory(records) => {
                let records = records
                    .read()
                    .map_err(|_| anyhow::anyhow!("principal store lock poisoned"))?;
                Ok(records.get(&id).cloned())
            }
        }
    }

    #[cfg(feature = "test-utils")]
    pub fn in_memory() -> Self {
        PrincipalStore::Memory(Arc::new(RwLock::new(HashMap::new())))
    }

    #[cfg(feature = "test-utils")]
    pub fn insert(&self, admin: Admin) {
        if let PrincipalStore::Memory(records) = self {
            records
                .write()
                .expect("principal store lock poisoned")
                .insert(admin.id, admin);
        }
    }
}
