use crate::db::models::DbNurse;
use crate::db::schema::SQLITE_INIT;
use crate::error::RosterError;
use chrono::Utc;
use ractor::concurrency::JoinHandle;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use roster_schema::NurseFields;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

const NURSE_COLUMNS: &str = "id, name, license_number, dob, age, created_at, updated_at";

#[derive(Debug)]
pub enum DbActorMessage {
    /// List every nurse record in insertion order.
    ListAll(RpcReplyPort<Result<Vec<DbNurse>, RosterError>>),

    /// Insert a record under a fresh id and return the stored row.
    Create(NurseFields, RpcReplyPort<Result<DbNurse, RosterError>>),

    /// Replace the four mutable fields of a record. `None` when the id is absent.
    Update(
        String,
        NurseFields,
        RpcReplyPort<Result<Option<DbNurse>, RosterError>>,
    ),

    /// Delete a record by id. `true` when a row was removed.
    Delete(String, RpcReplyPort<Result<bool, RosterError>>),
}

/// Cloneable handle to the storage actor.
///
/// Created by [`spawn`]; the pool is closed once [`DbActorHandle::shutdown`] returns.
#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
    join: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl DbActorHandle {
    pub async fn list_all(&self) -> Result<Vec<DbNurse>, RosterError> {
        ractor::call!(self.actor, DbActorMessage::ListAll).map_err(|e| {
            RosterError::StoreUnavailable(format!("DbActor ListAll RPC failed: {e}"))
        })?
    }

    pub async fn create(&self, fields: NurseFields) -> Result<DbNurse, RosterError> {
        ractor::call!(self.actor, DbActorMessage::Create, fields).map_err(|e| {
            RosterError::StoreUnavailable(format!("DbActor Create RPC failed: {e}"))
        })?
    }

    pub async fn update(
        &self,
        id: String,
        fields: NurseFields,
    ) -> Result<Option<DbNurse>, RosterError> {
        ractor::call!(self.actor, DbActorMessage::Update, id, fields).map_err(|e| {
            RosterError::StoreUnavailable(format!("DbActor Update RPC failed: {e}"))
        })?
    }

    pub async fn delete(&self, id: String) -> Result<bool, RosterError> {
        ractor::call!(self.actor, DbActorMessage::Delete, id).map_err(|e| {
            RosterError::StoreUnavailable(format!("DbActor Delete RPC failed: {e}"))
        })?
    }

    /// Stop the actor and wait until its pool is closed. Later calls on any clone of
    /// this handle fail with [`RosterError::StoreUnavailable`].
    pub async fn shutdown(&self) -> Result<(), RosterError> {
        self.actor.stop(Some("shutdown".to_string()));
        let Some(join) = self.join.lock().await.take() else {
            return Ok(());
        };
        join.await
            .map_err(|e| RosterError::StoreUnavailable(format!("DbActor join failed: {e}")))
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.pool.close().await;
        info!("DbActor stopped, pool closed");
        Ok(())
    }

    // Each query runs on its own task against the shared pool, so a slow call
    // never holds up the mailbox.
    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let pool = state.pool.clone();
        match message {
            DbActorMessage::ListAll(reply) => {
                tokio::spawn(async move {
                    let _ = reply.send(list_all(&pool).await);
                });
            }
            DbActorMessage::Create(fields, reply) => {
                tokio::spawn(async move {
                    let _ = reply.send(create(&pool, fields).await);
                });
            }
            DbActorMessage::Update(id, fields, reply) => {
                tokio::spawn(async move {
                    let _ = reply.send(update(&pool, &id, fields).await);
                });
            }
            DbActorMessage::Delete(id, reply) => {
                tokio::spawn(async move {
                    let _ = reply.send(delete(&pool, &id).await);
                });
            }
        }
        Ok(())
    }
}

/// Normalizes a caller-supplied id; anything that is not a UUID is a cast failure.
fn parse_id(id: &str) -> Result<String, RosterError> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.hyphenated().to_string())
        .map_err(|_| RosterError::cast_id(id))
}

async fn list_all(pool: &SqlitePool) -> Result<Vec<DbNurse>, RosterError> {
    let rows = sqlx::query_as::<_, DbNurse>(&format!(
        "SELECT {NURSE_COLUMNS} FROM nurses ORDER BY rowid"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

async fn create(pool: &SqlitePool, fields: NurseFields) -> Result<DbNurse, RosterError> {
    let id = Uuid::new_v4().hyphenated().to_string();
    let now = Utc::now();

    let row = sqlx::query_as::<_, DbNurse>(&format!(
        r#"
        INSERT INTO nurses (id, name, license_number, dob, age, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {NURSE_COLUMNS}
        "#
    ))
    .bind(&id)
    .bind(fields.name)
    .bind(fields.license_number)
    .bind(fields.dob)
    .bind(fields.age)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    debug!(id = %row.id, "Nurse record created");
    Ok(row)
}

async fn update(
    pool: &SqlitePool,
    id: &str,
    fields: NurseFields,
) -> Result<Option<DbNurse>, RosterError> {
    let id = parse_id(id)?;

    let row = sqlx::query_as::<_, DbNurse>(&format!(
        r#"
        UPDATE nurses
        SET
            name = ?,
            license_number = ?,
            dob = ?,
            age = ?,
            updated_at = ?
        WHERE id = ?
        RETURNING {NURSE_COLUMNS}
        "#
    ))
    .bind(fields.name)
    .bind(fields.license_number)
    .bind(fields.dob)
    .bind(fields.age)
    .bind(Utc::now())
    .bind(&id)
    .fetch_optional(pool)
    .await?;

    debug!(id = %id, found = row.is_some(), "Nurse record update applied");
    Ok(row)
}

async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, RosterError> {
    let id = parse_id(id)?;

    let res = sqlx::query("DELETE FROM nurses WHERE id = ?")
        .bind(&id)
        .execute(pool)
        .await?;

    let removed = res.rows_affected() > 0;
    debug!(id = %id, removed, "Nurse record delete applied");
    Ok(removed)
}

/// Spawn the storage actor and return a cloneable handle.
///
/// Fails when the database cannot be opened or the schema cannot be applied.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, RosterError> {
    let (actor, join) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| RosterError::Startup(e.to_string()))?;

    Ok(DbActorHandle {
        actor,
        join: Arc::new(Mutex::new(Some(join))),
    })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), RosterError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
