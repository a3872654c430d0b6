//! Trial repository: lookups, listing, and the raw insert used by `UnitOfWork`.

use trial_core::entities::TrialRecord;
use trial_core::enums::TrialStatus;

use crate::TrialDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_datetime, parse_utc};

const TRIAL_COLUMNS: &str = "id, trial_id, title, start_date, end_date, participants, status, \
     duration_in_days, created_at, updated_at";

fn row_to_trial(row: &libsql::Row) -> Result<TrialRecord, DatabaseError> {
    let participants = row
        .get::<Option<i64>>(5)?
        .map(u32::try_from)
        .transpose()
        .map_err(|e| DatabaseError::Query(format!("participants out of range: {e}")))?;
    let status: TrialStatus = row
        .get::<String>(6)?
        .parse()
        .map_err(|e: trial_core::errors::CoreError| DatabaseError::Query(e.to_string()))?;
    let updated_at = get_opt_string(row, 9)?
        .map(|s| parse_utc(&s))
        .transpose()?;

    Ok(TrialRecord {
        id: row.get::<String>(0)?,
        trial_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        start_date: parse_datetime(&row.get::<String>(3)?)?,
        end_date: parse_optional_datetime(get_opt_string(row, 4)?.as_deref())?,
        participants,
        status,
        duration_in_days: row.get::<Option<i64>>(7)?,
        created_at: parse_utc(&row.get::<String>(8)?)?,
        updated_at,
    })
}

async fn collect_trials(mut rows: libsql::Rows) -> Result<Vec<TrialRecord>, DatabaseError> {
    let mut trials = Vec::new();
    while let Some(row) = rows.next().await? {
        trials.push(row_to_trial(&row)?);
    }
    Ok(trials)
}

impl TrialDb {
    /// Fetch a trial by its server-assigned identifier.
    pub async fn get_trial(&self, id: &str) -> Result<Option<TrialRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {TRIAL_COLUMNS} FROM trials WHERE id = ?1"),
                [id],
            )
            .await?;
        rows.next().await?.map(|row| row_to_trial(&row)).transpose()
    }

    /// Fetch a trial by its client-supplied trial identifier.
    pub async fn find_by_trial_id(
        &self,
        trial_id: &str,
    ) -> Result<Option<TrialRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {TRIAL_COLUMNS} FROM trials WHERE trial_id = ?1"),
                [trial_id],
            )
            .await?;
        rows.next().await?.map(|row| row_to_trial(&row)).transpose()
    }

    /// List trials oldest first, optionally filtered by status.
    pub async fn list_trials(
        &self,
        status: Option<TrialStatus>,
    ) -> Result<Vec<TrialRecord>, DatabaseError> {
        let rows = match status {
            Some(status) => {
                self.conn()
                    .query(
                        &format!(
                            "SELECT {TRIAL_COLUMNS} FROM trials WHERE status = ?1 \
                             ORDER BY created_at, id"
                        ),
                        [status.as_str()],
                    )
                    .await?
            }
            None => {
                self.conn()
                    .query(
                        &format!("SELECT {TRIAL_COLUMNS} FROM trials ORDER BY created_at, id"),
                        (),
                    )
                    .await?
            }
        };
        collect_trials(rows).await
    }

    /// Number of stored trials.
    pub async fn count_trials(&self) -> Result<i64, DatabaseError> {
        let mut rows = self.conn().query("SELECT COUNT(*) FROM trials", ()).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::Query("COUNT returned no rows".into()))?;
        Ok(row.get::<i64>(0)?)
    }
}

/// Insert one record on `conn` (a plain connection or an open transaction).
pub(crate) async fn insert_trial(
    conn: &libsql::Connection,
    trial: &TrialRecord,
) -> Result<(), DatabaseError> {
    conn.execute(
        &format!(
            "INSERT INTO trials ({TRIAL_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
        ),
        libsql::params![
            trial.id.as_str(),
            trial.trial_id.as_str(),
            trial.title.as_str(),
            trial.start_date.to_rfc3339(),
            trial.end_date.map(|d| d.to_rfc3339()),
            trial.participants.map(i64::from),
            trial.status.as_str(),
            trial.duration_in_days,
            trial.created_at.to_rfc3339(),
            trial.updated_at.map(|d| d.to_rfc3339())
        ],
    )
    .await
    .map_err(|e| {
        if DatabaseError::is_trial_id_conflict(&e) {
            DatabaseError::Conflict(trial.trial_id.clone())
        } else {
            DatabaseError::LibSql(e)
        }
    })?;
    Ok(())
}
