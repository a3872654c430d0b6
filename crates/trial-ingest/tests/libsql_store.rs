//! End-to-end ingestion into an in-memory libSQL database.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use trial_core::entities::TrialRecord;
use trial_core::enums::TrialStatus;
use trial_db::error::DatabaseError;
use trial_db::{TrialDb, UnitOfWork};
use trial_ingest::{
    EventSink, IngestionPipeline, JsonlSink, Outcome, TracingSink, TrialStore,
};
use trial_schema::SchemaValidator;

type Sinks = Vec<Box<dyn EventSink + Send + Sync>>;

async fn test_db() -> TrialDb {
    TrialDb::open_local(":memory:").await.unwrap()
}

fn pipeline() -> IngestionPipeline<TracingSink> {
    IngestionPipeline::new(Arc::new(SchemaValidator::new()), TracingSink)
}

fn document(trial_id: &str, status: &str) -> String {
    format!(
        r#"{{"trialId": "{trial_id}", "title": "Trial {trial_id}", "startDate": "2024-01-25", "status": "{status}"}}"#
    )
}

/// A unit of work whose duplicate lookup never sees the other writer, as
/// when two uploads of the same trial interleave.
struct BlindStore<'db>(UnitOfWork<'db>);

impl TrialStore for BlindStore<'_> {
    type Error = DatabaseError;

    async fn find_by_trial_id(&self, _trial_id: &str) -> Result<Option<TrialRecord>, DatabaseError> {
        Ok(None)
    }

    fn add(&mut self, trial: TrialRecord) -> Result<(), DatabaseError> {
        TrialStore::add(&mut self.0, trial)
    }

    async fn commit(&mut self) -> Result<(), DatabaseError> {
        TrialStore::commit(&mut self.0).await
    }
}

#[tokio::test]
async fn created_trial_is_readable() {
    let db = test_db().await;
    let pipeline = pipeline();
    let raw = document("T-1", "Ongoing");

    let outcome = pipeline
        .ingest(&mut db.unit_of_work(), raw.as_bytes(), raw.len() as u64)
        .await
        .unwrap();

    let id = outcome.id().expect("created");
    let stored = db.get_trial(id).await.unwrap().expect("stored");
    assert_eq!(stored.trial_id, "T-1");
    assert_eq!(stored.status, TrialStatus::Ongoing);
    assert_eq!(stored.duration_in_days, Some(31));
    assert_eq!(
        stored.end_date.map(|d| d.to_rfc3339()),
        Some("2024-02-25T00:00:00+00:00".to_string())
    );
}

#[tokio::test]
async fn second_upload_of_same_trial_is_duplicate() {
    let db = test_db().await;
    let pipeline = pipeline();
    let raw = document("T-1", "NotStarted");

    let first = pipeline
        .ingest_bytes(&mut db.unit_of_work(), raw.as_bytes())
        .await
        .unwrap();
    let second = pipeline
        .ingest_bytes(&mut db.unit_of_work(), raw.as_bytes())
        .await
        .unwrap();

    assert!(first.is_created());
    assert_eq!(
        second,
        Outcome::Rejected("Trial with ID 'T-1' has already been uploaded".into())
    );
    assert_eq!(db.count_trials().await.unwrap(), 1);
}

#[tokio::test]
async fn racing_insert_is_stopped_by_unique_index() {
    let db = test_db().await;
    let pipeline = pipeline();
    let raw = document("T-1", "Completed");

    let mut first = BlindStore(db.unit_of_work());
    let mut second = BlindStore(db.unit_of_work());
    let won = pipeline.ingest_bytes(&mut first, raw.as_bytes()).await.unwrap();
    let lost = pipeline.ingest_bytes(&mut second, raw.as_bytes()).await.unwrap();

    assert!(won.is_created());
    assert_eq!(
        lost,
        Outcome::Rejected("Processing error: Trial with ID 'T-1' already exists".into())
    );
    assert_eq!(db.count_trials().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_distinct_uploads_are_all_created() {
    let db = Arc::new(test_db().await);
    let pipeline = Arc::new(pipeline());

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let db = Arc::clone(&db);
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move {
                let raw = document(&format!("T-{i}"), "Ongoing");
                pipeline
                    .ingest_bytes(&mut db.unit_of_work(), raw.as_bytes())
                    .await
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.unwrap();
        assert!(outcome.is_created(), "{outcome}");
    }
    assert_eq!(db.count_trials().await.unwrap(), 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_uploads_of_one_trial_create_it_once() {
    let db = Arc::new(test_db().await);
    let pipeline = Arc::new(pipeline());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let db = Arc::clone(&db);
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move {
                let raw = document("T-1", "Ongoing");
                pipeline
                    .ingest_bytes(&mut db.unit_of_work(), raw.as_bytes())
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Outcome::Created(_) => created += 1,
            Outcome::Rejected(reason) => assert!(
                reason == "Trial with ID 'T-1' has already been uploaded"
                    || reason == "Processing error: Trial with ID 'T-1' already exists",
                "{reason}"
            ),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(db.count_trials().await.unwrap(), 1);
}

#[tokio::test]
async fn five_digit_year_is_rejected_and_store_stays_readable() {
    let db = test_db().await;
    let pipeline = pipeline();
    let raw = r#"{"trialId": "T-F", "title": "X", "startDate": "+10000-01-25", "status": "Completed"}"#;

    let first = pipeline
        .ingest_bytes(&mut db.unit_of_work(), raw.as_bytes())
        .await
        .unwrap();
    let good = document("T-1", "Ongoing");
    pipeline
        .ingest_bytes(&mut db.unit_of_work(), good.as_bytes())
        .await
        .unwrap();

    assert_eq!(
        first,
        Outcome::Rejected("Invalid JSON format: DateTimeExpected: #/startDate".into())
    );
    assert_eq!(db.list_trials(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn rejected_upload_writes_nothing() {
    let db = test_db().await;
    let pipeline = pipeline();

    let outcome = pipeline
        .ingest_bytes(&mut db.unit_of_work(), br#"{"trialId": "T-1"}"#)
        .await
        .unwrap();

    assert!(!outcome.is_created());
    assert_eq!(db.count_trials().await.unwrap(), 0);
}

#[tokio::test]
async fn created_event_lands_in_trail() {
    let db = test_db().await;
    let dir = TempDir::new().unwrap();
    let validator = Arc::new(SchemaValidator::new());
    let jsonl = JsonlSink::new(dir.path(), Arc::clone(&validator)).unwrap();
    let trail = jsonl.path().to_path_buf();
    let sinks: Sinks = vec![Box::new(TracingSink), Box::new(jsonl)];
    let pipeline = IngestionPipeline::new(validator, sinks);
    let raw = document("T-9", "Ongoing");

    let outcome = pipeline
        .ingest_bytes(&mut db.unit_of_work(), raw.as_bytes())
        .await
        .unwrap();

    let lines: Vec<serde_json::Value> = serde_jsonlines::json_lines(&trail)
        .unwrap()
        .collect::<std::io::Result<_>>()
        .unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["trial"]["id"], outcome.id().unwrap());
    assert_eq!(lines[0]["trial"]["trialId"], "T-9");
}
