use std::path::PathBuf;
use std::time::Duration;

use crossing_app::commands::{self, ReportOptions};
use crossing_app::error::AppError;
use crossing_app::state::Session;
use crossing_bedrock::error::BedrockError;
use crossing_bedrock::narrate::NarrativeService;
use crossing_core::models::value::FieldValue;
use crossing_core::store::AssessmentStore;
use tokio::sync::Notify;

struct FixedNarrator(&'static str);

impl NarrativeService for FixedNarrator {
    async fn generate(&self, instruction: &str, narrative: &str) -> Result<String, BedrockError> {
        assert!(instruction.contains("BR-104"));
        assert!(narrative.contains("Primary Support Method: Hangers from Bridge Structure\n"));
        Ok(self.0.to_string())
    }

    async fn improve(&self, text: &str) -> Result<Vec<String>, BedrockError> {
        Ok(vec![format!("{text} (revised)")])
    }
}

struct FailingNarrator;

impl NarrativeService for FailingNarrator {
    async fn generate(&self, _: &str, _: &str) -> Result<String, BedrockError> {
        Err(BedrockError::Timeout(Duration::from_secs(30)))
    }

    async fn improve(&self, _: &str) -> Result<Vec<String>, BedrockError> {
        Err(BedrockError::Invocation("service unavailable".to_string()))
    }
}

struct BlockingNarrator {
    release: Notify,
}

impl NarrativeService for BlockingNarrator {
    async fn generate(&self, _: &str, _: &str) -> Result<String, BedrockError> {
        self.release.notified().await;
        Ok("Done.".to_string())
    }

    async fn improve(&self, _: &str) -> Result<Vec<String>, BedrockError> {
        Ok(Vec::new())
    }
}

fn inspected_session() -> Session {
    let mut store = AssessmentStore::new();
    store.set("crossing-id", "BR-104");
    store.set("town", "Lee");
    store.set("support-method", "hangers");
    store.set("installation-temp", "60");
    store.set("installation-temp-assessment", "Assumed");
    Session::with_store(store)
}

fn options(write_back: bool) -> ReportOptions {
    ReportOptions {
        write_back_summary: write_back,
        today: Some(jiff::civil::date(2026, 5, 2)),
        ..ReportOptions::default()
    }
}

#[tokio::test]
async fn save_then_open_restores_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = inspected_session();

    let path = commands::save(&session, dir.path(), jiff::civil::date(2026, 5, 2))
        .await
        .expect("saves");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("BR-104_2026-05-02.json"));

    let reopened = Session::new();
    commands::open(&reopened, &path).await.expect("opens");
    assert_eq!(*reopened.store.lock().await, *session.store.lock().await);
}

#[tokio::test]
async fn malformed_file_leaves_session_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, br#"{"town": "Otis", "fileData": 7}"#)
        .await
        .expect("write");

    let session = inspected_session();
    let before = session.store.lock().await.clone();

    let err = commands::open(&session, &path).await.expect_err("malformed");
    assert!(matches!(err, AppError::Core(_)));
    assert_eq!(*session.store.lock().await, before);
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let session = Session::new();
    let err = commands::open(&session, &PathBuf::from("/definitely/not/here.json"))
        .await
        .expect_err("missing");
    assert!(matches!(err, AppError::Io { .. }));
}

#[tokio::test]
async fn unreadable_files_do_not_block_the_batch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = dir.path().join("a.jpg");
    let c = dir.path().join("c.PNG");
    tokio::fs::write(&a, b"jpeg-bytes").await.expect("write");
    tokio::fs::write(&c, b"png-bytes").await.expect("write");
    let missing = dir.path().join("b.jpg");

    let session = Session::new();
    let outcomes = commands::attach_paths(&session, "overview-photos", &[a, missing, c])
        .await
        .expect("field accepts files");

    assert!(outcomes[0].result.is_ok());
    assert!(matches!(outcomes[1].result, Err(AppError::Io { .. })));
    assert!(outcomes[2].result.is_ok());

    let store = session.store.lock().await;
    let list = store.attachments("overview-photos");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].filename, "a.jpg");
    assert_eq!(list[0].media_type, "image/jpeg");
    assert_eq!(list[1].filename, "c.PNG");
    assert_eq!(list[1].media_type, "image/png");
    assert_eq!(list[1].content, b"png-bytes");
}

#[tokio::test]
async fn attach_rejects_non_file_fields() {
    let session = Session::new();
    let err = commands::attach_paths(&session, "town", &[])
        .await
        .expect_err("town is text");
    assert!(matches!(err, AppError::Schema(_)));
}

#[tokio::test]
async fn report_uses_generated_summary() {
    let session = inspected_session();
    let report = commands::generate_report(&session, &FixedNarrator("The crossing is sound."), &options(false))
        .await
        .expect("report");

    assert!(report.bytes.starts_with(b"PK"));
    assert!(report.summary_generated);
    assert_eq!(report.summary, "The crossing is sound.");
    assert_eq!(report.file_name, "BR-104_2026-05-02_report.docx");

    // Not written back without the option.
    assert_eq!(session.store.lock().await.get("final-summary"), None);
}

#[tokio::test]
async fn report_can_write_summary_back() {
    let session = inspected_session();
    commands::generate_report(&session, &FixedNarrator("Sound."), &options(true))
        .await
        .expect("report");
    assert_eq!(
        session.store.lock().await.get("final-summary"),
        Some(&FieldValue::from("Sound."))
    );
}

#[tokio::test]
async fn narrative_failure_still_produces_report() {
    let session = inspected_session();
    let report = commands::generate_report(&session, &FailingNarrator, &options(true))
        .await
        .expect("report despite model failure");

    assert!(report.bytes.starts_with(b"PK"));
    assert!(!report.summary_generated);
    assert!(report.summary.starts_with("[Warning: Final summary could not be generated"));
    // Warning text never lands in the store.
    assert_eq!(session.store.lock().await.get("final-summary"), None);
}

#[tokio::test]
async fn second_report_is_rejected_while_one_is_in_flight() {
    let session = inspected_session();
    let narrator = BlockingNarrator {
        release: Notify::new(),
    };
    let opts = options(false);

    let first = commands::generate_report(&session, &narrator, &opts);
    let second = async {
        tokio::task::yield_now().await;
        assert!(session.report_in_flight());
        let result = commands::generate_report(&session, &narrator, &opts).await;
        narrator.release.notify_one();
        result
    };
    let (first, second) = tokio::join!(first, second);

    assert!(first.is_ok());
    assert!(matches!(second, Err(AppError::ReportInFlight)));
    assert!(!session.report_in_flight());
}

#[tokio::test]
async fn improve_falls_back_to_warning() {
    let alternatives = commands::improve_text(&FixedNarrator("x"), "Pipe ok").await;
    assert_eq!(alternatives, ["Pipe ok (revised)"]);

    let alternatives = commands::improve_text(&FailingNarrator, "Pipe ok").await;
    assert_eq!(alternatives.len(), 1);
    assert!(alternatives[0].starts_with("[Warning: Suggested wording"));
}
