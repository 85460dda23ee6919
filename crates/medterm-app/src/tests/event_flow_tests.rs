//! Backend event loop driven through its channels with a scripted analyzer

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};
use medterm_analyzer::{AnalysisError, Analyzer, ProviderMetadata};
use medterm_config::Config;
use medterm_core::status::ANALYSIS_ERROR_MESSAGE;
use medterm_types::{
    AcademicExplanation, AnalysisResult, AnalysisState, AnalysisStatus, AppEvent, TermPart,
    TermPartType, UiEvent, UsageExample,
};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;

fn hyperglycemia() -> AnalysisResult {
    let part = |text: &str, kind, meaning: &str| TermPart {
        text: text.to_string(),
        kind,
        meaning: meaning.to_string(),
    };

    AnalysisResult {
        english_term: "Hyperglycemia".to_string(),
        parts: vec![
            part("hyper-", TermPartType::Prefix, "فرط"),
            part("glyc", TermPartType::Root, "سكر"),
            part("-emia", TermPartType::Suffix, "حالة في الدم"),
        ],
        arabic_translation: "فرط سكر الدم".to_string(),
        translation_note: None,
        academic_explanation: AcademicExplanation {
            definition: "ارتفاع الجلوكوز في الدم".to_string(),
            pathophysiology: "نقص الأنسولين".to_string(),
            clinical_context: "داء السكري".to_string(),
        },
        examples: vec![UsageExample {
            sentence: "Hyperglycemia was documented.".to_string(),
            translation: "تم توثيق فرط سكر الدم.".to_string(),
            context: "Diagnosis".to_string(),
        }],
    }
}

/// Succeeds unless the term contains "garbage"
struct FakeAnalyzer {
    calls: AtomicUsize,
    terms: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl FakeAnalyzer {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            terms: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Analyzer for FakeAnalyzer {
    async fn analyze(&self, term: &str) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.terms.lock().unwrap().push(term.to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if term.contains("garbage") {
            return Err(AnalysisError::SchemaViolation("missing field".to_string()));
        }

        Ok(hyperglycemia())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Fake".to_string(),
            model: "scripted".to_string(),
            requires_api_key: false,
        }
    }
}

struct Harness {
    state: Arc<AppState>,
    to_app: AsyncSender<AppEvent>,
    from_app: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    async fn start(analyzer: Arc<FakeAnalyzer>) -> Self {
        let state = Arc::new(AppState::new(Config::default()));
        let (to_app, ui_to_app_rx) = kanal::bounded_async(16);
        let (app_to_ui_tx, from_app) = kanal::bounded_async(16);
        let cancel = CancellationToken::new();

        let analyzer: Arc<dyn Analyzer> = analyzer;
        let handle = tokio::spawn(event_loop(
            state.clone(),
            ui_to_app_rx,
            app_to_ui_tx,
            analyzer,
            cancel.clone(),
        ));

        let harness = Self {
            state,
            to_app,
            from_app,
            cancel,
            handle,
        };
        assert!(matches!(harness.next().await, AppEvent::BackendReady));
        harness
    }

    async fn submit(&self, text: &str) {
        self.to_app
            .send(AppEvent::UiEvent(UiEvent::SubmitTerm(text.to_string())))
            .await
            .unwrap();
    }

    async fn next(&self) -> AppEvent {
        timeout(Duration::from_secs(2), self.from_app.recv())
            .await
            .expect("Timeout - no event from backend")
            .expect("channel closed")
    }

    async fn next_state(&self) -> AnalysisState {
        match self.next().await {
            AppEvent::StatusChanged(state) => state,
            other => panic!("Wrong event type: {:?}", other),
        }
    }

    async fn assert_rejected(&self, text: &str) {
        match self.next().await {
            AppEvent::SubmissionRejected { term } => assert_eq!(term, text),
            other => panic!("Wrong event type: {:?}", other),
        }
    }

    async fn assert_quiet(&self) {
        let pending = timeout(Duration::from_millis(100), self.from_app.recv()).await;
        assert!(pending.is_err(), "unexpected event: {:?}", pending);
    }
}

#[tokio::test]
async fn submission_goes_through_loading_to_success() {
    let analyzer = Arc::new(FakeAnalyzer::new());
    let harness = Harness::start(analyzer.clone()).await;

    harness.submit("  Hyperglycemia ").await;

    assert_eq!(
        harness.next_state().await,
        AnalysisState::Loading {
            term: "Hyperglycemia".to_string()
        }
    );

    let settled = harness.next_state().await;
    let result = settled.result().expect("expected success");
    assert_eq!(result.english_term, "Hyperglycemia");
    assert_eq!(result.arabic_translation, "فرط سكر الدم");
    assert_eq!(result.parts.len(), 3);

    assert_eq!(analyzer.calls(), 1);
    assert_eq!(*analyzer.terms.lock().unwrap(), ["Hyperglycemia"]);
    assert_eq!(
        harness.state.status.lock().await.status(),
        AnalysisStatus::Success
    );
}

#[tokio::test]
async fn blank_submission_makes_no_call_and_no_transition() {
    let analyzer = Arc::new(FakeAnalyzer::new());
    let harness = Harness::start(analyzer.clone()).await;

    harness.submit("   \t").await;
    harness.assert_rejected("   \t").await;
    harness.assert_quiet().await;

    assert_eq!(analyzer.calls(), 0);
    assert_eq!(
        harness.state.status.lock().await.status(),
        AnalysisStatus::Idle
    );
}

#[tokio::test]
async fn failure_reports_fixed_message_and_drops_previous_result() {
    let analyzer = Arc::new(FakeAnalyzer::new());
    let harness = Harness::start(analyzer.clone()).await;

    harness.submit("Hyperglycemia").await;
    harness.next_state().await;
    assert_eq!(harness.next_state().await.status(), AnalysisStatus::Success);

    harness.submit("garbage").await;
    assert_eq!(harness.next_state().await.status(), AnalysisStatus::Loading);
    assert_eq!(
        harness.next_state().await,
        AnalysisState::Error {
            message: ANALYSIS_ERROR_MESSAGE.to_string()
        }
    );

    let status = harness.state.status.lock().await;
    assert!(status.state().result().is_none());
    assert_eq!(analyzer.calls(), 2);
}

#[tokio::test]
async fn only_one_request_in_flight() {
    let gate = Arc::new(Notify::new());
    let analyzer = Arc::new(FakeAnalyzer::gated(gate.clone()));
    let harness = Harness::start(analyzer.clone()).await;

    harness.submit("Nephritis").await;
    assert_eq!(harness.next_state().await.status(), AnalysisStatus::Loading);

    harness.submit("Hepatitis").await;
    harness.assert_rejected("Hepatitis").await;
    assert_eq!(analyzer.calls(), 1);

    gate.notify_one();
    assert_eq!(harness.next_state().await.status(), AnalysisStatus::Success);
    harness.assert_quiet().await;

    assert_eq!(*analyzer.terms.lock().unwrap(), ["Nephritis"]);
}

#[tokio::test]
async fn close_ends_event_loop() {
    let harness = Harness::start(Arc::new(FakeAnalyzer::new())).await;

    harness
        .to_app
        .send(AppEvent::UiEvent(UiEvent::Close))
        .await
        .unwrap();

    let result = timeout(Duration::from_secs(2), harness.handle)
        .await
        .expect("event loop did not stop");
    assert!(result.unwrap().is_ok());
}

#[tokio::test]
async fn close_discards_in_flight_analysis() {
    let gate = Arc::new(Notify::new());
    let analyzer = Arc::new(FakeAnalyzer::gated(gate));
    let harness = Harness::start(analyzer.clone()).await;

    harness.submit("Nephritis").await;
    assert_eq!(harness.next_state().await.status(), AnalysisStatus::Loading);

    harness
        .to_app
        .send(AppEvent::UiEvent(UiEvent::Close))
        .await
        .unwrap();

    let result = timeout(Duration::from_secs(2), harness.handle)
        .await
        .expect("event loop did not stop");
    assert!(result.unwrap().is_ok());

    // The aborted task never reports
    assert!(harness.from_app.recv().await.is_err());
    assert_eq!(analyzer.calls(), 1);
}

#[tokio::test]
async fn cancellation_ends_event_loop() {
    let harness = Harness::start(Arc::new(FakeAnalyzer::new())).await;

    harness.cancel.cancel();

    let result = timeout(Duration::from_secs(2), harness.handle)
        .await
        .expect("event loop did not stop");
    assert!(result.unwrap().is_ok());
}
