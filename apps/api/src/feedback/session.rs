//! Analysis sessions: the "analyzing…" phase as an explicit async task.
//!
//! `start` snapshots the résumé and spawns a task that waits out the configured
//! delay, then scores the snapshot. The task publishes exactly one terminal event
//! on a `watch` channel: `Ready` or `Cancelled`.
//!
//! Closing a session drops its cancel sender. A task still inside the delay sees
//! that and publishes `Cancelled`; its report is never computed. A session that
//! already finished has its report discarded along with the session.
//!
//! Sessions nobody closes expire: once the terminal event is out, the task keeps
//! the session for the retention period and then removes it from the registry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{oneshot, watch, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::report::FeedbackReport;
use crate::feedback::scoring::ResumeScorer;
use crate::models::resume::ResumeData;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisState {
    Analyzing,
    Ready { report: FeedbackReport },
    Cancelled,
}

impl AnalysisState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AnalysisState::Analyzing)
    }
}

/// What `close` found when it discarded a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseOutcome {
    DiscardedPending,
    DiscardedReport,
}

struct AnalysisSession {
    // Held only so that dropping the session cancels the task.
    _cancel: oneshot::Sender<()>,
    state: watch::Receiver<AnalysisState>,
}

type SessionMap = Arc<Mutex<HashMap<Uuid, AnalysisSession>>>;

/// Registry of in-flight and finished analyses, keyed by session id.
pub struct AnalysisSessions {
    scorer: Arc<dyn ResumeScorer>,
    delay: Duration,
    retention: Duration,
    sessions: SessionMap,
}

impl AnalysisSessions {
    pub fn new(scorer: Arc<dyn ResumeScorer>, delay: Duration, retention: Duration) -> Self {
        Self {
            scorer,
            delay,
            retention,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Validates and snapshots the résumé, then starts the delayed scoring task.
    pub async fn start(&self, resume: ResumeData) -> Result<Uuid, AppError> {
        resume.validate()?;

        let id = Uuid::new_v4();
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let (state_tx, state_rx) = watch::channel(AnalysisState::Analyzing);
        let scorer = Arc::clone(&self.scorer);
        let sessions = Arc::clone(&self.sessions);
        let delay = self.delay;
        let retention = self.retention;

        // Registered before the task runs so that expiry always finds the entry.
        self.sessions.lock().await.insert(
            id,
            AnalysisSession {
                _cancel: cancel_tx,
                state: state_rx,
            },
        );

        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let report = scorer.score(&resume);
                    info!(session = %id, overall = report.overall_score, "Analysis complete");
                    let _ = state_tx.send(AnalysisState::Ready { report });
                }
                // Fires on close: the sender is dropped with the session.
                _ = &mut cancel_rx => {
                    info!(session = %id, "Analysis cancelled before completion");
                    let _ = state_tx.send(AnalysisState::Cancelled);
                    return;
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(retention) => {
                    if sessions.lock().await.remove(&id).is_some() {
                        debug!(session = %id, "Analysis session expired unclosed");
                    }
                }
                _ = &mut cancel_rx => {}
            }
        });

        info!(session = %id, delay_ms = delay.as_millis() as u64, "Analysis started");
        Ok(id)
    }

    /// Current state without waiting.
    pub async fn status(&self, id: Uuid) -> Result<AnalysisState, AppError> {
        let sessions = self.sessions.lock().await;
        let session = sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Analysis session {id} not found")))?;
        let state = session.state.borrow().clone();
        Ok(state)
    }

    /// Subscribes to the session's completion event.
    ///
    /// The returned receiver keeps working after `close`, so a waiter observes
    /// `Cancelled` rather than hanging.
    pub async fn subscribe(&self, id: Uuid) -> Result<watch::Receiver<AnalysisState>, AppError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(&id)
            .map(|s| s.state.clone())
            .ok_or_else(|| AppError::NotFound(format!("Analysis session {id} not found")))
    }

    /// Waits for the terminal event.
    pub async fn wait(&self, id: Uuid) -> Result<AnalysisState, AppError> {
        let rx = self.subscribe(id).await?;
        wait_terminal(rx).await
    }

    /// Closes the session, discarding any pending or finished report.
    pub async fn close(&self, id: Uuid) -> Result<CloseOutcome, AppError> {
        let session = self
            .sessions
            .lock()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Analysis session {id} not found")))?;

        let outcome = if session.state.borrow().is_terminal() {
            CloseOutcome::DiscardedReport
        } else {
            CloseOutcome::DiscardedPending
        };
        debug!(session = %id, ?outcome, "Analysis session closed");
        Ok(outcome)
    }
}

pub async fn wait_terminal(
    mut rx: watch::Receiver<AnalysisState>,
) -> Result<AnalysisState, AppError> {
    let state = rx
        .wait_for(AnalysisState::is_terminal)
        .await
        .map_err(|_| AppError::Internal(anyhow::anyhow!("analysis task ended without a result")))?;
    Ok(state.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::scoring::RuleTableScorer;
    use crate::models::resume::ExperienceItem;

    const RETENTION: Duration = Duration::from_secs(600);

    fn sessions(delay_ms: u64) -> AnalysisSessions {
        AnalysisSessions::new(
            Arc::new(RuleTableScorer),
            Duration::from_millis(delay_ms),
            RETENTION,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_analysis_completes_after_delay() {
        let registry = sessions(1500);
        let id = registry.start(ResumeData::default()).await.unwrap();
        assert_eq!(registry.status(id).await.unwrap(), AnalysisState::Analyzing);

        match registry.wait(id).await.unwrap() {
            AnalysisState::Ready { report } => assert_eq!(report.overall_score, 13),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_before_delay_cancels() {
        let registry = sessions(1500);
        let id = registry.start(ResumeData::default()).await.unwrap();
        let rx = registry.subscribe(id).await.unwrap();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(registry.close(id).await.unwrap(), CloseOutcome::DiscardedPending);

        assert_eq!(wait_terminal(rx).await.unwrap(), AnalysisState::Cancelled);
        assert!(matches!(registry.status(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_after_completion_discards_report() {
        let registry = sessions(10);
        let id = registry.start(ResumeData::default()).await.unwrap();
        registry.wait(id).await.unwrap();

        assert_eq!(registry.close(id).await.unwrap(), CloseOutcome::DiscardedReport);
        assert!(matches!(registry.close(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_uses_snapshot_taken_at_start() {
        let registry = sessions(100);
        let mut resume = ResumeData::default();
        let id = registry.start(resume.clone()).await.unwrap();

        // Later edits to the caller's copy do not leak into the pending analysis.
        resume.add_skill("Python");
        match registry.wait(id).await.unwrap() {
            AnalysisState::Ready { report } => assert_eq!(report.overall_score, 13),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unclosed_sessions_expire_after_retention() {
        let registry = sessions(10);
        let mut ids = Vec::new();
        for _ in 0..100 {
            ids.push(registry.start(ResumeData::default()).await.unwrap());
        }
        registry.wait(ids[0]).await.unwrap();
        assert_eq!(registry.sessions.lock().await.len(), 100);

        // Still readable inside the retention window.
        tokio::time::sleep(RETENTION / 2).await;
        assert!(matches!(
            registry.status(ids[0]).await.unwrap(),
            AnalysisState::Ready { .. }
        ));

        tokio::time::sleep(RETENTION).await;
        assert!(registry.sessions.lock().await.is_empty());
        assert!(matches!(registry.status(ids[0]).await, Err(AppError::NotFound(_))));
        assert!(matches!(registry.close(ids[99]).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_session_is_not_expired() {
        let registry = AnalysisSessions::new(
            Arc::new(RuleTableScorer),
            Duration::from_secs(3600),
            Duration::from_millis(10),
        );
        let id = registry.start(ResumeData::default()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(registry.status(id).await.unwrap(), AnalysisState::Analyzing);
    }

    #[tokio::test]
    async fn test_start_rejects_invalid_resume() {
        let registry = sessions(0);
        let entry = ExperienceItem {
            id: "dup".to_string(),
            title: String::new(),
            company: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        };
        let resume = ResumeData {
            experience: vec![entry.clone(), entry],
            ..Default::default()
        };
        assert!(matches!(
            registry.start(resume).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let registry = sessions(0);
        assert!(matches!(
            registry.wait(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_state_wire_format() {
        let value = serde_json::to_value(AnalysisState::Cancelled).unwrap();
        assert_eq!(value, serde_json::json!({ "status": "cancelled" }));
    }
}
