//! Bridges core logic to the egui UI: submission lifecycle and messages.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crate::api::{PredictError, PredictionClient, PredictionOutcome};
use crate::charts::VisualizationEngine;
use crate::config::AppConfig;
use crate::egui_app::state::{StatusBarState, StatusTone, UiState};
use crate::inputs::{self, MentalMetrics};
use crate::presenter;

/// Message from a submission worker back to the UI thread.
pub enum JobMessage {
    SubmitSettled(Result<PredictionOutcome, PredictError>),
}

/// Maintains app state and bridges core logic to the egui UI.
pub struct PredictController {
    pub ui: UiState,
    pub engine: VisualizationEngine,
    client: Arc<PredictionClient>,
    jobs_tx: mpsc::Sender<JobMessage>,
    jobs_rx: mpsc::Receiver<JobMessage>,
}

impl PredictController {
    pub fn new(config: &AppConfig) -> Self {
        let (jobs_tx, jobs_rx) = mpsc::channel();
        Self {
            ui: UiState::default(),
            engine: VisualizationEngine::new(),
            client: Arc::new(PredictionClient::new(&config.service)),
            jobs_tx,
            jobs_rx,
        }
    }

    /// Whether a submission is currently in flight (drives the button state).
    pub fn is_submitting(&self) -> bool {
        self.client.is_submitting()
    }

    /// Kick off one submission on a worker thread.
    ///
    /// A click while a submission is in flight is a no-op: the client's
    /// single-flight guard refuses the second exchange and no worker output
    /// reaches the channel for it.
    pub fn handle_predict(&mut self) {
        if self.client.is_submitting() {
            return;
        }

        let request = match inputs::collect(&self.ui.form) {
            Ok(request) => request,
            Err(err) => {
                self.set_status(format!("Cannot submit: {err}"), StatusTone::Error);
                return;
            }
        };

        self.set_status("Analyzing addiction risk…".to_string(), StatusTone::Busy);
        tracing::info!("Submitting prediction request");

        let client = Arc::clone(&self.client);
        let jobs_tx = self.jobs_tx.clone();
        thread::spawn(move || {
            if let Some(settled) = client.submit(&request) {
                let _ = jobs_tx.send(JobMessage::SubmitSettled(settled));
            }
        });
    }

    /// Drain worker messages and present any settled exchange.
    pub fn poll_jobs(&mut self, now: Instant) {
        loop {
            let message = match self.jobs_rx.try_recv() {
                Ok(message) => message,
                Err(mpsc::TryRecvError::Empty | mpsc::TryRecvError::Disconnected) => break,
            };
            match message {
                JobMessage::SubmitSettled(settled) => self.present_settled(settled, now),
            }
        }
    }

    fn present_settled(&mut self, settled: Result<PredictionOutcome, PredictError>, now: Instant) {
        // The radar snapshot is read from the live controls at presentation
        // time, independent of the request that produced this response.
        let metrics = MentalMetrics::from_source(&self.ui.form);
        let succeeded = settled.is_ok();
        presenter::present(&settled, metrics, &mut self.engine, &mut self.ui, now);
        if succeeded {
            self.set_status("Prediction ready".to_string(), StatusTone::Info);
        }
    }

    pub fn set_status(&mut self, text: String, tone: StatusTone) {
        self.ui.status = StatusBarState { text, tone };
    }
}
