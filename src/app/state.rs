use crate::api::client::{Barcode, LookupOutcome, ProductClient};
use crate::app::pipeline::{
    EMPTY_BARCODE_MESSAGE, FeedbackLevel, Render, SEARCHING_MESSAGE, present,
};
use crate::app::prevalence::PrevalenceState;
use crate::app::product::ProductView;
use tokio::sync::mpsc;
use tracing::info;

pub const REPORT_THANKS: &str = "Obrigado! Seu relato foi enviado para análise.";

/// Message sent back by a finished lookup task.
pub type LookupMessage = (Barcode, LookupOutcome);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Search,
    Prevalence,
    Report,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Search => View::Prevalence,
            View::Prevalence => View::Report,
            View::Report => View::Search,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct SearchState {
    pub input: String,
    pub feedback: Option<Feedback>,
    pub product: Option<ProductView>,
}

#[derive(Debug, Default)]
pub struct ReportState {
    pub input: String,
}

#[derive(Debug)]
pub struct App {
    pub view: View,
    pub status: String,
    pub search: SearchState,
    pub prevalence: PrevalenceState,
    pub report: ReportState,
    client: ProductClient,
    outcome_tx: Option<mpsc::UnboundedSender<LookupMessage>>,
}

impl App {
    pub fn new(client: ProductClient) -> Self {
        Self {
            view: View::Search,
            status: "Pronto".into(),
            search: SearchState::default(),
            prevalence: PrevalenceState::default(),
            report: ReportState::default(),
            client,
            outcome_tx: None,
        }
    }

    pub fn set_outcome_sender(&mut self, tx: mpsc::UnboundedSender<LookupMessage>) {
        self.outcome_tx = Some(tx);
    }

    pub fn switch_view(&mut self) {
        self.view = self.view.next();
    }

    // --- Text input, routed to the active view ---

    pub fn on_input(&mut self, ch: char) {
        if let Some(buf) = self.active_input() {
            buf.push(ch);
        }
    }

    pub fn on_backspace(&mut self) {
        if let Some(buf) = self.active_input() {
            buf.pop();
        }
    }

    pub fn on_delete(&mut self) {
        if let Some(buf) = self.active_input() {
            buf.clear();
        }
    }

    fn active_input(&mut self) -> Option<&mut String> {
        match self.view {
            View::Search => Some(&mut self.search.input),
            View::Report => Some(&mut self.report.input),
            View::Prevalence => None,
        }
    }

    // --- Search ---

    /// Starts a lookup for the current input. The result comes back
    /// through the outcome channel; earlier lookups are not cancelled.
    pub fn submit_search(&mut self) {
        self.clear_feedback();
        self.search.product = None;

        let Some(barcode) = Barcode::parse(&self.search.input) else {
            self.show_feedback(FeedbackLevel::Danger, EMPTY_BARCODE_MESSAGE);
            return;
        };

        self.show_feedback(FeedbackLevel::Warning, SEARCHING_MESSAGE);
        self.status = format!("Buscando {barcode}");

        let client = self.client.clone();
        let outbound = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = client.lookup(&barcode).await;
            if let Some(out) = outbound {
                let _ = out.send((barcode, outcome));
            }
        });
    }

    pub fn on_lookup(&mut self, barcode: Barcode, outcome: LookupOutcome) {
        self.status = format!("Código: {barcode}");
        let language = self.client.config().language.clone();
        present(outcome, &language, self);
    }

    // --- Report ---

    pub fn submit_report(&mut self) {
        info!(chars = self.report.input.chars().count(), "reaction report acknowledged");
        self.report.input.clear();
        self.status = REPORT_THANKS.into();
    }
}

impl Render for App {
    fn clear_feedback(&mut self) {
        self.search.feedback = None;
    }

    fn show_feedback(&mut self, level: FeedbackLevel, message: &str) {
        self.search.feedback = Some(Feedback {
            level,
            message: message.to_string(),
        });
    }

    fn show_product(&mut self, product: ProductView) {
        self.search.product = Some(product);
    }
}
