//! Lookup-to-display pipeline.
//!
//! Nothing here knows about the terminal. Any [`Render`] implementation can
//! consume a [`LookupOutcome`], which keeps the flow testable without a UI.

use crate::api::client::LookupOutcome;
use crate::app::product::ProductView;

pub const EMPTY_BARCODE_MESSAGE: &str = "Por favor, insira um código de barras.";
pub const SEARCHING_MESSAGE: &str = "Buscando produto...";
pub const NOT_FOUND_MESSAGE: &str = "Produto não encontrado. Tente outro código de barras.";
pub const UNAVAILABLE_MESSAGE: &str = "Não foi possível buscar os dados no momento. Tente novamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLevel {
    Warning,
    Danger,
}

/// Presentation sink for lookup results.
pub trait Render {
    fn clear_feedback(&mut self);
    fn show_feedback(&mut self, level: FeedbackLevel, message: &str);
    fn show_product(&mut self, product: ProductView);
}

/// Feeds one classified outcome to the sink.
pub fn present<R: Render + ?Sized>(outcome: LookupOutcome, language: &str, sink: &mut R) {
    match outcome {
        LookupOutcome::Success(product) => {
            sink.clear_feedback();
            sink.show_product(ProductView::from_product(&product, language));
        }
        LookupOutcome::NotFound => sink.show_feedback(FeedbackLevel::Warning, NOT_FOUND_MESSAGE),
        LookupOutcome::TransportError(_) => {
            sink.show_feedback(FeedbackLevel::Danger, UNAVAILABLE_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Product;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Feedback(FeedbackLevel, String),
        Product(ProductView),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl Render for Recorder {
        fn clear_feedback(&mut self) {
            self.0.push(Call::Clear);
        }
        fn show_feedback(&mut self, level: FeedbackLevel, message: &str) {
            self.0.push(Call::Feedback(level, message.to_string()));
        }
        fn show_product(&mut self, product: ProductView) {
            self.0.push(Call::Product(product));
        }
    }

    #[test]
    fn success_clears_feedback_then_shows_product() {
        let product: Product = serde_json::from_str(
            r#"{"product_name_pt": "Pão", "allergens_tags": ["en:gluten"]}"#,
        )
        .expect("product should decode");

        let mut sink = Recorder::default();
        present(LookupOutcome::Success(Box::new(product)), "pt", &mut sink);

        assert_eq!(sink.0.len(), 2);
        assert_eq!(sink.0[0], Call::Clear);
        match &sink.0[1] {
            Call::Product(view) => {
                assert_eq!(view.name, "Pão");
                assert_eq!(view.allergens, ["Glúten"]);
            }
            other => panic!("expected product, got {other:?}"),
        }
    }

    #[test]
    fn not_found_is_a_warning() {
        let mut sink = Recorder::default();
        present(LookupOutcome::NotFound, "pt", &mut sink);
        assert_eq!(
            sink.0,
            [Call::Feedback(FeedbackLevel::Warning, NOT_FOUND_MESSAGE.to_string())]
        );
    }

    #[test]
    fn transport_errors_are_danger_with_or_without_status() {
        for outcome in [LookupOutcome::TransportError(Some(503)), LookupOutcome::TransportError(None)] {
            let mut sink = Recorder::default();
            present(outcome, "pt", &mut sink);
            assert_eq!(
                sink.0,
                [Call::Feedback(FeedbackLevel::Danger, UNAVAILABLE_MESSAGE.to_string())]
            );
        }
    }
}
