use allergen_lookup_tui::api::client::{ApiError, LookupConfig, ProductClient};
use allergen_lookup_tui::app::state::App;
use allergen_lookup_tui::{events, logging};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    logging::init();

    let client = ProductClient::new(LookupConfig::default());
    let mut app = App::new(client);

    // io::Error maps into ApiError::Io through `?`
    events::run::run_app(&mut app).await?;
    Ok(())
}
