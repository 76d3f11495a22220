use std::sync::Arc;

use cardrank_service::RankingService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RankingService>,
}
impl AppState {
	/// Loads the model artifact and wires the HTTP catalog client.
	pub fn new(config: cardrank_config::Config) -> color_eyre::Result<Self> {
		let models = cardrank_service::load_models(&config)?;
		let service = RankingService::new(config, models)?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: RankingService) -> Self {
		Self { service: Arc::new(service) }
	}
}
