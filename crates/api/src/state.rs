use std::sync::Arc;

use scribekit_config::Settings;
use scribekit_transcription::probe::DurationProbe;
use scribekit_transcription::provider::TranscriptionProvider;
use scribekit_transcription::TranscriptionClient;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub provider: Arc<dyn TranscriptionProvider>,
    pub probe: Arc<dyn DurationProbe>,
    pub client: Arc<TranscriptionClient>,
}

impl AppState {
    pub fn new(
        settings: Arc<Settings>,
        provider: Arc<dyn TranscriptionProvider>,
        probe: Arc<dyn DurationProbe>,
    ) -> Self {
        let client = Arc::new(TranscriptionClient::new(Arc::clone(&provider)));
        Self {
            settings,
            provider,
            probe,
            client,
        }
    }
}
