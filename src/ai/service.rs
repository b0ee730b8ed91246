//! Runs AI requests on a tokio runtime and hands results back to the UI
//! thread through a channel drained once per frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use super::config::AiConfig;
use super::gemini::{self, GeminiClient};
use super::types::AiResult;
use crate::core::DeviceInfo;
use crate::sim::location::Coordinates;

pub struct AiService {
    runtime: Runtime,
    client: Option<Arc<GeminiClient>>,
    tx: Sender<AiResult>,
    rx: Receiver<AiResult>,
}

impl AiService {
    /// Reads the environment; a missing key leaves the service in fallback mode
    pub fn new() -> Result<Self> {
        let client = match AiConfig::from_env().and_then(|cfg| GeminiClient::new(&cfg)) {
            Ok(client) => {
                info!("AI diagnostic engine configured");
                Some(Arc::new(client))
            }
            Err(e) => {
                warn!(error = %e, "AI client unavailable, using fallback responses");
                None
            }
        };
        Self::with_client(client)
    }

    fn with_client(client: Option<Arc<GeminiClient>>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("duplex-ai")
            .enable_all()
            .build()
            .context("Failed to start AI runtime")?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            runtime,
            client,
            tx,
            rx,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn request_diagnostic(&self, device: DeviceInfo) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let text = gemini::diagnose_or_fallback(client.as_deref(), &device).await;
            let _ = tx.send(AiResult::Diagnostic {
                serial: device.serial_number,
                text,
            });
        });
    }

    pub fn request_blueprint(&self, device: &DeviceInfo) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let serial = device.serial_number.clone();
        let brand = device.brand.clone();
        let model = device.model.clone();
        self.runtime.spawn(async move {
            let png = gemini::schematic_or_none(client.as_deref(), &brand, &model).await;
            let _ = tx.send(AiResult::Blueprint { serial, png });
        });
    }

    pub fn request_support(&self, coords: Coordinates, brand: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let info = gemini::support_or_fallback(client.as_deref(), coords, &brand).await;
            let _ = tx.send(AiResult::Support(info));
        });
    }

    /// Results finished since the last frame
    pub fn drain(&self) -> Vec<AiResult> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_result(service: &AiService) -> AiResult {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = service.drain().into_iter().next() {
                return result;
            }
            assert!(Instant::now() < deadline, "no AI result arrived");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn unconfigured_service_delivers_fallback_diagnostic() {
        let service = AiService::with_client(None).unwrap();
        assert!(!service.is_configured());

        let device = DeviceInfo::mock();
        service.request_diagnostic(device.clone());

        match wait_for_result(&service) {
            AiResult::Diagnostic { serial, text } => {
                assert_eq!(serial, device.serial_number);
                assert_eq!(text, gemini::DIAGNOSTIC_ERROR);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unconfigured_service_delivers_empty_blueprint() {
        let service = AiService::with_client(None).unwrap();
        service.request_blueprint(&DeviceInfo::mock());
        assert!(matches!(
            wait_for_result(&service),
            AiResult::Blueprint { png: None, .. }
        ));
    }
}
