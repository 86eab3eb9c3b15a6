//! Matcher client: HTTP transport to the analysis service and the async
//! orchestrator that executes core effects.
mod orchestrator;
mod settings;
mod transport;
mod types;

pub use orchestrator::Orchestrator;
pub use settings::{ClientSettings, OrchestratorSettings, DEFAULT_BASE_URL};
pub use transport::{AnalysisTransport, ReqwestTransport};
pub use types::{HealthStatus, TransportError, DEFAULT_REJECTION_DETAIL};
