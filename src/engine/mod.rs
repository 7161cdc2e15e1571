pub mod http;
pub mod types;

use crate::error::Result;
use crate::model::ColorRuleResult;

pub use http::HttpAnalysisService;
pub use types::{decode_result, ImagePayload, ServiceStatus};

/// The external dominant-color analysis service.
///
/// Every failure, whether transport, status or payload shape, is reported as
/// `PaletteError::AnalysisFailed`.
pub trait AnalysisService {
    fn status(&self) -> Result<ServiceStatus>;
    fn analyze(&self, test_id: &str, payload: &ImagePayload) -> Result<ColorRuleResult>;
}
