use serde::Serialize;

use crate::services::access_service::{View, ViewDecision};

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct NavResponse {
    pub view: View,
    pub decision: ViewDecision,
}
