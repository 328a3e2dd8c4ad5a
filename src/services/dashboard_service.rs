use reqwest::Method;
use std::sync::Arc;

use crate::error::Result;
use crate::gateway::{decode, Gateway};
use crate::models::dashboard::DashboardStats;

#[derive(Clone)]
pub struct DashboardService {
    gateway: Arc<dyn Gateway>,
}

impl DashboardService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        let body = self
            .gateway
            .request(Method::GET, "/dashboard-stats/", None)
            .await?;
        decode(body)
    }
}
