//! Load analytics use case.

use std::sync::Arc;

use stockroom_domain::{AbcEntry, DashboardStats, Forecast, SimulatedOrder};
use tracing::info;

use super::sections::{SectionFailure, contain};
use crate::ports::AnalyticsGateway;

/// Which analytics to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadAnalyticsInput {
    /// Fetch the dashboard figures.
    pub stats: bool,
    /// Fetch the ABC classification.
    pub abc: bool,
    /// Fetch the demand forecast for this product.
    pub forecast: Option<i64>,
}

/// Analytics as loaded. A failed section is empty and listed in `failures`.
#[derive(Debug, Clone, Default)]
pub struct LoadAnalyticsOutput {
    /// Dashboard figures.
    pub stats: Option<DashboardStats>,
    /// ABC classification, highest value first.
    pub abc: Vec<AbcEntry>,
    /// Demand forecast.
    pub forecast: Option<Forecast>,
    /// Section name and error for every fetch that failed.
    pub failures: Vec<SectionFailure>,
}

/// Use case for loading dashboard and analytics figures.
pub struct LoadAnalytics<A: AnalyticsGateway> {
    gateway: Arc<A>,
}

impl<A: AnalyticsGateway> LoadAnalytics<A> {
    /// Creates a new `LoadAnalytics` use case.
    pub const fn new(gateway: Arc<A>) -> Self {
        Self { gateway }
    }

    /// Fetches the requested sections concurrently.
    pub async fn execute(&self, input: LoadAnalyticsInput) -> LoadAnalyticsOutput {
        let (stats, abc, forecast) = tokio::join!(
            async {
                if input.stats {
                    Some(self.gateway.dashboard_stats().await)
                } else {
                    None
                }
            },
            async {
                if input.abc {
                    Some(self.gateway.abc_analysis().await)
                } else {
                    None
                }
            },
            async {
                match input.forecast {
                    Some(product_id) => Some(self.gateway.forecast(product_id).await),
                    None => None,
                }
            },
        );

        let mut failures = Vec::new();
        LoadAnalyticsOutput {
            stats: contain("dashboard", stats, &mut failures),
            abc: contain("abc", abc, &mut failures).unwrap_or_default(),
            forecast: contain("forecast", forecast, &mut failures),
            failures,
        }
    }
}

/// Result of a simulated order, with the dashboard refreshed afterwards.
#[derive(Debug, Clone, Default)]
pub struct SimulateOrderOutput {
    /// What the backend did.
    pub order: Option<SimulatedOrder>,
    /// Dashboard figures after the order.
    pub stats: Option<DashboardStats>,
    /// Section name and error for every call that failed.
    pub failures: Vec<SectionFailure>,
}

/// Use case for the dashboard's "simulate order" action.
pub struct SimulateOrder<A: AnalyticsGateway> {
    gateway: Arc<A>,
}

impl<A: AnalyticsGateway> SimulateOrder<A> {
    /// Creates a new `SimulateOrder` use case.
    pub const fn new(gateway: Arc<A>) -> Self {
        Self { gateway }
    }

    /// Generates a random order, then reloads the dashboard figures.
    pub async fn execute(&self) -> SimulateOrderOutput {
        let mut failures = Vec::new();
        let order = contain(
            "simulation",
            Some(self.gateway.simulate_order().await),
            &mut failures,
        );
        if let Some(order) = &order {
            info!(order_id = ?order.order_id, message = %order.message, "simulated order");
        }

        let stats = contain(
            "dashboard",
            Some(self.gateway.dashboard_stats().await),
            &mut failures,
        );

        SimulateOrderOutput {
            order,
            stats,
            failures,
        }
    }
}
