//! Exportable reports.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;
use crate::route::AppRoute;

/// Which dataset a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Purchase order history.
    Orders,
    /// Current stock per product.
    Inventory,
}

/// File format the backend renders a report in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Spreadsheet (`.xlsx`).
    Excel,
    /// Printable document.
    Pdf,
}

impl ReportKind {
    const fn slug(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Inventory => "inventory",
        }
    }

    /// Screen the export is offered on.
    #[must_use]
    pub const fn route(self) -> AppRoute {
        match self {
            Self::Orders => AppRoute::Orders,
            Self::Inventory => AppRoute::Products,
        }
    }
}

impl ReportFormat {
    /// Path segment the backend expects.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Excel => "excel",
            Self::Pdf => "pdf",
        }
    }

    /// File extension of the rendered document.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Pdf => "pdf",
        }
    }
}

/// A concrete report to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    /// Dataset.
    pub kind: ReportKind,
    /// Output format.
    pub format: ReportFormat,
}

impl ReportRequest {
    /// Creates a report request.
    #[must_use]
    pub const fn new(kind: ReportKind, format: ReportFormat) -> Self {
        Self { kind, format }
    }

    /// Backend path, relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "/reports/{}/export/{}",
            self.kind.slug(),
            self.format.slug()
        )
    }

    /// Name the downloaded file is saved under.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}_report.{}", self.kind.slug(), self.format.extension())
    }
}

impl FromStr for ReportKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "orders" => Ok(Self::Orders),
            "inventory" => Ok(Self::Inventory),
            _ => Err(DomainError::UnknownReportKind(s.to_string())),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "excel" | "xlsx" => Ok(Self::Excel),
            "pdf" => Ok(Self::Pdf),
            _ => Err(DomainError::UnknownReportFormat(s.to_string())),
        }
    }
}
