use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Point, YDomain, ZoomRange, derive_y_domain};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartView, ChartViewConfig};

/// Schema version written by [`ViewSnapshot::to_json_contract_v1_pretty`].
pub const VIEW_SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub config: ChartViewConfig,
    pub periods: Vec<String>,
    pub zoom_range: Option<ZoomRange>,
    pub visible_periods: Vec<String>,
    /// Identifier to display name, in sorted identifier order.
    pub variations: IndexMap<String, String>,
    pub visible_variations: Vec<String>,
    pub points: Vec<Point>,
    pub y_domain: Option<YDomain>,
}

/// Versioned wrapper around a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedViewSnapshot {
    pub schema_version: u32,
    pub snapshot: ViewSnapshot,
}

/// The wrapped form is tried first; a bare snapshot has no `schema_version`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Versioned(VersionedViewSnapshot),
    Bare(ViewSnapshot),
}

impl ViewSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Json(format!("failed to serialize view snapshot: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let document = VersionedViewSnapshot {
            schema_version: VIEW_SNAPSHOT_SCHEMA_VERSION,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&document)
            .map_err(|e| ChartError::Json(format!("failed to serialize versioned snapshot: {e}")))
    }

    /// Parses either a bare or a versioned snapshot and checks that its zoom
    /// window addresses its own period list.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let document: SnapshotDocument = serde_json::from_str(input)
            .map_err(|e| ChartError::Json(format!("failed to parse view snapshot: {e}")))?;

        let snapshot = match document {
            SnapshotDocument::Bare(snapshot) => snapshot,
            SnapshotDocument::Versioned(versioned)
                if versioned.schema_version == VIEW_SNAPSHOT_SCHEMA_VERSION =>
            {
                versioned.snapshot
            }
            SnapshotDocument::Versioned(versioned) => {
                return Err(ChartError::InvalidData(format!(
                    "unsupported view snapshot schema version: {}",
                    versioned.schema_version
                )));
            }
        };
        snapshot.validate()
    }

    fn validate(self) -> ChartResult<Self> {
        let total = self.periods.len();
        if let Some(range) = self.zoom_range.filter(|range| range.end_index() >= total) {
            return Err(ChartError::InvalidData(format!(
                "snapshot zoom range ends at {} but only {total} periods exist",
                range.end_index()
            )));
        }
        if self.y_domain.is_some_and(|domain| domain.min > domain.max) {
            return Err(ChartError::InvalidData(
                "snapshot y domain min exceeds max".to_owned(),
            ));
        }
        Ok(self)
    }
}

impl<R: Renderer> ChartView<R> {
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        let points = self.visible_points();
        let y_domain = derive_y_domain(&points);
        ViewSnapshot {
            config: self.config,
            periods: self.periods().to_vec(),
            zoom_range: self.zoom_range(),
            visible_periods: self.visible_periods().to_vec(),
            variations: self
                .variations
                .iter()
                .map(|identifier| {
                    (
                        identifier.clone(),
                        self.catalog.display_name(identifier).to_owned(),
                    )
                })
                .collect(),
            visible_variations: self.visibility.iter().map(str::to_owned).collect(),
            points,
            y_domain,
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_pretty()
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
