//! Aggregation fetcher: one compute request per call, normalized into a series.

use contracts::shared::kpi::WidgetQuery;
use serde_json::Value;

use super::api;
use crate::shared::api_utils::KpiTransport;
use crate::shared::error::KpiError;

/// One entry per bucket in API order (assumed chronological); `None` marks a gap
pub type DataSeries = Vec<Option<f64>>;

/// Issue the compute request for a validated query.
///
/// Calls are independent of each other; nothing is shared between them
/// except the transport.
pub async fn fetch_series<T>(
    transport: &T,
    query: &WidgetQuery,
    token: Option<&str>,
) -> Result<DataSeries, KpiError>
where
    T: KpiTransport + ?Sized,
{
    let body = api::get_compute(transport, query, token).await?;
    Ok(normalize_series(&body))
}

/// Extract `data[].value` from a compute response.
///
/// Best-effort: an unparseable body or a missing/non-array `data` yields an
/// empty series. Every element keeps its position; one without a numeric
/// `value` becomes a gap.
pub fn normalize_series(body: &str) -> DataSeries {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Compute response is not JSON, treating as empty: {}", e);
            return Vec::new();
        }
    };

    let Some(points) = parsed.get("data").and_then(Value::as_array) else {
        log::warn!("Compute response has no `data` array, treating as empty");
        return Vec::new();
    };

    let series: DataSeries = points
        .iter()
        .map(|point| point.get("value").and_then(Value::as_f64))
        .collect();

    let gaps = series.iter().filter(|v| v.is_none()).count();
    if gaps > 0 {
        log::debug!("Compute response has {} buckets without a numeric value", gaps);
    }

    series
}
