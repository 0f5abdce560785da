use contracts::shared::kpi::WidgetQuery;
use contracts::system::session::SiteId;

use crate::shared::api_utils::{ApiRequest, HttpMethod, KpiTransport, API_PREFIX};
use crate::shared::date_utils::api_datetime_param;
use crate::shared::error::KpiError;

/// `GET /api/v1.0/kpi/?site={id}`
pub fn catalog_path(site: SiteId) -> String {
    format!("{}/kpi/?site={}", API_PREFIX, site.index())
}

/// `GET /api/v1.0/kpi/site/{id}/compute?...`
///
/// Unset operation and granularity are sent as empty values.
pub fn compute_path(query: &WidgetQuery) -> String {
    let operation = query.operation.map(|op| op.code()).unwrap_or_default();
    let days = query
        .granularity
        .map(|g| g.days().to_string())
        .unwrap_or_default();

    format!(
        "{}/kpi/site/{}/compute?kpi_id={}&start_date={}&end_date={}&granularity_op={}&granularity_days={}",
        API_PREFIX,
        query.site.index(),
        urlencoding::encode(query.kpi_id.as_str()),
        api_datetime_param(query.start_date),
        api_datetime_param(query.end_date),
        operation,
        days
    )
}

/// Fetch the raw catalog body for a site
pub async fn get_catalog<T>(transport: &T, site: SiteId, token: Option<&str>) -> Result<String, KpiError>
where
    T: KpiTransport + ?Sized,
{
    let request = ApiRequest::authorized(HttpMethod::Get, catalog_path(site), token)?;
    transport.send(request).await?.into_body()
}

/// Fetch the raw compute body for a query
pub async fn get_compute<T>(
    transport: &T,
    query: &WidgetQuery,
    token: Option<&str>,
) -> Result<String, KpiError>
where
    T: KpiTransport + ?Sized,
{
    let request = ApiRequest::authorized(HttpMethod::Get, compute_path(query), token)?;
    transport.send(request).await?.into_body()
}
