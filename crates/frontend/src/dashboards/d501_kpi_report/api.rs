use contracts::dashboards::d501_kpi_report::dto::{ReportRequest, ReportResponse};

use crate::shared::api_utils::{ApiRequest, HttpMethod, KpiTransport, API_PREFIX};
use crate::shared::date_utils::api_datetime_param;
use crate::shared::error::KpiError;

/// `POST /api/v1.0/report/?name=..&site=..&start_date=..&end_date=..&operation=..`
pub fn report_path(request: &ReportRequest) -> String {
    format!(
        "{}/report/?name={}&site={}&start_date={}&end_date={}&operation={}",
        API_PREFIX,
        urlencoding::encode(&request.name),
        request.site.index(),
        api_datetime_param(request.start_date),
        api_datetime_param(request.end_date),
        request.operation.code()
    )
}

/// Ask the service to build a report; returns the download URL
pub async fn generate_report<T>(
    transport: &T,
    request: &ReportRequest,
    token: Option<&str>,
) -> Result<String, KpiError>
where
    T: KpiTransport + ?Sized,
{
    let api_request = ApiRequest::authorized(HttpMethod::Post, report_path(request), token)?;
    let body = transport.send(api_request).await?.into_body()?;

    let parsed: ReportResponse =
        serde_json::from_str(&body).map_err(|e| KpiError::Parse(e.to_string()))?;

    match parsed.data.filter(|url| !url.trim().is_empty()) {
        Some(url) => {
            log::info!("Report '{}' ready", request.name);
            Ok(url)
        }
        None => Err(KpiError::Parse(
            parsed
                .message
                .unwrap_or_else(|| "response has no download link".to_string()),
        )),
    }
}
