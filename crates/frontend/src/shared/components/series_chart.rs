use leptos::prelude::*;

const CHART_WIDTH: f64 = 280.0;
const CHART_HEIGHT: f64 = 64.0;

/// Last / min / max over the numeric buckets of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub last: f64,
    pub min: f64,
    pub max: f64,
}

/// `None` when the series has no numeric bucket
pub fn summarize(series: &[Option<f64>]) -> Option<SeriesSummary> {
    let last = series.iter().rev().find_map(|v| *v)?;
    let (min, max) = series
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    Some(SeriesSummary { last, min, max })
}

/// SVG polyline points scaled into a `width` x `height` box, y axis pointing up.
///
/// x follows the bucket index, so gaps leave their slot empty.
pub fn sparkline_points(series: &[Option<f64>], width: f64, height: f64) -> String {
    let Some(summary) = summarize(series) else {
        return String::new();
    };
    let span = summary.max - summary.min;
    let step = if series.len() > 1 {
        width / (series.len() - 1) as f64
    } else {
        0.0
    };

    series
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .map(|(i, v)| {
            let x = i as f64 * step;
            let y = if span == 0.0 {
                height / 2.0
            } else {
                height - (v - summary.min) / span * height
            };
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_value(val: f64) -> String {
    if val.fract() == 0.0 && val.abs() < 1e15 {
        format_thousands(val as i64)
    } else {
        format!("{:.2}", val)
    }
}

fn format_thousands(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\u{00a0}');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Minimal time-series rendering for a ready widget
#[component]
pub fn SeriesChart(series: Vec<Option<f64>>) -> impl IntoView {
    let Some(summary) = summarize(&series) else {
        return view! { <div class="series-chart series-chart--empty">"No data"</div> }.into_any();
    };
    let points = sparkline_points(&series, CHART_WIDTH, CHART_HEIGHT);
    let view_box = format!("0 0 {} {}", CHART_WIDTH, CHART_HEIGHT);

    view! {
        <div class="series-chart">
            <svg class="series-chart__plot" viewBox=view_box preserveAspectRatio="none">
                <polyline points=points fill="none" stroke="currentColor" stroke-width="2" />
            </svg>
            <div class="series-chart__legend">
                <span>"Last: " {format_value(summary.last)}</span>
                <span>"Min: " {format_value(summary.min)}</span>
                <span>"Max: " {format_value(summary.max)}</span>
                <span>{format!("{} points", series.len())}</span>
            </div>
        </div>
    }
    .into_any()
}
