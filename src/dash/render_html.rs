//! HTML page generation
//!
//! The page is self-contained: the map and the chart are inline SVG and the
//! style sheet is embedded.

use std::fmt::Write;

use crate::dash::{io_geojson::Boundary, *};

const MAP_WIDTH: f64 = 720.0;
const MAP_HEIGHT: f64 = 360.0;
const CHART_WIDTH: f64 = 800.0;
const CHART_HEIGHT: f64 = 400.0;
const CHART_MARGIN: f64 = 50.0;
const COUNTRY_COLOR: &str = "blue";
const MEDIAN_COLOR: &str = "purple";

const CSS: &str = "
body { font-family: sans-serif; margin: 2em auto; max-width: 820px; color: #222; }
h1 { margin-bottom: 0; }
.caption { color: #666; margin-top: 0.2em; }
.metrics { display: flex; gap: 4em; margin: 1em 0; }
.metric .label { font-size: 0.9em; color: #555; }
.metric .value { font-size: 2em; }
svg.map path { stroke: #fff; stroke-width: 0.3; fill-opacity: 0.7; }
svg.map path:hover { stroke: #000; stroke-width: 1; }
svg.map path.selected { stroke: #d62728; stroke-width: 1.5; }
table.regions td { padding: 0.1em 0.6em; }
.swatch { display: inline-block; width: 1em; height: 1em; opacity: 0.7; }
.legend { font-size: 0.8em; }
";

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Renders the page of a dashboard.
///
/// When boundaries are given, they must be in the same order as the regions
/// of the map view.
pub fn render_page(view: &DashboardView, boundaries: Option<&[Boundary]>) -> String {
    let map = match boundaries {
        Some(b) => render_map_svg(&view.map, b, &view.country),
        None => render_region_table(&view.map),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <h1>{title}</h1>
    <p class="caption">{subtitle}</p>
    <p>Year: <b>{year}</b></p>
    {map}
    {legend}
    <h2>{country} MPI Facts</h2>
    <div class="metrics">
        {facts}
        {rank}
    </div>
    <p>Indicator: <b>{indicator}</b></p>
    {chart}
</body>
</html>
"#,
        title = escape(&view.title),
        subtitle = escape(&view.subtitle),
        css = CSS,
        year = view.year,
        map = map,
        legend = render_legend(&view.map),
        country = escape(&view.country),
        facts = render_metric(&view.facts),
        rank = render_metric(&view.rank),
        indicator = escape(&view.indicator),
        chart = render_chart_svg(&view.chart),
    )
}

fn render_metric(m: &MetricView) -> String {
    format!(
        r#"<div class="metric"><div class="label">{}</div><div class="value">{}</div></div>"#,
        escape(&m.title),
        escape(&m.value)
    )
}

/// The swatches of the legend, each one titled with its bucket edges.
fn render_legend(map: &MapView) -> String {
    match &map.legend {
        Some(l) => {
            let swatches: String = l
                .colors
                .iter()
                .enumerate()
                .map(|(idx, c)| {
                    match (l.thresholds.get(idx), l.thresholds.get(idx + 1)) {
                        (Some(lo), Some(hi)) => format!(
                            r#"<span class="swatch" style="background:{}" title="{:.3} - {:.3}"></span>"#,
                            escape(c),
                            lo,
                            hi
                        ),
                        _ => format!(
                            r#"<span class="swatch" style="background:{}"></span>"#,
                            escape(c)
                        ),
                    }
                })
                .collect();
            format!(
                r#"<div class="legend">{} {:.3} {} {:.3}</div>"#,
                escape(&l.caption),
                l.min,
                swatches,
                l.max
            )
        }
        None => r#"<div class="legend">No data for this year</div>"#.to_string(),
    }
}

/// Equirectangular projection onto the map canvas.
fn project(lon: f64, lat: f64) -> (f64, f64) {
    (
        (lon + 180.0) / 360.0 * MAP_WIDTH,
        (90.0 - lat) / 180.0 * MAP_HEIGHT,
    )
}

pub fn polygon_path(polygons: &[Vec<Vec<(f64, f64)>>]) -> String {
    let mut d = String::new();
    for ring in polygons.iter().flatten() {
        for (idx, (lon, lat)) in ring.iter().enumerate() {
            let (x, y) = project(*lon, *lat);
            let op = if idx == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{}{:.1},{:.1}", op, x, y);
        }
        if !ring.is_empty() {
            d.push('Z');
        }
    }
    d
}

fn render_map_svg(map: &MapView, boundaries: &[Boundary], selected: &str) -> String {
    let mut out = format!(
        r#"<svg class="map" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
        MAP_WIDTH, MAP_HEIGHT, MAP_WIDTH, MAP_HEIGHT
    );
    for (region, boundary) in map.regions.iter().zip(boundaries.iter()) {
        if boundary.polygons.is_empty() {
            continue;
        }
        let class = if region.name == selected {
            r#" class="selected""#
        } else {
            ""
        };
        let title = if region.tooltip.is_empty() {
            escape(&region.name)
        } else {
            format!("{} {}", escape(&region.name), escape(&region.tooltip))
        };
        let _ = write!(
            out,
            r#"<path{} data-name="{}" fill="{}" d="{}"><title>{}</title></path>"#,
            class,
            escape(&region.name),
            escape(&region.color),
            polygon_path(&boundary.polygons),
            title
        );
    }
    out.push_str("</svg>");
    out
}

fn render_region_table(map: &MapView) -> String {
    let mut out = String::from(r#"<table class="regions">"#);
    for region in map.regions.iter() {
        let _ = write!(
            out,
            r#"<tr data-name="{}"><td><span class="swatch" style="background:{}"></span></td><td>{}</td><td>{}</td></tr>"#,
            escape(&region.name),
            escape(&region.color),
            escape(&region.name),
            escape(&region.tooltip)
        );
    }
    out.push_str("</table>");
    out
}

fn render_series(
    out: &mut String,
    series: &ChartSeries,
    color: &str,
    scale: &dyn Fn(Year, f64) -> (f64, f64),
) {
    if series.points.is_empty() {
        return;
    }
    let points: Vec<String> = series
        .points
        .iter()
        .map(|(year, v)| {
            let (x, y) = scale(*year, *v);
            format!("{:.1},{:.1}", x, y)
        })
        .collect();
    let _ = write!(
        out,
        r#"<polyline fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
        color,
        points.join(" ")
    );
    for (year, v) in series.points.iter() {
        let (x, y) = scale(*year, *v);
        let _ = write!(
            out,
            r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"><title>{}: {}</title></circle>"#,
            x, y, color, year, v
        );
    }
}

pub fn render_chart_svg(chart: &ChartView) -> String {
    let years: Vec<Year> = chart
        .country
        .points
        .iter()
        .chain(chart.median.points.iter())
        .map(|p| p.0)
        .collect();
    let first = years.iter().copied().min().unwrap_or(0);
    let last = years.iter().copied().max().unwrap_or(first);
    let span = if last > first { (last - first) as f64 } else { 1.0 };
    let plot_w = CHART_WIDTH - 2.0 * CHART_MARGIN;
    let plot_h = CHART_HEIGHT - 2.0 * CHART_MARGIN;
    let (y_min, y_max) = (chart.y_min, chart.y_max);
    let scale = |year: Year, v: f64| -> (f64, f64) {
        (
            CHART_MARGIN + ((year - first) as f64) / span * plot_w,
            CHART_MARGIN + plot_h - (v - y_min) / (y_max - y_min) * plot_h,
        )
    };

    let mut out = format!(
        r#"<svg class="chart" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = CHART_WIDTH,
        h = CHART_HEIGHT
    );
    let _ = write!(
        out,
        r#"<text x="{:.1}" y="25" text-anchor="middle" font-size="14">{}</text>"#,
        CHART_WIDTH / 2.0,
        escape(&chart.title)
    );

    // Grid and y ticks.
    for i in 0..=4 {
        let v = y_min + (y_max - y_min) * (i as f64) / 4.0;
        let (_, y) = scale(first, v);
        let _ = write!(
            out,
            r##"<line x1="{m:.1}" x2="{r:.1}" y1="{y:.1}" y2="{y:.1}" stroke="#ddd"/><text x="{t:.1}" y="{y:.1}" text-anchor="end" font-size="10">{v:.2}</text>"##,
            m = CHART_MARGIN,
            r = CHART_WIDTH - CHART_MARGIN,
            y = y,
            t = CHART_MARGIN - 5.0,
            v = v
        );
    }
    let mut ticks: Vec<Year> = years.clone();
    ticks.sort_unstable();
    ticks.dedup();
    for year in ticks {
        let (x, _) = scale(year, y_min);
        let _ = write!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10">{}</text>"#,
            x,
            CHART_HEIGHT - CHART_MARGIN + 15.0,
            year
        );
    }

    render_series(&mut out, &chart.median, MEDIAN_COLOR, &scale);
    render_series(&mut out, &chart.country, COUNTRY_COLOR, &scale);

    let _ = write!(
        out,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"#,
        CHART_WIDTH / 2.0,
        CHART_HEIGHT - 10.0,
        escape(&chart.x_label)
    );
    let _ = write!(
        out,
        r#"<text x="12" y="{:.1}" font-size="8" transform="rotate(-90 12 {:.1})" text-anchor="middle">{}</text>"#,
        CHART_HEIGHT / 2.0,
        CHART_HEIGHT / 2.0,
        escape(&chart.y_label)
    );
    for (idx, (series, color)) in [
        (&chart.country, COUNTRY_COLOR),
        (&chart.median, MEDIAN_COLOR),
    ]
    .iter()
    .enumerate()
    {
        let y = CHART_MARGIN + 15.0 * idx as f64;
        let _ = write!(
            out,
            r#"<rect x="{:.1}" y="{:.1}" width="10" height="10" fill="{}"/><text x="{:.1}" y="{:.1}" font-size="11">{}</text>"#,
            CHART_MARGIN + 10.0,
            y - 9.0,
            color,
            CHART_MARGIN + 25.0,
            y,
            escape(&series.label)
        );
    }
    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_escaped() {
        assert_eq!(
            escape(r#"Congo "Kinshasa" & <Co>"#),
            "Congo &quot;Kinshasa&quot; &amp; &lt;Co&gt;"
        );
        assert_eq!(escape("Côte d'Ivoire"), "Côte d&#39;Ivoire");
    }

    #[test]
    fn paths_use_the_equirectangular_projection() {
        let polygons = vec![vec![vec![(-180.0, 90.0), (180.0, -90.0), (0.0, 0.0)]]];
        assert_eq!(
            polygon_path(&polygons),
            "M0.0,0.0L720.0,360.0L360.0,180.0Z"
        );
        assert_eq!(polygon_path(&[]), "");
    }

    #[test]
    fn legend_swatches_show_their_edges() {
        let map = MapView {
            year: 2021,
            regions: vec![],
            legend: Some(Legend {
                caption: "MPI Values".to_string(),
                min: 0.04,
                max: 0.64,
                colors: vec!["#ffffcc".to_string(), "#006837".to_string()],
                thresholds: vec![0.04, 0.25, 0.64],
            }),
            clicked: String::new(),
        };
        let html = render_legend(&map);
        assert!(html.contains(r#"style="background:#ffffcc" title="0.040 - 0.250""#));
        assert!(html.contains(r#"style="background:#006837" title="0.250 - 0.640""#));
        assert!(html.starts_with(r#"<div class="legend">MPI Values 0.040 "#));
    }

    #[test]
    fn chart_has_both_series() {
        let chart = ChartView {
            title: "Chad - Schooling (2020-2021)".to_string(),
            x_label: "Year".to_string(),
            y_label: "Schooling".to_string(),
            country: ChartSeries {
                label: "Chad Schooling".to_string(),
                points: vec![(2020, 1.0), (2021, 2.0)],
            },
            median: ChartSeries {
                label: "World Median Schooling".to_string(),
                points: vec![(2020, 0.5)],
            },
            y_min: 0.0,
            y_max: 2.0,
        };
        let svg = render_chart_svg(&chart);
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("World Median Schooling"));
        // The highest value sits on the top edge of the plot.
        assert!(svg.contains(r#"<circle cx="750.0" cy="50.0""#));
    }
}
