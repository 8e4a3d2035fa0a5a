use serde::Serialize;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Chart configurations handed to the rendering widget
// ---------------------------------------------------------------------------

/// One chart, typed per chart kind. [`ChartConfig::to_echarts`] produces the
/// option object the ECharts widget consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartConfig {
    Scatter(ScatterChart),
    Bar(BarChart),
    Boxplot(BoxplotChart),
    Line(LineChart),
    Choropleth(ChoroplethChart),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// `[x, y]`.
    pub value: [f64; 2],
    pub name: String,
    pub symbol_size: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub x_name: String,
    pub y_name: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub y_name: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxplotGroup {
    pub label: String,
    pub values: Vec<f64>,
    pub color: Option<String>,
}

impl BoxplotGroup {
    /// `[min, Q1, median, Q3, max]` with linearly interpolated quartiles,
    /// the item layout of an ECharts boxplot series. `None` when empty.
    pub fn five_numbers(&self) -> Option<[f64; 5]> {
        if self.values.is_empty() {
            return None;
        }
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        let quantile = |p: f64| {
            let h = (sorted.len() - 1) as f64 * p;
            let lo = h.floor() as usize;
            let hi = h.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
        };
        Some([
            sorted[0],
            quantile(0.25),
            quantile(0.5),
            quantile(0.75),
            sorted[sorted.len() - 1],
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxplotChart {
    pub y_name: String,
    pub groups: Vec<BoxplotGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub categories: Vec<String>,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionValue {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethChart {
    pub series_name: String,
    /// Name under which the boundary GeoJSON is registered with the widget.
    pub map_name: String,
    pub regions: Vec<RegionValue>,
    pub min: f64,
    pub max: f64,
    /// Colour stops from low to high.
    pub in_range: Vec<String>,
}

impl ChartConfig {
    pub fn to_echarts(&self) -> Value {
        match self {
            ChartConfig::Scatter(c) => scatter_option(c),
            ChartConfig::Bar(c) => bar_option(c),
            ChartConfig::Boxplot(c) => boxplot_option(c),
            ChartConfig::Line(c) => line_option(c),
            ChartConfig::Choropleth(c) => choropleth_option(c),
        }
    }
}

fn scatter_option(chart: &ScatterChart) -> Value {
    let data: Vec<Value> = chart
        .points
        .iter()
        .map(|p| {
            json!({
                "value": p.value,
                "name": p.name,
                "symbolSize": p.symbol_size,
                "itemStyle": { "color": p.color },
            })
        })
        .collect();

    json!({
        "tooltip": {
            "formatter": format!("{{b}}<br/>Coffee: {{@[0]}}<br/>{}: {{@[1]}}", chart.y_label),
        },
        "xAxis": { "name": chart.x_name },
        "yAxis": { "name": chart.y_name },
        "series": [{ "type": "scatter", "data": data }],
    })
}

fn bar_option(chart: &BarChart) -> Value {
    let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
    let data: Vec<Value> = chart
        .bars
        .iter()
        .map(|b| match &b.color {
            Some(color) => json!({ "value": b.value, "itemStyle": { "color": color } }),
            None => json!(b.value),
        })
        .collect();

    json!({
        "tooltip": { "trigger": "axis" },
        "xAxis": { "type": "category", "data": labels },
        "yAxis": { "type": "value", "name": chart.y_name },
        "series": [{ "type": "bar", "data": data }],
    })
}

fn boxplot_option(chart: &BoxplotChart) -> Value {
    let labels: Vec<&str> = chart.groups.iter().map(|g| g.label.as_str()).collect();
    let data: Vec<Value> = chart
        .groups
        .iter()
        .map(|g| {
            let summary = g.five_numbers().map(|s| json!(s)).unwrap_or(Value::Null);
            match &g.color {
                Some(color) => json!({ "value": summary, "itemStyle": { "borderColor": color } }),
                None => summary,
            }
        })
        .collect();

    json!({
        "tooltip": { "trigger": "item" },
        "xAxis": { "type": "category", "data": labels },
        "yAxis": { "type": "value", "name": chart.y_name },
        "series": [{ "type": "boxplot", "data": data }],
    })
}

fn line_option(chart: &LineChart) -> Value {
    let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
    let series: Vec<Value> = chart
        .series
        .iter()
        .map(|s| json!({ "name": s.name, "type": "line", "data": s.data }))
        .collect();

    json!({
        "tooltip": { "trigger": "axis" },
        "legend": { "data": names },
        "xAxis": { "type": "category", "data": chart.categories },
        "yAxis": { "type": "value" },
        "series": series,
    })
}

fn choropleth_option(chart: &ChoroplethChart) -> Value {
    json!({
        "tooltip": { "trigger": "item" },
        "visualMap": {
            "min": chart.min,
            "max": chart.max,
            "calculable": true,
            "text": ["High", "Low"],
            "inRange": { "color": chart.in_range },
        },
        "series": [{
            "name": chart.series_name,
            "type": "map",
            "map": chart.map_name,
            "label": { "show": false },
            "data": chart.regions,
        }],
    })
}
