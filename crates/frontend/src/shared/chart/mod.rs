//! Chart.js binding and the per-canvas chart registry.
//!
//! Chart.js is loaded by the host page; configs are built as JSON here and
//! handed to `new Chart(canvas, config)` through `Reflect`.

use crate::shared::error::AppError;
use contracts::dashboards::d100_home::{CategorySlice, MonthSummary};
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use serde_json::{json, Value};
use serde_wasm_bindgen::Serializer;
use std::collections::HashMap;
use wasm_bindgen::{JsCast, JsValue};

pub const CHART_COLORS: [&str; 12] = [
    "#4CAF50", "#F44336", "#2196F3", "#FFC107", "#9C27B0", "#FF9800", "#009688", "#E91E63",
    "#3F51B5", "#FF5722", "#8BC34A", "#673AB7",
];

/// Something that owns a live chart and can release it.
pub trait ChartHandle {
    fn destroy(&self);
}

/// At most one live chart per canvas id.
pub struct ChartRegistry<H: ChartHandle> {
    charts: HashMap<String, H>,
}

impl<H: ChartHandle> Default for ChartRegistry<H> {
    fn default() -> Self {
        Self {
            charts: HashMap::new(),
        }
    }
}

impl<H: ChartHandle> ChartRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroys the chart currently on `canvas_id` (if any), then builds and
    /// stores a new one.
    pub fn replace<F>(&mut self, canvas_id: &str, create: F) -> Result<(), AppError>
    where
        F: FnOnce() -> Result<H, AppError>,
    {
        self.destroy(canvas_id);
        let handle = create()?;
        log::debug!("chart created on #{}", canvas_id);
        self.charts.insert(canvas_id.to_string(), handle);
        Ok(())
    }

    pub fn destroy(&mut self, canvas_id: &str) {
        if let Some(old) = self.charts.remove(canvas_id) {
            old.destroy();
            log::debug!("chart destroyed on #{}", canvas_id);
        }
    }

    /// Destroys every chart except the one on `keep`.
    pub fn retain_only(&mut self, keep: Option<&str>) {
        let stale: Vec<String> = self
            .charts
            .keys()
            .filter(|id| Some(id.as_str()) != keep)
            .cloned()
            .collect();
        for id in stale {
            self.destroy(&id);
        }
    }

    pub fn destroy_all(&mut self) {
        for (_, handle) in self.charts.drain() {
            handle.destroy();
        }
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn contains(&self, canvas_id: &str) -> bool {
        self.charts.contains_key(canvas_id)
    }
}

fn money_ticks() -> Value {
    json!({ "beginAtZero": true })
}

/// Grouped income/expense bars: one group per day when the summary is
/// broken down by day, otherwise a single group for the month.
pub fn summary_chart(summary: &MonthSummary, year: i32, month: u32) -> Value {
    let daily = summary.income.by_day().is_some() || summary.expense.by_day().is_some();
    let income_days = summary.income.by_day().unwrap_or_default();
    let expense_days = summary.expense.by_day().unwrap_or_default();

    let (labels, income, expense): (Vec<String>, Vec<f64>, Vec<f64>) =
        if !daily {
            (
                vec![format!("Tháng {}/{}", month, year)],
                vec![summary.income.total()],
                vec![summary.expense.total()],
            )
        } else {
            let mut days: Vec<u32> = income_days
                .iter()
                .chain(expense_days.iter())
                .map(|(d, _)| *d)
                .collect();
            days.sort_unstable();
            days.dedup();
            let lookup = |series: &[(u32, f64)], day: u32| {
                series
                    .iter()
                    .find(|(d, _)| *d == day)
                    .map_or(0.0, |(_, v)| *v)
            };
            (
                days.iter().map(|d| format!("Ngày {}", d)).collect(),
                days.iter().map(|d| lookup(&income_days, *d)).collect(),
                days.iter().map(|d| lookup(&expense_days, *d)).collect(),
            )
        };

    json!({
        "type": "bar",
        "data": {
            "labels": labels,
            "datasets": [
                {
                    "label": "Thu",
                    "data": income,
                    "backgroundColor": "rgba(75, 192, 192, 0.5)",
                    "borderColor": "rgb(75, 192, 192)",
                    "borderWidth": 1
                },
                {
                    "label": "Chi",
                    "data": expense,
                    "backgroundColor": "rgba(255, 99, 132, 0.5)",
                    "borderColor": "rgb(255, 99, 132)",
                    "borderWidth": 1
                }
            ]
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "scales": { "y": money_ticks() },
            "plugins": { "legend": { "position": "top" } }
        }
    })
}

/// Expense share per category.
pub fn category_chart(slices: &[CategorySlice]) -> Value {
    let colors: Vec<&str> = CHART_COLORS.iter().cycle().take(slices.len()).copied().collect();
    json!({
        "type": "doughnut",
        "data": {
            "labels": slices.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            "datasets": [{
                "label": "Chi phí theo hạng mục",
                "data": slices.iter().map(|s| s.value).collect::<Vec<_>>(),
                "backgroundColor": colors,
                "hoverOffset": 4
            }]
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "position": "bottom" } }
        }
    })
}

/// A live `Chart` instance.
pub struct JsChart(JsValue);

impl ChartHandle for JsChart {
    fn destroy(&self) {
        let destroy = Reflect::get(&self.0, &JsValue::from_str("destroy"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());
        if let Some(destroy) = destroy {
            if let Err(err) = destroy.call0(&self.0) {
                log::warn!("chart destroy failed: {:?}", err);
            }
        }
    }
}

fn js_err(err: JsValue) -> AppError {
    AppError::Render(format!("{:?}", err))
}

/// Currency formatter installed as the value-axis tick and tooltip callback.
fn currency_callback() -> Function {
    Function::new_with_args(
        "value",
        "return Number(value).toLocaleString('vi-VN', {maximumFractionDigits: 0}) + ' ₫';",
    )
}

/// `new Chart(canvas, config)` on the canvas with id `canvas_id`.
pub fn create_js_chart(canvas_id: &str, config: &Value) -> Result<JsChart, AppError> {
    let window = web_sys::window().ok_or_else(|| AppError::Render("no window".into()))?;
    let canvas = window
        .document()
        .and_then(|d| d.get_element_by_id(canvas_id))
        .ok_or_else(|| AppError::Render(format!("canvas #{} not found", canvas_id)))?;

    let ctor = Reflect::get(&window, &JsValue::from_str("Chart")).map_err(js_err)?;
    if !ctor.is_function() {
        return Err(AppError::Render("Chart.js is not loaded".into()));
    }
    let ctor: Function = ctor.dyn_into().map_err(js_err)?;

    let js_config = config
        .serialize(&Serializer::json_compatible())
        .map_err(|e| AppError::Render(e.to_string()))?;
    install_currency_ticks(&js_config)?;

    let args = Array::of2(&canvas.into(), &js_config);
    let chart = Reflect::construct(&ctor, &args).map_err(js_err)?;
    Ok(JsChart(chart))
}

/// Sets `options.scales.y.ticks.callback` when the config has a y scale.
fn install_currency_ticks(config: &JsValue) -> Result<(), AppError> {
    let y = Reflect::get(config, &JsValue::from_str("options"))
        .and_then(|o| Reflect::get(&o, &JsValue::from_str("scales")))
        .and_then(|s| Reflect::get(&s, &JsValue::from_str("y")))
        .map_err(js_err)?;
    if y.is_undefined() {
        return Ok(());
    }
    let ticks = js_sys::Object::new();
    Reflect::set(&ticks, &JsValue::from_str("callback"), &currency_callback()).map_err(js_err)?;
    Reflect::set(&y, &JsValue::from_str("ticks"), &ticks).map_err(js_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d100_home::Amounts;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    struct FakeChart {
        id: u32,
        destroyed: Rc<RefCell<Vec<u32>>>,
    }

    impl ChartHandle for FakeChart {
        fn destroy(&self) {
            self.destroyed.borrow_mut().push(self.id);
        }
    }

    #[test]
    fn replacing_destroys_the_previous_chart_first() {
        let destroyed = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ChartRegistry::new();
        for id in 1..=3 {
            let log = destroyed.clone();
            registry
                .replace("summary-chart", || {
                    Ok(FakeChart {
                        id,
                        destroyed: log,
                    })
                })
                .unwrap();
        }
        assert_eq!(registry.len(), 1);
        assert_eq!(*destroyed.borrow(), vec![1, 2]);

        let log = destroyed.clone();
        registry
            .replace("expense-category-chart", || Ok(FakeChart { id: 9, destroyed: log }))
            .unwrap();
        registry.destroy_all();
        assert!(registry.is_empty());
        let mut all = destroyed.borrow().clone();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3, 9]);
    }

    #[test]
    fn failed_creation_leaves_canvas_empty() {
        let destroyed = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ChartRegistry::new();
        let log = destroyed.clone();
        registry
            .replace("c", || Ok(FakeChart { id: 1, destroyed: log }))
            .unwrap();
        let result = registry.replace("c", || Err(AppError::Render("no canvas".into())));
        assert!(result.is_err());
        assert!(!registry.contains("c"));
        assert_eq!(*destroyed.borrow(), vec![1]);
    }

    #[test]
    fn switching_panels_drops_hidden_charts() {
        let destroyed = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ChartRegistry::new();
        for (id, canvas) in [(1, "summary-chart"), (2, "expense-category-chart")] {
            let log = destroyed.clone();
            registry
                .replace(canvas, || Ok(FakeChart { id, destroyed: log }))
                .unwrap();
        }

        registry.retain_only(Some("expense-category-chart"));
        assert_eq!(*destroyed.borrow(), vec![1]);
        assert!(registry.contains("expense-category-chart"));
        assert!(!registry.contains("summary-chart"));

        registry.retain_only(None);
        assert!(registry.is_empty());
        assert_eq!(*destroyed.borrow(), vec![1, 2]);
    }

    #[test]
    fn daily_summary_is_sorted_by_day() {
        let mut income = BTreeMap::new();
        income.insert("10".to_string(), 500.0);
        income.insert("2".to_string(), 100.0);
        let mut expense = BTreeMap::new();
        expense.insert("2".to_string(), 40.0);
        let summary = MonthSummary {
            income: Amounts::ByDay(income),
            expense: Amounts::ByDay(expense),
        };
        let config = summary_chart(&summary, 2024, 5);
        assert_eq!(config["type"], "bar");
        assert_eq!(config["data"]["labels"], json!(["Ngày 2", "Ngày 10"]));
        assert_eq!(config["data"]["datasets"][0]["data"], json!([100.0, 500.0]));
        assert_eq!(config["data"]["datasets"][1]["data"], json!([40.0, 0.0]));
    }

    #[test]
    fn total_summary_is_one_group() {
        let summary = MonthSummary {
            income: Amounts::Total(9_000_000.0),
            expense: Amounts::Total(4_500_000.0),
        };
        let config = summary_chart(&summary, 2024, 5);
        assert_eq!(config["data"]["labels"], json!(["Tháng 5/2024"]));
        assert_eq!(config["data"]["datasets"][1]["data"], json!([4_500_000.0]));
    }

    #[test]
    fn category_colors_cycle() {
        let slices: Vec<CategorySlice> = (0..14)
            .map(|i| CategorySlice {
                name: format!("Mục {}", i),
                value: i as f64,
            })
            .collect();
        let config = category_chart(&slices);
        let colors = config["data"]["datasets"][0]["backgroundColor"].as_array().unwrap();
        assert_eq!(colors.len(), 14);
        assert_eq!(colors[12], json!(CHART_COLORS[0]));
    }
}
