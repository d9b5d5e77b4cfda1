use common::trend::{build_trend_rows, series_for, TrendKind};
use common::PlanAnalysis;
use plotly::common::Mode;
use plotly::{Layout, Scatter};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);
}

/// Colors assigned to products in chart order, cycling past the end.
const SERIES_COLORS: [&str; 8] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff7300", "#387908", "#8dd1e1", "#a4de6c", "#d0ed57",
];

fn color_for(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub records: Vec<PlanAnalysis>,
    pub kind: TrendKind,
}

/// Line chart of one per-year series for every analyzed plan.
///
/// Years are merged across plans, so products with different benefit
/// table lengths share one x axis and missing years leave gaps.
#[function_component(TrendChart)]
pub fn trend_chart(props: &Props) -> Html {
    let container_ref = use_node_ref();
    let records = props.records.clone();
    let kind = props.kind;
    let div_id = match kind {
        TrendKind::CashValue => "trend-chart-cash-value".to_string(),
        TrendKind::Irr => "trend-chart-irr".to_string(),
    };

    use_effect_with((container_ref.clone(), records, div_id.clone()), move |(container_ref, records, div_id)| {
        if let Some(element) = container_ref.cast::<HtmlElement>() {
            // Set the ID on the element
            element.set_id(div_id);

            let rows = build_trend_rows(records, kind);
            let labels: Vec<String> = rows.iter().map(|row| row.label.clone()).collect();

            let data_js = js_sys::Array::new();
            for (index, record) in records.iter().enumerate() {
                let values = series_for(&rows, &record.product_name);

                let trace = Scatter::new(labels.clone(), values)
                    .mode(Mode::LinesMarkers)
                    .name(&record.product_name)
                    .line(plotly::common::Line::new().color(color_for(index)).width(2.0));

                // Serialize trace to JSON and parse as JS object
                let trace_json = serde_json::to_string(&trace).unwrap();
                let trace_js = js_sys::JSON::parse(&trace_json).unwrap();
                data_js.push(&trace_js);
            }

            let y_title = match kind {
                TrendKind::CashValue => "Cash value",
                TrendKind::Irr => "IRR (%)",
            };

            let layout = Layout::new()
                .x_axis(plotly::layout::Axis::new().title(plotly::common::Title::with_text("Policy year")))
                .y_axis(plotly::layout::Axis::new().title(plotly::common::Title::with_text(y_title)))
                .height(400);

            // Serialize layout to JSON and parse as JS object
            let layout_json = serde_json::to_string(&layout).unwrap();
            let layout_js = js_sys::JSON::parse(&layout_json).unwrap();

            newPlot(div_id, data_js.into(), layout_js);
        }
        || ()
    });

    html! {
        <div ref={container_ref} style="width:100%; height:400px;"></div>
    }
}
