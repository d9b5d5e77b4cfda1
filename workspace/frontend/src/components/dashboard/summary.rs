use common::PlanAnalysis;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub records: Vec<PlanAnalysis>,
}

/// One card per analyzed plan with its plain-language summary.
#[function_component(SummaryList)]
pub fn summary_list(props: &Props) -> Html {
    html! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
            { for props.records.iter().map(|record| html! {
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title text-base">
                            <i class="fas fa-lightbulb text-warning"></i>
                            {&record.product_name}
                        </h3>
                        <p class="whitespace-pre-line">{&record.summary}</p>
                    </div>
                </div>
            })}
        </div>
    }
}
