use common::PlanAnalysis;
use common::trend::TrendKind;
use yew::prelude::*;

use crate::api_client::analyze::analyze_plans;
use crate::common::loading::{Loading, LoadingSize};
use crate::common::toast::ToastContext;
use super::charts::TrendChart;
use super::file_list::FileList;
use super::metrics_table::MetricsTable;
use super::summary::SummaryList;
use super::upload::UploadZone;

/// One staged upload with an editable display name.
#[derive(Clone, PartialEq)]
pub struct PlanFile {
    pub file: web_sys::File,
    pub alias: String,
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let toast_ctx = use_context::<ToastContext>().expect("ToastContext not found");
    let files = use_state(|| Vec::<PlanFile>::new());
    let results = use_state(|| None::<Vec<PlanAnalysis>>);
    let is_analyzing = use_state(|| false);

    let on_files_added = {
        let files = files.clone();
        Callback::from(move |added: Vec<web_sys::File>| {
            let mut staged = (*files).clone();
            for file in added {
                let alias = file.name();
                log::debug!("Staged upload '{}' ({} bytes)", alias, file.size());
                staged.push(PlanFile { file, alias });
            }
            files.set(staged);
        })
    };

    let on_alias_changed = {
        let files = files.clone();
        Callback::from(move |(index, alias): (usize, String)| {
            let mut staged = (*files).clone();
            if let Some(entry) = staged.get_mut(index) {
                entry.alias = alias;
            }
            files.set(staged);
        })
    };

    let on_file_removed = {
        let files = files.clone();
        Callback::from(move |index: usize| {
            let mut staged = (*files).clone();
            if index < staged.len() {
                staged.remove(index);
            }
            files.set(staged);
        })
    };

    let on_analyze = {
        let files = files.clone();
        let results = results.clone();
        let is_analyzing = is_analyzing.clone();
        let toast_ctx = toast_ctx.clone();

        Callback::from(move |_| {
            if files.is_empty() || *is_analyzing {
                return;
            }

            // Blank aliases fall back to the original file name
            let uploads: Vec<(String, web_sys::File)> = files
                .iter()
                .map(|entry| {
                    let alias = entry.alias.trim();
                    let name = if alias.is_empty() {
                        entry.file.name()
                    } else {
                        alias.to_string()
                    };
                    (name, entry.file.clone())
                })
                .collect();

            let results = results.clone();
            let is_analyzing = is_analyzing.clone();
            let toast_ctx = toast_ctx.clone();

            wasm_bindgen_futures::spawn_local(async move {
                is_analyzing.set(true);
                match analyze_plans(&uploads).await {
                    Ok(analyses) => {
                        is_analyzing.set(false);
                        toast_ctx.show_success(format!("Analyzed {} plan(s)", analyses.len()));
                        results.set(Some(analyses));
                    }
                    Err(e) => {
                        is_analyzing.set(false);
                        log::error!("Analysis failed: {}", e);
                        // Previous results stay on screen
                        toast_ctx.show_error(format!("Analysis failed: {}", e));
                    }
                }
            });
        })
    };

    html! {
        <>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Plan Documents"}</h2>
                    <UploadZone on_files_added={on_files_added} />
                    {if !files.is_empty() {
                        html! {
                            <FileList
                                files={(*files).clone()}
                                is_analyzing={*is_analyzing}
                                on_alias_changed={on_alias_changed}
                                on_file_removed={on_file_removed}
                                on_analyze={on_analyze}
                            />
                        }
                    } else {
                        html! {}
                    }}
                </div>
            </div>

            {if *is_analyzing {
                html! {
                    <div class="card bg-base-100 shadow mt-6">
                        <div class="card-body">
                            <Loading
                                size={LoadingSize::Large}
                                text={Some("Reading plan documents...".to_string())}
                            />
                        </div>
                    </div>
                }
            } else {
                html! {}
            }}

            {if results.is_none() && !*is_analyzing {
                html! {
                    <div class="card bg-base-100 shadow mt-6">
                        <div class="card-body">
                            <div class="text-center py-8 text-gray-500">
                                <i class="fas fa-chart-line text-4xl mb-4 opacity-50"></i>
                                <p>{"No analyses yet."}</p>
                                <p class="text-sm mt-2">{"Upload plan documents and start an analysis to compare metrics, value trends and summaries."}</p>
                            </div>
                        </div>
                    </div>
                }
            } else {
                html! {}
            }}

            {if let Some(records) = &*results {
                html! {
                    <>
                        <div class="card bg-base-100 shadow mt-6">
                            <div class="card-body">
                                <h2 class="card-title">{"Key Metrics"}</h2>
                                <MetricsTable records={records.clone()} />
                            </div>
                        </div>
                        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <h2 class="card-title">{"Cash Value Trend"}</h2>
                                    <TrendChart records={records.clone()} kind={TrendKind::CashValue} />
                                </div>
                            </div>
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <h2 class="card-title">{"Yearly IRR Trend"}</h2>
                                    <TrendChart records={records.clone()} kind={TrendKind::Irr} />
                                </div>
                            </div>
                        </div>
                        <SummaryList records={records.clone()} />
                    </>
                }
            } else {
                html! {}
            }}
        </>
    }
}
