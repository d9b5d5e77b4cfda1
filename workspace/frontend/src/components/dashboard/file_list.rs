use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::view::PlanFile;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub files: Vec<PlanFile>,
    pub is_analyzing: bool,
    pub on_alias_changed: Callback<(usize, String)>,
    pub on_file_removed: Callback<usize>,
    pub on_analyze: Callback<()>,
}

#[function_component(FileList)]
pub fn file_list(props: &Props) -> Html {
    let on_start = {
        let on_analyze = props.on_analyze.clone();
        Callback::from(move |_| on_analyze.emit(()))
    };

    html! {
        <div class="mt-4">
            <div class="space-y-2">
                { for props.files.iter().enumerate().map(|(index, entry)| {
                    let on_alias = {
                        let on_alias_changed = props.on_alias_changed.clone();
                        Callback::from(move |e: Event| {
                            let value = e.target_unchecked_into::<HtmlInputElement>().value();
                            on_alias_changed.emit((index, value));
                        })
                    };
                    let on_remove = {
                        let on_file_removed = props.on_file_removed.clone();
                        Callback::from(move |_| on_file_removed.emit(index))
                    };

                    html! {
                        <div class="flex items-center gap-3 p-2 bg-base-200 rounded-lg">
                            <i class="fas fa-file-lines text-base-content/60"></i>
                            <span class="text-sm truncate max-w-xs" title={entry.file.name()}>
                                {entry.file.name()}
                            </span>
                            <input
                                type="text"
                                class="input input-bordered input-sm flex-1"
                                placeholder="Display name"
                                value={entry.alias.clone()}
                                onchange={on_alias}
                                disabled={props.is_analyzing}
                            />
                            <button
                                class="btn btn-ghost btn-sm btn-circle"
                                onclick={on_remove}
                                disabled={props.is_analyzing}
                            >
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>

            <div class="mt-4">
                <button
                    class="btn btn-primary"
                    disabled={props.is_analyzing}
                    onclick={on_start}
                >
                    if props.is_analyzing {
                        <span class="loading loading-spinner loading-xs"></span>
                    }
                    {format!("Analyze {} document(s)", props.files.len())}
                </button>
            </div>
        </div>
    }
}
