use web_sys::{DragEvent, Event, FileList, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_files_added: Callback<Vec<web_sys::File>>,
}

fn files_from_list(list: Option<FileList>) -> Vec<web_sys::File> {
    let mut files = Vec::new();
    if let Some(list) = list {
        for index in 0..list.length() {
            if let Some(file) = list.item(index) {
                files.push(file);
            }
        }
    }
    files
}

#[function_component(UploadZone)]
pub fn upload_zone(props: &Props) -> Html {
    let drag_active = use_state(|| false);

    let on_drag_over = {
        let drag_active = drag_active.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            drag_active.set(true);
        })
    };

    let on_drag_leave = {
        let drag_active = drag_active.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            drag_active.set(false);
        })
    };

    let on_drop = {
        let drag_active = drag_active.clone();
        let on_files_added = props.on_files_added.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            drag_active.set(false);
            let dropped = e
                .data_transfer()
                .map(|transfer| files_from_list(transfer.files()))
                .unwrap_or_default();
            if !dropped.is_empty() {
                log::debug!("Dropped {} file(s)", dropped.len());
                on_files_added.emit(dropped);
            }
        })
    };

    let on_input_change = {
        let on_files_added = props.on_files_added.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let selected = files_from_list(input.files());
            // Allow picking the same file again later
            input.set_value("");
            if !selected.is_empty() {
                log::debug!("Selected {} file(s)", selected.len());
                on_files_added.emit(selected);
            }
        })
    };

    let zone_class = if *drag_active {
        "border-2 border-dashed border-primary bg-primary/10 rounded-lg p-8 text-center transition-colors"
    } else {
        "border-2 border-dashed border-base-300 rounded-lg p-8 text-center transition-colors"
    };

    html! {
        <div
            class={zone_class}
            ondragover={on_drag_over}
            ondragleave={on_drag_leave}
            ondrop={on_drop}
        >
            <i class="fas fa-cloud-arrow-up text-4xl text-base-content/40 mb-4"></i>
            <p class="mb-2">{"Drag plan documents here (PDF or text)"}</p>
            <label class="btn btn-primary btn-sm">
                {"Browse files"}
                <input
                    type="file"
                    class="hidden"
                    multiple=true
                    accept=".pdf,.txt"
                    onchange={on_input_change}
                />
            </label>
        </div>
    }
}
