use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
    #[prop_or_default]
    pub on_reset: Option<Callback<()>>,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    let on_new_analysis = props.on_reset.as_ref().map(|on_reset| {
        let on_reset = on_reset.clone();
        Callback::from(move |_| on_reset.emit(()))
    });

    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-1 px-4">
                <div class="flex items-center gap-3">
                    <i class="fas fa-file-shield text-2xl text-primary"></i>
                    <div>
                        <h1 class="text-xl font-bold" id="page-title">{ &props.title }</h1>
                        <p class="text-xs text-base-content/60">
                            {"Upload plan documents and compare their long-term value"}
                        </p>
                    </div>
                </div>
            </div>
            <div class="flex-none gap-2">
                {if let Some(onclick) = on_new_analysis {
                    html! {
                        <button class="btn btn-outline btn-sm" {onclick}>
                            <i class="fas fa-rotate-left"></i>
                            {"New Analysis"}
                        </button>
                    }
                } else {
                    html! {}
                }}

                <label class="swap swap-rotate btn btn-ghost btn-circle">
                    <input id="theme-toggle" type="checkbox"/>
                    <i class="swap-on fill-current fas fa-sun text-xl"></i>
                    <i class="swap-off fill-current fas fa-moon text-xl"></i>
                </label>
            </div>
        </div>
    }
}
