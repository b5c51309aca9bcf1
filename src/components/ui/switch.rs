use leptos::prelude::*;
use tw_merge::*;

#[component]
pub fn Switch(
    #[prop(into)] checked: Signal<bool>,
    #[prop(optional)] on_change: Option<Callback<bool>>,
    #[prop(optional, into)] id: String,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "peer inline-flex h-5 w-9 shrink-0 items-center rounded-full border border-transparent shadow-xs transition-all outline-none focus-visible:ring-[3px] focus-visible:ring-ring/50 disabled:cursor-not-allowed disabled:opacity-50 data-[state=checked]:bg-primary data-[state=unchecked]:bg-input",
        class
    );

    let state = move || if checked.get() { "checked" } else { "unchecked" };

    view! {
        <button
            type="button"
            role="switch"
            data-name="Switch"
            id=id
            class=merged_class
            aria-checked=move || checked.get().to_string()
            data-state=state
            disabled=move || disabled.get()
            on:click=move |_| {
                if let Some(cb) = on_change {
                    cb.run(!checked.get_untracked());
                }
            }
        >
            <span
                data-state=state
                class="pointer-events-none block size-4 rounded-full bg-background shadow-sm ring-0 transition-transform data-[state=checked]:translate-x-4 data-[state=unchecked]:translate-x-0"
            ></span>
        </button>
    }
}
