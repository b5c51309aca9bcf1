use crate::components::navigation::NavigationItemForm;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Spinner};
use crate::i18n::I18n;
use crate::navigation::{FetchRequest, ItemPopupController, NavigationItemPayload};
use crate::state::AppContext;
use icons::X;
use leptos::ev;
use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;

/// Modal shell around [`NavigationItemForm`].
///
/// Entity pages are fetched here on the form's behalf; the controller's fetch tickets
/// make sure a slow, superseded response never replaces a newer page.
#[component]
pub(crate) fn NavigationItemPopup(
    popup: RwSignal<ItemPopupController>,
    on_submit: Callback<NavigationItemPayload>,
    on_close: Callback<()>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let i18n = StoredValue::new(use_context::<I18n>().unwrap_or_default());

    let is_open = Memo::new(move |_| popup.with(|p| p.is_open()));
    let is_loading = Memo::new(move |_| popup.with(|p| p.is_loading()));
    let catalog = Memo::new(move |_| popup.with(|p| p.catalog().clone()));

    let api_client = app_state.0.api_client;
    let app_error = app_state.0.error;
    let on_fetch = Callback::new(move |req: FetchRequest| {
        let mut ticket = None;
        popup.update(|p| ticket = Some(p.begin_fetch()));
        let Some(ticket) = ticket else {
            return;
        };

        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.get_content_type_items(&req).await {
                Ok(entities) => {
                    let count = entities.len();
                    let applied = popup
                        .try_update(|p| p.receive_entities(ticket, entities))
                        .unwrap_or(false);
                    if applied {
                        log!("loaded {count} {} entities", req.type_name);
                    } else {
                        warn!("discarded stale {} entities response", req.type_name);
                    }
                }
                Err(e) => {
                    let current = popup.try_update(|p| p.fetch_failed(ticket)).unwrap_or(false);
                    warn!("entity fetch failed: {e}");
                    if current {
                        app_error.set(Some(e.to_string()));
                    }
                }
            }
        });
    });

    let _key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && popup.with_untracked(|p| p.is_open()) {
            on_close.run(());
        }
    });

    view! {
        <Show when=move || is_open.get() fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                <div class="w-full max-w-lg rounded-md border border-border bg-background p-4 shadow-lg">
                    <div class="mb-3 flex items-center justify-between">
                        <div class="inline-flex items-center gap-2 text-sm font-medium">
                            {move || i18n.with_value(|i| i.t("popup.item.header"))}
                            <Show when=move || is_loading.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                        </div>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            class="h-7 w-7"
                            attr:title=move || i18n.with_value(|i| i.t("popup.item.form.button.cancel"))
                            on:click=move |_| on_close.run(())
                        >
                            <X />
                        </Button>
                    </div>

                    // Seeded once per opening; later popup updates flow in through `catalog`.
                    {move || {
                        let (data, audience) = popup.with_untracked(|p| {
                            (
                                i18n.with_value(|i| p.prepare_form_data(i)),
                                p.available_audience().to_vec(),
                            )
                        });
                        view! {
                            <NavigationItemForm
                                data=data
                                catalog=catalog
                                is_loading=is_loading
                                audience=audience
                                on_submit=on_submit
                                on_cancel=on_close
                                on_fetch=on_fetch
                            />
                        }
                    }}
                </div>
            </div>
        </Show>
    }
}
