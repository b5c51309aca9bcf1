use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, FieldError, FieldHint, Input, Label, Select, SelectContent,
    SelectGroup, SelectOption, SelectTrigger, SelectValue, Spinner, Switch,
};
use crate::i18n::I18n;
use crate::models::Audience;
use crate::navigation::{
    Catalog, Debouncer, EntityId, FetchRequest, FieldChange, ItemFormController,
    NavigationItemDraft, NavigationItemPayload, OptionItem,
};
use crate::state::AppContext;
use leptos::logging::{log, warn};
use leptos::prelude::*;
use std::fmt::Display;

/// Option whose value renders as `value`. Select values travel through the DOM as text.
fn find_option<V: Display + Clone>(options: &[OptionItem<V>], value: &str) -> Option<OptionItem<V>> {
    options.iter().find(|o| o.value.to_string() == value).cloned()
}

#[component]
pub(crate) fn NavigationItemForm(
    data: NavigationItemDraft,
    #[prop(into)] catalog: Signal<Catalog>,
    #[prop(into)] is_loading: Signal<bool>,
    audience: Vec<Audience>,
    on_submit: Callback<NavigationItemPayload>,
    on_cancel: Callback<()>,
    on_fetch: Callback<FetchRequest>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let i18n = StoredValue::new(use_context::<I18n>().unwrap_or_default());
    let t = move |key: &str| i18n.with_value(|i| i.t(key));

    let form = RwSignal::new(ItemFormController::new(data));
    let debouncer = Debouncer::new(app_state.0.search_debounce_ms);

    let (title, path, external_path) = form.with_untracked(|f| {
        let d = f.draft();
        (
            RwSignal::new(d.title.clone()),
            RwSignal::new(d.path.clone().unwrap_or_default()),
            RwSignal::new(d.external_path.clone().unwrap_or_default()),
        )
    });
    let search = RwSignal::new(String::new());

    let is_external = Memo::new(move |_| form.with(|f| f.is_external()));
    let is_single_selected = Memo::new(move |_| catalog.with(|c| form.with(|f| f.is_single_selected(c))));
    let has_related_type = Memo::new(move |_| form.with(|f| f.draft().related_type.is_some()));
    let type_options = Memo::new(move |_| {
        catalog.with(|c| form.with(|f| i18n.with_value(|i| f.related_type_options(c, i))))
    });
    let entity_options = Memo::new(move |_| {
        catalog.with(|c| form.with(|f| i18n.with_value(|i| f.related_entity_options(c, i))))
    });
    let ui_router_key = Memo::new(move |_| catalog.with(|c| form.with(|f| f.ui_router_key(c))));
    let submit_disabled = Memo::new(move |_| form.with(|f| f.submit_disabled()));
    let show_empty_hint = Memo::new(move |_| {
        !is_loading.get()
            && catalog.with(|c| form.with(|f| i18n.with_value(|i| f.no_more_entities(c, i))))
    });

    // First page for an item opened with a related type already set.
    Effect::new(move |_| {
        let req = catalog.with_untracked(|c| form.with_untracked(|f| f.fetch_request(c)));
        if let Some(req) = req {
            on_fetch.run(req);
        }
    });

    Effect::new(move |_| {
        let candidate = catalog.with(|c| {
            form.with(|f| i18n.with_value(|i| f.auto_select_candidate(c, i)))
        });
        if candidate.is_some() {
            catalog.with_untracked(|c| {
                form.update(|f| {
                    i18n.with_value(|i| f.auto_select(c, i));
                })
            });
        }
    });

    let cleanup_debouncer = debouncer.clone();
    on_cleanup(move || cleanup_debouncer.cancel());

    let on_title = Callback::new(move |v: String| {
        form.update(|f| f.on_field_change(FieldChange::Title(v)));
    });
    let on_path = Callback::new(move |v: String| {
        form.update(|f| f.on_field_change(FieldChange::Path(v)));
    });
    let on_external_path = Callback::new(move |v: String| {
        form.update(|f| f.on_field_change(FieldChange::ExternalPath(v)));
    });
    let on_menu_attached = Callback::new(move |v: bool| {
        form.update(|f| f.on_field_change(FieldChange::MenuAttached(v)));
    });
    let on_internal = Callback::new(move |v: bool| {
        form.update(|f| f.on_type_toggle(v));
    });

    let type_debouncer = debouncer.clone();
    let on_related_type = Callback::new(move |value: Option<String>| {
        let option = value.and_then(|v| type_options.with_untracked(|opts| find_option(opts, &v)));
        type_debouncer.cancel();
        search.set(String::new());

        let mut req = None;
        catalog.with_untracked(|c| form.update(|f| req = f.on_related_type_change(option, c)));
        if let Some(req) = req {
            on_fetch.run(req);
        }
    });

    let on_related = Callback::new(move |value: Option<String>| {
        let option = value.and_then(|v| entity_options.with_untracked(|opts| find_option(opts, &v)));
        form.update(|f| f.on_field_change(FieldChange::Related(option)));
    });

    let search_debouncer = debouncer.clone();
    let on_search = Callback::new(move |value: String| {
        form.update(|f| f.on_search_input(value.clone()));
        search_debouncer.schedule(move || {
            let req = catalog
                .try_with_untracked(|c| form.try_update(|f| f.commit_search_query(value, c)))
                .flatten()
                .flatten();
            if let Some(req) = req {
                on_fetch.run(req);
            }
        });
    });

    let on_save = move |_: web_sys::MouseEvent| {
        let mut outcome = None;
        catalog.with_untracked(|c| {
            form.update(|f| outcome = Some(i18n.with_value(|i| f.submit(c, i))));
        });
        match outcome {
            Some(Ok(payload)) => {
                log!("navigation item submitted: {:?}", payload.ui_router_key);
                on_submit.run(payload);
            }
            Some(Err(errors)) => {
                warn!("navigation item not submitted, {} invalid field(s)", errors.len());
            }
            None => {}
        }
    };

    let error_for = move |field: &'static str| {
        move || {
            form.with(|f| f.error(field)).map(|e| view! { <FieldError>{e}</FieldError> })
        }
    };

    let related_type_value = Signal::derive(move || {
        form.with(|f| f.draft().related_type.as_ref().map(|o| o.value.clone()))
    });
    let related_type_label = Signal::derive(move || {
        form.with(|f| f.draft().related_type.as_ref().map(|o| o.label.clone()))
    });
    let related_value = Signal::derive(move || {
        form.with(|f| f.draft().related.as_ref().map(|o| o.value.to_string()))
    });
    // A freshly loaded page may carry a better label than the one the draft was seeded with.
    let related_label = Signal::derive(move || {
        let related = form.with(|f| f.draft().related.clone())?;
        entity_options
            .with(|opts| find_option(opts, &related.value.to_string()))
            .map(|o| o.label)
            .or(Some(related.label))
    });

    let audience_view = (!audience.is_empty()).then(|| {
        let toggles = audience
            .into_iter()
            .map(|a| {
                let id = a.id.clone();
                let checked_id = id.clone();
                let checked = Signal::derive(move || {
                    form.with(|f| f.draft().audience.contains(&checked_id))
                });
                let on_change = Callback::new(move |on: bool| {
                    let mut next: Vec<EntityId> = form.with_untracked(|f| f.draft().audience.clone());
                    next.retain(|x| x != &id);
                    if on {
                        next.push(id.clone());
                    }
                    form.update(|f| f.on_field_change(FieldChange::Audience(next)));
                });
                let dom_id = format!("navigation-audience-{}", a.id);
                view! {
                    <div class="flex items-center gap-2">
                        <Switch id=dom_id.clone() checked=checked on_change=on_change />
                        <Label class="text-xs" html_for=dom_id>{a.name}</Label>
                    </div>
                }
            })
            .collect_view();

        view! {
            <div class="space-y-1">
                <Label class="text-xs">{t("popup.item.form.audience.label")}</Label>
                <div class="flex flex-wrap gap-3">{toggles}</div>
                {error_for("audience")}
            </div>
        }
    });

    view! {
        <div data-name="NavigationItemForm" class="space-y-3">
            <div class="space-y-1">
                <Label class="text-xs" html_for="navigation-item-title">
                    {t("popup.item.form.title.label")}
                </Label>
                <Input
                    id="navigation-item-title"
                    bind_value=title
                    on_value=on_title
                    placeholder=t("popup.item.form.title.placeholder")
                    invalid=Signal::derive(move || form.with(|f| f.error("title").is_some()))
                    class="h-8 text-sm border-border bg-background"
                />
                {error_for("title")}
                <p class="text-xs text-muted-foreground">
                    {t("popup.item.form.uiRouterKey.label")} ": "
                    <span class="font-mono">{move || ui_router_key.get().unwrap_or_default()}</span>
                </p>
                {error_for("uiRouterKey")}
            </div>

            <div class="flex items-center gap-6">
                <div class="flex items-center gap-2">
                    <Switch
                        id="navigation-item-menu-attached"
                        checked=Signal::derive(move || form.with(|f| f.draft().menu_attached.unwrap_or(false)))
                        on_change=on_menu_attached
                    />
                    <Label class="text-xs" html_for="navigation-item-menu-attached">
                        {t("popup.item.form.menuAttached.label")}
                    </Label>
                </div>
                <div class="flex items-center gap-2">
                    <Switch
                        id="navigation-item-type"
                        checked=Signal::derive(move || !is_external.get())
                        on_change=on_internal
                    />
                    <Label class="text-xs" html_for="navigation-item-type">
                        {t("popup.item.form.type.label")}
                    </Label>
                </div>
            </div>

            // Path source follows the item type.
            <div class="space-y-1">
                <Label class="text-xs" html_for="navigation-item-path">
                    {move || t(&format!("popup.item.form.{}.label", form.with(|f| f.path_source_name())))}
                </Label>
                <Show
                    when=move || is_external.get()
                    fallback=move || view! {
                        <Input
                            id="navigation-item-path"
                            bind_value=path
                            on_value=on_path
                            placeholder=t("popup.item.form.path.placeholder")
                            invalid=Signal::derive(move || form.with(|f| f.error("path").is_some()))
                            class="h-8 text-sm border-border bg-background"
                        />
                    }
                >
                    <Input
                        id="navigation-item-path"
                        bind_value=external_path
                        on_value=on_external_path
                        placeholder=t("popup.item.form.externalPath.placeholder")
                        invalid=Signal::derive(move || form.with(|f| f.error("externalPath").is_some()))
                        class="h-8 text-sm border-border bg-background"
                    />
                </Show>
                {move || {
                    let field = form.with(|f| f.path_source_name());
                    form.with(|f| f.error(field)).map(|e| view! { <FieldError>{e}</FieldError> })
                }}
            </div>

            <Show when=move || !is_external.get() fallback=|| ().into_view()>
                <div class="space-y-1">
                    <Label class="text-xs">{t("popup.item.form.relatedType.label")}</Label>
                    <Select value=related_type_value on_change=on_related_type>
                        <SelectTrigger class="h-8">
                            <SelectValue
                                placeholder=t("popup.item.form.relatedType.placeholder")
                                label=related_type_label
                            />
                        </SelectTrigger>
                        <SelectContent>
                            <SelectGroup>
                                {move || {
                                    type_options
                                        .get()
                                        .into_iter()
                                        .map(|o| view! { <SelectOption value=o.value>{o.label}</SelectOption> })
                                        .collect_view()
                                }}
                            </SelectGroup>
                        </SelectContent>
                    </Select>
                    {error_for("relatedType")}
                </div>

                <Show when=move || has_related_type.get() && !is_single_selected.get() fallback=|| ().into_view()>
                    <div class="space-y-1">
                        <Label class="text-xs">{t("popup.item.form.related.label")}</Label>
                        <Input
                            bind_value=search
                            on_value=on_search
                            placeholder=t("popup.item.form.related.search")
                            class="h-8 text-sm border-border bg-background"
                        />
                        <Select value=related_value on_change=on_related disabled=is_loading>
                            <SelectTrigger class="h-8">
                                <SelectValue placeholder=t("popup.item.form.related.label") label=related_label />
                            </SelectTrigger>
                            <SelectContent>
                                <SelectGroup>
                                    {move || {
                                        entity_options
                                            .get()
                                            .into_iter()
                                            .map(|o| {
                                                view! {
                                                    <SelectOption value=o.value.to_string()>{o.label}</SelectOption>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </SelectGroup>
                            </SelectContent>
                        </Select>
                        {error_for("related")}
                        <Show when=move || show_empty_hint.get() fallback=|| ().into_view()>
                            <FieldHint>
                                {move || {
                                    let name = related_type_label.get().unwrap_or_default();
                                    i18n.with_value(|i| {
                                        i.t_with("popup.item.form.related.empty", &[("contentTypeName", &name)])
                                    })
                                }}
                            </FieldHint>
                        </Show>
                    </div>
                </Show>
            </Show>

            {audience_view}

            <div class="flex items-center justify-end gap-2 pt-2">
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    on:click=move |_| on_cancel.run(())
                >
                    {t("popup.item.form.button.cancel")}
                </Button>
                <Button
                    size=ButtonSize::Sm
                    attr:disabled=move || submit_disabled.get() || is_loading.get()
                    on:click=on_save
                >
                    <span class="inline-flex items-center gap-2">
                        <Show when=move || is_loading.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        {t("popup.item.form.button.save")}
                    </span>
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_option_matches_rendered_value() {
        let options = vec![
            OptionItem::new(EntityId::Num(7), "Hello"),
            OptionItem::new(EntityId::Str("abc".to_string()), "Abc"),
        ];
        assert_eq!(find_option(&options, "7").map(|o| o.label), Some("Hello".to_string()));
        assert_eq!(find_option(&options, "abc").map(|o| o.value), Some(EntityId::Str("abc".to_string())));
        assert!(find_option(&options, "8").is_none());
    }
}
