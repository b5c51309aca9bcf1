use crate::components::navigation::NavigationItemPopup;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardHeader, CardItem, CardList, CardTitle, Spinner,
};
use crate::i18n::I18n;
use crate::navigation::{ItemPopupController, NavigationItemData, NavigationItemPayload, NavigationItemType};
use crate::state::{used_entities, used_single_types, AppContext};
use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// One-line destination of an item for the list view.
fn item_target(item: &NavigationItemData) -> String {
    match item.item_type {
        Some(NavigationItemType::External) => item.external_path.clone().unwrap_or_default(),
        _ => match (&item.related_type, &item.related) {
            (Some(rt), Some(id)) => format!("{rt} #{id}"),
            _ => item.path.clone().unwrap_or_default(),
        },
    }
}

/// Replace the item at `index`, or append when editing nothing (or a vanished row).
fn upsert_item(items: &mut Vec<NavigationItemData>, index: Option<usize>, item: NavigationItemData) {
    match index.filter(|i| *i < items.len()) {
        Some(i) => items[i] = item,
        None => items.push(item),
    }
}

#[component]
pub fn NavigationPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let i18n = StoredValue::new(use_context::<I18n>().unwrap_or_default());
    let t = move |key: &str| i18n.with_value(|i| i.t(key));

    let config = app_state.0.config;
    let config_loading = app_state.0.config_loading;
    let error = app_state.0.error;
    let items = app_state.0.items;

    let popup = RwSignal::new(ItemPopupController::default());
    let editing: RwSignal<Option<usize>> = RwSignal::new(None);

    // Load the plugin config once.
    Effect::new(move |_| {
        let api_client = app_state.0.api_client.get_untracked();
        config_loading.set(true);
        spawn_local(async move {
            match api_client.get_config().await {
                Ok(cfg) => {
                    log!("navigation config loaded: {} content types", cfg.content_types.len());
                    popup.update(|p| p.apply_config(&cfg));
                    config.set(Some(cfg));
                    error.set(None);
                }
                Err(e) => {
                    warn!("navigation config failed: {e}");
                    error.set(Some(e.to_string()));
                }
            }
            config_loading.set(false);
        });
    });

    let open_editor = move |index: Option<usize>| {
        let (data, used, used_single) = items.with_untracked(|list| {
            let data = index.and_then(|i| list.get(i).cloned()).unwrap_or_default();
            let used_single = config.with_untracked(|c| {
                c.as_ref()
                    .map(|c| used_single_types(list, index, c))
                    .unwrap_or_default()
            });
            (data, used_entities(list, index), used_single)
        });

        editing.set(index);
        popup.update(|p| {
            p.set_usage(used, used_single);
            p.open(data);
        });
    };

    let on_submit = Callback::new(move |payload: NavigationItemPayload| {
        let index = editing.get_untracked();
        items.update(|list| upsert_item(list, index, NavigationItemData::from(payload)));
        log!("navigation item saved at {:?}", index);
        editing.set(None);
        popup.update(|p| p.close());
    });

    let on_close = Callback::new(move |_: ()| {
        editing.set(None);
        popup.update(|p| p.close());
    });

    let can_edit = move || !config_loading.get() && config.with(|c| c.is_some());

    view! {
        <div class="mx-auto w-full max-w-3xl px-4 py-8">
            <Card>
                <CardHeader>
                    <div class="space-y-1">
                        <CardTitle>{t("page.header")}</CardTitle>
                        <Show when=move || config_loading.get() fallback=|| ().into_view()>
                            <CardDescription class="inline-flex items-center gap-2">
                                <Spinner />
                                {t("page.config.loading")}
                            </CardDescription>
                        </Show>
                    </div>
                    <Button
                        size=ButtonSize::Sm
                        attr:disabled=move || !can_edit()
                        on:click=move |_| open_editor(None)
                    >
                        {t("page.item.new")}
                    </Button>
                </CardHeader>

                <CardContent class="space-y-3">
                    <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                        {move || error.get().map(|e| view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        })}
                    </Show>

                    <Show
                        when=move || items.with(|list| !list.is_empty())
                        fallback=move || view! {
                            <p class="text-sm text-muted-foreground">{t("page.items.empty")}</p>
                        }
                    >
                        <CardList>
                            {move || {
                                items
                                    .get()
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, item)| {
                                        let target = item_target(&item);
                                        let kind = item.item_type.unwrap_or_default().to_string();
                                        view! {
                                            <CardItem>
                                                <div class="min-w-0 space-y-0.5">
                                                    <div class="truncate text-sm font-medium">{item.title}</div>
                                                    <div class="truncate text-xs text-muted-foreground">
                                                        <span class="font-mono">{kind}</span>
                                                        " "
                                                        {target}
                                                    </div>
                                                </div>
                                                <Button
                                                    variant=ButtonVariant::Outline
                                                    size=ButtonSize::Sm
                                                    attr:disabled=move || !can_edit()
                                                    on:click=move |_| open_editor(Some(i))
                                                >
                                                    {t("page.item.edit")}
                                                </Button>
                                            </CardItem>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </CardList>
                    </Show>
                </CardContent>
            </Card>

            <NavigationItemPopup popup=popup on_submit=on_submit on_close=on_close />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::EntityId;

    fn titled(title: &str) -> NavigationItemData {
        NavigationItemData {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_item_target_per_type() {
        let external = NavigationItemData {
            item_type: Some(NavigationItemType::External),
            external_path: Some("https://example.com".to_string()),
            path: Some("ignored".to_string()),
            ..Default::default()
        };
        assert_eq!(item_target(&external), "https://example.com");

        let related = NavigationItemData {
            item_type: Some(NavigationItemType::Internal),
            related: Some(EntityId::Num(7)),
            related_type: Some("article".to_string()),
            ..Default::default()
        };
        assert_eq!(item_target(&related), "article #7");

        let bare = NavigationItemData {
            path: Some("/about".to_string()),
            ..Default::default()
        };
        assert_eq!(item_target(&bare), "/about");
    }

    #[test]
    fn test_upsert_item_replaces_or_appends() {
        let mut items = vec![titled("a"), titled("b")];
        upsert_item(&mut items, Some(1), titled("B"));
        assert_eq!(items[1].title, "B");

        upsert_item(&mut items, None, titled("c"));
        assert_eq!(items.len(), 3);

        upsert_item(&mut items, Some(10), titled("d"));
        assert_eq!(items.len(), 4);
        assert_eq!(items[3].title, "d");
    }
}
