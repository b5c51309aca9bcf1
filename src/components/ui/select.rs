use icons::{Check, ChevronDown, ChevronUp};
use leptos::context::Provider;
use leptos::prelude::*;
use strum::{AsRefStr, Display};
use tw_merge::*;

use crate::components::hooks::use_can_scroll_vertical::use_can_scroll_vertical;
use crate::components::hooks::use_random::use_random_id_for;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr)]
pub enum SelectPosition {
    #[default]
    Below,
    Above,
}

/// Controlled select: the owner holds the value and decides what a pick does.
#[derive(Clone)]
struct SelectContext {
    target_id: String,
    value: Signal<Option<String>>,
    on_change: Option<Callback<Option<String>>>,
    disabled: Signal<bool>,
}

#[component]
pub fn Select(
    children: Children,
    #[prop(optional, into)] class: String,
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(optional)] on_change: Option<Callback<Option<String>>>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let ctx = SelectContext {
        target_id: use_random_id_for("select"),
        value,
        on_change,
        disabled,
    };

    let merged_class = tw_merge!("relative w-full", class);

    view! {
        <Provider value=ctx>
            <div data-name="Select" class=merged_class>
                {children()}
            </div>
        </Provider>
    }
}

/// Shows `label` when the owner can resolve one, else the placeholder.
#[component]
pub fn SelectValue(
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] label: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <span data-name="SelectValue" class="text-sm truncate">
            {move || match label.get() {
                Some(text) if !text.is_empty() => text,
                _ => placeholder.clone(),
            }}
        </span>
    }
}

#[component]
pub fn SelectGroup(
    children: Children,
    #[prop(optional, into)] class: String,
    #[prop(default = "Select options".into(), into)] aria_label: String,
) -> impl IntoView {
    let merged_class = tw_merge!("group", class);

    view! {
        <ul data-name="SelectGroup" role="listbox" aria-label=aria_label class=merged_class>
            {children()}
        </ul>
    }
}

#[component]
pub fn SelectOption(
    children: Children,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] value: Option<String>,
) -> impl IntoView {
    let ctx = expect_context::<SelectContext>();

    let merged_class = tw_merge!(
        "group inline-flex gap-2 items-center w-full rounded-sm px-2 py-1.5 text-sm cursor-pointer no-underline transition-colors duration-200 text-popover-foreground hover:bg-accent hover:text-accent-foreground [&_svg:not([class*='size-'])]:size-4",
        class
    );

    let value_for_check = value.clone();
    let value_signal = ctx.value;
    let is_selected = move || value_signal.get() == value_for_check;

    view! {
        <li
            data-name="SelectOption"
            class=merged_class
            role="option"
            tabindex="0"
            aria-selected=move || is_selected().to_string()
            data-select-option="true"
            on:click=move |_| {
                if let Some(on_change) = ctx.on_change {
                    on_change.run(value.clone());
                }
            }
        >
            {children()}
            <Check class="ml-auto opacity-0 size-4 text-muted-foreground group-aria-selected:opacity-100" />
        </li>
    }
}

#[component]
pub fn SelectTrigger(
    children: Children,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] id: String,
) -> impl IntoView {
    let ctx = expect_context::<SelectContext>();

    let button_class = tw_merge!(
        "w-full p-2 h-9 inline-flex items-center justify-between text-sm font-medium whitespace-nowrap rounded-md transition-colors focus:outline-none focus:ring-1 focus:ring-ring focus-visible:outline-hidden focus-visible:ring-1 focus-visible:ring-ring disabled:cursor-not-allowed disabled:opacity-50 [&_svg:not(:last-child)]:mr-2 [&_svg:not(:first-child)]:ml-2 [&_svg:not([class*='size-'])]:size-4 border bg-background border-input hover:bg-accent hover:text-accent-foreground",
        class
    );

    let button_id = if !id.is_empty() {
        id
    } else {
        format!("trigger_{}", ctx.target_id)
    };
    let disabled = ctx.disabled;

    view! {
        <button
            type="button"
            data-name="SelectTrigger"
            class=button_class
            id=button_id
            tabindex="0"
            disabled=move || disabled.get()
            data-select-trigger=ctx.target_id
        >
            {children()}
            <ChevronDown class="text-muted-foreground" />
        </button>
    }
}

#[component]
pub fn SelectContent(
    children: Children,
    #[prop(optional, into)] class: String,
    #[prop(default = SelectPosition::default())] position: SelectPosition,
) -> impl IntoView {
    let ctx = expect_context::<SelectContext>();

    let merged_class = tw_merge!(
        "w-full overflow-auto z-50 p-1 rounded-md border bg-card shadow-md h-fit max-h-[300px] absolute top-[calc(100%+4px)] left-0 data-[position=Above]:top-auto data-[position=Above]:bottom-[calc(100%+4px)] transition-all duration-200 data-[state=closed]:opacity-0 data-[state=closed]:scale-95 data-[state=open]:opacity-100 data-[state=open]:scale-100 [scrollbar-width:none] [&::-webkit-scrollbar]:hidden",
        class
    );

    let script = select_script(&ctx.target_id);
    let (on_scroll, can_scroll_up, can_scroll_down) = use_can_scroll_vertical();

    view! {
        <div
            data-name="SelectContent"
            class=merged_class
            id=ctx.target_id
            data-state="closed"
            data-position=position.as_ref().to_string()
            style="pointer-events: none;"
            on:scroll=on_scroll
        >
            <div
                data-scroll-up="true"
                class=move || {
                    if can_scroll_up.get() {
                        "sticky -top-1 z-10 flex items-center justify-center py-1 bg-card"
                    } else {
                        "hidden"
                    }
                }
            >
                <ChevronUp class="size-4 text-muted-foreground" />
            </div>
            {children()}
            <div
                data-scroll-down="true"
                class=move || {
                    if can_scroll_down.get() {
                        "sticky -bottom-1 z-10 flex items-center justify-center py-1 bg-card"
                    } else {
                        "hidden"
                    }
                }
            >
                <ChevronDown class="size-4 text-muted-foreground" />
            </div>
        </div>

        <script>{script}</script>
    }
}

/// Open/close wiring for one select.
///
/// Option clicks are delegated on the content element, because the option list is
/// re-rendered whenever the entity search returns.
fn select_script(target_id: &str) -> String {
    format!(
        r#"
        (function() {{
            const setupSelect = () => {{
                const select = document.querySelector('#{target_id}');
                const trigger = document.querySelector('[data-select-trigger="{target_id}"]');

                if (!select || !trigger) {{
                    setTimeout(setupSelect, 50);
                    return;
                }}

                if (select.hasAttribute('data-initialized')) {{
                    return;
                }}
                select.setAttribute('data-initialized', 'true');

                let isOpen = false;

                const updatePosition = () => {{
                    const rect = trigger.getBoundingClientRect();
                    const spaceBelow = window.innerHeight - rect.bottom;
                    if (spaceBelow < 200 && rect.top > spaceBelow) {{
                        select.setAttribute('data-position', 'Above');
                    }} else {{
                        select.setAttribute('data-position', 'Below');
                    }}
                }};

                const openSelect = () => {{
                    isOpen = true;
                    updatePosition();
                    select.setAttribute('data-state', 'open');
                    select.style.pointerEvents = 'auto';
                    select.dispatchEvent(new Event('scroll'));
                    setTimeout(() => {{
                        document.addEventListener('click', handleClickOutside);
                    }}, 0);
                }};

                const closeSelect = () => {{
                    isOpen = false;
                    select.setAttribute('data-state', 'closed');
                    select.style.pointerEvents = 'none';
                    document.removeEventListener('click', handleClickOutside);
                }};

                const handleClickOutside = (e) => {{
                    if (!select.contains(e.target) && !trigger.contains(e.target)) {{
                        closeSelect();
                    }}
                }};

                trigger.addEventListener('click', (e) => {{
                    e.stopPropagation();
                    if (isOpen) {{
                        closeSelect();
                    }} else {{
                        openSelect();
                    }}
                }});

                select.addEventListener('click', (e) => {{
                    if (e.target.closest('[data-select-option]')) {{
                        closeSelect();
                    }}
                }});

                document.addEventListener('keydown', (e) => {{
                    if (e.key === 'Escape' && isOpen) {{
                        e.stopPropagation();
                        closeSelect();
                    }}
                }}, true);
            }};

            if (document.readyState === 'loading') {{
                document.addEventListener('DOMContentLoaded', setupSelect);
            }} else {{
                setupSelect();
            }}
        }})();
        "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_script_targets_both_elements() {
        let script = select_script("select_rust_ui_42");
        assert!(script.contains("document.querySelector('#select_rust_ui_42')"));
        assert!(script.contains(r#"[data-select-trigger="select_rust_ui_42"]"#));
        assert!(script.contains("closest('[data-select-option]')"));
    }

    #[test]
    fn test_select_position_renders_as_data_attribute() {
        assert_eq!(SelectPosition::default().as_ref(), "Below");
        assert_eq!(SelectPosition::Above.to_string(), "Above");
    }
}
