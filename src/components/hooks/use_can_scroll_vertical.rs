use leptos::prelude::*;

/// Scroll edge state for a scrollable list.
///
/// Returns `(on_scroll, can_scroll_up, can_scroll_down)`; attach `on_scroll` to the
/// element's `on:scroll`.
pub fn use_can_scroll_vertical() -> (impl Fn(web_sys::Event) + Clone, RwSignal<bool>, RwSignal<bool>) {
    let can_scroll_up = RwSignal::new(false);
    let can_scroll_down = RwSignal::new(false);

    let on_scroll = move |ev: web_sys::Event| {
        let target = event_target::<web_sys::HtmlElement>(&ev);
        let (up, down) = scroll_edges(target.scroll_top(), target.scroll_height(), target.client_height());
        can_scroll_up.set(up);
        can_scroll_down.set(down);
    };

    (on_scroll, can_scroll_up, can_scroll_down)
}

fn scroll_edges(scroll_top: i32, scroll_height: i32, client_height: i32) -> (bool, bool) {
    // 1px slack for fractional scroll positions.
    (scroll_top > 0, scroll_top < scroll_height - client_height - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_edges() {
        assert_eq!(scroll_edges(0, 100, 100), (false, false));
        assert_eq!(scroll_edges(0, 300, 100), (false, true));
        assert_eq!(scroll_edges(120, 300, 100), (true, true));
        assert_eq!(scroll_edges(200, 300, 100), (true, false));
    }
}
