use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm [&>svg+div]:translate-y-[-3px] [&>svg]:absolute [&>svg]:left-4 [&>svg]:top-4 [&>svg]:text-foreground [&>svg~*]:pl-7"}
    clx! {AlertDescription, p, "text-sm [&_p]:leading-relaxed"}
    clx! {FieldError, p, "text-xs text-destructive"}
    clx! {FieldHint, div, "mt-1 flex items-center gap-1 text-xs text-warning [&_svg:not([class*='size-'])]:size-3.5"}
}

#[allow(unused_imports)]
pub use components::*;
