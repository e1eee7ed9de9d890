use leptos::*;

/// A destructive button that asks before acting. Each prompt must be
/// answered "Yes" in turn before `on_confirm` runs.
#[component]
pub fn ConfirmDelete<F>(
    label: &'static str,
    prompts: Vec<&'static str>,
    #[prop(into)] pending: Signal<bool>,
    on_confirm: F,
) -> impl IntoView
where
    F: Fn() + Clone + 'static,
{
    let step = create_rw_signal(0usize);
    let prompts = store_value(prompts);

    // A finished delete closes the prompt.
    create_effect(move |was_pending: Option<bool>| {
        let is_pending = pending.get();
        if was_pending == Some(true) && !is_pending {
            step.set(0);
        }
        is_pending
    });

    view! {
        {move || {
            let current = step.get();
            match prompts.with_value(|p| p.get(current.wrapping_sub(1)).copied()) {
                None => view! {
                    <button
                        class="btn btn-sm btn-outline-danger delete-button"
                        on:click=move |_| step.set(1)
                    >
                        {label}
                    </button>
                }.into_view(),
                Some(prompt) => {
                    let on_confirm = on_confirm.clone();
                    view! {
                        <div class="delete-confirm">
                            <span>{prompt}</span>
                            <button
                                class="btn btn-sm btn-danger"
                                disabled=move || pending.get()
                                on:click=move |_| {
                                    if current < prompts.with_value(Vec::len) {
                                        step.set(current + 1);
                                    } else {
                                        on_confirm();
                                    }
                                }
                            >
                                {move || if pending.get() { "Deleting..." } else { "Yes" }}
                            </button>
                            <button
                                class="btn btn-sm"
                                disabled=move || pending.get()
                                on:click=move |_| step.set(0)
                            >
                                "No"
                            </button>
                        </div>
                    }.into_view()
                }
            }
        }}
    }
}
