use leptos::prelude::*;

/// Labelled `<textarea>` bound to a string signal
#[component]
pub fn Textarea(
    /// Label text (optional)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Bound value
    value: RwSignal<String>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// Disabled state
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// Rows attribute
    #[prop(optional)]
    rows: Option<u32>,
    /// Name attribute, also used as the element id
    #[prop(optional, into)]
    name: MaybeProp<String>,
) -> impl IntoView {
    let area_name = move || name.get().unwrap_or_default();

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=area_name>
                    {l}
                </label>
            })}
            <textarea
                id=area_name
                name=area_name
                class="form__textarea"
                rows=rows.unwrap_or(3)
                placeholder=move || placeholder.get().unwrap_or_default()
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        </div>
    }
}
