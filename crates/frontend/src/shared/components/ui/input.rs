use leptos::prelude::*;

/// Labelled `<input>` bound to a string signal
#[component]
pub fn Input(
    /// Label text (optional)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Bound value
    value: RwSignal<String>,
    /// Input type: "text" (default), "number", "date", ...
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// `step` for number inputs
    #[prop(optional, into)]
    step: MaybeProp<String>,
    /// Disabled state
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// Required attribute
    #[prop(optional)]
    required: bool,
    /// Name attribute, also used as the element id
    #[prop(optional, into)]
    name: MaybeProp<String>,
) -> impl IntoView {
    let input_name = move || name.get().unwrap_or_default();
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=input_name>
                    {l}
                </label>
            })}
            <input
                id=input_name
                name=input_name
                class="form__input"
                type=input_t
                step=move || step.get()
                placeholder=move || placeholder.get().unwrap_or_default()
                prop:value=move || value.get()
                disabled=move || disabled.get()
                required=required
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}
