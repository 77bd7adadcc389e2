use leptos::prelude::*;

/// Labelled `<select>` bound to a string signal
#[component]
pub fn Select(
    /// Label text (optional)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Bound value
    value: RwSignal<String>,
    /// Options: Vec of (value, label) tuples
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    /// Text of a leading disabled option shown while nothing is chosen
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
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
    let select_name = move || name.get().unwrap_or_default();

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=select_name>
                    {l}
                </label>
            })}
            <select
                id=select_name
                name=select_name
                class="form__select"
                disabled=move || disabled.get()
                required=required
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {move || placeholder.get().map(|text| view! {
                    <option value="" disabled=true selected=move || value.get().is_empty()>
                        {text}
                    </option>
                })}
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, label)| {
                        let val_clone = val.clone();
                        let is_selected = move || value.get() == val_clone;
                        view! {
                            <option value=val selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
