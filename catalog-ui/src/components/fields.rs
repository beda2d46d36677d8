///! Form inputs bound to signals

use crate::error::FieldError;
use catalog_common::payload::FileUpload;
use catalog_common::SelectOption;
use leptos::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

#[component]
pub fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type="text"
                class:invalid=move || error.with(Option::is_some)
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
            />
            <FieldError message=error/>
        </div>
    }
}

/// Text input with a numeric keyboard; coercion happens on submit
#[component]
pub fn NumberField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type="text"
                inputmode="decimal"
                class:invalid=move || error.with(Option::is_some)
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
            />
            <FieldError message=error/>
        </div>
    }
}

#[component]
pub fn TextAreaField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(default = 4)] rows: u32,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <textarea
                rows=rows
                class:invalid=move || error.with(Option::is_some)
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
            />
            <FieldError message=error/>
        </div>
    }
}

/// Editable list of strings, one input per entry
#[component]
pub fn StringListField(
    label: &'static str,
    #[prop(into)] values: Signal<Vec<String>>,
    #[prop(into)] on_change: Callback<Vec<String>>,
) -> impl IntoView {
    let set_entry = move |index: usize, text: String| {
        let mut entries = values.get_untracked();
        if let Some(entry) = entries.get_mut(index) {
            *entry = text;
        }
        on_change.call(entries);
    };

    let remove_entry = move |index: usize| {
        let mut entries = values.get_untracked();
        if index < entries.len() {
            entries.remove(index);
        }
        on_change.call(entries);
    };

    let add_entry = move |_| {
        let mut entries = values.get_untracked();
        entries.push(String::new());
        on_change.call(entries);
    };

    view! {
        <div class="form-group">
            <label>{label}</label>
            // Keyed by position so typing does not rebuild the input
            <For
                each=move || 0..values.with(Vec::len)
                key=|index| *index
                children=move |index| view! {
                    <div class="list-entry">
                        <input
                            type="text"
                            prop:value=move || {
                                values.with(|entries| entries.get(index).cloned().unwrap_or_default())
                            }
                            on:input=move |ev| set_entry(index, event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="btn btn-ghost btn-sm"
                            on:click=move |_| remove_entry(index)
                        >
                            "✕"
                        </button>
                    </div>
                }
            />
            <button type="button" class="btn btn-secondary btn-sm" on:click=add_entry>
                "Добавить"
            </button>
        </div>
    }
}

/// Checkbox list over options loaded from another entity
#[component]
pub fn MultiSelect(
    label: &'static str,
    #[prop(into)] options: Signal<Vec<SelectOption>>,
    #[prop(into)] selected: Signal<Vec<String>>,
    #[prop(into)] on_change: Callback<Vec<String>>,
) -> impl IntoView {
    let toggle = move |value: String, checked: bool| {
        let mut current = selected.get_untracked();
        current.retain(|existing| existing != &value);
        if checked {
            current.push(value);
        }
        on_change.call(current);
    };

    view! {
        <div class="form-group">
            <label>{label}</label>
            <div class="multi-select">
                <For
                    each=move || options.get()
                    key=|option| option.value.clone()
                    children=move |option| {
                        let value = option.value.clone();
                        let is_checked = {
                            let value = value.clone();
                            move || selected.with(|current| current.contains(&value))
                        };
                        view! {
                            <label class="multi-select-option">
                                <input
                                    type="checkbox"
                                    prop:checked=is_checked
                                    on:change=move |ev| toggle(value.clone(), event_target_checked(&ev))
                                />
                                {option.label}
                            </label>
                        }
                    }
                />
            </div>
        </div>
    }
}

/// Single file picker; the bytes are read before the callback fires
#[component]
pub fn FileField(
    label: &'static str,
    #[prop(default = "image/*")] accept: &'static str,
    #[prop(into)] on_select: Callback<Option<FileUpload>>,
    #[prop(into)] error: Signal<Option<String>>,
    /// URL of the file already stored on the server
    #[prop(optional, into)]
    current: Option<Signal<Option<String>>>,
) -> impl IntoView {
    let (file_name, set_file_name) = create_signal(None::<String>);

    let on_change = move |ev: ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            set_file_name.set(None);
            on_select.call(None);
            return;
        };

        spawn_local(async move {
            match read_file(file).await {
                Ok(upload) => {
                    set_file_name.set(Some(upload.file_name.clone()));
                    on_select.call(Some(upload));
                }
                Err(error) => logging::error!("failed to read selected file: {:?}", error),
            }
        });
    };

    view! {
        <div class="form-group">
            <label>{label}</label>
            {current.map(|current| move || {
                current.get().map(|src| view! { <img class="file-preview" src=src alt=label/> })
            })}
            <input type="file" accept=accept on:change=on_change/>
            {move || file_name.get().map(|name| view! { <span class="file-name">{name}</span> })}
            <FieldError message=error/>
        </div>
    }
}

async fn read_file(file: web_sys::File) -> Result<FileUpload, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime_type = file.type_();

    Ok(if mime_type.is_empty() {
        FileUpload::from_bytes(file.name(), bytes)
    } else {
        FileUpload::new(file.name(), mime_type, bytes)
    })
}
