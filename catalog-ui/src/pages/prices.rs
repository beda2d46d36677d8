use super::{list_page, use_id_param, FormMode, FormState};
use crate::api;
use crate::components::{NumberField, PageHeader, TextField};
use crate::error::LoadingError;
use crate::query::use_detail;
use catalog_common::columns::price_columns;
use catalog_common::forms::PriceForm;
use catalog_common::routes::list_path;
use catalog_common::{EntityKind, Price};
use leptos::*;
use leptos_router::*;

#[component]
pub fn PricesPage() -> impl IntoView {
    list_page::<Price>(price_columns)
}

#[component]
pub fn PriceCreatePage() -> impl IntoView {
    view! { <PriceEditor mode=FormMode::Create initial=PriceForm::default()/> }
}

#[component]
pub fn PriceEditPage() -> impl IntoView {
    let price = use_detail::<Price>(use_id_param());

    view! {
        <Suspense fallback=move || view! { <p class="loading">"Loading price..."</p> }>
            {move || price.get().map(|result| match result {
                Ok(price) => view! {
                    <PriceEditor mode=FormMode::Edit(price.id) initial=PriceForm::from(&price)/>
                }
                .into_view(),
                Err(failure) => view! { <LoadingError failure/> }.into_view(),
            })}
        </Suspense>
    }
}

#[component]
fn PriceEditor(mode: FormMode, initial: PriceForm) -> impl IntoView {
    let state = FormState::new(initial);
    let navigate = use_navigate();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(submission) = state.validate(PriceForm::validate) else {
            return;
        };
        let body = match mode {
            FormMode::Create => submission.into_body(),
            FormMode::Edit(_) => submission.into_update_body(),
        };
        let body = match body {
            Ok(body) => body,
            Err(error) => {
                state.fail(format!("Failed to encode price: {}", error));
                return;
            }
        };

        state.pending.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let prices = api::client().prices();
            let result = match mode {
                FormMode::Create => prices.create(body).await,
                FormMode::Edit(id) => prices.update(id, body).await,
            };
            state.finish(result, mode, navigate);
        });
    };

    let title = match mode {
        FormMode::Create => "Новая цена",
        FormMode::Edit(_) => "Редактирование цены",
    };

    view! {
        <div class="form-page">
            <PageHeader title=title/>
            <form class="entity-form" on:submit=on_submit>
                <TextField
                    label="Название"
                    value=state.field(|form| &form.name)
                    on_input=state.setter(|form, value| form.name = value)
                    error=state.error("name")
                />
                <NumberField
                    label="Цена"
                    value=state.field(|form| &form.price)
                    on_input=state.setter(|form, value| form.price = value)
                    error=state.error("price")
                />
                <NumberField
                    label="Старая цена"
                    value=state.field(|form| &form.old_price)
                    on_input=state.setter(|form, value| form.old_price = value)
                    error=state.error("oldPrice")
                />
                <div class="form-actions">
                    <A href=list_path(EntityKind::Price) class="btn btn-secondary">
                        "Отмена"
                    </A>
                    <button type="submit" class="btn btn-primary" disabled=move || state.pending.get()>
                        {move || if state.pending.get() { "Сохранение..." } else { "Сохранить" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
