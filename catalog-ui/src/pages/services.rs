use super::{list_page, use_id_param, FormMode, FormState};
use crate::api;
use crate::components::{FileField, MultiSelect, PageHeader, TextAreaField, TextField};
use crate::error::LoadingError;
use crate::query::{use_detail, use_list};
use catalog_common::columns::service_columns;
use catalog_common::forms::ServiceForm;
use catalog_common::routes::list_path;
use catalog_common::{EntityKind, Expert, Price, SelectOption, Service};
use leptos::*;
use leptos_router::*;

#[component]
pub fn ServicesPage() -> impl IntoView {
    list_page::<Service>(service_columns)
}

#[component]
pub fn ServiceCreatePage() -> impl IntoView {
    view! { <ServiceEditor mode=FormMode::Create initial=ServiceForm::default()/> }
}

#[component]
pub fn ServiceEditPage() -> impl IntoView {
    let service = use_detail::<Service>(use_id_param());

    view! {
        <Suspense fallback=move || view! { <p class="loading">"Loading service..."</p> }>
            {move || service.get().map(|result| match result {
                Ok(service) => view! {
                    <ServiceEditor mode=FormMode::Edit(service.id) initial=ServiceForm::from(&service)/>
                }
                .into_view(),
                Err(failure) => view! { <LoadingError failure/> }.into_view(),
            })}
        </Suspense>
    }
}

/// Creation also takes images, prices and specialists; edits only the texts
#[component]
fn ServiceEditor(mode: FormMode, initial: ServiceForm) -> impl IntoView {
    let state = FormState::new(initial);
    let navigate = use_navigate();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let body = match mode {
            FormMode::Create => state
                .validate(ServiceForm::validate_create)
                .map(|submission| Ok(submission.into_body())),
            FormMode::Edit(_) => state
                .validate(ServiceForm::validate_update)
                .map(|submission| submission.into_body()),
        };
        let body = match body {
            Some(Ok(body)) => body,
            Some(Err(error)) => {
                state.fail(format!("Failed to encode service: {}", error));
                return;
            }
            None => return,
        };

        state.pending.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let services = api::client().services();
            let result = match mode {
                FormMode::Create => services.create(body).await,
                FormMode::Edit(id) => services.update(id, body).await,
            };
            state.finish(result, mode, navigate);
        });
    };

    let title = match mode {
        FormMode::Create => "Новая услуга",
        FormMode::Edit(_) => "Редактирование услуги",
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
                <TextField
                    label="Slug"
                    value=state.field(|form| &form.slug)
                    on_input=state.setter(|form, value| form.slug = value)
                    error=state.error("slug")
                />
                <TextAreaField
                    label="Краткое описание"
                    rows=2
                    value=state.field(|form| &form.short_description)
                    on_input=state.setter(|form, value| form.short_description = value)
                    error=state.error("shortDescription")
                />
                <TextAreaField
                    label="Полное описание"
                    rows=8
                    value=state.field(|form| &form.long_description)
                    on_input=state.setter(|form, value| form.long_description = value)
                    error=state.error("longDescription")
                />
                {(mode == FormMode::Create).then(|| view! { <ServiceCreateExtras state/> })}
                <div class="form-actions">
                    <A href=list_path(EntityKind::Service) class="btn btn-secondary">
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

#[component]
fn ServiceCreateExtras(state: FormState<ServiceForm>) -> impl IntoView {
    let prices = use_list::<Price>();
    let experts = use_list::<Expert>();

    let price_options = Signal::derive(move || {
        prices
            .get()
            .and_then(Result::ok)
            .map(|rows| SelectOption::from_entities(&rows))
            .unwrap_or_default()
    });
    let expert_options = Signal::derive(move || {
        experts
            .get()
            .and_then(Result::ok)
            .map(|rows| SelectOption::from_entities(&rows))
            .unwrap_or_default()
    });

    view! {
        <TextField
            label="Текст баннера"
            value=state.field(|form| &form.banner_text)
            on_input=state.setter(|form, value| form.banner_text = value)
            error=state.error("bannerText")
        />
        <FileField
            label="Иконка"
            on_select=state.setter(|form, icon| form.icon = icon)
            error=state.error("icon")
        />
        <FileField
            label="Изображение баннера"
            on_select=state.setter(|form, image| form.banner_image = image)
            error=state.error("bannerImage")
        />
        <MultiSelect
            label="Цены"
            options=price_options
            selected=state.field(|form| &form.prices)
            on_change=state.setter(|form, prices| form.prices = prices)
        />
        <MultiSelect
            label="Специалисты"
            options=expert_options
            selected=state.field(|form| &form.specialists)
            on_change=state.setter(|form, specialists| form.specialists = specialists)
        />
    }
}
