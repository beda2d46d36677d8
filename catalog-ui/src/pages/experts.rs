use super::{list_page, use_id_param, FormMode, FormState};
use crate::api;
use crate::components::{FileField, MultiSelect, NumberField, PageHeader, StringListField, TextField};
use crate::error::LoadingError;
use crate::query::{use_detail, use_list};
use catalog_common::columns::expert_columns;
use catalog_common::forms::ExpertForm;
use catalog_common::routes::list_path;
use catalog_common::{EntityKind, Expert, SelectOption, Service};
use leptos::*;
use leptos_router::*;

#[component]
pub fn ExpertsPage() -> impl IntoView {
    list_page::<Expert>(expert_columns)
}

#[component]
pub fn ExpertCreatePage() -> impl IntoView {
    view! { <ExpertEditor mode=FormMode::Create initial=ExpertForm::default()/> }
}

#[component]
pub fn ExpertEditPage() -> impl IntoView {
    let expert = use_detail::<Expert>(use_id_param());

    view! {
        <Suspense fallback=move || view! { <p class="loading">"Loading expert..."</p> }>
            {move || expert.get().map(|result| match result {
                Ok(expert) => view! {
                    <ExpertEditor
                        mode=FormMode::Edit(expert.id)
                        initial=ExpertForm::from(&expert)
                        photo=expert.photo.clone()
                    />
                }
                .into_view(),
                Err(failure) => view! { <LoadingError failure/> }.into_view(),
            })}
        </Suspense>
    }
}

#[component]
fn ExpertEditor(
    mode: FormMode,
    initial: ExpertForm,
    /// Stored photo filename, shown as a preview
    #[prop(optional_no_strip)]
    photo: Option<String>,
) -> impl IntoView {
    let state = FormState::new(initial);
    let navigate = use_navigate();

    let services = use_list::<Service>();
    let service_options = Signal::derive(move || {
        services
            .get()
            .and_then(Result::ok)
            .map(|rows| SelectOption::from_entities(&rows))
            .unwrap_or_default()
    });
    let current_photo = photo.map(|filename| api::client().asset_url(&filename));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(submission) = state.validate(ExpertForm::validate) else {
            return;
        };

        let body = match mode {
            FormMode::Create => Ok(submission.into_create_body()),
            FormMode::Edit(_) => submission.into_update_body(),
        };
        let body = match body {
            Ok(body) => body,
            Err(error) => {
                state.fail(format!("Failed to encode expert: {}", error));
                return;
            }
        };

        state.pending.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let experts = api::client().experts();
            let result = match mode {
                FormMode::Create => experts.create(body).await,
                FormMode::Edit(id) => experts.update(id, body).await,
            };
            state.finish(result, mode, navigate);
        });
    };

    let title = match mode {
        FormMode::Create => "Новый эксперт",
        FormMode::Edit(_) => "Редактирование эксперта",
    };

    view! {
        <div class="form-page">
            <PageHeader title=title/>
            <form class="entity-form" on:submit=on_submit>
                <TextField
                    label="Имя"
                    value=state.field(|form| &form.first_name)
                    on_input=state.setter(|form, value| form.first_name = value)
                    error=state.error("firstName")
                />
                <TextField
                    label="Фамилия"
                    value=state.field(|form| &form.last_name)
                    on_input=state.setter(|form, value| form.last_name = value)
                    error=state.error("lastName")
                />
                <TextField
                    label="Отчество"
                    value=state.field(|form| &form.middle_name)
                    on_input=state.setter(|form, value| form.middle_name = value)
                    error=state.error("middleName")
                />
                <TextField
                    label="Slug"
                    value=state.field(|form| &form.slug)
                    on_input=state.setter(|form, value| form.slug = value)
                    error=state.error("slug")
                />
                <NumberField
                    label="Опыт (лет)"
                    value=state.field(|form| &form.experience_in_years)
                    on_input=state.setter(|form, value| form.experience_in_years = value)
                    error=state.error("experienceInYears")
                />
                <NumberField
                    label="Ранг"
                    value=state.field(|form| &form.rank)
                    on_input=state.setter(|form, value| form.rank = value)
                    error=state.error("rank")
                />
                <FileField
                    label="Фото"
                    on_select=state.setter(|form, photo| form.photo = photo)
                    error=state.error("photo")
                    current=Signal::derive(move || current_photo.clone())
                />
                <StringListField
                    label="Теги"
                    values=state.field(|form| &form.tags)
                    on_change=state.setter(|form, tags| form.tags = tags)
                />
                <StringListField
                    label="Специализации"
                    values=state.field(|form| &form.specializations)
                    on_change=state.setter(|form, specializations| form.specializations = specializations)
                />
                <MultiSelect
                    label="Услуги"
                    options=service_options
                    selected=state.field(|form| &form.services)
                    on_change=state.setter(|form, services| form.services = services)
                />
                <div class="form-actions">
                    <A href=list_path(EntityKind::Expert) class="btn btn-secondary">
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
