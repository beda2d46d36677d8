pub mod experts;
pub mod login;
pub mod permission_denied;
pub mod prices;
pub mod services;

use crate::api::EntityApi;
use crate::components::{DataTable, PageHeader};
use crate::error::{EmptyState, LoadingError};
use crate::query::{use_list, use_query_client, QueryClient};
use crate::toast::{use_toasts, Toasts};
use catalog_common::columns::{Column, TableModel};
use catalog_common::routes::list_path;
use catalog_common::validation::FormErrors;
use catalog_common::{Entity, EntityId};
use leptos::*;
use leptos_router::NavigateOptions;

/// Whether a form page creates a record or edits an existing one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

/// Raw form values, field errors and submit state for one form page
pub struct FormState<F: 'static> {
    pub form: RwSignal<F>,
    pub errors: RwSignal<FormErrors>,
    pub pending: RwSignal<bool>,
    query: QueryClient,
    toasts: Toasts,
}

impl<F: 'static> Clone for FormState<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: 'static> Copy for FormState<F> {}

impl<F: 'static> FormState<F> {
    pub fn new(initial: F) -> Self {
        Self::with_handles(initial, use_query_client(), use_toasts())
    }

    pub fn with_handles(initial: F, query: QueryClient, toasts: Toasts) -> Self {
        Self {
            form: create_rw_signal(initial),
            errors: create_rw_signal(FormErrors::new()),
            pending: create_rw_signal(false),
            query,
            toasts,
        }
    }

    pub fn field<T: Clone + 'static>(&self, get: fn(&F) -> &T) -> Signal<T> {
        let form = self.form;
        Signal::derive(move || form.with(|form| get(form).clone()))
    }

    pub fn setter<T: 'static>(&self, set: fn(&mut F, T)) -> Callback<T> {
        let form = self.form;
        Callback::new(move |value: T| form.update(|form| set(form, value)))
    }

    pub fn error(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|errors| errors.message(field)))
    }

    /// Runs the check, keeping its field errors on screen when it fails
    pub fn validate<S>(&self, check: impl FnOnce(&F) -> Result<S, FormErrors>) -> Option<S> {
        match self.form.with_untracked(check) {
            Ok(submission) => {
                self.errors.set(FormErrors::new());
                Some(submission)
            }
            Err(errors) => {
                self.errors.set(errors);
                None
            }
        }
    }

    pub fn fail(&self, message: impl Into<String>) {
        self.toasts.error(message);
        self.pending.set(false);
    }

    /// Success: toast, refresh the cache and go back to the list.
    /// Failure: toast and stay on the page with the values intact.
    pub fn finish<E: Entity>(
        &self,
        result: catalog_client::Result<E>,
        mode: FormMode,
        navigate: impl Fn(&str, NavigateOptions),
    ) {
        self.pending.set(false);
        match result {
            Ok(record) => {
                let verb = match mode {
                    FormMode::Create => "created",
                    FormMode::Edit(_) => "updated",
                };
                self.toasts
                    .success(format!("{} successfully {}", E::KIND.singular(), verb));
                self.query.after_save(&record);
                navigate(list_path(E::KIND), NavigateOptions::default());
            }
            Err(error) => self.toasts.client_error(&error),
        }
    }
}

/// Title plus table of every record of one kind
pub fn list_page<E: EntityApi>(columns: fn() -> Vec<Column<E>>) -> impl IntoView {
    let records = use_list::<E>();

    view! {
        <div class="list-page">
            <PageHeader title=E::KIND.title() kind=E::KIND/>
            <Transition fallback=move || view! { <p class="loading">"Loading..."</p> }>
                {move || records.get().map(|result| match result {
                    Ok(rows) if rows.is_empty() => view! {
                        <EmptyState title="Nothing here yet" description="Create the first record to see it listed"/>
                    }
                    .into_view(),
                    Ok(rows) => {
                        let model = TableModel::new(&columns(), &rows);
                        view! { <DataTable kind=E::KIND model/> }.into_view()
                    }
                    Err(failure) => view! {
                        <LoadingError failure on_retry=Callback::new(move |_| records.refetch())/>
                    }
                    .into_view(),
                })}
            </Transition>
        </div>
    }
}

/// Parses the `:id` route parameter
pub fn use_id_param() -> impl Fn() -> Option<EntityId> + Copy + 'static {
    let params = leptos_router::use_params_map();
    move || params.with(|params| params.get("id").and_then(|id| id.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastLevel;
    use catalog_client::ClientError;
    use catalog_common::forms::PriceForm;
    use catalog_common::query::QueryKey;
    use catalog_common::{EntityKind, Price};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Visits = Rc<RefCell<Vec<String>>>;

    fn recording_navigate() -> (Visits, impl Fn(&str, NavigateOptions)) {
        let visits: Visits = Rc::default();
        let log = Rc::clone(&visits);
        let navigate = move |path: &str, _: NavigateOptions| log.borrow_mut().push(path.to_string());
        (visits, navigate)
    }

    fn price_form_state() -> (FormState<PriceForm>, QueryClient, Toasts) {
        let query = QueryClient::new();
        let toasts = Toasts::new();
        let state = FormState::with_handles(PriceForm::default(), query, toasts);
        state.pending.set(true);
        (state, query, toasts)
    }

    #[test]
    fn test_rejected_create_stays_on_page() {
        let runtime = create_runtime();
        let (state, query, toasts) = price_form_state();
        let (visits, navigate) = recording_navigate();

        let rejected: catalog_client::Result<Price> = Err(ClientError::Api {
            status: 422,
            message: "name must be unique".to_string(),
        });
        state.finish(rejected, FormMode::Create, navigate);

        assert!(visits.borrow().is_empty());
        assert!(!state.pending.get_untracked());
        assert_eq!(query.generation(EntityKind::Price), 0);

        let shown = toasts.current();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].level, ToastLevel::Error);
        assert_eq!(shown[0].message, "name must be unique");

        runtime.dispose();
    }

    #[test]
    fn test_saved_update_refreshes_cache_and_returns_to_list() {
        let runtime = create_runtime();
        let (state, query, toasts) = price_form_state();
        let (visits, navigate) = recording_navigate();

        let price = Price {
            id: 3,
            name: "Session".to_string(),
            price: 2500.0,
            old_price: None,
        };
        state.finish(Ok(price.clone()), FormMode::Edit(3), navigate);

        assert_eq!(*visits.borrow(), vec![list_path(EntityKind::Price).to_string()]);
        assert!(!state.pending.get_untracked());
        assert_eq!(query.generation(EntityKind::Price), 1);
        assert_eq!(
            query.cached::<Price>(&QueryKey::Detail(EntityKind::Price, 3)),
            Some(price)
        );

        let shown = toasts.current();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].level, ToastLevel::Success);
        assert_eq!(shown[0].message, "Price successfully updated");

        runtime.dispose();
    }

    #[test]
    fn test_undecodable_response_is_only_logged() {
        let runtime = create_runtime();
        let (state, _query, toasts) = price_form_state();
        let (visits, navigate) = recording_navigate();

        let garbled = serde_json::from_str::<Price>("{").map_err(ClientError::from);
        state.finish(garbled, FormMode::Create, navigate);

        assert!(visits.borrow().is_empty());
        assert!(toasts.current().is_empty());

        runtime.dispose();
    }
}
