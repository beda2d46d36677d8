///! Entity tables and their row actions

use crate::api;
use crate::query::use_query_client;
use crate::toast::use_toasts;
use catalog_common::columns::{Cell, TableModel};
use catalog_common::routes::edit_path;
use catalog_common::{EntityId, EntityKind};
use leptos::*;
use leptos_router::*;

#[component]
pub fn DataTable(kind: EntityKind, model: TableModel) -> impl IntoView {
    let TableModel { headers, rows } = model;

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    {headers.into_iter().map(|header| view! { <th>{header}</th> }).collect_view()}
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| view! {
                        <tr>
                            {row
                                .into_iter()
                                .map(|cell| view! { <td>{render_cell(kind, cell)}</td> })
                                .collect_view()}
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

fn render_cell(kind: EntityKind, cell: Cell) -> View {
    match cell {
        Cell::Text(text) => text.into_view(),
        Cell::Badge(text) => view! { <span class="badge">{text}</span> }.into_view(),
        Cell::Empty => view! { <span class="muted">"—"</span> }.into_view(),
        Cell::Actions(id) => view! { <ActionsCell kind id/> }.into_view(),
    }
}

/// Row menu: edit link plus delete
#[component]
pub fn ActionsCell(kind: EntityKind, id: EntityId) -> impl IntoView {
    let query = use_query_client();
    let toasts = use_toasts();
    let (open, set_open) = create_signal(false);
    let (deleting, set_deleting) = create_signal(false);

    let delete = move |_| {
        set_open.set(false);
        set_deleting.set(true);
        spawn_local(async move {
            match api::delete_entity(kind, id).await {
                Ok(()) => {
                    toasts.success(format!("{} successfully deleted", kind.singular()));
                    query.invalidate(kind);
                }
                Err(error) => toasts.client_error(&error),
            }
            set_deleting.set(false);
        });
    };

    view! {
        <div class="row-actions">
            <button
                class="btn btn-ghost btn-sm"
                disabled=move || deleting.get()
                on:click=move |_| set_open.update(|open| *open = !*open)
            >
                "⋯"
            </button>
            <Show when=move || open.get()>
                <div class="row-actions-menu">
                    <A href=edit_path(kind, id) class="row-actions-item">
                        "Изменить"
                    </A>
                    <button class="row-actions-item danger" on:click=delete>
                        "Удалить"
                    </button>
                </div>
            </Show>
        </div>
    }
}
