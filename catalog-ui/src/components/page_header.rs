use catalog_common::routes::create_path;
use catalog_common::EntityKind;
use leptos::*;
use leptos_router::*;

#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    /// Shows the "create" button for this kind
    #[prop(optional)]
    kind: Option<EntityKind>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <h1>{title}</h1>
            {kind.map(|kind| view! {
                <A href=create_path(kind) class="btn btn-primary">
                    "Создать"
                </A>
            })}
        </div>
    }
}
