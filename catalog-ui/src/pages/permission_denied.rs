use catalog_common::routes::paths;
use leptos::*;
use leptos_router::*;

#[component]
pub fn PermissionDeniedPage() -> impl IntoView {
    view! {
        <div class="empty-state">
            <div class="empty-state-icon">"🚫"</div>
            <h3>"Доступ запрещён"</h3>
            <p>"У вас нет прав для просмотра этой страницы."</p>
            <A href=paths::LOGIN class="btn btn-primary">"Войти под другой учётной записью"</A>
        </div>
    }
}
