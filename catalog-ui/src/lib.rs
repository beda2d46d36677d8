///! Catalog admin dashboard
///!
///! Client-side rendered Leptos app for managing experts, services and prices

pub mod api;
pub mod components;
pub mod error;
pub mod pages;
pub mod query;
pub mod toast;

use api::{use_session, Session};
use catalog_common::routes::{self, paths};
use catalog_common::EntityKind;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use pages::experts::{ExpertCreatePage, ExpertEditPage, ExpertsPage};
use pages::login::LoginPage;
use pages::permission_denied::PermissionDeniedPage;
use pages::prices::{PriceCreatePage, PriceEditPage, PricesPage};
use pages::services::{ServiceCreatePage, ServiceEditPage, ServicesPage};
use query::QueryClient;
use toast::{ToastHost, Toasts};
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    Session::provide();
    QueryClient::provide();
    Toasts::provide();

    view! {
        <Stylesheet id="leptos" href="/pkg/catalog-ui.css"/>
        <Title text="Catalog Admin"/>
        <Router>
            <NavBar/>
            <main class="main-content">
                <Routes>
                    <Route path=paths::HOME view=|| view! { <Redirect path=paths::EXPERTS/> }/>
                    <Route path=paths::LOGIN view=LoginPage/>
                    <Route path=paths::PERMISSION_DENIED view=PermissionDeniedPage/>

                    <Route path=paths::EXPERTS view=|| view! { <RequireSession><ExpertsPage/></RequireSession> }/>
                    <Route path="/experts/create" view=|| view! { <RequireSession><ExpertCreatePage/></RequireSession> }/>
                    <Route path="/experts/edit/:id" view=|| view! { <RequireSession><ExpertEditPage/></RequireSession> }/>

                    <Route path=paths::SERVICES view=|| view! { <RequireSession><ServicesPage/></RequireSession> }/>
                    <Route path="/services/create" view=|| view! { <RequireSession><ServiceCreatePage/></RequireSession> }/>
                    <Route path="/services/edit/:id" view=|| view! { <RequireSession><ServiceEditPage/></RequireSession> }/>

                    <Route path=paths::PRICES view=|| view! { <RequireSession><PricesPage/></RequireSession> }/>
                    <Route path="/prices/create" view=|| view! { <RequireSession><PriceCreatePage/></RequireSession> }/>
                    <Route path="/prices/edit/:id" view=|| view! { <RequireSession><PriceEditPage/></RequireSession> }/>
                </Routes>
            </main>
            <ToastHost/>
        </Router>
    }
}

#[component]
fn NavBar() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let logout = move |_| {
        session.sign_out();
        navigate(paths::LOGIN, NavigateOptions::default());
    };

    view! {
        <nav class="top-nav">
            <div class="nav-brand">
                <h2>"Каталог"</h2>
            </div>
            <div class="nav-links">
                {EntityKind::ALL
                    .iter()
                    .map(|kind| view! {
                        <A href=routes::list_path(*kind) class="nav-link">{kind.title()}</A>
                    })
                    .collect_view()}
            </div>
            <div class="nav-actions">
                <Show
                    when=move || session.is_authenticated()
                    fallback=|| view! { <A href=paths::LOGIN class="nav-link">"Войти"</A> }
                >
                    <button class="btn btn-ghost" on:click=logout.clone()>"Выйти"</button>
                </Show>
            </div>
        </nav>
    }
}

/// Sends anonymous visitors of private pages to the login screen
#[component]
fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let location = use_location();

    move || {
        let path = location.pathname.get();
        match routes::guard(&path, session.is_authenticated()) {
            Some(target) => view! { <Redirect path=target/> }.into_view(),
            None => children().into_view(),
        }
    }
}
