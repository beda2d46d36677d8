use crate::api::{self, use_session};
use crate::toast::use_toasts;
use catalog_common::routes::paths;
use leptos::*;
use leptos_router::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (pending, set_pending) = create_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_pending.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api::client()
                .login(&email.get_untracked(), &password.get_untracked())
                .await;
            set_pending.set(false);

            match result {
                Ok(token) => {
                    session.sign_in(token);
                    navigate(paths::EXPERTS, NavigateOptions::default());
                }
                Err(error) => toasts.client_error(&error),
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Вход"</h1>
                <p class="tagline">"Панель управления каталогом"</p>

                <form on:submit=submit>
                    <div class="form-group">
                        <label>"Email"</label>
                        <input
                            type="email"
                            required
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            prop:value=email
                        />
                    </div>

                    <div class="form-group">
                        <label>"Пароль"</label>
                        <input
                            type="password"
                            required
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                        />
                    </div>

                    <button type="submit" class="btn btn-primary btn-block" disabled=pending>
                        "Войти"
                    </button>
                </form>
            </div>
        </div>
    }
}
