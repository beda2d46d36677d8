///! User-friendly error handling for the UI
///!
///! Turns client failures into display text and provides the shared
///! loading, empty and field error components

use catalog_client::ClientError;
use leptos::*;

/// What a failed read or write looks like to the page
#[derive(Clone, Debug, PartialEq)]
pub struct LoadFailure {
    /// HTTP status, `None` when the request never got an answer
    pub status: Option<u16>,
    pub message: String,
}

impl LoadFailure {
    pub fn from_client(error: &ClientError) -> Self {
        let status = match error {
            ClientError::MissingToken => Some(401),
            _ => error.status(),
        };
        Self {
            status,
            message: error
                .notification()
                .unwrap_or_else(|| "Unexpected response from the server".to_string()),
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self.status {
            Some(401) => "Your session has expired. Please log in again.".to_string(),
            Some(403) => "You don't have permission to perform this action.".to_string(),
            Some(404) => "The requested record was not found.".to_string(),
            Some(500..=599) => {
                "The server failed to handle the request. Please try again later.".to_string()
            }
            None => format!("Could not reach the server: {}", self.message),
            _ => self.message.clone(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.status {
            Some(400..=499) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.status {
            Some(401) => "🔐",
            Some(403) => "🚫",
            Some(404) => "🔍",
            None => "🔌",
            _ => "❌",
        }
    }

    /// Transport failures and server errors are worth a second attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self.status, None | Some(500..=599))
    }
}

impl From<&ClientError> for LoadFailure {
    fn from(error: &ClientError) -> Self {
        Self::from_client(error)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorSeverity {
    Warning,
    Error,
}

impl ErrorSeverity {
    pub fn class(&self) -> &'static str {
        match self {
            ErrorSeverity::Warning => "alert-warning",
            ErrorSeverity::Error => "alert-error",
        }
    }
}

/// Inline error message for form fields
#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|message| {
            view! {
                <div class="field-error">
                    <span class="field-error-icon">"⚠️"</span>
                    <span class="field-error-message">{message}</span>
                </div>
            }
        })
    }
}

/// Loading error state component
#[component]
pub fn LoadingError(
    failure: LoadFailure,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    let message = failure.user_message();
    let icon = failure.icon();
    let class = format!("loading-error {}", failure.severity().class());
    let on_retry = on_retry.filter(|_| failure.is_retryable());

    view! {
        <div class=class>
            <div class="loading-error-icon">{icon}</div>
            <h3>"Failed to Load"</h3>
            <p>{message}</p>
            {on_retry.map(|on_retry| view! {
                <button
                    class="btn btn-primary"
                    on:click=move |_| on_retry.call(())
                >
                    "Try Again"
                </button>
            })}
        </div>
    }
}

/// Empty state component (when no data available)
#[component]
pub fn EmptyState(
    #[prop(default = "📦")] icon: &'static str,
    #[prop(into)] title: String,
    #[prop(into)] description: String,
) -> impl IntoView {
    view! {
        <div class="empty-state">
            <div class="empty-state-icon">{icon}</div>
            <h3>{title}</h3>
            <p>{description}</p>
        </div>
    }
}
