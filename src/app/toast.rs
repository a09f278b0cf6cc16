use leptos::prelude::*;

use crate::notify::{ToastKind, ToastPhase, ToastQueue, TOAST_ENTER, TOAST_LEAVE, TOAST_VISIBLE};

/// Handle for one section's toasts. Each section owns its own and renders
/// it with [`ToastHost`].
#[derive(Clone, Copy)]
pub struct Notifier {
    queue: RwSignal<ToastQueue>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    pub fn notify(&self, message: impl Into<String>, kind: ToastKind) {
        let message = message.into();
        log::debug!("toast: {message}");
        let queue = self.queue;
        let Some(id) = queue.try_update(|q| q.push(message, kind)) else {
            return;
        };

        set_timeout(move || queue.update(|q| q.advance(id, ToastPhase::Shown)), TOAST_ENTER);
        set_timeout(
            move || {
                queue.update(|q| q.advance(id, ToastPhase::Leaving));
                set_timeout(move || queue.update(|q| q.remove(id)), TOAST_LEAVE);
            },
            TOAST_ENTER + TOAST_VISIBLE,
        );
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ToastHost(notifier: Notifier) -> impl IntoView {
    view! {
        <div class="toast-stack" aria-live="polite">
            {move || {
                notifier
                    .queue
                    .with(|q| {
                        q.toasts()
                            .iter()
                            .map(|toast| {
                                view! {
                                    <div class=toast.class_attr() role="status">
                                        {toast.message.clone()}
                                    </div>
                                }
                            })
                            .collect_view()
                    })
            }}
        </div>
    }
}
