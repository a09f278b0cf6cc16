use std::collections::BTreeMap;
use std::time::Duration;

use leptos::{ev, html, prelude::*};
use leptos_use::{use_event_listener, use_window};

use super::hooks::{use_reveal, use_stagger};
use super::toast::{Notifier, ToastHost};
use crate::content::profile;
use crate::forms::{
    ContactForm, Field, FieldError, FormStatus, QuickMessage, SimulatedSubmission, StatusSlot,
    STATUS_TIMEOUT,
};
use crate::motion::StaggerPlan;
use crate::notify::ToastKind;
use crate::reveal::{Entrance, RevealOptions, Transition};

const REVEAL: RevealOptions = RevealOptions::new(0.2, "0px 0px -50px 0px");
const SECTION_ENTRANCE: Transition = Transition::new(Entrance::Class, Duration::from_millis(600));
const INFO_STAGGER: StaggerPlan = StaggerPlan::new(Duration::from_millis(200));
const INFO_ENTRANCE: Transition =
    Transition::new(Entrance::SlideX(-30), Duration::from_millis(600));
const HANDOFF_DELAY: Duration = Duration::from_millis(1000);

#[component]
pub fn Contact() -> impl IntoView {
    let profile = profile();
    let section_ref = NodeRef::<html::Section>::new();
    let revealed = use_reveal(section_ref, REVEAL);
    let notifier = Notifier::new();
    let quick_open = RwSignal::new(false);

    let info = [
        ("✉", "Email", profile.email.clone()),
        ("☎", "Phone", profile.phone.clone()),
        ("⌖", "Location", profile.location.clone()),
    ];
    let info_states = use_stagger(info.len(), INFO_STAGGER, revealed);
    let info_items = info
        .into_iter()
        .zip(info_states)
        .map(|((icon, label, value), state)| {
            view! {
                <div
                    class="info-item"
                    style=move || INFO_ENTRANCE.presentation(state.get()).style_attr()
                >
                    <span class="info-icon">{icon}</span>
                    <div>
                        <h4>{label}</h4>
                        <p>{value}</p>
                    </div>
                </div>
            }
        })
        .collect_view();

    let location = profile.location.clone();
    let open_map = move |_| {
        notifier.notify("Opening location in maps...", ToastKind::Success);
        let location = location.clone();
        set_timeout(move || log::info!("opening maps for {location}"), HANDOFF_DELAY);
    };
    let open_calendar = move |_| {
        notifier.notify("Redirecting to booking system...", ToastKind::Success);
        set_timeout(|| log::info!("opening calendar booking"), HANDOFF_DELAY);
    };

    view! {
        <section
            id="contact"
            node_ref=section_ref
            class=move || {
                format!("contact {}", SECTION_ENTRANCE.presentation(revealed.get()).class_attr())
            }
        >
            <h2 class="section-title">"Get In Touch"</h2>
            <div class="contact-content">
                <div class="contact-info">
                    {info_items}
                    <div class="contact-actions">
                        <button class="contact-btn location-btn" on:click=open_map>
                            "View on Map"
                        </button>
                        <button class="contact-btn calendar-btn" on:click=open_calendar>
                            "Book a Call"
                        </button>
                        <button class="contact-btn" on:click=move |_| quick_open.set(true)>
                            "Quick Message"
                        </button>
                    </div>
                </div>
                <ContactFormView />
            </div>
            <QuickContactModal open=quick_open notifier=notifier />
            <ToastHost notifier=notifier />
        </section>
    }
}

#[component]
fn ContactFormView() -> impl IntoView {
    let form = RwSignal::new(ContactForm::default());
    let errors = RwSignal::new(BTreeMap::<Field, FieldError>::new());
    let slot = RwSignal::new(StatusSlot::default());
    let sending = move || slot.with(|s| s.status().is_sending());

    let validate_field = move |field: Field| {
        let result = form.with_untracked(|f| field.validate(f.value(field)));
        errors.update(|e| match result {
            Ok(()) => {
                e.remove(&field);
            }
            Err(err) => {
                e.insert(field, err);
            }
        });
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if slot.with_untracked(|s| s.status().is_sending()) {
            return;
        }
        let found = form.with_untracked(ContactForm::validate);
        if !found.is_empty() {
            log::debug!("contact form has {} invalid fields", found.len());
            errors.set(found);
            slot.update(|s| {
                s.show(FormStatus::invalid());
            });
            return;
        }

        errors.set(BTreeMap::new());
        slot.update(|s| {
            s.show(FormStatus::Sending);
        });
        let submission = SimulatedSubmission::CONTACT;
        set_timeout(
            move || {
                let outcome = submission.resolve(js_sys::Math::random());
                let Some(ticket) = slot.try_update(|s| s.show(FormStatus::contact(outcome)))
                else {
                    return;
                };
                match outcome {
                    Ok(()) => {
                        form.set(ContactForm::default());
                        set_timeout(
                            move || {
                                slot.update(|s| {
                                    s.expire(ticket);
                                })
                            },
                            STATUS_TIMEOUT,
                        );
                    }
                    Err(err) => log::warn!("contact submission failed: {err}"),
                }
            },
            submission.delay,
        );
    };

    view! {
        <form id="contactForm" class="contact-form" novalidate=true on:submit=on_submit>
            <FormField
                field=Field::Name
                label="Name"
                form=form
                errors=errors
                validate_field=validate_field
            />
            <FormField
                field=Field::Email
                label="Email"
                form=form
                errors=errors
                validate_field=validate_field
            />
            <FormField
                field=Field::Subject
                label="Subject"
                form=form
                errors=errors
                validate_field=validate_field
            />
            <FormField
                field=Field::Message
                label="Message"
                form=form
                errors=errors
                validate_field=validate_field
            />
            <button
                type="submit"
                class=move || if sending() { "submit-btn loading" } else { "submit-btn" }
                disabled=sending
            >
                {move || if sending() { "Sending..." } else { "Send Message" }}
            </button>
            <div
                id="formStatus"
                class=move || slot.with(|s| s.status().class_attr())
                role="status"
            >
                {move || slot.with(|s| s.status().message().map(str::to_string))}
            </div>
        </form>
    }
}

#[component]
fn FormField<V>(
    field: Field,
    label: &'static str,
    form: RwSignal<ContactForm>,
    errors: RwSignal<BTreeMap<Field, FieldError>>,
    validate_field: V,
) -> impl IntoView
where
    V: Fn(Field) + Copy + Send + Sync + 'static,
{
    let name = field.name();
    let error = move || errors.with(|e| e.get(&field).map(ToString::to_string));
    let border = move || {
        if error().is_some() {
            "border-color: #ff6b6b;"
        } else {
            "border-color: rgba(255, 255, 255, 0.3);"
        }
    };
    let value = move || form.with(|f| f.value(field).to_string());
    let on_input = move |ev: ev::Event| {
        form.update(|f| f.set(field, event_target_value(&ev)));
        errors.update(|e| {
            e.remove(&field);
        });
    };

    let input_type = if field == Field::Email { "email" } else { "text" };
    let input = if field == Field::Message {
        view! {
            <textarea
                id=name
                name=name
                rows="5"
                style=border
                prop:value=value
                on:input=on_input
                on:blur=move |_| validate_field(field)
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                id=name
                name=name
                type=input_type
                style=border
                prop:value=value
                on:input=on_input
                on:blur=move |_| validate_field(field)
            />
        }
        .into_any()
    };

    view! {
        <div class="form-group">
            <label for=name>{label}</label>
            {input}
            <span
                id=format!("{name}Error")
                class=move || if error().is_some() { "error-message show" } else { "error-message" }
            >
                {error}
            </span>
        </div>
    }
}

/// Short name/email/message form in a modal. Results are reported as toasts.
#[component]
fn QuickContactModal(open: RwSignal<bool>, notifier: Notifier) -> impl IntoView {
    let quick = RwSignal::new(QuickMessage::default());
    let sending = RwSignal::new(false);
    let close = move || open.set(false);

    let _ = use_event_listener(use_window(), ev::keydown, move |ev| {
        if ev.key() == "Escape" && open.get_untracked() {
            close();
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }
        if let Err(err) = quick.with_untracked(QuickMessage::validate) {
            notifier.notify(err.to_string(), ToastKind::Error);
            return;
        }

        sending.set(true);
        let submission = SimulatedSubmission::QUICK;
        set_timeout(
            move || {
                match submission.resolve(js_sys::Math::random()) {
                    Ok(()) => {
                        log::info!("quick message sent");
                        notifier.notify("Message sent successfully!", ToastKind::Success);
                        quick.set(QuickMessage::default());
                        close();
                    }
                    Err(err) => {
                        log::warn!("quick message failed: {err}");
                        notifier.notify(
                            "Failed to send message. Please try again.",
                            ToastKind::Error,
                        );
                    }
                }
                sending.set(false);
            },
            submission.delay,
        );
    };

    view! {
        <div
            id="quickFormModal"
            class=move || if open.get() { "quick-modal active" } else { "quick-modal" }
            role="dialog"
            aria-modal="true"
            aria-hidden=move || (!open.get()).to_string()
        >
            <div class="modal-backdrop" on:click=move |_| close()></div>
            <div class="quick-modal-content">
                <button class="modal-close" aria-label="Close" on:click=move |_| close()>
                    "×"
                </button>
                <h3>"Send a Quick Message"</h3>
                <form id="quickContactForm" novalidate=true on:submit=on_submit>
                    <input
                        type="text"
                        name="name"
                        placeholder="Your name"
                        prop:value=move || quick.with(|q| q.name.clone())
                        on:input=move |ev| quick.update(|q| q.name = event_target_value(&ev))
                    />
                    <input
                        type="email"
                        name="email"
                        placeholder="Your email"
                        prop:value=move || quick.with(|q| q.email.clone())
                        on:input=move |ev| quick.update(|q| q.email = event_target_value(&ev))
                    />
                    <textarea
                        name="message"
                        rows="4"
                        placeholder="Your message"
                        prop:value=move || quick.with(|q| q.message.clone())
                        on:input=move |ev| quick.update(|q| q.message = event_target_value(&ev))
                    ></textarea>
                    <button type="submit" class="submit-btn" disabled=move || sending.get()>
                        {move || if sending.get() { "Sending..." } else { "Send" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
