use std::time::Duration;

use chrono::Datelike;
use leptos::{html, prelude::*};
use leptos_use::use_window_scroll;

use super::about::StatCounter;
use super::hooks::{scroll_to_section, use_reveal, use_scroll_to_top, use_stagger};
use super::toast::{Notifier, ToastHost};
use crate::content::profile;
use crate::forms::{Field, FormStatus, SimulatedSubmission, StatusSlot, STATUS_TIMEOUT};
use crate::motion::StaggerPlan;
use crate::notify::ToastKind;
use crate::reveal::{Entrance, RevealOptions, Transition};

const REVEAL: RevealOptions = RevealOptions::new(0.1, "0px 0px -50px 0px");
const STAT_STAGGER: StaggerPlan = StaggerPlan::new(Duration::from_millis(200));
const SOCIAL_STAGGER: StaggerPlan = StaggerPlan::new(Duration::from_millis(100));
const SOCIAL_ENTRANCE: Transition =
    Transition::new(Entrance::SlideY(20), Duration::from_millis(600));
const BACK_TO_TOP_AFTER: f64 = 300.0;
const SCROLL_TO_TOP: Duration = Duration::from_millis(800);
const BUILD_TIME: &str = env!("BUILD_TIME");

const LEGAL_LINKS: [(&str, &str); 3] =
    [("#privacy", "Privacy"), ("#terms", "Terms"), ("#sitemap", "Sitemap")];

const QUICK_LINKS: [(&str, &str); 5] = [
    ("about", "About"),
    ("skills", "Skills"),
    ("projects", "Projects"),
    ("testimonials", "Testimonials"),
    ("contact", "Contact"),
];

#[component]
pub fn Footer() -> impl IntoView {
    let profile = profile();
    let section_ref = NodeRef::<html::Section>::new();
    let revealed = use_reveal(section_ref, REVEAL);
    let socials = use_stagger(profile.socials.len(), SOCIAL_STAGGER, revealed);
    let notifier = Notifier::new();

    let stats = profile
        .footer_stats
        .iter()
        .enumerate()
        .map(|(index, stat)| {
            view! {
                <StatCounter
                    stat=stat.clone()
                    delay=STAT_STAGGER.delay_for(index)
                    trigger=revealed
                />
            }
        })
        .collect_view();

    let social_cards = profile
        .socials
        .iter()
        .zip(socials)
        .map(|(link, state)| {
            let opening = format!("Opening {} in new tab...", link.name);
            view! {
                <a
                    class="social-card"
                    on:click=move |_| notifier.notify(opening.clone(), ToastKind::Info)
                    href=link.url.clone()
                    target="_blank"
                    rel="noopener noreferrer"
                    aria-label=link.name.clone()
                    style=move || SOCIAL_ENTRANCE.presentation(state.get()).style_attr()
                >
                    <i class=link.icon.clone()></i>
                    <span class="social-name">{link.name.clone()}</span>
                    <span class="social-handle">{link.handle.clone()}</span>
                </a>
            }
        })
        .collect_view();

    let links = QUICK_LINKS
        .into_iter()
        .map(|(id, label)| {
            view! {
                <li>
                    <a
                        href=format!("#{id}")
                        on:click=move |ev| {
                            ev.prevent_default();
                            scroll_to_section(id);
                        }
                    >
                        {label}
                    </a>
                </li>
            }
        })
        .collect_view();

    let legal = LEGAL_LINKS
        .into_iter()
        .map(|(href, label)| {
            view! {
                <a
                    href=href
                    on:click=move |ev| {
                        ev.prevent_default();
                        notifier.notify(format!("{label} page would open here"), ToastKind::Info);
                    }
                >
                    {label}
                </a>
            }
        })
        .collect_view();

    view! {
        <footer id="footer" class="footer">
            <section node_ref=section_ref class="footer-content">
                <div class="footer-brand">
                    <h3>{profile.name.clone()}</h3>
                    <p>{profile.title.clone()}</p>
                </div>
                <div class="footer-stats">{stats}</div>
                <nav class="footer-links">
                    <h4>"Quick Links"</h4>
                    <ul>{links}</ul>
                </nav>
                <div class="social-links">{social_cards}</div>
                <Newsletter />
            </section>
            <div class="footer-legal">{legal}</div>
            <Copyright />
            <BackToTop />
            <ToastHost notifier=notifier />
        </footer>
    }
}

#[component]
fn Newsletter() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let slot = RwSignal::new(StatusSlot::default());
    let clear_timer = StoredValue::new(None::<TimeoutHandle>);
    let sending = move || slot.with(|s| s.status().is_sending());

    // only the newest status gets a live clear timer
    let show = move |status: FormStatus| {
        let Some(ticket) = slot.try_update(|s| s.show(status)) else {
            return;
        };
        if let Some(previous) = clear_timer.get_value() {
            previous.clear();
        }
        let handle = set_timeout_with_handle(
            move || {
                slot.update(|s| {
                    s.expire(ticket);
                })
            },
            STATUS_TIMEOUT,
        );
        clear_timer.set_value(handle.ok());
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if slot.with_untracked(|s| s.status().is_sending()) {
            return;
        }
        if let Err(err) = email.with_untracked(|e| Field::Email.validate(e)) {
            show(FormStatus::Error(err.to_string()));
            return;
        }

        slot.update(|s| {
            s.show(FormStatus::Sending);
        });
        let submission = SimulatedSubmission::NEWSLETTER;
        set_timeout(
            move || {
                let outcome = submission.resolve(js_sys::Math::random());
                match outcome {
                    Ok(()) => {
                        log::info!("newsletter subscription accepted");
                        email.set(String::new());
                    }
                    Err(err) => log::warn!("newsletter subscription failed: {err}"),
                }
                show(FormStatus::newsletter(outcome));
            },
            submission.delay,
        );
    };

    view! {
        <form class="newsletter-form" novalidate=true on:submit=on_submit>
            <h4>"Stay Updated"</h4>
            <div class="newsletter-input">
                <input
                    type="email"
                    name="newsletter-email"
                    placeholder="Your email address"
                    aria-label="Email address"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class=move || if sending() { "loading" } else { "" }
                    disabled=sending
                >
                    {move || if sending() { "Subscribing..." } else { "Subscribe" }}
                </button>
            </div>
            <div class=move || slot.with(|s| s.status().class_attr()) role="status">
                {move || slot.with(|s| s.status().message().map(str::to_string))}
            </div>
        </form>
    }
}

#[component]
fn Copyright() -> impl IntoView {
    // year comes from the build stamp
    let built = chrono::DateTime::parse_from_rfc3339(BUILD_TIME).ok();
    let year = built.map(|t| t.year()).unwrap_or_default();
    let built = built.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string()).unwrap_or_default();

    view! {
        <div class="footer-bottom">
            <p>{format!("© {year} {}. All rights reserved.", profile().name)}</p>
            <p class="build-time">{format!("Built {built}")}</p>
        </div>
    }
}

#[component]
fn BackToTop() -> impl IntoView {
    let (_, scroll_y) = use_window_scroll();
    let visible = move || scroll_y.get() > BACK_TO_TOP_AFTER;
    let scroll_to_top = use_scroll_to_top(SCROLL_TO_TOP);

    view! {
        <button
            class=move || if visible() { "back-to-top show" } else { "back-to-top" }
            aria-label="Back to top"
            on:click=move |_| scroll_to_top()
        >
            "↑"
        </button>
    }
}
