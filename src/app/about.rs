use std::time::Duration;

use leptos::{html, prelude::*};

use super::hooks::{use_counter, use_reveal, use_stagger};
use crate::content::{profile, Stat};
use crate::motion::{CounterAnimation, StaggerPlan};
use crate::reveal::{Entrance, RevealOptions, RevealState, Transition};

const REVEAL: RevealOptions = RevealOptions::new(0.3, "0px 0px -50px 0px");
const STAT_STAGGER: StaggerPlan = StaggerPlan::new(Duration::from_millis(200));
const HIGHLIGHT_STAGGER: StaggerPlan = StaggerPlan::new(Duration::from_millis(150));
const HIGHLIGHT_ENTRANCE: Transition =
    Transition::new(Entrance::SlideX(-30), Duration::from_millis(600));
const SECTION_ENTRANCE: Transition = Transition::new(Entrance::Class, Duration::from_millis(600));
const COUNTER_DURATION: Duration = Duration::from_millis(2000);
const DOWNLOAD_FEEDBACK: Duration = Duration::from_millis(2000);

#[component]
pub fn About() -> impl IntoView {
    let profile = profile();
    let section_ref = NodeRef::<html::Section>::new();
    let revealed = use_reveal(section_ref, REVEAL);

    let highlights = use_stagger(profile.highlights.len(), HIGHLIGHT_STAGGER, revealed);

    view! {
        <section
            id="about"
            node_ref=section_ref
            class=move || {
                format!("about {}", SECTION_ENTRANCE.presentation(revealed.get()).class_attr())
            }
        >
            <h2 class="section-title">"About Me"</h2>
            <div class="about-content">
                <div class="about-text">
                    {profile.bio.iter().map(|p| view! { <p>{p.clone()}</p> }).collect_view()}
                    <ul class="skill-items">
                        {profile
                            .highlights
                            .iter()
                            .zip(highlights)
                            .map(|(text, state)| {
                                view! {
                                    <li
                                        class="skill-item"
                                        style=move || highlight_style(state.get())
                                    >
                                        {text.clone()}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                    <DownloadCv />
                </div>
                <div class="stats">
                    {profile
                        .stats
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
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

fn highlight_style(state: RevealState) -> String {
    HIGHLIGHT_ENTRANCE.presentation(state).style_attr()
}

/// A stat that counts up from zero once its section is revealed.
#[component]
pub fn StatCounter(stat: Stat, delay: Duration, trigger: Signal<RevealState>) -> impl IntoView {
    let value = use_counter(
        CounterAnimation::new(stat.target, COUNTER_DURATION),
        delay,
        trigger,
    );
    let suffix = stat.suffix.clone();

    view! {
        <div class="stat">
            <h3 class="stat-number">{move || format!("{}{}", value.get(), suffix)}</h3>
            <p>{stat.label}</p>
        </div>
    }
}

#[component]
fn DownloadCv() -> impl IntoView {
    let profile = profile();
    let (downloaded, set_downloaded) = signal(false);

    view! {
        <a
            href=profile.cv_path.clone()
            download=profile.cv_file_name().to_string()
            class=move || if downloaded.get() { "download-cv downloaded" } else { "download-cv" }
            on:click=move |_| {
                log::info!("cv download started");
                set_downloaded.set(true);
                set_timeout(move || set_downloaded.set(false), DOWNLOAD_FEEDBACK);
            }
        >
            {move || if downloaded.get() { "✓ Downloaded!" } else { "Download CV" }}
        </a>
    }
}
