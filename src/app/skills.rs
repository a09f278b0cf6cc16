use std::time::Duration;

use leptos::{ev, html, prelude::*};
use leptos_use::{use_event_listener, use_window};

use super::hooks::{use_counter, use_reveal, use_stagger};
use crate::content::{skill, Skill, SKILLS};
use crate::motion::{CounterAnimation, StaggerPlan};
use crate::reveal::{Entrance, RevealOptions, RevealState, Transition};

const REVEAL: RevealOptions = RevealOptions::new(0.2, "0px 0px -100px 0px");
const BAR_STAGGER: StaggerPlan =
    StaggerPlan::new(Duration::from_millis(200)).with_offset(Duration::from_millis(300));
const PERCENT_STAGGER: StaggerPlan =
    StaggerPlan::new(Duration::from_millis(200)).with_offset(Duration::from_millis(800));
const PERCENT_DURATION: Duration = Duration::from_millis(1000);
const BAR_FILL: Duration = Duration::from_millis(2000);
const SECTION_ENTRANCE: Transition = Transition::new(Entrance::Class, Duration::from_millis(600));
const TOOLTIP_AUTO_HIDE: Duration = Duration::from_millis(3000);

#[component]
pub fn Skills() -> impl IntoView {
    let section_ref = NodeRef::<html::Section>::new();
    let revealed = use_reveal(section_ref, REVEAL);

    let total = SKILLS.iter().map(|c| c.skills.len()).sum::<usize>();
    let bars = use_stagger(total, BAR_STAGGER, revealed);

    // key of the skill whose tooltip is showing
    let tooltip = RwSignal::new(None::<String>);
    let _ = use_event_listener(use_window(), ev::scroll, move |_| {
        if tooltip.with_untracked(Option::is_some) {
            tooltip.set(None);
        }
    });

    let mut bars = bars.into_iter();
    let mut index = 0_usize;
    let categories = SKILLS
        .iter()
        .map(|category| {
            let rows = category
                .skills
                .iter()
                .map(|s| {
                    let bar = bars.next().unwrap_or_else(|| RwSignal::new(RevealState::Hidden));
                    let row = view! {
                        <SkillBar
                            skill=s.clone()
                            bar=bar
                            counter_delay=PERCENT_STAGGER.delay_for(index)
                            trigger=revealed
                            tooltip=tooltip
                        />
                    };
                    index += 1;
                    row
                })
                .collect_view();
            view! {
                <div class="skill-category">
                    <h3>{category.name.clone()}</h3>
                    <ul class="skill-list">{rows}</ul>
                </div>
            }
        })
        .collect_view();

    view! {
        <section
            id="skills"
            node_ref=section_ref
            class=move || {
                format!("skills {}", SECTION_ENTRANCE.presentation(revealed.get()).class_attr())
            }
        >
            <h2 class="section-title">"Skills"</h2>
            <div class="skills-grid">{categories}</div>
        </section>
    }
}

#[component]
fn SkillBar(
    skill: Skill,
    bar: RwSignal<RevealState>,
    counter_delay: Duration,
    trigger: Signal<RevealState>,
    tooltip: RwSignal<Option<String>>,
) -> impl IntoView {
    let percent = use_counter(
        CounterAnimation::new(skill.level, PERCENT_DURATION),
        counter_delay,
        trigger,
    );
    let fill = Transition::new(Entrance::Fill(skill.level), BAR_FILL);
    let label = format!("{}: {}% proficiency", skill.title, skill.level);

    let key = StoredValue::new(skill.key.clone());
    let is_open = move || key.with_value(|k| tooltip.with(|t| t.as_deref() == Some(k.as_str())));
    let show = move || tooltip.set(Some(key.get_value()));
    let hide = move || {
        if is_open() {
            tooltip.set(None);
        }
    };

    view! {
        <li
            class="skill-bar"
            data-skill=skill.key.clone()
            tabindex="0"
            role="progressbar"
            aria-valuenow=skill.level.to_string()
            aria-valuemin="0"
            aria-valuemax="100"
            aria-label=label
            on:mouseenter=move |_| show()
            on:mouseleave=move |_| hide()
            on:focus=move |_| show()
            on:blur=move |_| hide()
            on:keydown=move |ev| {
                if ev.key() == "Enter" || ev.key() == " " {
                    ev.prevent_default();
                    show();
                    set_timeout(move || hide(), TOOLTIP_AUTO_HIDE);
                }
            }
        >
            <div class="skill-info">
                <span class="skill-name">{skill.title.clone()}</span>
                <span class="skill-percentage">{move || format!("{}%", percent.get())}</span>
            </div>
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || fill.presentation(bar.get()).style_attr()
                ></div>
            </div>
            <SkillTooltip key=key.get_value() open=Signal::derive(is_open) />
        </li>
    }
}

#[component]
fn SkillTooltip(key: String, open: Signal<bool>) -> impl IntoView {
    // a missing description renders nothing
    skill(&key).map(|s| {
        view! {
            <div
                class=move || if open.get() { "skill-tooltip show" } else { "skill-tooltip" }
                role="tooltip"
            >
                <h4>{s.title.clone()}</h4>
                <p>{s.description.clone()}</p>
            </div>
        }
    })
}
