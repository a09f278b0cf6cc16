use std::time::Duration;

use leptos::{ev, html, prelude::*};
use leptos_use::{use_event_listener, use_window};

use super::hooks::use_reveal;
use crate::content::{categories, project_index, Cursor, Filter, Project, PROJECTS};
use crate::motion::StaggerPlan;
use crate::reveal::{Entrance, RevealOptions, Transition};

const REVEAL: RevealOptions = RevealOptions::new(0.1, "0px 0px -50px 0px");
const SECTION_ENTRANCE: Transition = Transition::new(Entrance::Class, Duration::from_millis(600));
const FILTER_IN: StaggerPlan = StaggerPlan::new(Duration::from_millis(50));
const FILTER_OUT: Duration = Duration::from_millis(300);
const MODAL_FADE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CardPhase {
    #[default]
    Shown,
    FilteringIn,
    FilteringOut,
    Hidden,
}

impl CardPhase {
    fn class_attr(self) -> &'static str {
        match self {
            CardPhase::Shown => "project-card",
            CardPhase::FilteringIn => "project-card filtering-in",
            CardPhase::FilteringOut => "project-card filtering-out",
            CardPhase::Hidden => "project-card hidden",
        }
    }

    fn is_hidden(self) -> bool {
        matches!(self, CardPhase::Hidden)
    }

    /// Phase a card takes immediately when the filter changes.
    fn on_filter(self, matches: bool) -> Self {
        match (matches, self) {
            // matching cards wait for their stagger slot
            (true, phase) => phase,
            (false, CardPhase::Hidden) => CardPhase::Hidden,
            (false, _) => CardPhase::FilteringOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardTimer {
    Reveal,
    Hide,
}

/// A pending phase change for one card, tagged with the filter pass that
/// scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledPhase {
    pass: u64,
    index: usize,
    timer: CardTimer,
    delay: Duration,
}

/// Card phases plus the number of the latest filter pass. Timers from an
/// older pass are dropped when they fire.
#[derive(Debug, Clone, Default, PartialEq)]
struct FilterBoard {
    pass: u64,
    phases: Vec<CardPhase>,
}

impl FilterBoard {
    fn new(count: usize) -> Self {
        Self {
            pass: 0,
            phases: vec![CardPhase::Shown; count],
        }
    }

    fn phase(&self, index: usize) -> CardPhase {
        self.phases.get(index).copied().unwrap_or_default()
    }

    /// Starts a new pass. `matches[i]` says whether card `i` passes the filter.
    fn apply(&mut self, matches: &[bool]) -> Vec<ScheduledPhase> {
        self.pass += 1;
        let pass = self.pass;
        self.phases
            .iter_mut()
            .zip(matches)
            .enumerate()
            .map(|(index, (phase, &hit))| {
                *phase = phase.on_filter(hit);
                let (timer, delay) = if hit {
                    (CardTimer::Reveal, FILTER_IN.delay_for(index))
                } else {
                    (CardTimer::Hide, FILTER_OUT)
                };
                ScheduledPhase {
                    pass,
                    index,
                    timer,
                    delay,
                }
            })
            .collect()
    }

    /// Lands a timer. Returns whether any phase changed.
    fn fire(&mut self, scheduled: ScheduledPhase) -> bool {
        if scheduled.pass != self.pass {
            return false;
        }
        let Some(phase) = self.phases.get_mut(scheduled.index) else {
            return false;
        };
        let next = match (scheduled.timer, *phase) {
            (CardTimer::Reveal, _) => CardPhase::FilteringIn,
            (CardTimer::Hide, CardPhase::FilteringOut) => CardPhase::Hidden,
            (CardTimer::Hide, current) => current,
        };
        let changed = next != *phase;
        *phase = next;
        changed
    }
}

/// Per-section filter state: the active filter, the board, and one signal per
/// card mirroring the board for rendering.
#[derive(Clone, Copy)]
struct ProjectFilter {
    active: RwSignal<Filter>,
    board: StoredValue<FilterBoard>,
    cards: StoredValue<Vec<RwSignal<CardPhase>>>,
}

impl ProjectFilter {
    fn new(count: usize) -> Self {
        Self {
            active: RwSignal::new(Filter::All),
            board: StoredValue::new(FilterBoard::new(count)),
            cards: StoredValue::new((0..count).map(|_| RwSignal::new(CardPhase::Shown)).collect()),
        }
    }

    fn card(&self, index: usize) -> RwSignal<CardPhase> {
        self.cards
            .with_value(|cards| cards.get(index).copied())
            .unwrap_or_else(|| RwSignal::new(CardPhase::Shown))
    }

    fn sync(&self) {
        let board = self.board;
        self.cards.with_value(|cards| {
            for (index, card) in cards.iter().enumerate() {
                let phase = board.with_value(|b| b.phase(index));
                if card.get_untracked() != phase {
                    card.set(phase);
                }
            }
        });
    }

    fn apply(&self, filter: Filter) {
        log::debug!("filtering projects by {}", filter.key());
        let matches = PROJECTS.iter().map(|p| filter.matches(p)).collect::<Vec<_>>();
        let scheduled = self
            .board
            .try_update_value(|board| board.apply(&matches))
            .unwrap_or_default();
        self.sync();

        let this = *self;
        for pending in scheduled {
            set_timeout(
                move || {
                    let changed = this
                        .board
                        .try_update_value(|board| board.fire(pending))
                        .unwrap_or(false);
                    if changed {
                        this.sync();
                    }
                },
                pending.delay,
            );
        }
        self.active.set(filter);
    }
}

#[component]
pub fn Projects() -> impl IntoView {
    let section_ref = NodeRef::<html::Section>::new();
    let revealed = use_reveal(section_ref, REVEAL);
    let filter = ProjectFilter::new(PROJECTS.len());
    let modal = RwSignal::new(None::<Cursor>);

    let filter_buttons = std::iter::once("all")
        .chain(categories(&PROJECTS))
        .map(|key| {
            let key = key.to_string();
            let target = Filter::from_key(&key);
            let is_active = {
                let target = target.clone();
                move || filter.active.with(|f| *f == target)
            };
            view! {
                <button
                    class=move || if is_active() { "filter-btn active" } else { "filter-btn" }
                    data-filter=key.clone()
                    on:click=move |_| filter.apply(target.clone())
                >
                    {key.clone()}
                </button>
            }
        })
        .collect_view();

    let cards = PROJECTS
        .iter()
        .enumerate()
        .map(|(index, project)| {
            let phase = filter.card(index);
            let key = project.key.clone();
            view! {
                <article
                    class=move || phase.get().class_attr()
                    style=move || {
                        if phase.get().is_hidden() { "display: none;" } else { "display: block;" }
                    }
                    data-category=project.category.clone()
                >
                    <img
                        src=project.images.first().cloned().unwrap_or_default()
                        alt=project.title.clone()
                    />
                    <h3>{project.title.clone()}</h3>
                    <p>{project.summary.clone()}</p>
                    <div class="tech-tags">
                        {project
                            .tech
                            .iter()
                            .take(3)
                            .map(|t| view! { <span class="tech-tag">{t.clone()}</span> })
                            .collect_view()}
                    </div>
                    <button
                        class="project-preview"
                        on:click=move |_| {
                            let cursor = project_index(&key)
                                .and_then(|i| Cursor::new(i, PROJECTS.len()));
                            modal.set(cursor);
                        }
                    >
                        "View Details"
                    </button>
                </article>
            }
        })
        .collect_view();

    view! {
        <section
            id="projects"
            node_ref=section_ref
            class=move || {
                format!("projects {}", SECTION_ENTRANCE.presentation(revealed.get()).class_attr())
            }
        >
            <h2 class="section-title">"Projects"</h2>
            <div class="project-filters">{filter_buttons}</div>
            <div class="project-grid">{cards}</div>
            <ProjectModal cursor=modal />
        </section>
    }
}

#[component]
fn ProjectModal(cursor: RwSignal<Option<Cursor>>) -> impl IntoView {
    let image = RwSignal::new(0_usize);
    let fading = RwSignal::new(false);

    let close = move || cursor.set(None);
    let step = move |forward: bool| {
        if cursor.get_untracked().is_none() {
            return;
        }
        fading.set(true);
        set_timeout(
            move || {
                cursor.update(|c| *c = c.map(|c| if forward { c.next() } else { c.prev() }));
                image.set(0);
                fading.set(false);
            },
            MODAL_FADE,
        );
    };

    let _ = use_event_listener(use_window(), ev::keydown, move |ev| {
        if cursor.get_untracked().is_none() {
            return;
        }
        match ev.key().as_str() {
            "Escape" => close(),
            "ArrowLeft" => step(false),
            "ArrowRight" => step(true),
            _ => {}
        }
    });

    move || {
        let project: Project = cursor.get().and_then(|c| PROJECTS.get(c.index()).cloned())?;
        let images = project.images.clone();
        let thumbs = project
            .images
            .iter()
            .enumerate()
            .map(|(i, src)| {
                view! {
                    <img
                        src=src.clone()
                        alt=format!("{} Screenshot {}", project.title, i + 1)
                        class=move || if image.get() == i { "active" } else { "" }
                        on:click=move |_| image.set(i)
                    />
                }
            })
            .collect_view();
        let content_style = move || if fading.get() { "opacity: 0;" } else { "opacity: 1;" };

        Some(view! {
            <div class="project-modal show" role="dialog" aria-modal="true">
                <div class="modal-backdrop" on:click=move |_| close()></div>
                <div class="modal-content">
                    <button class="modal-close" aria-label="Close" on:click=move |_| close()>
                        "×"
                    </button>
                    <div class="modal-header" style=content_style>
                        <h2>{project.title.clone()}</h2>
                        <p>{project.description.clone()}</p>
                    </div>
                    <div class="modal-body" style=content_style>
                        <div class="project-images">
                            <img
                                class="project-image-main"
                                src=move || images.get(image.get()).cloned().unwrap_or_default()
                                alt=project.title.clone()
                            />
                            <div class="project-thumbs">{thumbs}</div>
                        </div>
                        <div class="project-info">
                            <div class="project-features">
                                <h3>"Key Features"</h3>
                                <ul>
                                    {project
                                        .features
                                        .iter()
                                        .map(|f| view! { <li>{f.clone()}</li> })
                                        .collect_view()}
                                </ul>
                            </div>
                            <div class="project-technologies">
                                <h3>"Technologies Used"</h3>
                                <div class="tech-tags">
                                    {project
                                        .tech
                                        .iter()
                                        .map(|t| {
                                            view! { <span class="tech-tag">{t.clone()}</span> }
                                        })
                                        .collect_view()}
                                </div>
                            </div>
                            <div class="project-links">
                                <a
                                    class="btn-primary"
                                    href=project.live_url.clone()
                                    target="_blank"
                                    rel="noopener noreferrer"
                                >
                                    "Live Demo"
                                </a>
                                <a
                                    class="btn-secondary"
                                    href=project.code_url.clone()
                                    target="_blank"
                                    rel="noopener noreferrer"
                                >
                                    "View Code"
                                </a>
                            </div>
                        </div>
                    </div>
                    <div class="modal-nav">
                        <button on:click=move |_| step(false) aria-label="Previous project">
                            "‹"
                        </button>
                        <button on:click=move |_| step(true) aria-label="Next project">
                            "›"
                        </button>
                    </div>
                </div>
            </div>
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_phase_on_filter() {
        assert_eq!(CardPhase::Shown.on_filter(true), CardPhase::Shown);
        assert_eq!(CardPhase::Shown.on_filter(false), CardPhase::FilteringOut);
        assert_eq!(CardPhase::Hidden.on_filter(false), CardPhase::Hidden);
        assert_eq!(CardPhase::FilteringIn.on_filter(false), CardPhase::FilteringOut);
        assert_eq!(CardPhase::Hidden.on_filter(true), CardPhase::Hidden);
        assert_eq!(CardPhase::FilteringOut.on_filter(true), CardPhase::FilteringOut);
    }

    #[test]
    fn test_card_phase_classes() {
        assert_eq!(CardPhase::FilteringIn.class_attr(), "project-card filtering-in");
        assert_eq!(CardPhase::Hidden.class_attr(), "project-card hidden");
        assert!(CardPhase::Hidden.is_hidden());
        assert!(!CardPhase::FilteringOut.is_hidden());
    }

    fn fire_in_order(board: &mut FilterBoard, mut scheduled: Vec<ScheduledPhase>) {
        scheduled.sort_by_key(|s| s.delay);
        for pending in scheduled {
            board.fire(pending);
        }
    }

    #[test]
    fn test_filter_board_settles() {
        let mut board = FilterBoard::new(3);
        let scheduled = board.apply(&[true, false, true]);
        assert_eq!(board.phases[1], CardPhase::FilteringOut);
        fire_in_order(&mut board, scheduled);
        assert_eq!(
            board.phases,
            vec![CardPhase::FilteringIn, CardPhase::Hidden, CardPhase::FilteringIn]
        );
    }

    #[test]
    fn test_filter_board_drops_timers_from_older_pass() {
        let mut board = FilterBoard::new(6);
        // card 4 matches the first filter, then not the second
        let first = board.apply(&[false, false, false, false, true, false]);
        let second = board.apply(&[true, true, true, true, false, true]);

        let mut pending = first;
        pending.extend(second);
        fire_in_order(&mut board, pending);

        assert_eq!(board.phase(4), CardPhase::Hidden);
        for index in [0, 1, 2, 3, 5] {
            assert_eq!(board.phase(index), CardPhase::FilteringIn);
        }
    }

    #[test]
    fn test_filter_board_ignores_stale_reveal() {
        let mut board = FilterBoard::new(5);
        let first = board.apply(&[false, false, false, false, true]);
        let reveal = first[4];
        board.apply(&[true, true, true, true, false]);
        assert!(!board.fire(reveal));
        assert_eq!(board.phase(4), CardPhase::FilteringOut);
    }

    #[test]
    fn test_filter_stagger_offsets() {
        assert_eq!(FILTER_IN.delay_for(0), Duration::ZERO);
        assert_eq!(FILTER_IN.delay_for(4), Duration::from_millis(200));
    }
}
