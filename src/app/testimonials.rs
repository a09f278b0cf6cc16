use std::time::Duration;

use leptos::{ev, html, prelude::*};
use leptos_use::{use_event_listener, use_window};

use super::hooks::{use_reveal, use_stagger, use_typewriter};
use crate::content::{Testimonial, TESTIMONIALS};
use crate::motion::{StaggerPlan, TypeUnit, Typewriter};
use crate::reveal::{Entrance, RevealOptions, Transition};

const REVEAL: RevealOptions = RevealOptions::new(0.1, "0px 0px -50px 0px");
const SECTION_ENTRANCE: Transition = Transition::new(Entrance::Class, Duration::from_millis(600));
const CARD_ENTRANCE: Transition = Transition::new(Entrance::SlideY(30), Duration::from_millis(600));
// 800ms after the reveal, plus the 500ms typing lead-in
const QUOTE_STAGGER: StaggerPlan =
    StaggerPlan::new(Duration::from_millis(200)).with_offset(Duration::from_millis(1300));
const CARD_STAGGER: StaggerPlan = StaggerPlan::new(Duration::from_millis(100));
const WORD_STEP: Duration = Duration::from_millis(100);

#[component]
pub fn Testimonials() -> impl IntoView {
    let section_ref = NodeRef::<html::Section>::new();
    let revealed = use_reveal(section_ref, REVEAL);
    let cards = use_stagger(TESTIMONIALS.len(), CARD_STAGGER, revealed);
    let quotes = use_stagger(TESTIMONIALS.len(), QUOTE_STAGGER, revealed);
    let expanded = RwSignal::new(None::<usize>);

    let _ = use_event_listener(use_window(), ev::keydown, move |ev| {
        if ev.key() == "Escape" && expanded.with_untracked(Option::is_some) {
            expanded.set(None);
        }
    });

    let grid = TESTIMONIALS
        .iter()
        .zip(cards)
        .zip(quotes)
        .enumerate()
        .map(|(index, ((testimonial, card), quote))| {
            let typed = use_typewriter(
                Typewriter::new(testimonial.quote.clone(), TypeUnit::Word),
                WORD_STEP,
                Signal::derive(move || quote.get().is_revealed()),
            );
            let open = move || expanded.set(Some(index));
            view! {
                <article
                    class="testimonial-card"
                    style=move || CARD_ENTRANCE.presentation(card.get()).style_attr()
                    tabindex="0"
                    role="button"
                    aria-label=format!("Read testimonial from {}", testimonial.client)
                    on:click=move |_| open()
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" || ev.key() == " " {
                            ev.prevent_default();
                            open();
                        }
                    }
                >
                    <div class="quote-icon">"❝"</div>
                    <blockquote aria-label=testimonial.quote.clone()>{typed}</blockquote>
                    <Rating stars=testimonial.stars() />
                    <div class="client-info">
                        <img src=testimonial.avatar.clone() alt=testimonial.client.clone() />
                        <div class="client-details">
                            <h4>{testimonial.client.clone()}</h4>
                            <p>{format!("{}, {}", testimonial.role, testimonial.company)}</p>
                        </div>
                    </div>
                </article>
            }
        })
        .collect_view();

    view! {
        <section
            id="testimonials"
            node_ref=section_ref
            class=move || {
                let entrance = SECTION_ENTRANCE.presentation(revealed.get());
                format!("testimonials {}", entrance.class_attr())
            }
        >
            <h2 class="section-title">"What Clients Say"</h2>
            <div class="testimonials-grid">{grid}</div>
            {move || {
                expanded
                    .get()
                    .and_then(|i| TESTIMONIALS.get(i))
                    .map(|t| {
                        view! {
                            <ExpandedTestimonial
                                testimonial=t.clone()
                                on_close=move || expanded.set(None)
                            />
                        }
                    })
            }}
        </section>
    }
}

#[component]
fn Rating(stars: usize) -> impl IntoView {
    view! {
        <div class="rating" aria-label=format!("{stars} out of 5 stars")>
            {(0..stars).map(|_| view! { <i class="star">"★"</i> }).collect_view()}
        </div>
    }
}

#[component]
fn ExpandedTestimonial<F>(testimonial: Testimonial, on_close: F) -> impl IntoView
where
    F: Fn() + Copy + Send + Sync + 'static,
{
    view! {
        <div class="testimonial-modal" role="dialog" aria-modal="true">
            <div class="modal-backdrop" on:click=move |_| on_close()></div>
            <div class="testimonial-modal-content">
                <button class="modal-close" aria-label="Close" on:click=move |_| on_close()>
                    "×"
                </button>
                <div class="expanded-testimonial">
                    <div class="client-header">
                        <img src=testimonial.avatar.clone() alt=testimonial.client.clone() />
                        <div class="client-info-expanded">
                            <h3>{testimonial.client.clone()}</h3>
                            <p>{testimonial.company.clone()}</p>
                            <Rating stars=testimonial.stars() />
                        </div>
                    </div>
                    <div class="testimonial-content-expanded">
                        <blockquote>{format!("\"{}\"", testimonial.full_text)}</blockquote>
                        <div class="project-summary">
                            <h4>"Project Details:"</h4>
                            <p>{testimonial.project_details.clone()}</p>
                            <div class="project-meta">
                                <span>
                                    <strong>"Timeline:"</strong>
                                    {format!(" {}", testimonial.timeline)}
                                </span>
                                <span>
                                    <strong>"Rating:"</strong>
                                    {format!(" {}/5 stars", testimonial.rating)}
                                </span>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
