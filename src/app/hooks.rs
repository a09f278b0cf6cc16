use std::time::Duration;

use leptos::{html, prelude::*};
use leptos_use::{
    use_intersection_observer_with_options, use_interval_fn_with_options,
    use_raf_fn_with_options, utils::Pausable, UseIntersectionObserverOptions,
    UseIntervalFnOptions, UseRafFnCallbackArgs, UseRafFnOptions,
};

use crate::motion::{CounterAnimation, Easing, StaggerPlan, Tween, Typewriter};
use crate::reveal::{RevealOptions, RevealState, RevealWatcher};

/// Watches a section and flips to revealed the first time enough of it is
/// visible. A section that never mounts simply stays hidden.
pub fn use_reveal(target: NodeRef<html::Section>, options: RevealOptions) -> Signal<RevealState> {
    let state = RwSignal::new(RevealState::Hidden);
    let watcher = StoredValue::new(RevealWatcher::new(options.threshold));

    use_intersection_observer_with_options(
        target,
        move |entries, observer| {
            for entry in entries {
                let Some(ratio) =
                    options.observed_ratio(entry.is_intersecting(), entry.intersection_ratio())
                else {
                    continue;
                };
                let revealed = watcher
                    .try_update_value(|w| w.observe(ratio))
                    .unwrap_or(false);
                if revealed {
                    log::debug!("section revealed at ratio {ratio:.2}");
                    state.set(RevealState::Revealed);
                    observer.disconnect();
                    break;
                }
            }
        },
        UseIntersectionObserverOptions::default()
            .thresholds(vec![options.threshold])
            .root_margin(options.root_margin.to_string()),
    );

    state.into()
}

/// One state per item; item `i` flips `plan.delay_for(i)` after the trigger
/// reveals. Scheduled timeouts are never cancelled.
pub fn use_stagger(
    count: usize,
    plan: StaggerPlan,
    trigger: Signal<RevealState>,
) -> Vec<RwSignal<RevealState>> {
    let items = (0..count)
        .map(|_| RwSignal::new(RevealState::Hidden))
        .collect::<Vec<_>>();
    let scheduled = items.clone();

    Effect::watch(
        move || trigger.get(),
        move |state, _, _| {
            if !state.is_revealed() {
                return;
            }
            for (index, delay) in plan.schedule(scheduled.len()) {
                let item = scheduled[index];
                set_timeout(move || item.set(RevealState::Revealed), delay);
            }
        },
        true,
    );

    items
}

/// Counts up to the animation's target, starting `delay` after the trigger
/// reveals. Driven by animation frames; stops once the target is shown.
pub fn use_counter(
    animation: CounterAnimation,
    delay: Duration,
    trigger: Signal<RevealState>,
) -> Signal<u32> {
    let value = RwSignal::new(0_u32);
    let finished = RwSignal::new(false);
    let started_at = StoredValue::new(None::<f64>);

    let Pausable { pause, resume, .. } = use_raf_fn_with_options(
        move |args: UseRafFnCallbackArgs| {
            let start = match started_at.get_value() {
                Some(start) => start,
                None => {
                    started_at.set_value(Some(args.timestamp));
                    args.timestamp
                }
            };
            let elapsed = Duration::from_secs_f64(((args.timestamp - start) / 1000.0).max(0.0));
            value.set(animation.value_at(elapsed));
            if elapsed >= animation.duration() {
                finished.set(true);
            }
        },
        UseRafFnOptions::default().immediate(false),
    );

    Effect::watch(
        move || finished.get(),
        move |done, _, _| {
            if *done {
                pause();
            }
        },
        false,
    );

    Effect::watch(
        move || trigger.get(),
        move |state, _, _| {
            if state.is_revealed() && !finished.get_untracked() {
                let resume = resume.clone();
                set_timeout(move || resume(), delay);
            }
        },
        true,
    );

    value.into()
}

/// Types `writer` out one unit per `step` once `start` turns true.
pub fn use_typewriter(writer: Typewriter, step: Duration, start: Signal<bool>) -> Signal<String> {
    let typed = RwSignal::new(0_usize);
    let steps = writer.steps();

    let Pausable { pause, resume, .. } = use_interval_fn_with_options(
        move || typed.update(|n| *n += 1),
        step.as_millis() as u64,
        UseIntervalFnOptions::default().immediate(false),
    );

    Effect::watch(
        move || typed.get() >= steps,
        move |done, _, _| {
            if *done {
                pause();
            }
        },
        false,
    );

    Effect::watch(
        move || start.get(),
        move |started, _, _| {
            if *started && typed.get_untracked() < steps {
                resume();
            }
        },
        true,
    );

    Signal::derive(move || writer.frame(typed.get()))
}

/// Scrolls the element with `id` into view. Missing elements are ignored.
pub fn scroll_to_section(id: &str) {
    match document().get_element_by_id(id) {
        Some(el) => el.scroll_into_view(),
        None => log::warn!("no section with id {id}"),
    }
}

/// Eases the window back to the top over `duration`.
pub fn use_scroll_to_top(duration: Duration) -> impl Fn() + Clone {
    let tween = StoredValue::new(None::<(Tween, f64)>);
    let finished = RwSignal::new(false);

    let Pausable { pause, resume, .. } = use_raf_fn_with_options(
        move |args: UseRafFnCallbackArgs| {
            let (tween, from) = match tween.get_value() {
                Some(active) => active,
                None => {
                    let from = window().scroll_y().unwrap_or(0.0);
                    let tween = Tween::new(args.timestamp, duration, Easing::EaseOutCubic);
                    let active = (tween, from);
                    tween.set_value(Some(active));
                    active
                }
            };
            let y = tween.interpolate(from, 0.0, args.timestamp);
            window().scroll_to_with_x_and_y(0.0, y);
            if tween.is_finished(args.timestamp) {
                finished.set(true);
            }
        },
        UseRafFnOptions::default().immediate(false),
    );

    Effect::watch(
        move || finished.get(),
        move |done, _, _| {
            if *done {
                pause();
            }
        },
        false,
    );

    move || {
        tween.set_value(None);
        finished.set(false);
        resume();
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use leptos::task::Executor;

    use super::*;
    use crate::motion::TypeUnit;

    fn with_owner<T>(f: impl FnOnce() -> T) -> T {
        let _ = Executor::init_tokio();
        Owner::new().with(f)
    }

    #[tokio::test]
    async fn test_reveal_unmounted_target_stays_hidden() {
        with_owner(|| {
            let target = NodeRef::<html::Section>::new();
            let state = use_reveal(target, RevealOptions::new(0.2, "0px 0px -50px 0px"));
            assert_eq!(state.get_untracked(), RevealState::Hidden);
        });
    }

    #[tokio::test]
    async fn test_stagger_empty_list() {
        with_owner(|| {
            let plan = StaggerPlan::new(Duration::from_millis(100));
            let items = use_stagger(0, plan, Signal::stored(RevealState::Revealed));
            assert!(items.is_empty());
        });
    }

    #[tokio::test]
    async fn test_stagger_items_start_hidden() {
        with_owner(|| {
            let plan = StaggerPlan::new(Duration::from_millis(100));
            let items = use_stagger(3, plan, Signal::stored(RevealState::Hidden));
            assert_eq!(items.len(), 3);
            assert!(items.iter().all(|i| i.get_untracked() == RevealState::Hidden));
        });
    }

    #[tokio::test]
    async fn test_counter_waits_for_reveal() {
        with_owner(|| {
            let value = use_counter(
                CounterAnimation::new(50, Duration::from_millis(2000)),
                Duration::ZERO,
                Signal::stored(RevealState::Hidden),
            );
            assert_eq!(value.get_untracked(), 0);
        });
    }

    #[tokio::test]
    async fn test_typewriter_idle_until_started() {
        with_owner(|| {
            let typed = use_typewriter(
                Typewriter::new("Hi, I'm Alex".to_string(), TypeUnit::Char),
                Duration::from_millis(100),
                Signal::stored(false),
            );
            assert_eq!(typed.get_untracked(), "");
        });
    }
}
