use std::time::Duration;

use leptos::prelude::*;
use leptos_use::{use_interval_fn, use_window_scroll};

use super::hooks::{scroll_to_section, use_typewriter};
use crate::content::{profile, Cursor};
use crate::motion::{parallax_offset, TypeUnit, Typewriter};

const TYPE_STEP: Duration = Duration::from_millis(100);
const BACKGROUND_ROTATION_MS: u64 = 10_000;
const PARALLAX_SPEED: f64 = 0.5;

#[component]
pub fn Hero() -> impl IntoView {
    let profile = profile();
    let greeting = format!("Hi, I'm {}", profile.name);
    let title = use_typewriter(
        Typewriter::new(greeting.clone(), TypeUnit::Char),
        TYPE_STEP,
        Signal::derive(|| true),
    );

    let backgrounds = StoredValue::new(profile.backgrounds.clone());
    let background = RwSignal::new(Cursor::new(0, profile.backgrounds.len()));
    use_interval_fn(
        move || background.update(|c| *c = c.map(Cursor::next)),
        BACKGROUND_ROTATION_MS,
    );
    let background_style = move || {
        let image = background
            .get()
            .and_then(|c| backgrounds.with_value(|urls| urls.get(c.index()).cloned()));
        image.map(|url| {
            format!(
                "background-image: linear-gradient(rgba(0, 0, 0, 0.5), rgba(0, 0, 0, 0.5)), \
                 url('{url}');"
            )
        })
    };

    let (_, scroll_y) = use_window_scroll();
    let parallax = move || {
        format!(
            "transform: translateY({}px);",
            parallax_offset(scroll_y.get(), PARALLAX_SPEED)
        )
    };

    view! {
        <section id="hero" class="hero">
            <div class="hero-image" style=move || {
                format!("{} {}", background_style().unwrap_or_default(), parallax())
            }></div>
            <div class="hero-content">
                <h1 aria-label=greeting>{title}</h1>
                <p class="hero-title">{profile.title.clone()}</p>
                <p class="hero-tagline">{profile.tagline.clone()}</p>
                <a
                    href="#contact"
                    class="cta-button"
                    on:click=move |ev| {
                        ev.prevent_default();
                        scroll_to_section("contact");
                    }
                >
                    "Get In Touch"
                </a>
            </div>
        </section>
    }
}
