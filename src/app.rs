mod about;
mod contact;
mod footer;
mod hero;
mod hooks;
mod projects;
mod skills;
mod testimonials;
mod toast;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::content::profile;

use about::About;
use contact::Contact;
use footer::Footer;
use hero::Hero;
use projects::Projects;
use skills::Skills;
use testimonials::Testimonials;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body class="font-sans scroll-smooth">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    let name = profile().name.clone();

    view! {
        <Title formatter=move |title| format!("{name} - {title}") />
        <Meta name="description" content=profile().tagline.clone() />

        <Router>
            <Nav />
            <main class="flex flex-col w-full">
                <Routes fallback=NotFound>
                    <Route path=path!("/") view=HomePage />
                </Routes>
            </main>
        </Router>
    }
}

const NAV_LINKS: [(&str, &str); 6] = [
    ("about", "About"),
    ("skills", "Skills"),
    ("projects", "Projects"),
    ("testimonials", "Testimonials"),
    ("contact", "Contact"),
    ("footer", "More"),
];

#[component]
fn Nav() -> impl IntoView {
    view! {
        <nav class="site-nav">
            <a href="#hero" class="site-nav-brand">
                {profile().name.clone()}
            </a>
            <ul class="site-nav-links">
                {NAV_LINKS
                    .into_iter()
                    .map(|(id, label)| {
                        view! {
                            <li>
                                <a
                                    href=format!("#{id}")
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        hooks::scroll_to_section(id);
                                    }
                                >
                                    {label}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <Title text="Portfolio" />
        <Hero />
        <About />
        <Skills />
        <Projects />
        <Testimonials />
        <Contact />
        <Footer />
    }
}

#[component]
fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        let resp = expect_context::<leptos_axum::ResponseOptions>();
        resp.set_status(axum::http::StatusCode::NOT_FOUND);
    }

    view! {
        <Title text="Page not found" />
        <section class="not-found">
            <h1>"404"</h1>
            <p>"Nothing lives at this address."</p>
            <a href="/">"Back to the portfolio"</a>
        </section>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use leptos::tachys::view::RenderHtml;
    use leptos::task::Executor;

    use super::*;

    fn render<V: RenderHtml>(view: impl FnOnce() -> V) -> String {
        let _ = Executor::init_tokio();
        Owner::new().with(|| view().to_html())
    }

    #[tokio::test]
    async fn test_sections_render_without_a_browser() {
        let sections = [
            ("hero", render(|| view! { <Hero /> })),
            ("about", render(|| view! { <About /> })),
            ("skills", render(|| view! { <Skills /> })),
            ("projects", render(|| view! { <Projects /> })),
            ("testimonials", render(|| view! { <Testimonials /> })),
            ("contact", render(|| view! { <Contact /> })),
            ("footer", render(|| view! { <Footer /> })),
        ];
        for (id, html) in sections {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing section {id}");
        }
    }

    #[tokio::test]
    async fn test_sections_start_unrevealed() {
        let about = render(|| view! { <About /> });
        assert!(!about.contains("about animate"));
        assert!(about.contains("0+"));

        let skills = render(|| view! { <Skills /> });
        assert!(skills.contains("width: 0%"));
    }

    #[tokio::test]
    async fn test_contact_renders_idle_forms() {
        let html = render(|| view! { <Contact /> });
        assert!(html.contains("id=\"contactForm\""));
        assert!(html.contains("id=\"quickFormModal\""));
        assert!(!html.contains("quick-modal active"));
        assert!(html.contains("toast-stack"));
        assert!(html.contains("Send Message"));
    }

    #[tokio::test]
    async fn test_footer_renders_build_stamp() {
        let html = render(|| view! { <Footer /> });
        assert!(html.contains("All rights reserved."));
        assert!(html.contains("Stay Updated"));
        assert!(!html.contains("back-to-top show"));
    }
}
