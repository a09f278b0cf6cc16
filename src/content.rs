use rust_embed::Embed;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

pub static PROFILE: LazyLock<SiteProfile> = LazyLock::new(|| load_or_default("site.json"));
pub static SKILLS: LazyLock<Vec<SkillCategory>> = LazyLock::new(|| load_or_default("skills.json"));
pub static PROJECTS: LazyLock<Vec<Project>> = LazyLock::new(|| load_or_default("projects.json"));
pub static TESTIMONIALS: LazyLock<Vec<Testimonial>> =
    LazyLock::new(|| load_or_default("testimonials.json"));

#[derive(Embed)]
#[folder = "content"]
pub struct Assets;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Content not found: {0}")]
    NotFound(String),
    #[error("Couldn't parse {file}: {reason}")]
    Parse { file: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub target: u32,
    #[serde(default)]
    pub suffix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub icon: String,
    #[serde(default)]
    pub handle: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub bio: Vec<String>,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub cv_path: String,
    pub stats: Vec<Stat>,
    pub highlights: Vec<String>,
    pub footer_stats: Vec<Stat>,
    pub socials: Vec<SocialLink>,
    pub backgrounds: Vec<String>,
}

impl SiteProfile {
    /// File name offered to the browser when downloading the CV.
    pub fn cv_file_name(&self) -> &str {
        self.cv_path.rsplit('/').next().unwrap_or(&self.cv_path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub key: String,
    pub title: String,
    pub description: String,
    pub level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub key: String,
    pub title: String,
    pub category: String,
    pub summary: String,
    pub description: String,
    pub features: Vec<String>,
    pub tech: Vec<String>,
    pub images: Vec<String>,
    pub live_url: String,
    pub code_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub client: String,
    pub company: String,
    pub role: String,
    pub avatar: String,
    pub quote: String,
    pub full_text: String,
    pub project_details: String,
    pub timeline: String,
    pub rating: u8,
}

impl Testimonial {
    pub fn stars(&self) -> usize {
        usize::from(self.rating.min(5))
    }
}

fn load<T: DeserializeOwned>(file: &str) -> Result<T, ContentError> {
    let raw = Assets::get(file).ok_or_else(|| ContentError::NotFound(file.to_string()))?;
    serde_json::from_slice(&raw.data).map_err(|e| ContentError::Parse {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

fn load_or_default<T: DeserializeOwned + Default>(file: &str) -> T {
    load(file).unwrap_or_else(|err| {
        log::error!("{err}");
        T::default()
    })
}

pub fn profile() -> &'static SiteProfile {
    &PROFILE
}

pub fn skill(key: &str) -> Option<&'static Skill> {
    SKILLS
        .iter()
        .flat_map(|category| category.skills.iter())
        .find(|skill| skill.key == key)
}

pub fn project(key: &str) -> Result<&'static Project, ContentError> {
    PROJECTS
        .iter()
        .find(|p| p.key == key)
        .ok_or_else(|| ContentError::NotFound(key.to_string()))
}

pub fn project_index(key: &str) -> Option<usize> {
    PROJECTS.iter().position(|p| p.key == key)
}

/// Project categories in first-seen order.
pub fn categories(projects: &[Project]) -> Vec<&str> {
    let mut seen = Vec::new();
    for project in projects {
        if !seen.contains(&project.category.as_str()) {
            seen.push(project.category.as_str());
        }
    }
    seen
}

/// Active project filter, owned by the projects section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    pub fn from_key(key: &str) -> Self {
        if key.is_empty() || key == "all" {
            Filter::All
        } else {
            Filter::Category(key.to_string())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Category(c) => c,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => &project.category == c,
        }
    }
}

/// Wrapping position within an ordered list (modal pages, hero backgrounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(index: usize, len: usize) -> Option<Self> {
        (index < len).then_some(Self { index, len })
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn next(self) -> Self {
        Self {
            index: (self.index + 1) % self.len,
            ..self
        }
    }

    pub fn prev(self) -> Self {
        Self {
            index: (self.index + self.len - 1) % self.len,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(key: &str, category: &str) -> Project {
        Project {
            key: key.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_embedded_content_parses() {
        assert!(load::<SiteProfile>("site.json").is_ok());
        assert!(load::<Vec<SkillCategory>>("skills.json").is_ok());
        assert!(load::<Vec<Project>>("projects.json").is_ok());
        assert!(load::<Vec<Testimonial>>("testimonials.json").is_ok());

        assert!(!profile().name.is_empty());
        assert_eq!(profile().stats.len(), 3);
        assert!(!PROJECTS.is_empty());
        assert!(!TESTIMONIALS.is_empty());
    }

    #[test]
    fn test_missing_content_file() {
        let err = load::<SiteProfile>("nope.json").unwrap_err();
        assert_eq!(err, ContentError::NotFound("nope.json".to_string()));
        assert!(load_or_default::<Vec<Project>>("nope.json").is_empty());
    }

    #[test]
    fn test_lookups() {
        let docker = skill("docker").expect("docker skill should exist");
        assert_eq!(docker.title, "Docker");
        assert!(skill("cobol").is_none());

        let first = &PROJECTS[0];
        assert_eq!(project(&first.key).unwrap().title, first.title);
        assert_eq!(project_index(&first.key), Some(0));
        assert!(matches!(project("missing"), Err(ContentError::NotFound(_))));
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys = PROJECTS.iter().map(|p| p.key.as_str()).collect::<Vec<_>>();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), PROJECTS.len());

        for category in SKILLS.iter() {
            assert!(category.skills.iter().all(|s| s.level <= 100));
        }
    }

    #[test]
    fn test_filter() {
        let projects = vec![
            sample("shop", "web"),
            sample("tasks", "mobile"),
            sample("site", "web"),
        ];
        assert_eq!(categories(&projects), vec!["web", "mobile"]);

        let all = Filter::from_key("all");
        assert_eq!(all, Filter::All);
        assert!(projects.iter().all(|p| all.matches(p)));

        let web = Filter::from_key("web");
        assert_eq!(web.key(), "web");
        let shown = projects.iter().filter(|p| web.matches(p)).count();
        assert_eq!(shown, 2);
    }

    #[test]
    fn test_cursor_wraps() {
        assert!(Cursor::new(0, 0).is_none());
        assert!(Cursor::new(3, 3).is_none());

        let cursor = Cursor::new(0, 3).unwrap();
        assert_eq!(cursor.prev().index(), 2);
        assert_eq!(cursor.next().next().next().index(), 0);
        assert_eq!(cursor.prev().next(), cursor);
    }

    #[test]
    fn test_cv_file_name() {
        let profile = SiteProfile {
            cv_path: "/assets/cv/Alex_Johnson_CV.pdf".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.cv_file_name(), "Alex_Johnson_CV.pdf");
    }
}
