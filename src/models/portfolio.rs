//! Static portfolio data consumed by the relay's instruction prompt.
//!
//! Read-only at runtime. `PortfolioContext::default()` carries the site's
//! own content; `PortfolioContext::load` swaps in a JSON file with the same
//! shape.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::enums::SkillCategory;

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Cannot read context file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid context file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Site identity fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteProfile {
    pub name: String,
    pub role: String,
    pub location: String,
    pub email: String,
    pub site_url: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub year: String,
    pub description: String,
    pub long_description: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
}

/// Everything the relay may tell the model about the site owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioContext {
    pub site: SiteProfile,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: Vec<Experience>,
}

impl PortfolioContext {
    /// Load a context file (JSON).
    pub fn load(path: &Path) -> Result<Self, ContextError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ContextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let context: PortfolioContext =
            serde_json::from_str(&raw).map_err(|source| ContextError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(
            path = %path.display(),
            projects = context.projects.len(),
            skills = context.skills.len(),
            "Loaded portfolio context"
        );
        Ok(context)
    }

    /// Load from `path` when given, otherwise the built-in site content.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ContextError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn skill_names(&self) -> Vec<&str> {
        self.skills.iter().map(|s| s.name.as_str()).collect()
    }
}

impl Default for PortfolioContext {
    fn default() -> Self {
        Self {
            site: SiteProfile {
                name: "Daniel Olafisoye".into(),
                role: "Software Engineer".into(),
                location: "Johannesburg, ZA".into(),
                email: "dannysoftdev@gmail.com".into(),
                site_url: "https://danielolafisoye.dev".into(),
                bio: "A business-minded software engineer who thrives at the intersection of \
                      complex system design and AI development. Through LUDA BLACK he builds \
                      scalable, production-ready platforms backed by robust architecture that \
                      solve real business problems."
                    .into(),
            },
            projects: vec![
                Project {
                    slug: "metropoint".into(),
                    title: "Metropoint".into(),
                    year: "2023".into(),
                    description: "A public transit mobile app for real-time navigation, route \
                                  scheduling, and commuter communication."
                        .into(),
                    long_description: "Metropoint provides a unified platform for public transit \
                                       schedules and route details. It runs on a Java Spring Boot \
                                       backend with PostgreSQL, and the mobile client is built \
                                       with React Native Expo. It includes real-time chat and is \
                                       live on the Google Play Store."
                        .into(),
                    tags: tags(&["React Native", "Spring Boot", "PostgreSQL", "Java", "Google Play"]),
                    live_url: Some(
                        "https://play.google.com/store/apps/details?id=com.ludablack.metropoint"
                            .into(),
                    ),
                    featured: true,
                },
                Project {
                    slug: "newsly-ai".into(),
                    title: "Newsly AI".into(),
                    year: "2025".into(),
                    description: "An automated WhatsApp media platform that uses AI agents to \
                                  curate and deliver South African tech news."
                        .into(),
                    long_description: "Newsly AI delivers AI-synthesized tech updates directly \
                                       to users on WhatsApp. It runs on AWS EC2, where Python \
                                       jobs scrape, analyze, and summarize content with the \
                                       OpenAI API before an automated pipeline pushes it through \
                                       the WhatsApp Business API."
                        .into(),
                    tags: tags(&["OpenAI API", "AWS EC2", "Python", "WhatsApp API", "LLMs"]),
                    live_url: Some("https://newslyai.co.za/".into()),
                    featured: true,
                },
            ],
            skills: vec![
                skill("Python", SkillCategory::Language),
                skill("Java / Spring Boot", SkillCategory::Framework),
                skill("TypeScript", SkillCategory::Language),
                skill("React Native", SkillCategory::Framework),
                skill("AWS / Vercel", SkillCategory::Infra),
                skill("SQL / PostgreSQL", SkillCategory::Database),
                skill("AI Orchestration", SkillCategory::Infra),
                skill("Machine Learning", SkillCategory::Infra),
                skill("System Architecture", SkillCategory::Infra),
                skill("React / Next.js", SkillCategory::Framework),
            ],
            experience: vec![
                Experience {
                    role: "Co-Founder & Lead Software Engineer".into(),
                    company: "LUDA BLACK".into(),
                    period: "2024 - Present".into(),
                    description: "Hybrid venture running a product incubator for in-house \
                                  startups alongside a software agency for business clients."
                        .into(),
                    tech: tags(&["React Native", "Spring Boot", "AWS", "OpenAI API", "Next.js"]),
                },
                Experience {
                    role: "Software Engineering Intern".into(),
                    company: "Telkom".into(),
                    period: "2025 - Present".into(),
                    description: "Full-stack work for the Credit Management division: C# .NET \
                                  Core web apps, REST APIs, and SQL Server reporting."
                        .into(),
                    tech: tags(&["C#", ".NET Core", "SQL Server", "Azure DevOps"]),
                },
            ],
        }
    }
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|t| t.to_string()).collect()
}

fn skill(name: &str, category: SkillCategory) -> Skill {
    Skill {
        name: name.to_string(),
        category,
    }
}
