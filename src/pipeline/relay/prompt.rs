use crate::models::PortfolioContext;

pub const PERSONA_PREAMBLE: &str = "You are the digital twin of a software engineer, answering \
visitors on their portfolio website. Refer to the engineer in the third person by name. Stay \
on the topics below: their projects, skills, experience, and how to get in touch.";

pub const STYLE_DIRECTIVE: &str = "STYLE:\n\
- Warm, friendly, and concise: 2-4 sentences per answer.\n\
- Only state facts found in the context above.\n\
- If you are not sure or the context does not say, be honest about it and suggest emailing.\n\
- Never invent projects, employers, dates, or contact details.";

/// Build the instruction prompt sent as the system turn.
///
/// Layout: preamble, identity, projects, skills, experience, style directive.
pub fn build_instruction_prompt(context: &PortfolioContext) -> String {
    let site = &context.site;
    let mut prompt = String::new();

    prompt.push_str(PERSONA_PREAMBLE);
    prompt.push_str("\n\n");

    prompt.push_str("<IDENTITY>\n");
    prompt.push_str(&format!("Name: {}\n", site.name));
    prompt.push_str(&format!("Role: {}\n", site.role));
    prompt.push_str(&format!("Email: {}\n", site.email));
    prompt.push_str(&format!("Location: {}\n", site.location));
    if !site.bio.is_empty() {
        prompt.push_str(&format!("Bio: {}\n", site.bio));
    }
    prompt.push_str("</IDENTITY>\n\n");

    if !context.projects.is_empty() {
        prompt.push_str("<PROJECTS>\n");
        for project in &context.projects {
            prompt.push_str(&format!(
                "- {} ({}): {} [Tags: {}]\n",
                project.title,
                project.year,
                project.long_description,
                project.tags.join(", ")
            ));
        }
        prompt.push_str("</PROJECTS>\n\n");
    }

    if !context.skills.is_empty() {
        prompt.push_str("<SKILLS>\n");
        prompt.push_str(&context.skill_names().join(", "));
        prompt.push_str("\n</SKILLS>\n\n");
    }

    if !context.experience.is_empty() {
        prompt.push_str("<EXPERIENCE>\n");
        for role in &context.experience {
            prompt.push_str(&format!(
                "- {} at {} ({}): {}\n",
                role.role, role.company, role.period, role.description
            ));
        }
        prompt.push_str("</EXPERIENCE>\n\n");
    }

    prompt.push_str(STYLE_DIRECTIVE);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_projects_with_year_and_tags() {
        let prompt = build_instruction_prompt(&PortfolioContext::default());
        assert!(prompt.contains("Metropoint (2023)"));
        assert!(prompt.contains("Spring Boot"));
        assert!(prompt.contains("Newsly AI (2025)"));
    }

    #[test]
    fn prompt_contains_identity_and_skills() {
        let ctx = PortfolioContext::default();
        let prompt = build_instruction_prompt(&ctx);
        assert!(prompt.contains(&ctx.site.email));
        assert!(prompt.contains(&ctx.site.location));
        assert!(prompt.contains("<SKILLS>\nPython, Java / Spring Boot"));
    }

    #[test]
    fn prompt_starts_with_preamble_and_ends_with_style() {
        let prompt = build_instruction_prompt(&PortfolioContext::default());
        assert!(prompt.starts_with(PERSONA_PREAMBLE));
        assert!(prompt.ends_with(STYLE_DIRECTIVE));
        assert!(STYLE_DIRECTIVE.contains("2-4 sentences"));
        assert!(STYLE_DIRECTIVE.contains("honest"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut ctx = PortfolioContext::default();
        ctx.projects.clear();
        ctx.skills.clear();
        ctx.experience.clear();
        let prompt = build_instruction_prompt(&ctx);
        assert!(!prompt.contains("<PROJECTS>"));
        assert!(!prompt.contains("<SKILLS>"));
        assert!(!prompt.contains("<EXPERIENCE>"));
        assert!(prompt.contains("<IDENTITY>"));
    }
}
