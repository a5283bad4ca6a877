mod contact;
mod experience;
mod skills;
mod taxonomy;

pub use contact::{extract_contact, ContactInfo};
pub use experience::extract_experience_years;
pub use skills::{extract_skills, ExtractedSkills, SkillExtractor};
pub use taxonomy::{SkillCategory, SkillTaxonomy, TaxonomyError};

/// All signals pulled from one resume
#[derive(Debug, Clone)]
pub struct ResumeSignals {
    pub skills: ExtractedSkills,
    pub contact_info: ContactInfo,
    pub experience_years: u32,
}

/// Run the three extractors independently over the same raw text
pub fn extract_signals(raw_text: &str, taxonomy: &SkillTaxonomy) -> ResumeSignals {
    ResumeSignals {
        skills: extract_skills(raw_text, taxonomy),
        contact_info: extract_contact(raw_text),
        experience_years: extract_experience_years(raw_text),
    }
}
