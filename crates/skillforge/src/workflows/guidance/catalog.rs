use super::domain::{CareerDefinition, CareerId};

/// The set of careers the matcher ranks against. Admin CRUD lives
/// outside this crate; the catalog is read-only here.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerCatalog {
    careers: Vec<CareerDefinition>,
}

impl CareerCatalog {
    pub fn new(careers: Vec<CareerDefinition>) -> Self {
        Self { careers }
    }

    /// Active careers in catalog order. Ranking relies on this order
    /// being stable for tie-breaks.
    pub fn active(&self) -> impl Iterator<Item = &CareerDefinition> {
        self.careers.iter().filter(|career| career.active)
    }

    pub fn get(&self, id: &CareerId) -> Option<&CareerDefinition> {
        self.careers.iter().find(|career| &career.id == id)
    }

    pub fn len(&self) -> usize {
        self.careers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.careers.is_empty()
    }

    /// The six launch careers.
    pub fn standard() -> Self {
        let career = |slug: &str,
                      name: &str,
                      description: &str,
                      skills: &[&str],
                      roadmap: &[&str],
                      total_xp: u32| CareerDefinition {
            id: CareerId(slug.to_string()),
            name: name.to_string(),
            description: description.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            roadmap: roadmap.iter().map(|s| s.to_string()).collect(),
            total_xp,
            active: true,
        };

        Self::new(vec![
            career(
                "data-scientist",
                "Data Scientist",
                "Turn raw data into decisions with statistics and machine learning.",
                &["Python", "SQL", "Statistics", "Machine Learning"],
                &["Foundations", "SQL & Databases", "Machine Learning"],
                950,
            ),
            career(
                "ux-designer",
                "UX Designer",
                "Design products people understand on the first try.",
                &["Figma", "User Research", "Prototyping", "Interaction Design"],
                &["Design Principles", "User Research", "Prototyping & Testing"],
                800,
            ),
            career(
                "software-engineer",
                "Software Engineer",
                "Build and ship reliable software systems.",
                &["Programming", "Data Structures", "Testing", "System Design"],
                &["Programming Fundamentals", "Data Structures & Algorithms", "Projects"],
                900,
            ),
            career(
                "digital-marketing",
                "Digital Marketing Specialist",
                "Grow audiences across search, social, and email channels.",
                &["SEO", "Content Strategy", "Analytics", "Copywriting"],
                &["Marketing Foundations", "Channels & Campaigns", "Analytics"],
                700,
            ),
            career(
                "cybersecurity-analyst",
                "Cybersecurity Analyst",
                "Defend systems by finding weaknesses before attackers do.",
                &["Networking", "Threat Analysis", "Incident Response", "Linux"],
                &["Security Foundations", "Network Defense", "Incident Response"],
                1000,
            ),
            career(
                "product-manager",
                "Product Manager",
                "Steer products from discovery through delivery.",
                &["Roadmapping", "User Interviews", "Prioritization", "Analytics"],
                &["Product Foundations", "Discovery", "Delivery"],
                750,
            ),
        ])
    }
}
