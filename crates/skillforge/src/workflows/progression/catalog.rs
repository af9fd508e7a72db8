use super::domain::{ProjectDefinition, ProjectDifficulty, ProjectId};

/// The projects learners can submit against. Admin CRUD lives outside
/// this crate; the workflow only reads `xp_reward` and `active`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCatalog {
    projects: Vec<ProjectDefinition>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<ProjectDefinition>) -> Self {
        Self { projects }
    }

    pub fn get(&self, id: &ProjectId) -> Option<&ProjectDefinition> {
        self.projects.iter().find(|project| &project.id == id)
    }

    pub fn active(&self) -> impl Iterator<Item = &ProjectDefinition> {
        self.projects.iter().filter(|project| project.active)
    }

    /// Seed projects spanning the launch careers.
    pub fn standard() -> Self {
        let project = |slug: &str,
                       title: &str,
                       description: &str,
                       difficulty: ProjectDifficulty,
                       xp_reward: u32| ProjectDefinition {
            id: ProjectId(slug.to_string()),
            title: title.to_string(),
            description: description.to_string(),
            difficulty,
            xp_reward,
            active: true,
        };

        Self::new(vec![
            project(
                "basic-analysis",
                "Basic Data Analysis",
                "Explore a public dataset and present three findings.",
                ProjectDifficulty::Beginner,
                100,
            ),
            project(
                "database-project",
                "Database Design Project",
                "Model and query a normalized relational schema.",
                ProjectDifficulty::Intermediate,
                150,
            ),
            project(
                "ml-prediction",
                "ML Prediction Model",
                "Train and evaluate a prediction model end to end.",
                ProjectDifficulty::Advanced,
                200,
            ),
            project(
                "design-system",
                "Design System",
                "Build a reusable component library in Figma.",
                ProjectDifficulty::Beginner,
                100,
            ),
            project(
                "calculator-app",
                "Calculator App",
                "Ship a small working application with tests.",
                ProjectDifficulty::Beginner,
                80,
            ),
            project(
                "algorithm-visualizer",
                "Algorithm Visualizer",
                "Animate two sorting algorithms side by side.",
                ProjectDifficulty::Intermediate,
                150,
            ),
        ])
    }
}
