//! Built-in content of the learning path: sections, the installation
//! checklist and the models quiz.

use crate::model::{
    InstallationChecklist, QuizOption, QuizQuestion, QuizSession, Section, SectionGroup, StepId,
    StepItem,
};

/// Key prefix of the models quiz.
pub const MODELS_QUIZ_PREFIX: &str = "models_quiz";

/// Ids of the standard installation steps, in checklist order.
pub const INSTALLATION_STEP_IDS: [&str; 8] = [
    "virtualenv",
    "django",
    "drf",
    "project",
    "app",
    "settings",
    "migrate",
    "github",
];

const SECTIONS: &[Section] = &[
    Section::new("introduction", "Introduction to DRF", SectionGroup::GettingStarted, true),
    Section::new("installation", "Installation & Setup", SectionGroup::GettingStarted, true),
    Section::new("models", "Models", SectionGroup::GettingStarted, true),
    Section::new("serializers", "Serializers", SectionGroup::CoreConcepts, true),
    Section::new("views", "Views & ViewSets", SectionGroup::CoreConcepts, true),
    Section::new("routers", "Routers & URLs", SectionGroup::CoreConcepts, false),
    Section::new("authentication", "Authentication", SectionGroup::CoreConcepts, false),
    Section::new("permissions", "Permissions", SectionGroup::CoreConcepts, false),
    Section::new("viewsets", "ViewSets & Generics", SectionGroup::AdvancedTopics, false),
    Section::new("filtering", "Filtering & Pagination", SectionGroup::AdvancedTopics, false),
    Section::new("testing", "Testing", SectionGroup::AdvancedTopics, false),
    Section::new("integration", "Integration", SectionGroup::AdvancedTopics, false),
    Section::new("advanced", "Advanced Concepts", SectionGroup::AdvancedTopics, false),
    Section::new("practice", "Practice Exercises", SectionGroup::Practice, false),
    Section::new("interview", "Interview Prep", SectionGroup::Practice, false),
];

/// Every section of the learning path, in sidebar order.
#[must_use]
pub fn sections() -> &'static [Section] {
    SECTIONS
}

#[must_use]
pub fn section(slug: &str) -> Option<&'static Section> {
    SECTIONS.iter().find(|section| section.slug() == slug)
}

/// The standard eight-step setup checklist, all steps pending.
#[must_use]
pub fn installation_checklist() -> InstallationChecklist {
    InstallationChecklist::from_known(installation_steps())
}

fn installation_steps() -> Vec<StepItem> {
    [
        (
            "virtualenv",
            "Set up Virtual Environment",
            "Create and activate a virtual environment for your project",
        ),
        ("django", "Install Django", "Install Django framework using pip"),
        (
            "drf",
            "Install Django REST Framework",
            "Install Django REST Framework package",
        ),
        (
            "project",
            "Create Django Project",
            "Create a new Django project using django-admin",
        ),
        (
            "app",
            "Create Django App",
            "Create a new app within your Django project",
        ),
        (
            "settings",
            "Configure REST Framework",
            "Add REST Framework to INSTALLED_APPS and configure it",
        ),
        (
            "migrate",
            "Run Migrations",
            "Apply database migrations to set up your database",
        ),
        (
            "github",
            "Connect with GitHub",
            "Initialize git repository and push to GitHub",
        ),
    ]
    .into_iter()
    .map(|(id, title, description)| StepItem::new(StepId::known(id), title, description))
    .collect()
}

/// The five-question models quiz.
#[must_use]
pub fn models_quiz() -> QuizSession {
    QuizSession::from_known(MODELS_QUIZ_PREFIX, models_quiz_questions())
}

#[must_use]
pub fn models_quiz_questions() -> Vec<QuizQuestion> {
    fn question(
        question: &str,
        options: [&str; 4],
        correct_answer: &str,
        explanation: &str,
    ) -> QuizQuestion {
        QuizQuestion {
            question: question.to_string(),
            options: ["a", "b", "c", "d"]
                .into_iter()
                .zip(options)
                .map(|(id, text)| QuizOption::new(id, text))
                .collect(),
            correct_answer: correct_answer.to_string(),
            explanation: explanation.to_string(),
        }
    }

    vec![
        question(
            "What is the purpose of a Django model?",
            [
                "To handle HTTP requests and responses",
                "To define database table structure and relationships",
                "To render HTML templates",
                "To configure URL routing",
            ],
            "b",
            "Django models define the structure of database tables and the relationships between \
             tables. They map Python classes to database tables and instances of those classes to \
             rows in the tables.",
        ),
        question(
            "Which of the following is NOT a common field type in Django models?",
            ["CharField", "BooleanField", "ResponseField", "DateTimeField"],
            "c",
            "ResponseField does not exist in Django's model field types. Common field types \
             include CharField, TextField, IntegerField, BooleanField, DateField, DateTimeField, \
             etc.",
        ),
        question(
            "What does the '__str__' method in a Django model do?",
            [
                "Creates a string representation of the model for the database",
                "Validates the model fields before saving",
                "Provides a human-readable representation of the model instance",
                "Converts the model to a JSON string",
            ],
            "c",
            "The __str__ method in a Django model defines the human-readable representation of \
             the object. This is displayed in the Django admin interface and when printing an \
             instance of the model.",
        ),
        question(
            "How do you define a relationship between two models where one model has a single \
             reference to another model?",
            ["ManyToManyField", "ForeignKey", "OneToOneField", "LinkField"],
            "b",
            "ForeignKey is used to create a many-to-one relationship. It allows a model to have a \
             reference to another model, such as a Book having an author (where many books can \
             have the same author).",
        ),
        question(
            "What parameter is required when defining a ForeignKey field in a Django model?",
            ["verbose_name", "related_name", "on_delete", "blank"],
            "c",
            "The on_delete parameter is required when defining a ForeignKey relationship. It \
             specifies what happens when the referenced object is deleted. Common options include \
             CASCADE, PROTECT, SET_NULL, etc.",
        ),
    ]
}
