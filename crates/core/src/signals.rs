//! Maps simulated terminal and editor events to installation step ids.
//!
//! Commands are matched by substring. Rules are tried in order and the first
//! match wins, so more specific patterns come before the ones they contain
//! (`pip install djangorestframework` before `pip install django`).

use crate::model::StepId;

/// An event from one of the simulated widgets on the installation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallationSignal {
    /// A line entered in the simulated terminal.
    Command(String),
    /// The simulated editor saved `settings.py`.
    SettingsEdited,
    /// The simulated GitHub connector created a repository.
    RepositoryCreated,
}

const COMMAND_RULES: &[(&[&str], &str)] = &[
    (&["python -m venv", "virtualenv"], "virtualenv"),
    (&["pip install djangorestframework"], "drf"),
    (&["pip install django"], "django"),
    (&["django-admin startproject"], "project"),
    (&["python manage.py startapp"], "app"),
    (&["python manage.py migrate"], "migrate"),
    (&["git init", "git remote add"], "github"),
];

/// Step completed by a terminal command, if any.
#[must_use]
pub fn match_command(command: &str) -> Option<StepId> {
    COMMAND_RULES
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|pattern| command.contains(pattern)))
        .map(|(_, step)| StepId::known(*step))
}

impl InstallationSignal {
    /// Step this signal completes, if any.
    #[must_use]
    pub fn step(&self) -> Option<StepId> {
        match self {
            InstallationSignal::Command(command) => match_command(command),
            InstallationSignal::SettingsEdited => Some(StepId::known("settings")),
            InstallationSignal::RepositoryCreated => Some(StepId::known("github")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(command: &str) -> Option<String> {
        match_command(command).map(|id| id.to_string())
    }

    #[test]
    fn recognizes_setup_commands() {
        assert_eq!(step("python -m venv venv").as_deref(), Some("virtualenv"));
        assert_eq!(step("pip install virtualenv").as_deref(), Some("virtualenv"));
        assert_eq!(step("pip install django").as_deref(), Some("django"));
        assert_eq!(step("django-admin startproject drf_tutorial .").as_deref(), Some("project"));
        assert_eq!(step("python manage.py startapp api").as_deref(), Some("app"));
        assert_eq!(step("python manage.py migrate").as_deref(), Some("migrate"));
        assert_eq!(step("git init").as_deref(), Some("github"));
        assert_eq!(
            step("git remote add origin git@github.com:me/drf.git").as_deref(),
            Some("github")
        );
    }

    #[test]
    fn rest_framework_install_is_not_shadowed_by_django() {
        assert_eq!(step("pip install djangorestframework").as_deref(), Some("drf"));
    }

    #[test]
    fn unrelated_commands_match_nothing() {
        assert_eq!(step("ls -la"), None);
        assert_eq!(step(""), None);
    }

    #[test]
    fn widget_signals_map_to_steps() {
        assert_eq!(
            InstallationSignal::SettingsEdited.step().unwrap().as_str(),
            "settings"
        );
        assert_eq!(
            InstallationSignal::RepositoryCreated.step().unwrap().as_str(),
            "github"
        );
        assert_eq!(
            InstallationSignal::Command("pip install django".into())
                .step()
                .unwrap()
                .as_str(),
            "django"
        );
    }
}
