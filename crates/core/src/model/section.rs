use crate::model::ids::ItemKey;

/// Sidebar grouping of the learning path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionGroup {
    GettingStarted,
    CoreConcepts,
    AdvancedTopics,
    Practice,
}

impl SectionGroup {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SectionGroup::GettingStarted => "Getting Started",
            SectionGroup::CoreConcepts => "Core Concepts",
            SectionGroup::AdvancedTopics => "Advanced Topics",
            SectionGroup::Practice => "Practice & Interview",
        }
    }
}

/// One page of the learning path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    slug: &'static str,
    title: &'static str,
    group: SectionGroup,
    tracks_visit: bool,
}

impl Section {
    #[must_use]
    pub const fn new(
        slug: &'static str,
        title: &'static str,
        group: SectionGroup,
        tracks_visit: bool,
    ) -> Self {
        Self {
            slug,
            title,
            group,
            tracks_visit,
        }
    }

    #[must_use]
    pub fn slug(&self) -> &'static str {
        self.slug
    }

    /// Label written to the progress store's current section.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }

    #[must_use]
    pub fn group(&self) -> SectionGroup {
        self.group
    }

    /// Key recorded when the page is opened, if the page counts visits.
    #[must_use]
    pub fn visit_key(&self) -> Option<ItemKey> {
        if self.tracks_visit {
            ItemKey::new(self.slug).ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_key_only_for_tracked_sections() {
        let models = Section::new("models", "Models", SectionGroup::GettingStarted, true);
        assert_eq!(models.visit_key().unwrap().as_str(), "models");

        let routers = Section::new("routers", "Routers & URLs", SectionGroup::CoreConcepts, false);
        assert!(routers.visit_key().is_none());
    }
}
