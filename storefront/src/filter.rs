//! Listing filter sidebar

/// Selection behavior of a filter group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Radio semantics: exactly one option active after a click
    SingleChoice,
    /// Checkbox semantics: a click toggles the option
    MultiChoice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub id: String,
    pub active: bool,
}

/// One block of the sidebar (e.g. "Size")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroup {
    pub name: String,
    pub kind: FilterKind,
    pub options: Vec<FilterOption>,
    /// Whether the options hidden behind "Show more" are visible
    pub expanded: bool,
}

impl FilterGroup {
    pub fn new<I, S>(name: impl Into<String>, kind: FilterKind, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            options: options
                .into_iter()
                .map(|id| FilterOption {
                    id: id.into(),
                    active: false,
                })
                .collect(),
            expanded: false,
        }
    }

    /// Apply a click on an option; unknown options are ignored
    pub fn click(&mut self, option: &str) -> bool {
        if !self.options.iter().any(|o| o.id == option) {
            return false;
        }
        match self.kind {
            FilterKind::SingleChoice => {
                for o in &mut self.options {
                    o.active = o.id == option;
                }
            }
            FilterKind::MultiChoice => {
                for o in self.options.iter_mut().filter(|o| o.id == option) {
                    o.active = !o.active;
                }
            }
        }
        true
    }

    /// Toggle the hidden options; returns the new button caption
    pub fn toggle_more(&mut self) -> &'static str {
        self.expanded = !self.expanded;
        if self.expanded { "Hide" } else { "Show more" }
    }

    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.options.iter().filter(|o| o.active).map(|o| o.id.as_str())
    }
}

/// Filter sidebar of a listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSidebar {
    open: bool,
    groups: Vec<FilterGroup>,
}

impl FilterSidebar {
    pub fn new(groups: Vec<FilterGroup>) -> Self {
        Self {
            open: false,
            groups,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing also happens through the overlay and "show results"
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut FilterGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Click an option of a group; returns whether anything was clicked
    pub fn click(&mut self, group: &str, option: &str) -> bool {
        self.group_mut(group).is_some_and(|g| g.click(option))
    }

    /// Reset the filters
    ///
    /// Multi-choice options are cleared; single-choice groups keep their
    /// active option since a radio group cannot be empty.
    pub fn clear(&mut self) {
        for group in &mut self.groups {
            if group.kind == FilterKind::MultiChoice {
                for o in &mut group.options {
                    o.active = false;
                }
            }
        }
    }

    /// Apply the filters: the sidebar closes
    pub fn show_results(&mut self) -> Vec<(&str, &str)> {
        self.close();
        self.groups
            .iter()
            .flat_map(|g| g.active().map(move |o| (g.name.as_str(), o)))
            .collect()
    }
}
