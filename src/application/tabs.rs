// Tab panels and collapsible sections - Visibility state of the page
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub const ACTIVE_LABEL_CLASS: &str = "tab-button-active";

#[derive(Debug, Error, PartialEq)]
pub enum TabError {
    #[error("unknown tab group {0:?}")]
    UnknownGroup(String),
    #[error("no panel {tab:?} in group {group:?}")]
    UnknownPanel { group: String, tab: String },
}

pub trait TabController {
    /// Hide every panel of `group_class`, show `tab_id` and mark its label active.
    fn activate_tab(&mut self, group_class: &str, tab_id: &str) -> Result<(), TabError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: String,
    pub label_id: String,
    pub visible: bool,
    pub label_active: bool,
}

impl Panel {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label_id: format!("{id}_label"),
            id,
            visible: false,
            label_active: false,
        }
    }
}

/// In-memory panel groups, keyed by group class.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelBoard {
    groups: BTreeMap<String, Vec<Panel>>,
}

impl PanelBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group<I, S>(&mut self, group_class: &str, panel_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.insert(
            group_class.to_string(),
            panel_ids.into_iter().map(Panel::new).collect(),
        );
    }

    pub fn panels(&self, group_class: &str) -> &[Panel] {
        self.groups.get(group_class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn visible(&self, group_class: &str) -> Option<&Panel> {
        self.panels(group_class).iter().find(|panel| panel.visible)
    }
}

impl TabController for PanelBoard {
    fn activate_tab(&mut self, group_class: &str, tab_id: &str) -> Result<(), TabError> {
        let panels = self
            .groups
            .get_mut(group_class)
            .ok_or_else(|| TabError::UnknownGroup(group_class.to_string()))?;

        if !panels.iter().any(|panel| panel.id == tab_id) {
            return Err(TabError::UnknownPanel {
                group: group_class.to_string(),
                tab: tab_id.to_string(),
            });
        }

        for panel in panels.iter_mut() {
            let active = panel.id == tab_id;
            panel.visible = active;
            panel.label_active = active;
        }
        Ok(())
    }
}

/// A content section that expands and collapses, swapping its add/remove icons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collapsible {
    pub prefix: String,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionVisibility {
    pub prefix: String,
    pub content: bool,
    pub add_icon: bool,
    pub remove_icon: bool,
}

impl Collapsible {
    pub fn new(prefix: impl Into<String>, expanded: bool) -> Self {
        Self {
            prefix: prefix.into(),
            expanded,
        }
    }

    pub fn toggle(&mut self) -> SectionVisibility {
        self.expanded = !self.expanded;
        self.visibility()
    }

    pub fn visibility(&self) -> SectionVisibility {
        SectionVisibility {
            prefix: self.prefix.clone(),
            content: self.expanded,
            add_icon: !self.expanded,
            remove_icon: self.expanded,
        }
    }
}
