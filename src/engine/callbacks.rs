//! Engine-level tab notifications.

use crate::tab::Tab;

/// Callback receiving the affected tab.
pub type TabCallback = Box<dyn FnMut(&Tab) + Send>;

/// What happened to a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabEvent {
    Added,
    Removed,
    Focused,
    Blurred,
}

/// Optional engine callbacks, one slot per [`TabEvent`].
#[derive(Default)]
pub(crate) struct TabCallbacks {
    pub(crate) on_add_tab: Option<TabCallback>,
    pub(crate) on_remove_tab: Option<TabCallback>,
    pub(crate) on_focus_tab: Option<TabCallback>,
    pub(crate) on_blur_tab: Option<TabCallback>,
}

impl TabCallbacks {
    pub(crate) fn slot(&mut self, event: TabEvent) -> &mut Option<TabCallback> {
        match event {
            TabEvent::Added => &mut self.on_add_tab,
            TabEvent::Removed => &mut self.on_remove_tab,
            TabEvent::Focused => &mut self.on_focus_tab,
            TabEvent::Blurred => &mut self.on_blur_tab,
        }
    }

    /// Run the tab's own hook, then the engine callback.
    pub(crate) fn emit(&mut self, event: TabEvent, tab: &Tab) {
        match event {
            TabEvent::Added => tab.notify_add(),
            TabEvent::Removed => tab.notify_remove(),
            TabEvent::Focused => tab.notify_focus(),
            TabEvent::Blurred => tab.notify_blur(),
        }
        if let Some(callback) = self.slot(event) {
            callback(tab);
        }
    }

    fn registered(&self) -> Vec<&'static str> {
        [
            ("on_add_tab", self.on_add_tab.is_some()),
            ("on_remove_tab", self.on_remove_tab.is_some()),
            ("on_focus_tab", self.on_focus_tab.is_some()),
            ("on_blur_tab", self.on_blur_tab.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

impl std::fmt::Debug for TabCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.registered()).finish()
    }
}
