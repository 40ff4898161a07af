// Key remapping table

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Which physical inputs trigger which action.
///
/// Each source drives at most one action; an action may have any number
/// of sources (the defaults give jump two keys).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyBindings {
    map: HashMap<InputSource, Action>,
}

impl KeyBindings {
    /// Arrow keys plus Space
    pub fn standard() -> Self {
        default_bindings().into_iter().collect()
    }

    /// Route `source` to `action`, replacing whatever it drove before
    pub fn bind(&mut self, source: InputSource, action: Action) -> Option<Action> {
        self.map.insert(source, action)
    }

    pub fn action_for(&self, source: InputSource) -> Option<Action> {
        self.map.get(&source).copied()
    }

    pub fn is_bound(&self, source: InputSource) -> bool {
        self.map.contains_key(&source)
    }
}

impl FromIterator<(InputSource, Action)> for KeyBindings {
    fn from_iter<I: IntoIterator<Item = (InputSource, Action)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}
