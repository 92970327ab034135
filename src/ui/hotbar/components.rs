// src/ui/hotbar/components.rs
//
// Hotbar slot nodes and the icon handles they draw.

use std::collections::HashMap;

use bevy::prelude::*;

/// A slot box; `index` is the inventory slot it mirrors.
#[derive(Component, Debug, Clone, Copy)]
pub struct HotbarSlot {
    pub index: usize,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct HotbarIcon {
    pub index: usize,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct HotbarCount {
    pub index: usize,
}

/// Icon images keyed by the inventory's icon path. Only files present on disk are loaded.
#[derive(Resource, Debug, Default)]
pub struct HotbarIcons {
    by_path: HashMap<String, Handle<Image>>,
}

impl HotbarIcons {
    pub fn insert(&mut self, path: &str, handle: Handle<Image>) {
        self.by_path.insert(path.to_string(), handle);
    }

    pub fn get(&self, path: &str) -> Option<&Handle<Image>> {
        self.by_path.get(path)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }
}
