pub mod floating;

use ratatui::prelude::Rect;
use std::collections::BTreeMap;

/// Screen regions keyed by an id, rebuilt each frame for hit testing.
#[derive(Debug, Clone)]
pub struct RegionMap<T: Copy + Eq + Ord> {
    regions: BTreeMap<T, Rect>,
}

impl<T: Copy + Eq + Ord> Default for RegionMap<T> {
    fn default() -> Self {
        Self {
            regions: BTreeMap::new(),
        }
    }
}

impl<T: Copy + Eq + Ord> RegionMap<T> {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn set(&mut self, id: T, rect: Rect) {
        self.regions.insert(id, rect);
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<T> {
        self.regions
            .iter()
            .find(|(_, rect)| rect_contains(**rect, column, row))
            .map(|(id, _)| *id)
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}
