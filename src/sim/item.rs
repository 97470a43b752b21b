//! Static pickups

use glam::Vec2;

use super::craft::Craft;
use crate::consts::ITEM_SIZE;

#[derive(Debug, Clone)]
pub struct Item {
    pub pos: Vec2,
    pub size: f32,
}

impl Item {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: ITEM_SIZE,
        }
    }

    /// Items are inert; kept so every collection follows the same tick shape
    pub fn update(&mut self) {}

    /// Picked up once the craft's box covers the item's point
    pub fn is_collected_by(&self, craft: &Craft) -> bool {
        craft.contains(self.pos)
    }
}
