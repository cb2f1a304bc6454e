use std::cell::Cell;
use std::rc::Rc;

/// Shared hit counter. Lasers add to it, the HUD reads it.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard(Rc<Cell<u32>>);

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }

    pub fn add_point(&self) {
        self.0.set(self.0.get() + 1);
    }
}
