// This file is only compiled during tests

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::input::{Button, InputSource};

/// Input source fed by the test. Each queued press is reported once.
#[derive(Clone, Default)]
pub struct ScriptedInput {
    pending: Arc<Mutex<HashSet<Button>>>,
}

impl ScriptedInput {
    pub fn press(&self, button: Button) {
        self.pending.lock().unwrap().insert(button);
    }

    pub fn is_idle(&self) -> bool {
        self.pending.lock().unwrap().is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn was_just_pressed(&mut self, button: Button) -> bool {
        self.pending.lock().unwrap().remove(&button)
    }
}
