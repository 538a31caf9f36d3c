use std::collections::HashMap;

use anyhow::{Context, Result};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};
use speakbox_types::HotkeyAction;

/// Parse a chord such as `ctrl+shift+c` or `F1`
pub fn parse_chord(chord: &str) -> Result<HotKey> {
    chord
        .trim()
        .parse::<HotKey>()
        .with_context(|| format!("Invalid hotkey '{chord}'"))
}

pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    bindings: HashMap<HotkeyAction, HotKey>,
}

impl HotkeyManager {
    pub fn new() -> Result<Self> {
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        Ok(Self {
            manager,
            bindings: HashMap::new(),
        })
    }

    /// Register every binding that can be registered. Failures are returned so
    /// the caller can report them; those actions stay reachable from the panel.
    pub fn register_all<'a>(
        &mut self,
        bindings: impl IntoIterator<Item = (HotkeyAction, &'a str)>,
    ) -> Vec<(HotkeyAction, anyhow::Error)> {
        bindings
            .into_iter()
            .filter_map(|(action, chord)| self.register(action, chord).err().map(|e| (action, e)))
            .collect()
    }

    pub fn register(&mut self, action: HotkeyAction, chord: &str) -> Result<()> {
        let hotkey = parse_chord(chord)?;

        self.manager
            .register(hotkey)
            .with_context(|| format!("Failed to register hotkey '{chord}'"))?;

        if let Some(previous) = self.bindings.insert(action, hotkey) {
            let _ = self.manager.unregister(previous);
        }
        tracing::info!("Hotkey {chord} -> {action:?}");
        Ok(())
    }

    /// Replace the chord of `action`. The old chord stays active if the new
    /// one cannot be registered.
    pub fn rebind(&mut self, action: HotkeyAction, chord: &str) -> Result<()> {
        let hotkey = parse_chord(chord)?;
        if self.bindings.get(&action) == Some(&hotkey) {
            return Ok(());
        }
        self.register(action, chord)
    }

    /// Check if a hotkey was pressed (non-blocking)
    pub fn poll(&self) -> Option<HotkeyAction> {
        let receiver = GlobalHotKeyEvent::receiver();
        while let Ok(event) = receiver.try_recv() {
            if event.state != HotKeyState::Pressed {
                continue;
            }
            let action = self
                .bindings
                .iter()
                .find(|(_, hotkey)| hotkey.id() == event.id)
                .map(|(action, _)| *action);
            match action {
                Some(action) => return Some(action),
                None => tracing::debug!("Hotkey event with unknown ID: {:?}", event.id),
            }
        }
        None
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        for hotkey in self.bindings.values() {
            let _ = self.manager.unregister(*hotkey);
        }
    }
}
