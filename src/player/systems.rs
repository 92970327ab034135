//! Systems turning keyboard and mouse input into player intents.
use bevy::{
    input::ButtonInput,
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use crate::{
    interaction::dispatcher::{UseRequested, UseSource},
    inventory::{components::SLOT_COUNT, events::SlotKeyPressed},
    player::components::LookMode,
};

const SLOT_KEYS: [KeyCode; SLOT_COUNT] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
];

/// Emits slot and use requests. A click only counts as a use once look mode is engaged.
pub fn read_interaction_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    look: Res<LookMode>,
    mut slot_presses: MessageWriter<SlotKeyPressed>,
    mut uses: MessageWriter<UseRequested>,
) {
    for (index, key) in SLOT_KEYS.iter().enumerate() {
        if keyboard.just_pressed(*key) {
            slot_presses.write(SlotKeyPressed { index });
        }
    }

    if keyboard.just_pressed(KeyCode::KeyE) {
        uses.write(UseRequested {
            source: UseSource::Key,
        });
    }

    if look.engaged && mouse_buttons.just_pressed(MouseButton::Left) {
        uses.write(UseRequested {
            source: UseSource::Pointer,
        });
    }
}

/// Locks the cursor on click and releases it on Escape.
pub fn update_look_mode(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut look: ResMut<LookMode>,
    cursor_options: Option<Single<&mut CursorOptions>>,
) {
    let engaged = if !look.engaged && mouse_buttons.just_pressed(MouseButton::Left) {
        true
    } else if look.engaged && keyboard.just_pressed(KeyCode::Escape) {
        false
    } else {
        return;
    };

    look.engaged = engaged;
    info!("Look mode {}", if engaged { "engaged" } else { "released" });

    if let Some(mut cursor_options) = cursor_options {
        cursor_options.visible = !engaged;
        cursor_options.grab_mode = if engaged {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::None
        };
    }
}
