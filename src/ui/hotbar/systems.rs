// src/ui/hotbar/systems.rs
//
// Systems for building the hotbar and redrawing it when the inventory changes.

use bevy::prelude::*;

use crate::{
    core::assets::load_if_present,
    inventory::components::{Inventory, SLOT_COUNT},
};

use super::components::{HotbarCount, HotbarIcon, HotbarIcons, HotbarSlot};

// Visual constants
const SLOT_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.1, 0.7);
const SLOT_BORDER: Color = Color::srgb(0.35, 0.35, 0.35);
const SELECTED_BORDER: Color = Color::srgb(1.0, 0.85, 0.3);
const COUNT_COLOR: Color = Color::WHITE;
const SLOT_SIZE_PX: f32 = 64.0;
const ICON_SIZE_PX: f32 = 48.0;

/// Loads the icon for every slot that defines one.
pub fn load_hotbar_icons(
    asset_server: Res<AssetServer>,
    inventory: Res<Inventory>,
    mut icons: ResMut<HotbarIcons>,
) {
    for index in 0..SLOT_COUNT {
        let Some(path) = inventory.slot(index).and_then(|slot| slot.icon()) else {
            continue;
        };
        if icons.get(path).is_some() {
            continue;
        }
        if let Some(handle) = load_if_present::<Image>(&asset_server, path) {
            icons.insert(path, handle);
        }
    }
    info!("Hotbar icons loaded: {}", icons.len());
}

/// Spawns the row of slot boxes along the bottom edge.
pub fn spawn_hotbar(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            column_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|row| {
            for index in 0..SLOT_COUNT {
                row.spawn((
                    Node {
                        width: Val::Px(SLOT_SIZE_PX),
                        height: Val::Px(SLOT_SIZE_PX),
                        border: UiRect::all(Val::Px(2.0)),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(SLOT_BACKGROUND),
                    BorderColor::from(SLOT_BORDER),
                    HotbarSlot { index },
                ))
                .with_children(|slot| {
                    slot.spawn((
                        Node {
                            width: Val::Px(ICON_SIZE_PX),
                            height: Val::Px(ICON_SIZE_PX),
                            display: Display::None,
                            ..default()
                        },
                        ImageNode::default(),
                        HotbarIcon { index },
                    ));
                    slot.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            right: Val::Px(4.0),
                            bottom: Val::Px(2.0),
                            ..default()
                        },
                        Text::new(""),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(COUNT_COLOR),
                        HotbarCount { index },
                    ));
                });
            }
        });
}

/// Redraws icons, counts, and the selection border from the inventory.
///
/// An icon only shows when its count is positive and its image file was found.
pub fn refresh_hotbar(
    inventory: Res<Inventory>,
    icons: Res<HotbarIcons>,
    mut slots: Query<(&HotbarSlot, &mut BorderColor)>,
    mut icon_nodes: Query<(&HotbarIcon, &mut ImageNode, &mut Node)>,
    mut counts: Query<(&HotbarCount, &mut Text)>,
) {
    for (slot, mut border) in &mut slots {
        let selected = inventory.selected() == Some(slot.index);
        *border = BorderColor::from(if selected { SELECTED_BORDER } else { SLOT_BORDER });
    }

    for (icon, mut image, mut node) in &mut icon_nodes {
        let handle = inventory
            .slot_view(icon.index)
            .and_then(|view| view.icon)
            .and_then(|path| icons.get(path));
        match handle {
            Some(handle) => {
                image.image = handle.clone();
                node.display = Display::Flex;
            }
            None => node.display = Display::None,
        }
    }

    for (count, mut text) in &mut counts {
        text.0 = inventory
            .slot_view(count.index)
            .and_then(|view| view.count_label)
            .unwrap_or_default();
    }
}
