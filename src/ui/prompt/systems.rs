// src/ui/prompt/systems.rs
//
// Systems for spawning the prompt overlay and moving it with the target.

use bevy::prelude::*;

use crate::{interaction::components::InteractionPrompt, player::components::Player};

use super::components::{PromptLayout, PromptPart, PROMPT_WIDTH_PX};

// Visual constants
const LABEL_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.6);
const LABEL_COLOR: Color = Color::WHITE;
const TRACK_COLOR: Color = Color::srgba(0.15, 0.15, 0.15, 0.8);
const FILL_COLOR: Color = Color::srgb(0.35, 0.8, 0.3);
const FONT_SIZE: f32 = 18.0;
const BAR_WIDTH_PX: f32 = 120.0;
const BAR_HEIGHT_PX: f32 = 10.0;

/// Spawns the hidden prompt column: a label above a progress bar.
pub fn spawn_prompt_ui(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(PROMPT_WIDTH_PX),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(4.0),
                display: Display::None,
                ..default()
            },
            ZIndex(50),
            PromptPart::Root,
        ))
        .with_children(|column| {
            column.spawn((
                Node {
                    padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                    ..default()
                },
                BackgroundColor(LABEL_BACKGROUND),
                Text::new(""),
                TextFont {
                    font_size: FONT_SIZE,
                    ..default()
                },
                TextColor(LABEL_COLOR),
                PromptPart::Label,
            ));
            column
                .spawn((
                    Node {
                        width: Val::Px(BAR_WIDTH_PX),
                        height: Val::Px(BAR_HEIGHT_PX),
                        ..default()
                    },
                    BackgroundColor(TRACK_COLOR),
                    PromptPart::ProgressTrack,
                ))
                .with_children(|track| {
                    track.spawn((
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(FILL_COLOR),
                        PromptPart::ProgressFill,
                    ));
                });
        });
}

/// Projects the prompt anchor into the viewport and shows the parts the prompt needs.
pub fn update_prompt_ui(
    prompt: Res<InteractionPrompt>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Player>>,
    mut parts: Query<(&PromptPart, &mut Node)>,
    mut labels: Query<&mut Text, With<PromptPart>>,
) {
    let layout = camera_query.single().ok().and_then(|(camera, camera_transform)| {
        PromptLayout::from_prompt(&prompt, |point| {
            camera.world_to_viewport(camera_transform, point).ok()
        })
    });

    for (part, mut node) in &mut parts {
        match (part, layout) {
            (PromptPart::Root, None) => node.display = Display::None,
            (PromptPart::Root, Some(layout)) => {
                node.display = Display::Flex;
                node.left = Val::Px(layout.position.x);
                node.top = Val::Px(layout.position.y);
            }
            (PromptPart::Label, layout) => {
                node.display = if layout.and_then(|l| l.label).is_some() {
                    Display::Flex
                } else {
                    Display::None
                };
            }
            (PromptPart::ProgressTrack, layout) => {
                node.display = if layout.and_then(|l| l.fill_percent).is_some() {
                    Display::Flex
                } else {
                    Display::None
                };
            }
            (PromptPart::ProgressFill, layout) => {
                let percent = layout.and_then(|l| l.fill_percent).unwrap_or(0.0);
                node.width = Val::Percent(percent);
            }
        }
    }

    let label = layout.and_then(|l| l.label).unwrap_or_default();
    for mut text in &mut labels {
        if text.0 != label {
            text.0 = label.to_string();
        }
    }
}
