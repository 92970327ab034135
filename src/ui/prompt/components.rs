// src/ui/prompt/components.rs
//
// Prompt overlay parts and layout.

use bevy::prelude::*;

use crate::interaction::components::InteractionPrompt;

/// Width of the prompt column; the column is centred on the projected anchor.
pub const PROMPT_WIDTH_PX: f32 = 240.0;

/// Which piece of the prompt overlay a UI node is.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPart {
    Root,
    Label,
    ProgressTrack,
    ProgressFill,
}

/// Where and what to draw for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromptLayout {
    /// Top-left corner of the prompt column in viewport pixels.
    pub position: Vec2,
    pub label: Option<&'static str>,
    pub fill_percent: Option<f32>,
}

impl PromptLayout {
    /// Lays out the prompt around its projected anchor.
    ///
    /// Returns `None` when there is nothing to draw or the anchor is off screen.
    pub fn from_prompt(
        prompt: &InteractionPrompt,
        project: impl FnOnce(Vec3) -> Option<Vec2>,
    ) -> Option<Self> {
        if prompt.text.is_none() && prompt.progress.is_none() {
            return None;
        }
        let viewport = project(prompt.anchor?)?;
        Some(Self {
            position: Vec2::new(viewport.x - PROMPT_WIDTH_PX * 0.5, viewport.y),
            label: prompt.text,
            fill_percent: prompt.progress.map(|percent| percent.clamp(0.0, 100.0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_only_prompt_draws_a_bar_without_label() {
        let prompt = InteractionPrompt {
            text: None,
            anchor: Some(Vec3::new(1.0, 0.8, 0.0)),
            progress: Some(25.0),
        };
        let layout = PromptLayout::from_prompt(&prompt, |_| Some(Vec2::new(400.0, 300.0)))
            .expect("visible prompt");
        assert_eq!(layout.position, Vec2::new(280.0, 300.0));
        assert_eq!(layout.label, None);
        assert_eq!(layout.fill_percent, Some(25.0));
    }

    #[test]
    fn hidden_or_off_screen_prompts_have_no_layout() {
        let hidden = InteractionPrompt::default();
        assert_eq!(PromptLayout::from_prompt(&hidden, |_| Some(Vec2::ZERO)), None);

        let behind = InteractionPrompt {
            text: Some("Harvest"),
            anchor: Some(Vec3::Z * 5.0),
            progress: None,
        };
        assert_eq!(PromptLayout::from_prompt(&behind, |_| None), None);
    }
}
