//! On-screen score readout.

/// Text shown in the score label.
///
/// # Examples
///
/// ```
/// assert_eq!(quiver::hud::score_label(18), "Score: 18");
/// ```
#[must_use]
pub fn score_label(total: u32) -> String {
    format!("Score: {total}")
}

#[cfg(feature = "render")]
pub use overlay::HudPlugin;

#[cfg(feature = "render")]
mod overlay {
    use bevy::prelude::*;

    use super::score_label;
    use crate::state::GameState;
    use crate::ArcherySet;

    /// Draws the running score in the top-left corner.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct HudPlugin;

    #[derive(Component, Debug)]
    struct ScoreText;

    fn spawn_score_text(mut commands: Commands) {
        commands.spawn((
            ScoreText,
            Name::new("ScoreText"),
            Text::new(score_label(0)),
            TextFont {
                font_size: 28.0,
                ..default()
            },
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                ..default()
            },
        ));
    }

    #[expect(
        clippy::needless_pass_by_value,
        reason = "Bevy system parameters use `Res<T>` by value."
    )]
    fn update_score_text(state: Res<GameState>, mut labels: Query<&mut Text, With<ScoreText>>) {
        if !state.is_changed() {
            return;
        }
        let label = score_label(state.score.total());
        for mut text in &mut labels {
            if text.0 != label {
                text.0.clone_from(&label);
            }
        }
    }

    impl Plugin for HudPlugin {
        fn build(&self, app: &mut App) {
            app.add_systems(Startup, spawn_score_text);
            app.add_systems(Update, update_score_text.in_set(ArcherySet::Hud));
        }
    }
}
