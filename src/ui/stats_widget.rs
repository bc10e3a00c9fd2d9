use crate::prelude::*;
use bevy::diagnostic::DiagnosticsStore;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

pub struct StatsWidgetPlugin;

impl Plugin for StatsWidgetPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_widget)
            .add_systems(Update, update_widget_system)
            .add_plugins(FrameTimeDiagnosticsPlugin::default());
    }
}

#[derive(Component)]
enum StatsLine {
    Fps,
    Points,
}

fn setup_widget(mut commands: Commands) {
    let holder = commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::FlexStart,
                width: Val::Px(260.),
                right: Val::Percent(1.),
                top: Val::Percent(1.),
                bottom: Val::Auto,
                left: Val::Auto,
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(Color::linear_rgba(0.0, 0.03, 0.08, 0.5)),
            GlobalZIndex(i32::MAX - 1),
        ))
        .id();

    for line in [StatsLine::Fps, StatsLine::Points] {
        let root = commands
            .spawn((
                Node {
                    padding: UiRect::all(Val::Px(4.0)),
                    ..default()
                },
                GlobalZIndex(i32::MAX),
            ))
            .id();
        let text = commands
            .spawn((
                line,
                Text(" N/A".to_string()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
            ))
            .id();
        commands.entity(holder).add_child(root);
        commands.entity(root).add_child(text);
    }
}

fn format_points(stats: &GenerationStats) -> String {
    format!(
        "{:>7} {} on {} branches ({:.1} ms)",
        "Points:",
        stats.points,
        stats.branches,
        stats.elapsed.as_secs_f64() * 1000.0
    )
}

fn update_widget_system(
    diagnostics: Res<DiagnosticsStore>,
    stats: Res<GenerationStats>,
    mut query: Query<(&mut Text, &StatsLine)>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);

    for (mut text, line) in &mut query {
        text.0 = match line {
            StatsLine::Fps => format!("{:>7} {fps:.1} ({frame_time:.2} ms)", "FPS:"),
            StatsLine::Points => format_points(&stats),
        };
    }
}
