use super::PanelFocus;
use crate::prelude::*;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParameterPanel>()
            .add_systems(Startup, configure_visuals_system)
            .add_systems(Update, ui_system);
    }
}

/// Live panel state. Generator parameters are edited here and only committed
/// to [`GalaxyConfig`] once the edit is finished.
#[derive(Resource)]
pub struct ParameterPanel {
    draft: GalaxyParams,
    fixed_seed: bool,
    seed: u64,
    dirty: bool,
}

impl Default for ParameterPanel {
    fn default() -> Self {
        Self {
            draft: GalaxyParams::default(),
            fixed_seed: false,
            seed: 1,
            dirty: false,
        }
    }
}

impl ParameterPanel {
    /// Copies the draft into `config` when an edit is pending and no pointer
    /// button is held. Returns whether anything was committed.
    fn commit(&mut self, config: &mut GalaxyConfig, pointer_down: bool) -> bool {
        if !self.dirty || pointer_down {
            return false;
        }
        config.params = self.draft;
        config.seed = self.fixed_seed.then_some(self.seed);
        self.dirty = false;
        true
    }
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

fn to_egui_color(color: Srgba) -> [u8; 3] {
    [color.red, color.green, color.blue].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn from_egui_color([r, g, b]: [u8; 3]) -> Srgba {
    Srgba::rgb_u8(r, g, b)
}

fn color_row(ui: &mut egui::Ui, label: &str, color: &mut Srgba) -> bool {
    let mut rgb = to_egui_color(*color);
    let changed = ui
        .horizontal(|ui| {
            let changed = ui.color_edit_button_srgb(&mut rgb).changed();
            ui.label(label);
            changed
        })
        .inner;
    if changed {
        *color = from_egui_color(rgb);
    }
    changed
}

fn shape_ui(draft: &mut GalaxyParams, ui: &mut egui::Ui) -> bool {
    let minval = GalaxyParams::MIN;
    let maxval = GalaxyParams::MAX;
    let mut changed = false;

    egui::CollapsingHeader::new("Galaxy Parameters")
        .default_open(true)
        .show(ui, |ui| {
            changed |= ui
                .add(
                    egui::Slider::new(&mut draft.count, minval.count..=maxval.count)
                        .step_by(GalaxyParams::COUNT_STEP as f64)
                        .text("Count"),
                )
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut draft.radius, minval.radius..=maxval.radius).text("Radius"))
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut draft.branches, minval.branches..=maxval.branches)
                        .text("Branches"),
                )
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut draft.spin, minval.spin..=maxval.spin).text("Spin"))
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(
                        &mut draft.randomness,
                        minval.randomness..=maxval.randomness,
                    )
                    .text("Randomness"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(
                        &mut draft.randomness_power,
                        minval.randomness_power..=maxval.randomness_power,
                    )
                    .text("Randomness Power"),
                )
                .changed();
            changed |= color_row(ui, "Inside Color", &mut draft.inside_color);
            changed |= color_row(ui, "Outside Color", &mut draft.outside_color);
        });
    ui.separator();
    changed
}

fn display_ui(settings: &mut DisplaySettings, ui: &mut egui::Ui) {
    let minval = DisplaySettings::MIN;
    let maxval = DisplaySettings::MAX;

    egui::CollapsingHeader::new("Display")
        .default_open(true)
        .show(ui, |ui| {
            ui.add(egui::Slider::new(&mut settings.size, minval.size..=maxval.size).text("Size"));
            ui.checkbox(&mut settings.rotation_active, "Rotate");
            ui.checkbox(&mut settings.rotation_clockwise, "Clockwise");
            ui.add(
                egui::Slider::new(
                    &mut settings.rotation_speed,
                    minval.rotation_speed..=maxval.rotation_speed,
                )
                .text("Rotation Speed"),
            );
        });
    ui.separator();
}

fn ui_system(
    mut contexts: EguiContexts,
    mut panel: ResMut<ParameterPanel>,
    mut galaxy_config: ResMut<GalaxyConfig>,
    mut display_settings: ResMut<DisplaySettings>,
    mut focus: ResMut<PanelFocus>,
) {
    let ctx = contexts.ctx_mut();
    let panel = &mut *panel;
    let mut reroll = false;

    egui::SidePanel::left("side_panel")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Configuration");

            panel.dirty |= shape_ui(&mut panel.draft, ui);

            egui::CollapsingHeader::new("Seed").show(ui, |ui| {
                panel.dirty |= ui.checkbox(&mut panel.fixed_seed, "Fixed seed").changed();
                ui.add_enabled_ui(panel.fixed_seed, |ui| {
                    panel.dirty |= ui.add(egui::DragValue::new(&mut panel.seed)).changed();
                });
            });
            ui.separator();

            display_ui(&mut display_settings, ui);

            reroll = ui.button("Regenerate").clicked();
        });

    let pointer_down = ctx.input(|i| i.pointer.any_down());
    let committed = panel.commit(galaxy_config.bypass_change_detection(), pointer_down);
    if committed || reroll {
        if reroll {
            galaxy_config.reroll = galaxy_config.reroll.wrapping_add(1);
        }
        galaxy_config.set_changed();
    }

    let over_panel = ctx.is_pointer_over_area() || ctx.wants_pointer_input();
    if focus.0 != over_panel {
        focus.0 = over_panel;
    }
}
