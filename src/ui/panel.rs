// src/ui/panel.rs
//! The scene control panel
//!
//! Immediate mode keeps the widgets in sync with the selection for free:
//! every frame the controls are rebuilt from whatever object is selected,
//! whether it was picked by click or through the dropdown.

use imgui::{Condition, Ui};

use crate::gfx::resources::TextureKind;
use crate::gfx::scene::object::{MAX_SCALE, MIN_SCALE};
use crate::gfx::scene::{Scene, ShapeKind};

pub fn control_panel(ui: &Ui, scene: &mut Scene) {
    ui.window("Scene Controls")
        .size([320.0, 430.0], Condition::FirstUseEver)
        .position([16.0, 16.0], Condition::FirstUseEver)
        .build(|| {
            object_section(ui, scene);
            ui.separator();
            effects_section(ui, scene);
            ui.separator();
            lighting_section(ui, scene);
            ui.separator();
            ui.text_disabled("Click an object or use the list.");
            ui.text_disabled("WASD moves, drag orbits, wheel zooms.");
        });
}

fn object_section(ui: &Ui, scene: &mut Scene) {
    let labels: Vec<&str> = ShapeKind::ALL.iter().map(|k| k.label()).collect();
    let index = scene
        .selected()
        .and_then(|kind| ShapeKind::ALL.iter().position(|&k| k == kind));

    let preview = index.map(|i| labels[i]).unwrap_or("Select...");
    if let Some(_token) = ui.begin_combo("Object", preview) {
        for (i, label) in labels.iter().enumerate() {
            if ui.selectable_config(label).selected(index == Some(i)).build() {
                scene.select(ShapeKind::ALL[i]);
            }
        }
    }

    let Some(kind) = scene.selected() else {
        ui.text_disabled("Nothing selected");
        return;
    };

    // Read current values, then apply the widget results through the
    // mutators so clamping and dirty tracking stay in one place.
    let (mut color, mut scale, texture, rotation_enabled) = {
        let object = scene.object(kind);
        (object.color, object.scale, object.texture, object.rotation_enabled)
    };

    if ui.color_edit3("Color", &mut color) {
        scene.object_mut(kind).set_color(color);
    }

    if ui
        .slider_config("Scale", MIN_SCALE, MAX_SCALE)
        .display_format("%.1f")
        .build(&mut scale)
    {
        scene.object_mut(kind).set_scale(scale);
    }

    let texture_labels: Vec<&str> = TextureKind::ALL.iter().map(|t| t.label()).collect();
    let mut texture_index = TextureKind::ALL
        .iter()
        .position(|&t| t == texture)
        .unwrap_or(0);
    if ui.combo_simple_string("Texture", &mut texture_index, &texture_labels) {
        scene.object_mut(kind).set_texture(TextureKind::ALL[texture_index]);
    }

    let rotate_label = if rotation_enabled { "Stop" } else { "Rotate" };
    if ui.button(rotate_label) {
        scene.object_mut(kind).toggle_rotation();
    }
    ui.same_line();
    if ui.button("Reset") {
        scene.object_mut(kind).reset();
    }
}

fn effects_section(ui: &Ui, scene: &mut Scene) {
    ui.checkbox("Bloom", &mut scene.bloom_enabled);
    ui.checkbox("Outline selection", &mut scene.outline_enabled);
}

fn lighting_section(ui: &Ui, scene: &mut Scene) {
    ui.slider("Ambient light", 0.0, 1.0, &mut scene.ambient_intensity);
}
