#![warn(
    clippy::unwrap_used,
    clippy::cast_lossless,
    clippy::unimplemented,
    clippy::indexing_slicing,
    clippy::expect_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Bevy integration of the scene mode transitioner: a [`Scene`] and its
//! [`SceneTransitioner`] as resources, morphs requested through
//! [`MorphRequest`] events and advanced every frame.
use bevy::{
    input::{mouse::MouseWheel, Input},
    log::error,
    prelude::*,
};
use houtu_scene::{Scene, SceneTransitioner};

mod events;
mod settings;
mod systems;

pub use events::*;
pub use houtu_scene as scene;
pub use settings::*;
pub use systems::MorphSystems;

#[derive(Default)]
pub struct SceneTransitionerPlugin {
    pub settings: TransitionerSettings,
}

impl SceneTransitionerPlugin {
    pub fn new(settings: TransitionerSettings) -> Self {
        Self { settings }
    }
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(Self::new(TransitionerSettings::from_json(json)?))
    }
}

impl bevy::app::Plugin for SceneTransitionerPlugin {
    fn build(&self, app: &mut App) {
        let mut scene = Scene::new(self.settings.scene_options());
        let listeners = systems::MorphListeners::subscribe(&mut scene);
        let transitioner = SceneTransitioner::new(&scene);
        app.add_event::<MorphRequest>()
            .add_event::<MorphStarted>()
            .add_event::<MorphCompleted>()
            .add_event::<MouseWheel>()
            .init_resource::<Input<MouseButton>>()
            .init_resource::<Time>()
            .insert_resource(self.settings.clone())
            .insert_resource(listeners)
            .insert_resource(transitioner)
            .insert_resource(scene)
            .configure_set(
                Update,
                MorphSystems.run_if(resource_exists::<SceneTransitioner>()),
            )
            .add_systems(
                Update,
                (
                    systems::handle_morph_requests,
                    systems::complete_morph_on_input,
                    systems::advance_morph_tweens,
                    systems::forward_morph_events,
                )
                    .chain()
                    .in_set(MorphSystems),
            );
    }
}

/// Discards the morph in flight, removes the [`SceneTransitioner`] resource
/// and unsubscribes the plugin from the scene's morph notifications. Morph
/// systems stop running afterwards. The [`Scene`] stays, rolled back to the
/// mode it had before the discarded morph.
pub fn teardown(world: &mut World) {
    let transitioner = world.remove_resource::<SceneTransitioner>();
    let listeners = world.remove_resource::<systems::MorphListeners>();
    let Some(mut scene) = world.get_resource_mut::<Scene>() else {
        if transitioner.is_some() || listeners.is_some() {
            error!("scene resource missing while tearing down its transitioner");
        }
        return;
    };
    if let Some(listeners) = listeners {
        listeners.unsubscribe(&mut scene);
    }
    if let Some(transitioner) = transitioner {
        transitioner.destroy(&mut scene);
    }
}
