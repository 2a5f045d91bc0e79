/*!
Process-wide model selectors (§5: "The global Settings object holds model
selectors... it is process-wide state with documented init/teardown").

Grounded on the existing `lazy_static` singleton ([`crate::material::VACUUM_PERMEABILITY`]);
here the singleton is mutable (guarded by an `RwLock`) since the default
reluctance/core-loss model selectors can be reconfigured at runtime, whereas
the vacuum permeability is a true physical constant.
*/

use crate::core_losses::CoreLossesModel;
use crate::reluctance::GapReluctanceModel;
use std::sync::RwLock;

/// Process-wide default model selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Default gap-reluctance model, used when a call site does not name one
    /// explicitly.
    pub default_reluctance_model: GapReluctanceModel,
    /// Default core-loss model.
    pub default_core_loss_model: CoreLossesModel,
}

impl Default for Settings {
    fn default() -> Self {
        return Self {
            default_reluctance_model: GapReluctanceModel::Zhang,
            default_core_loss_model: CoreLossesModel::Steinmetz,
        };
    }
}

lazy_static::lazy_static! {
    static ref INSTANCE: RwLock<Settings> = RwLock::new(Settings::default());
}

/// Returns a copy of the process-wide settings.
pub fn get_instance() -> Settings {
    return *INSTANCE.read().expect("settings lock poisoned");
}

/// Replaces the process-wide settings.
pub fn set_instance(settings: Settings) {
    *INSTANCE.write().expect("settings lock poisoned") = settings;
}

/// Resets the process-wide settings to their defaults. Intended for test
/// teardown between cases that call [`set_instance`].
pub fn reset() {
    set_instance(Settings::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_use_zhang_and_steinmetz() {
        reset();
        let settings = get_instance();
        assert_eq!(settings.default_reluctance_model, GapReluctanceModel::Zhang);
        assert_eq!(settings.default_core_loss_model, CoreLossesModel::Steinmetz);
    }

    #[test]
    fn set_instance_is_observed_by_get_instance() {
        reset();
        set_instance(Settings {
            default_reluctance_model: GapReluctanceModel::Classic,
            default_core_loss_model: CoreLossesModel::Steinmetz,
        });
        assert_eq!(get_instance().default_reluctance_model, GapReluctanceModel::Classic);
        reset();
    }
}
