use gloo::storage::{LocalStorage, Storage};
use rockhound_core::{KeyValueStore, ScoreBoard, StoreError};

/// Browser local storage behind the core's key-value interface.
///
/// Disabled or missing storage reads as empty and refuses writes; the core absorbs both.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalStore;

pub(crate) type Scores = ScoreBoard<LocalStore>;

impl LocalStore {
    /// `LocalStorage::raw` throws when storage is disabled, so check first.
    fn storage() -> Result<web_sys::Storage, StoreError> {
        match gloo::utils::window().local_storage() {
            Ok(Some(_)) => Ok(LocalStorage::raw()),
            _ => Err(StoreError::Unavailable),
        }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, &value)
            .map_err(|err| StoreError::WriteFailed(format!("{err:?}")))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use rockhound_core::{ReferenceFilters, Rarity, TOOL_SHED_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn scores_persist_in_local_storage() {
        let mut store = LocalStore;
        store.set(TOOL_SHED_KEY, "[]".into()).unwrap();

        let mut scores = Scores::new(LocalStore);
        scores.save_tool_shed_score(120);
        scores.save_tool_shed_score(1600);

        assert_eq!(Scores::new(LocalStore).tool_shed_scores(), [1600, 120]);
    }

    #[wasm_bindgen_test]
    fn stored_values_are_kept_verbatim() {
        let mut store = LocalStore;
        store.set(TOOL_SHED_KEY, "[160,40]".into()).unwrap();

        assert_eq!(
            LocalStorage::raw().get_item(TOOL_SHED_KEY).unwrap().as_deref(),
            Some("[160,40]")
        );
        assert_eq!(store.get(TOOL_SHED_KEY).as_deref(), Some("[160,40]"));
    }

    #[wasm_bindgen_test]
    fn filters_persist_in_local_storage() {
        let mut store = LocalStore;
        let filters = ReferenceFilters {
            rarity: Some(Rarity::Rare),
            ..ReferenceFilters::default()
        };

        filters.save(&mut store);

        assert_eq!(ReferenceFilters::load(&LocalStore), filters);
    }
}
