use std::sync::Arc;

use tokio::sync::watch;

use worktrack_core::settings::{AppSettings, SettingsPatch};

use super::Optimistic;
use crate::commands::StoreApi;
use crate::error::Result;

pub struct SettingsState {
    api: StoreApi,
    settings: Optimistic<AppSettings>,
}

impl SettingsState {
    pub fn new(api: StoreApi) -> Self {
        Self {
            api,
            settings: Optimistic::default(),
        }
    }

    pub fn settings(&self) -> Arc<AppSettings> {
        self.settings.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<AppSettings>> {
        self.settings.subscribe()
    }

    pub async fn load(&mut self) -> Result<()> {
        let settings = self.api.get_settings().await?;
        self.settings.replace(settings);
        Ok(())
    }

    /// Shows the merged settings at once and keeps what the store returns.
    pub async fn update(&mut self, patch: SettingsPatch) -> Result<AppSettings> {
        patch.validate()?;
        let shown = patch.clone();
        let api = self.api.clone();

        self.settings
            .mutate_settle(
                "update_settings",
                |settings| shown.apply_to(settings),
                async move { api.set_settings(patch).await },
                |settings, stored| *settings = stored.clone(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordStore;
    use crate::test_support::FlakyBackend;
    use worktrack_core::settings::{RegionCode, Theme};

    async fn state_with(backend: &FlakyBackend) -> SettingsState {
        let store = RecordStore::new(Arc::new(backend.clone()));
        store.init().await.unwrap();
        let mut state = SettingsState::new(StoreApi::new(Arc::new(store)));
        state.load().await.unwrap();
        state
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let backend = FlakyBackend::new();
        let mut state = state_with(&backend).await;

        let settings = state
            .update(SettingsPatch::new().with_theme(Theme::Dark))
            .await
            .unwrap();

        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.region, RegionCode::BY);
        assert_eq!(*state.settings(), settings);
    }

    #[tokio::test]
    async fn test_failed_update_restores_settings() {
        let backend = FlakyBackend::new();
        let mut state = state_with(&backend).await;
        backend.fail_saves(true);

        let result = state
            .update(SettingsPatch::new().with_region(RegionCode::SH))
            .await;

        assert!(result.unwrap_err().is_write_failure());
        assert_eq!(*state.settings(), AppSettings::default());
    }
}
