use worktrack_core::settings::{AppSettings, SettingsPatch};
use worktrack_core::storage::Settings;

use super::StoreApi;
use crate::error::Result;

impl StoreApi {
    pub async fn get_settings(&self) -> Result<AppSettings> {
        Ok(self.store.get::<Settings>().await?)
    }

    /// Merges `patch` into the stored settings and returns the result.
    pub async fn set_settings(&self, patch: SettingsPatch) -> Result<AppSettings> {
        patch.validate()?;
        let settings = self
            .store
            .update::<Settings, _>(|settings| {
                patch.apply_to(settings);
                Ok(settings.clone())
            })
            .await?;
        tracing::debug!(region = %settings.region, hours = settings.work_hours_per_day, "Settings stored");
        Ok(settings)
    }
}
