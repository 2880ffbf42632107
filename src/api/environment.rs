//! Outdoor conditions: manual input or an IP geolocation and weather lookup.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::Serialize;

use crate::{
    api::{ipinfo, open_meteo},
    core::environment::Conditions,
    prelude::*,
    quantity::{humidity::Percent, temperature::Celsius},
};

#[async_trait]
pub trait EnvironmentProvider: Sync {
    async fn get_outdoor_conditions(&self) -> Result<Conditions>;
}

/// IP address → coordinates → current weather.
pub struct Lookup {
    ipinfo: ipinfo::Api,
    open_meteo: open_meteo::Api,
}

impl Lookup {
    pub fn try_new() -> Result<Self> {
        Ok(Self { ipinfo: ipinfo::Api::try_new()?, open_meteo: open_meteo::Api::try_new()? })
    }
}

#[async_trait]
impl EnvironmentProvider for Lookup {
    #[instrument(skip_all)]
    async fn get_outdoor_conditions(&self) -> Result<Conditions> {
        let coordinates = self.ipinfo.get_coordinates().await?;
        self.open_meteo.get_conditions(coordinates).await
    }
}

/// Manually entered outdoor values, each optional.
#[derive(Copy, Clone, Debug, Default)]
pub struct ManualConditions {
    pub temperature: Option<Celsius>,
    pub humidity: Option<Percent>,
}

impl ManualConditions {
    /// Used for whatever is missing when the lookup is skipped or fails.
    pub const DEFAULT: Conditions = Conditions::new(32.0, 75.0);

    const fn complete(self) -> Option<Conditions> {
        match (self.temperature, self.humidity) {
            (Some(temperature), Some(humidity)) => Some(Conditions { temperature, humidity }),
            _ => None,
        }
    }

    /// Fill the missing values in from the other conditions.
    fn or(self, conditions: Conditions) -> Conditions {
        Conditions {
            temperature: self.temperature.unwrap_or(conditions.temperature),
            humidity: self.humidity.unwrap_or(conditions.humidity),
        }
    }

    fn or_default(self) -> Conditions {
        self.or(Self::DEFAULT)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    Manual,
    Lookup,

    /// The lookup failed, manual or default values are used instead.
    Fallback,
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Lookup => write!(f, "lookup"),
            Self::Fallback => write!(f, "fallback (lookup failed)"),
        }
    }
}

/// Resolve the outdoor conditions, never failing.
///
/// Complete manual values win. Otherwise the provider is asked, if any,
/// and its failure degrades to the manual or default values.
#[instrument(skip_all)]
pub async fn resolve(
    provider: Option<&dyn EnvironmentProvider>,
    manual: ManualConditions,
) -> (Conditions, Source) {
    if let Some(conditions) = manual.complete() {
        return (conditions, Source::Manual);
    }
    let Some(provider) = provider else {
        return (manual.or_default(), Source::Manual);
    };
    match provider.get_outdoor_conditions().await {
        Ok(conditions) => (manual.or(conditions), Source::Lookup),
        Err(error) => {
            warn!("outdoor conditions are unavailable, falling back to manual input: {error:#}");
            (manual.or_default(), Source::Fallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    struct Fixed(Conditions);

    #[async_trait]
    impl EnvironmentProvider for Fixed {
        async fn get_outdoor_conditions(&self) -> Result<Conditions> {
            Ok(self.0)
        }
    }

    struct Unavailable;

    #[async_trait]
    impl EnvironmentProvider for Unavailable {
        async fn get_outdoor_conditions(&self) -> Result<Conditions> {
            bail!("network is unreachable")
        }
    }

    #[derive(Default)]
    struct Spy(AtomicBool);

    #[async_trait]
    impl EnvironmentProvider for Spy {
        async fn get_outdoor_conditions(&self) -> Result<Conditions> {
            self.0.store(true, Ordering::Relaxed);
            Ok(Conditions::new(0.0, 0.0))
        }
    }

    #[tokio::test]
    async fn test_complete_manual_skips_lookup() {
        let spy = Spy::default();
        let manual =
            ManualConditions { temperature: Some(Celsius(30.0)), humidity: Some(Percent(70.0)) };
        let (conditions, source) = resolve(Some(&spy), manual).await;
        assert_eq!(conditions, Conditions::new(30.0, 70.0));
        assert_eq!(source, Source::Manual);
        assert!(!spy.0.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn test_lookup_ok() {
        let provider = Fixed(Conditions::new(33.4, 62.0));
        let (conditions, source) = resolve(Some(&provider), ManualConditions::default()).await;
        assert_eq!(conditions, Conditions::new(33.4, 62.0));
        assert_eq!(source, Source::Lookup);
    }

    #[tokio::test]
    async fn test_partial_manual_overrides_lookup() {
        let provider = Fixed(Conditions::new(33.4, 62.0));
        let manual = ManualConditions { temperature: Some(Celsius(29.0)), humidity: None };
        let (conditions, _) = resolve(Some(&provider), manual).await;
        assert_eq!(conditions, Conditions::new(29.0, 62.0));
    }

    #[tokio::test]
    async fn test_lookup_failure_falls_back_to_defaults() {
        let (conditions, source) = resolve(Some(&Unavailable), ManualConditions::default()).await;
        assert_eq!(conditions, Conditions::new(32.0, 75.0));
        assert_eq!(source, Source::Fallback);
    }

    #[tokio::test]
    async fn test_lookup_failure_keeps_partial_manual() {
        let manual = ManualConditions { temperature: None, humidity: Some(Percent(80.0)) };
        let (conditions, source) = resolve(Some(&Unavailable), manual).await;
        assert_eq!(conditions, Conditions::new(32.0, 80.0));
        assert_eq!(source, Source::Fallback);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(Source::Manual.to_string(), "manual");
        assert_eq!(Source::Lookup.to_string(), "lookup");
        assert_eq!(Source::Fallback.to_string(), "fallback (lookup failed)");
    }

    #[tokio::test]
    async fn test_offline_uses_defaults() {
        let (conditions, source) = resolve(None, ManualConditions::default()).await;
        assert_eq!(conditions, ManualConditions::DEFAULT);
        assert_eq!(source, Source::Manual);
    }
}
