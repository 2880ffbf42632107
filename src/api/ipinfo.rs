//! [IPinfo](https://ipinfo.io) geolocation of the caller's public IP address.

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    api::{client, coordinates::Coordinates},
    prelude::*,
};

pub struct Api {
    client: Client,
    url: Url,
}

impl Api {
    pub fn try_new() -> Result<Self> {
        Ok(Self { client: client::try_new()?, url: Url::parse("https://ipinfo.io/json")? })
    }

    #[instrument(skip_all, fields(url = %self.url))]
    pub async fn get_coordinates(&self) -> Result<Coordinates> {
        let location = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .context("failed to request the location")?
            .error_for_status()
            .context("location request failed")?
            .json::<Location>()
            .await
            .context("failed to deserialize the location")?;
        info!(coordinates = %location.coordinates, city = location.city.as_deref(), "located");
        Ok(location.coordinates)
    }
}

#[serde_as]
#[derive(Deserialize)]
struct Location {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "loc")]
    coordinates: Coordinates,

    #[serde(default)]
    city: Option<String>,
}
