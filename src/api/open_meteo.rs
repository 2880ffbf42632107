//! [Open-Meteo](https://open-meteo.com) current weather.

use chrono::{NaiveDateTime, Timelike};
use itertools::Itertools;
use reqwest::{Client, Url};
use serde::{Deserialize, Deserializer, de::Unexpected};

use crate::{
    api::{client, coordinates::Coordinates},
    core::environment::Conditions,
    prelude::*,
    quantity::{humidity::Percent, temperature::Celsius},
};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn try_new() -> Result<Self> {
        Ok(Self {
            client: client::try_new()?,
            base_url: Url::parse("https://api.open-meteo.com/v1/forecast")?,
        })
    }

    #[instrument(skip_all, fields(coordinates = %coordinates))]
    pub async fn get_conditions(&self, coordinates: Coordinates) -> Result<Conditions> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("latitude", &coordinates.latitude.to_string())
            .append_pair("longitude", &coordinates.longitude.to_string())
            .append_pair("current_weather", "true")
            .append_pair("hourly", "relativehumidity_2m")
            .append_pair("timezone", "auto");
        let forecast = self
            .client
            .get(url)
            .send()
            .await
            .context("failed to request the weather")?
            .error_for_status()
            .context("weather request failed")?
            .json::<Forecast>()
            .await
            .context("failed to deserialize the weather")?;
        let conditions = forecast.current_conditions()?;
        info!(
            temperature = %conditions.temperature,
            humidity = %conditions.humidity,
            "fetched the weather"
        );
        Ok(conditions)
    }
}

#[derive(Deserialize)]
struct Forecast {
    current_weather: CurrentWeather,
    hourly: Hourly,
}

impl Forecast {
    /// Current temperature with the humidity of the current hour.
    ///
    /// Falls back to the first hourly entry when the current hour is missing from the series.
    fn current_conditions(&self) -> Result<Conditions> {
        ensure!(
            self.hourly.time.len() == self.hourly.relative_humidity.len(),
            "hourly series lengths differ: {} times and {} humidity values",
            self.hourly.time.len(),
            self.hourly.relative_humidity.len(),
        );
        let current_hour = self.current_weather.time.with_minute(0).context("invalid time")?;
        let humidity = match self.hourly.time.iter().find_position(|time| **time == current_hour) {
            Some((index, _)) => self.hourly.relative_humidity[index],
            None => {
                warn!(%current_hour, "current hour is missing, using the first entry");
                *self.hourly.relative_humidity.first().context("there is no hourly humidity")?
            }
        };
        Ok(Conditions { temperature: self.current_weather.temperature, humidity })
    }
}

#[derive(Deserialize)]
struct CurrentWeather {
    temperature: Celsius,

    #[serde(deserialize_with = "deserialize_time")]
    time: NaiveDateTime,
}

#[derive(Deserialize)]
struct Hourly {
    #[serde(deserialize_with = "deserialize_times")]
    time: Vec<NaiveDateTime>,

    #[serde(rename = "relativehumidity_2m")]
    relative_humidity: Vec<Percent>,
}

fn parse_time<E: serde::de::Error>(string: &str) -> Result<NaiveDateTime, E> {
    NaiveDateTime::parse_from_str(string, TIME_FORMAT)
        .map_err(|_| E::invalid_value(Unexpected::Str(string), &"valid date/time"))
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    parse_time(&String::deserialize(deserializer)?)
}

fn deserialize_times<'de, D>(deserializer: D) -> Result<Vec<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer)?.iter().map(|string| parse_time(string)).collect()
}
