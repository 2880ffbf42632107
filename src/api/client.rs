use std::time::Duration;

use reqwest::Client;

use crate::prelude::*;

/// Lookups give up after this long.
const TIMEOUT: Duration = Duration::from_secs(5);

/// Build a default client.
pub fn try_new() -> Result<Client> {
    Ok(Client::builder().timeout(TIMEOUT).build()?)
}
