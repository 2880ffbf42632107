mod client;
pub mod coordinates;
pub mod environment;
pub mod ipinfo;
pub mod open_meteo;
