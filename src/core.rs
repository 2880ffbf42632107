pub mod advisor;
pub mod calculator;
pub mod comfort;
pub mod duty_ratio;
pub mod environment;
pub mod tariff;
