pub mod coalesce;
pub mod http_serde_priv;
pub mod is_default;
