mod geo_id;
mod state;

pub use geo_id::GeoId;
pub use state::state_fips;
