pub mod models;
pub mod ranking;
pub mod record;

pub use models::{
    RelayPayload, RelayStanding, StandingInput, TeamStanding, DEFAULT_PRIORITY_TEAM, UNRANKED,
};
pub use ranking::rank_standings;
pub use record::parse_record;
