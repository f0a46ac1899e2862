pub mod learn;
pub mod mission;

pub use learn::SafetyModel;
pub use mission::{JsonlMissionLog, MissionLog, MissionRecord, NullMissionLog};
