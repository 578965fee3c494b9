pub mod attendance;
pub mod collect;
