// Library root: domain vocabulary, formation layout, report classification
// and request assembly for the GafferOS client.

pub mod assembler;
pub mod classify;
pub mod formation;
pub mod player;
pub mod position;
pub mod report;
pub mod request;
